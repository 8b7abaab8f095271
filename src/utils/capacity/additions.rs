use time::ext::NumericalDuration;
use time::OffsetDateTime;

use crate::app_errors::DefaultContext;

use super::errors::CapacityError;
use super::models::TimeRange;

/// Selectable dinner seatings for an event: the service window start,
/// stepped by the seating interval while still inside the window. The
/// window end is exclusive.
pub fn dinner_slot_times(
    window: &TimeRange,
    interval_hours: u8,
) -> Result<Vec<OffsetDateTime>, CapacityError> {
    if interval_hours == 0 {
        return Err(CapacityError::InvalidSchedule);
    }

    let mut times = vec![];
    let mut seating = window.start;
    while seating < window.end {
        times.push(seating);
        seating = seating.checked_add((interval_hours as i64).hours()).dc()?;
    }

    Ok(times)
}
