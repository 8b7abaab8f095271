pub mod errors;
pub mod models;
pub mod policy;

use tracing::{debug, trace};
use uuid::Uuid;
use validator::Validate;

use crate::utils::capacity::errors::CapacityError;
use crate::utils::capacity::models::CapacityConfig;
use crate::utils::capacity::CapacityLedger;
use crate::validation::{ValidateContent, ValidateContentError};

use self::errors::AdmissionError;
use self::models::{AdmissionRequest, AdmissionResult, AttendanceStatus, DinnerBookingStatus};
use self::policy::resolve_overflow;

/// Turns a raw RSVP submission into a status decision. The caller persists
/// the resulting statuses; capacity is committed here, atomically per party.
pub fn decide_admission(
    ledger: &CapacityLedger,
    event_id: Uuid,
    config: &CapacityConfig,
    request: &AdmissionRequest,
) -> Result<AdmissionResult, AdmissionError> {
    request
        .validate()
        .map_err(ValidateContentError::new)
        .map_err(AdmissionError::Rejected)?;
    request.validate_content()?;
    if request.wants_dinner && !config.dinner_enabled {
        return Err(ValidateContentError::new(
            "Dinner seating is not enabled for this event",
        ))?;
    }

    debug!(
        "Deciding admission for a party of {} (dinner: {})",
        request.party_size(),
        request.wants_dinner
    );

    if !request.wants_dinner {
        return match ledger.try_reserve(event_id, request.units()) {
            Ok(()) => Ok(AdmissionResult::confirmed(DinnerBookingStatus::None)),
            Err(CapacityError::GeneralExceeded) => {
                waitlist_or_reject(config, DinnerBookingStatus::None)
            }
            Err(e) => Err(AdmissionError::Capacity(e)),
        };
    }

    match ledger.try_reserve(event_id, request.units()) {
        Ok(()) => {
            trace!("Cocktails and dinner reserved in one call");
            Ok(AdmissionResult::confirmed(DinnerBookingStatus::Confirmed))
        }
        Err(CapacityError::SlotExceeded) => {
            let outcome = resolve_overflow(config.dinner_overflow_action, request);
            trace!(
                "Dinner slot is full, overflow resolved to {:?}",
                outcome.dinner_booking_status
            );
            match ledger.try_reserve(event_id, outcome.units) {
                Ok(()) => Ok(AdmissionResult::confirmed(outcome.dinner_booking_status)),
                Err(CapacityError::GeneralExceeded) => {
                    waitlist_or_reject(config, DinnerBookingStatus::Waitlist)
                }
                Err(e) => Err(AdmissionError::Capacity(e)),
            }
        }
        Err(CapacityError::GeneralExceeded) => {
            waitlist_or_reject(config, DinnerBookingStatus::Waitlist)
        }
        Err(e) => Err(AdmissionError::Capacity(e)),
    }
}

/// A waitlisted party holds no capacity. With the waitlist disabled the
/// request errors out instead of producing a state.
fn waitlist_or_reject(
    config: &CapacityConfig,
    dinner_booking_status: DinnerBookingStatus,
) -> Result<AdmissionResult, AdmissionError> {
    if !config.waitlist_enabled {
        return Err(AdmissionError::CapacityExceeded);
    }

    trace!("Party placed on the attendance waitlist");

    Ok(AdmissionResult {
        attendance_status: AttendanceStatus::Waitlisted,
        dinner_booking_status,
    })
}
