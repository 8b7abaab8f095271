use crate::utils::capacity::models::{OverflowAction, ReservationUnits};

use super::models::{AdmissionRequest, DinnerBookingStatus};

#[derive(Debug, PartialEq)]
pub struct OverflowOutcome {
    pub dinner_booking_status: DinnerBookingStatus,
    /// The fallback reservation: the whole party attends on cocktail
    /// standing while its dinner wish waits or is dropped.
    pub units: ReservationUnits,
}

/// Resolves the "dinner slot full, general capacity open" case. Pure in the
/// configured action and the request, no ledger access.
pub fn resolve_overflow(action: OverflowAction, request: &AdmissionRequest) -> OverflowOutcome {
    let dinner_booking_status = match action {
        OverflowAction::Waitlist => DinnerBookingStatus::Waitlist,
        OverflowAction::Cocktails => DinnerBookingStatus::Cocktails,
        OverflowAction::Both => DinnerBookingStatus::CocktailsWaitlist,
    };

    OverflowOutcome {
        dinner_booking_status,
        units: request.cocktails_only(),
    }
}
