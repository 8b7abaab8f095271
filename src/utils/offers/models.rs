use serde::{Deserialize, Serialize};
use time::serde::timestamp;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::utils::admission::models::{AttendanceStatus, DinnerBookingStatus, Rsvp};
use crate::utils::capacity::models::ReservationUnits;

pub const OFFER_TOKEN_TYPE: &str = "waitlist_offer";

/// Deep copy of the RSVP fields needed to re-admit the guest. Embedded in
/// the signed payload so the terms cannot be renegotiated at redemption.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RsvpSnapshot {
    pub name: String,
    pub email: String,
    pub party_size: u32,
    pub plus_ones: u32,
    pub wants_dinner: bool,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub dinner_time_slot: Option<OffsetDateTime>,
    pub dinner_party_size: Option<u32>,
}

impl RsvpSnapshot {
    pub fn of(rsvp: &Rsvp) -> Self {
        Self {
            name: rsvp.name.clone(),
            email: rsvp.email.clone(),
            party_size: rsvp.party_size(),
            plus_ones: rsvp.plus_ones,
            wants_dinner: rsvp.wants_dinner,
            dinner_time_slot: rsvp.dinner_time_slot,
            dinner_party_size: rsvp.dinner_party_size,
        }
    }

    /// Same arithmetic as admission, over the snapshotted terms.
    pub fn units(&self) -> ReservationUnits {
        match (self.wants_dinner, self.dinner_time_slot, self.dinner_party_size) {
            (true, Some(time), Some(seats)) => ReservationUnits {
                general: self.party_size.saturating_sub(seats),
                dinner: Some((time, seats)),
            },
            _ => ReservationUnits::general_only(self.party_size),
        }
    }

    pub fn confirmed_statuses(&self) -> (AttendanceStatus, DinnerBookingStatus) {
        let dinner_booking_status = if self.wants_dinner {
            DinnerBookingStatus::Confirmed
        } else {
            DinnerBookingStatus::None
        };
        (AttendanceStatus::Confirmed, dinner_booking_status)
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct OfferClaims {
    pub jti: Uuid,
    pub event_id: Uuid,
    pub rsvp_id: Uuid,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub exp: u64,
    pub rsvp_details: RsvpSnapshot,
}

impl OfferClaims {
    pub fn new(rsvp: &Rsvp, duration: Duration) -> Self {
        Self {
            jti: Uuid::new_v4(),
            event_id: rsvp.event_id,
            rsvp_id: rsvp.id,
            email: rsvp.email.clone(),
            kind: OFFER_TOKEN_TYPE.to_string(),
            exp: jsonwebtoken::get_current_timestamp() + duration.whole_seconds().abs() as u64,
            rsvp_details: RsvpSnapshot::of(rsvp),
        }
    }
}

/// Signal from the payment collaborator, consumed at redemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Settled,
    Failed,
    Abandoned,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RedemptionResult {
    pub rsvp_id: Uuid,
    pub event_id: Uuid,
    pub attendance_status: AttendanceStatus,
    pub dinner_booking_status: DinnerBookingStatus,
}
