use serde::{Deserialize, Serialize};
use time::serde::timestamp;
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::utils::capacity::models::ReservationUnits;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Confirmed,
    Waitlisted,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DinnerBookingStatus {
    None,
    Confirmed,
    Waitlist,
    Cocktails,
    CocktailsWaitlist,
}

/// A raw RSVP submission. `party_size` is the guest plus their plus-ones.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct AdmissionRequest {
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub plus_ones: u32,
    pub wants_dinner: bool,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub dinner_time_slot: Option<OffsetDateTime>,
    pub dinner_party_size: Option<u32>,
}

impl AdmissionRequest {
    pub fn party_size(&self) -> u32 {
        1 + self.plus_ones
    }

    /// The atomic two-resource ask: dinner guests count against their slot,
    /// the cocktails-only portion of the party against the general cap.
    pub fn units(&self) -> ReservationUnits {
        match (self.wants_dinner, self.dinner_time_slot, self.dinner_party_size) {
            (true, Some(time), Some(seats)) => ReservationUnits {
                general: self.party_size().saturating_sub(seats),
                dinner: Some((time, seats)),
            },
            _ => ReservationUnits::general_only(self.party_size()),
        }
    }

    /// The whole party on cocktail standing, no dinner seats held.
    pub fn cocktails_only(&self) -> ReservationUnits {
        ReservationUnits::general_only(self.party_size())
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct AdmissionResult {
    pub attendance_status: AttendanceStatus,
    pub dinner_booking_status: DinnerBookingStatus,
}

impl AdmissionResult {
    pub fn confirmed(dinner_booking_status: DinnerBookingStatus) -> Self {
        Self {
            attendance_status: AttendanceStatus::Confirmed,
            dinner_booking_status,
        }
    }
}

/// An RSVP record as the persistence collaborator stores it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Rsvp {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub email: String,
    pub plus_ones: u32,
    pub wants_dinner: bool,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub dinner_time_slot: Option<OffsetDateTime>,
    pub dinner_party_size: Option<u32>,
    pub attendance_status: AttendanceStatus,
    pub dinner_booking_status: DinnerBookingStatus,
}

impl Rsvp {
    pub fn party_size(&self) -> u32 {
        1 + self.plus_ones
    }
}
