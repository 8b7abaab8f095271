use serde::{Deserialize, Serialize};
use time::serde::timestamp;
use time::{Duration, OffsetDateTime};

/// Fallback applied when a dinner slot is full but general capacity remains.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OverflowAction {
    Waitlist,
    Cocktails,
    Both,
}

/// Capacity section of an event record. Owned by the event collaborator,
/// read-only here. `None` caps mean unlimited.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CapacityConfig {
    pub max_attendees: Option<u32>,
    pub dinner_enabled: bool,
    pub dinner_window: Option<TimeRange>,
    pub dinner_seating_interval_hours: u8,
    pub dinner_max_seats_per_slot: Option<u32>,
    pub dinner_overflow_action: OverflowAction,
    pub waitlist_enabled: bool,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct TimeRange {
    #[serde(with = "timestamp")]
    pub start: OffsetDateTime,
    #[serde(with = "timestamp")]
    pub end: OffsetDateTime,
}

impl TimeRange {
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// What one party asks the ledger for: cocktail-standing units against the
/// general cap, and optionally seats in one dinner slot. The two sides are
/// reserved together or not at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReservationUnits {
    pub general: u32,
    pub dinner: Option<(OffsetDateTime, u32)>,
}

impl ReservationUnits {
    pub fn general_only(units: u32) -> Self {
        Self {
            general: units,
            dinner: None,
        }
    }
}

/// Snapshot of one dinner slot for host-facing availability views.
#[derive(Debug, Serialize, PartialEq)]
pub struct DinnerSlot {
    #[serde(with = "timestamp")]
    pub time: OffsetDateTime,
    pub capacity: Option<u32>,
    pub seated: u32,
}

impl DinnerSlot {
    pub fn remaining(&self) -> Option<u32> {
        self.capacity.map(|capacity| capacity.saturating_sub(self.seated))
    }
}
