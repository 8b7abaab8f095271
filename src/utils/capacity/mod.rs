pub mod additions;
pub mod errors;
pub mod models;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use time::OffsetDateTime;
use tracing::{trace, warn};
use uuid::Uuid;

use self::additions::dinner_slot_times;
use self::errors::CapacityError;
use self::models::{CapacityConfig, DinnerSlot, ReservationUnits};

#[derive(Debug)]
struct SeatCounter {
    capacity: Option<u32>,
    taken: u32,
}

impl SeatCounter {
    fn new(capacity: Option<u32>) -> Self {
        Self { capacity, taken: 0 }
    }

    fn remaining(&self) -> Option<u32> {
        self.capacity
            .map(|capacity| capacity.saturating_sub(self.taken))
    }

    fn fits(&self, units: u32) -> bool {
        match self.remaining() {
            Some(remaining) => units <= remaining,
            None => true,
        }
    }

    fn take(&mut self, units: u32) {
        self.taken = self.taken.saturating_add(units);
    }

    fn put_back(&mut self, units: u32) -> u32 {
        let returned = units.min(self.taken);
        self.taken -= returned;
        returned
    }
}

#[derive(Debug)]
struct EventCounters {
    general: SeatCounter,
    slots: HashMap<OffsetDateTime, SeatCounter>,
}

/// Single source of truth for how much is left per event. The per-event
/// mutex is the reservation boundary: `try_reserve` checks both requested
/// resources under it and commits both decrements or none.
#[derive(Debug, Default)]
pub struct CapacityLedger {
    events: RwLock<HashMap<Uuid, Arc<Mutex<EventCounters>>>>,
}

impl CapacityLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_event(
        &self,
        event_id: Uuid,
        config: &CapacityConfig,
    ) -> Result<(), CapacityError> {
        let slots = match (config.dinner_enabled, &config.dinner_window) {
            (true, Some(window)) => {
                dinner_slot_times(window, config.dinner_seating_interval_hours)?
                    .into_iter()
                    .map(|time| (time, SeatCounter::new(config.dinner_max_seats_per_slot)))
                    .collect()
            }
            _ => HashMap::new(),
        };

        let counters = EventCounters {
            general: SeatCounter::new(config.max_attendees),
            slots,
        };

        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(event_id, Arc::new(Mutex::new(counters)));

        trace!("Registered event {event_id} in the capacity ledger");

        Ok(())
    }

    fn event(&self, event_id: Uuid) -> Result<Arc<Mutex<EventCounters>>, CapacityError> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&event_id)
            .cloned()
            .ok_or(CapacityError::UnknownEvent(event_id))
    }

    /// All-or-nothing for one party: either both the general units and the
    /// dinner seats are committed, or neither is.
    pub fn try_reserve(
        &self,
        event_id: Uuid,
        units: ReservationUnits,
    ) -> Result<(), CapacityError> {
        let event = self.event(event_id)?;
        let mut counters = event.lock().unwrap_or_else(PoisonError::into_inner);
        let EventCounters { general, slots } = &mut *counters;

        if !general.fits(units.general) {
            return Err(CapacityError::GeneralExceeded);
        }

        match units.dinner {
            Some((time, seats)) => {
                let slot = slots
                    .get_mut(&time)
                    .ok_or(CapacityError::UnknownSlot(time))?;
                if !slot.fits(seats) {
                    return Err(CapacityError::SlotExceeded);
                }
                general.take(units.general);
                slot.take(seats);
                trace!(
                    "Reserved {} general units and {seats} dinner seats at {time} for event {event_id}",
                    units.general
                );
            }
            None => {
                general.take(units.general);
                trace!("Reserved {} general units for event {event_id}", units.general);
            }
        }

        Ok(())
    }

    /// Reverses a prior reservation, e.g. on payment failure or
    /// cancellation. Counts clamp at zero.
    pub fn release(&self, event_id: Uuid, units: ReservationUnits) -> Result<(), CapacityError> {
        let event = self.event(event_id)?;
        let mut counters = event.lock().unwrap_or_else(PoisonError::into_inner);
        let EventCounters { general, slots } = &mut *counters;

        if general.put_back(units.general) < units.general {
            warn!("Released more general units than were taken for event {event_id}");
        }

        if let Some((time, seats)) = units.dinner {
            let slot = slots
                .get_mut(&time)
                .ok_or(CapacityError::UnknownSlot(time))?;
            if slot.put_back(seats) < seats {
                warn!("Released more dinner seats than were taken at {time} for event {event_id}");
            }
        }

        Ok(())
    }

    /// `Ok(None)` means unlimited.
    pub fn remaining_general(&self, event_id: Uuid) -> Result<Option<u32>, CapacityError> {
        let event = self.event(event_id)?;
        let counters = event.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(counters.general.remaining())
    }

    /// `Ok(None)` means unlimited.
    pub fn remaining_slot(
        &self,
        event_id: Uuid,
        time: OffsetDateTime,
    ) -> Result<Option<u32>, CapacityError> {
        let event = self.event(event_id)?;
        let counters = event.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = counters
            .slots
            .get(&time)
            .ok_or(CapacityError::UnknownSlot(time))?;
        Ok(slot.remaining())
    }

    pub fn slot_availability(&self, event_id: Uuid) -> Result<Vec<DinnerSlot>, CapacityError> {
        let event = self.event(event_id)?;
        let counters = event.lock().unwrap_or_else(PoisonError::into_inner);
        let mut slots: Vec<DinnerSlot> = counters
            .slots
            .iter()
            .map(|(time, counter)| DinnerSlot {
                time: *time,
                capacity: counter.capacity,
                seated: counter.taken,
            })
            .collect();
        slots.sort_by_key(|slot| slot.time);
        Ok(slots)
    }
}
