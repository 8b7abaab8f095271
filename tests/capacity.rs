use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;

use gatelist::utils::capacity::errors::CapacityError;
use gatelist::utils::capacity::models::{OverflowAction, ReservationUnits};
use time::macros::datetime;
use tracing_test::traced_test;
use uuid::Uuid;

use crate::tools::{dinner_config, test_modules, FIRST_SEATING, SECOND_SEATING};


#[traced_test]
#[test]
fn tracks_remaining_capacity() {
    let modules = test_modules();
    let event_id = Uuid::new_v4();
    modules
        .register_event(
            event_id,
            &dinner_config(Some(10), Some(4), OverflowAction::Waitlist),
        )
        .unwrap();

    assert_eq!(
        modules.ledger.remaining_general(event_id).unwrap(),
        Some(10)
    );
    assert_eq!(
        modules
            .ledger
            .remaining_slot(event_id, FIRST_SEATING)
            .unwrap(),
        Some(4)
    );

    modules
        .ledger
        .try_reserve(
            event_id,
            ReservationUnits {
                general: 3,
                dinner: Some((FIRST_SEATING, 2)),
            },
        )
        .unwrap();

    assert_eq!(modules.ledger.remaining_general(event_id).unwrap(), Some(7));
    assert_eq!(
        modules
            .ledger
            .remaining_slot(event_id, FIRST_SEATING)
            .unwrap(),
        Some(2)
    );
    assert_eq!(
        modules
            .ledger
            .remaining_slot(event_id, SECOND_SEATING)
            .unwrap(),
        Some(4)
    );
}

#[traced_test]
#[test]
fn rejected_reservation_commits_nothing() {
    let modules = test_modules();
    let event_id = Uuid::new_v4();
    modules
        .register_event(
            event_id,
            &dinner_config(Some(10), Some(2), OverflowAction::Waitlist),
        )
        .unwrap();

    modules
        .ledger
        .try_reserve(
            event_id,
            ReservationUnits {
                general: 0,
                dinner: Some((FIRST_SEATING, 2)),
            },
        )
        .unwrap();

    let res = modules.ledger.try_reserve(
        event_id,
        ReservationUnits {
            general: 3,
            dinner: Some((FIRST_SEATING, 1)),
        },
    );

    assert!(matches!(res, Err(CapacityError::SlotExceeded)));
    // the general side of the rejected party was not committed
    assert_eq!(
        modules.ledger.remaining_general(event_id).unwrap(),
        Some(10)
    );
}

#[traced_test]
#[test]
fn unlimited_capacity_never_rejects() {
    let modules = test_modules();
    let event_id = Uuid::new_v4();
    modules
        .register_event(event_id, &dinner_config(None, None, OverflowAction::Waitlist))
        .unwrap();

    modules
        .ledger
        .try_reserve(
            event_id,
            ReservationUnits {
                general: 10_000,
                dinner: Some((FIRST_SEATING, 10_000)),
            },
        )
        .unwrap();

    assert_eq!(modules.ledger.remaining_general(event_id).unwrap(), None);
    assert_eq!(
        modules
            .ledger
            .remaining_slot(event_id, FIRST_SEATING)
            .unwrap(),
        None
    );
}

#[traced_test]
#[test]
fn over_release_clamps_at_configured_capacity() {
    let modules = test_modules();
    let event_id = Uuid::new_v4();
    modules
        .register_event(
            event_id,
            &dinner_config(Some(10), Some(4), OverflowAction::Waitlist),
        )
        .unwrap();

    modules
        .ledger
        .try_reserve(
            event_id,
            ReservationUnits {
                general: 2,
                dinner: Some((FIRST_SEATING, 1)),
            },
        )
        .unwrap();
    modules
        .ledger
        .release(
            event_id,
            ReservationUnits {
                general: 5,
                dinner: Some((FIRST_SEATING, 3)),
            },
        )
        .unwrap();

    assert_eq!(
        modules.ledger.remaining_general(event_id).unwrap(),
        Some(10)
    );
    assert_eq!(
        modules
            .ledger
            .remaining_slot(event_id, FIRST_SEATING)
            .unwrap(),
        Some(4)
    );
}

#[traced_test]
#[test]
fn unknown_event_and_slot_are_rejected() {
    let modules = test_modules();
    let event_id = Uuid::new_v4();

    assert!(matches!(
        modules
            .ledger
            .try_reserve(event_id, ReservationUnits::general_only(1)),
        Err(CapacityError::UnknownEvent(_))
    ));

    modules
        .register_event(
            event_id,
            &dinner_config(Some(10), Some(4), OverflowAction::Waitlist),
        )
        .unwrap();

    assert!(matches!(
        modules
            .ledger
            .remaining_slot(event_id, datetime!(2023-06-10 19:00 UTC)),
        Err(CapacityError::UnknownSlot(_))
    ));
}

#[traced_test]
#[test]
fn reports_slot_availability_in_seating_order() {
    let modules = test_modules();
    let event_id = Uuid::new_v4();
    modules
        .register_event(
            event_id,
            &dinner_config(Some(10), Some(4), OverflowAction::Waitlist),
        )
        .unwrap();

    modules
        .ledger
        .try_reserve(
            event_id,
            ReservationUnits {
                general: 0,
                dinner: Some((SECOND_SEATING, 3)),
            },
        )
        .unwrap();

    let slots = modules.ledger.slot_availability(event_id).unwrap();
    let summary: Vec<_> = slots
        .iter()
        .map(|slot| (slot.time, slot.remaining()))
        .collect();

    assert_eq!(
        summary,
        vec![(FIRST_SEATING, Some(4)), (SECOND_SEATING, Some(1))]
    );
}

#[test]
fn concurrent_reservations_never_oversell() {
    let modules = test_modules();
    let event_id = Uuid::new_v4();
    modules
        .register_event(
            event_id,
            &dinner_config(Some(50), Some(1), OverflowAction::Waitlist),
        )
        .unwrap();

    let confirmed = AtomicU32::new(0);
    let ledger = &modules.ledger;

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                for _ in 0..10 {
                    if ledger
                        .try_reserve(event_id, ReservationUnits::general_only(1))
                        .is_ok()
                    {
                        confirmed.fetch_add(1, Ordering::SeqCst);
                    }
                }
            });
        }
    });

    assert_eq!(confirmed.load(Ordering::SeqCst), 50);
    assert_eq!(ledger.remaining_general(event_id).unwrap(), Some(0));
}

#[test]
fn concurrent_seat_grab_has_a_single_winner() {
    let modules = test_modules();
    let event_id = Uuid::new_v4();
    modules
        .register_event(
            event_id,
            &dinner_config(Some(50), Some(1), OverflowAction::Waitlist),
        )
        .unwrap();

    let seated = AtomicU32::new(0);
    let ledger = &modules.ledger;

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                if ledger
                    .try_reserve(
                        event_id,
                        ReservationUnits {
                            general: 0,
                            dinner: Some((FIRST_SEATING, 1)),
                        },
                    )
                    .is_ok()
                {
                    seated.fetch_add(1, Ordering::SeqCst);
                }
            });
        }
    });

    assert_eq!(seated.load(Ordering::SeqCst), 1);
    assert_eq!(
        ledger.remaining_slot(event_id, FIRST_SEATING).unwrap(),
        Some(0)
    );
}
