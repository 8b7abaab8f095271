use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CapacityError {
    #[error("General capacity exceeded")]
    GeneralExceeded,
    #[error("Dinner slot capacity exceeded")]
    SlotExceeded,
    #[error("Event {0} is not registered in the ledger")]
    UnknownEvent(Uuid),
    #[error("No dinner seating at {0}")]
    UnknownSlot(OffsetDateTime),
    #[error("Invalid dinner schedule")]
    InvalidSchedule,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}
