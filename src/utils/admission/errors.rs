use thiserror::Error;

use crate::utils::capacity::errors::CapacityError;
use crate::validation::ValidateContentError;

#[derive(Error, Debug)]
pub enum AdmissionError {
    #[error("Event capacity exceeded")]
    CapacityExceeded,
    #[error(transparent)]
    Rejected(#[from] ValidateContentError),
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}
