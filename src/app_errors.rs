use crate::utils::admission::errors::AdmissionError;
use crate::utils::capacity::errors::CapacityError;
use crate::utils::offers::errors::OfferError;
use anyhow::Context;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    AdmissionError(#[from] AdmissionError),
    #[error(transparent)]
    CapacityError(#[from] CapacityError),
    #[error(transparent)]
    OfferError(#[from] OfferError),
}

impl AppError {
    /// Copy shown to the guest; the typed error stays with the caller.
    pub fn guest_message(&self) -> &'static str {
        match self {
            AppError::OfferError(OfferError::CapacityExceededAtRedemption) => {
                "Someone else claimed this spot."
            }
            AppError::OfferError(
                OfferError::Expired | OfferError::Invalid | OfferError::AlreadyRedeemed,
            ) => "This offer is no longer valid.",
            AppError::OfferError(OfferError::PaymentFailed) => {
                "Payment did not complete. The offer is still yours to retry."
            }
            AppError::AdmissionError(AdmissionError::CapacityExceeded) => {
                "The event is fully booked."
            }
            AppError::AdmissionError(AdmissionError::Rejected(_)) => {
                "The request was rejected with validation."
            }
            _ => "Unexpected server error",
        }
    }
}

pub trait DefaultContext<T> {
    fn dc(self) -> Result<T, anyhow::Error>;
}

impl<T> DefaultContext<T> for Option<T> {
    fn dc(self) -> Result<T, anyhow::Error> {
        self.context("Value was None")
    }
}

impl<T, E> DefaultContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn dc(self) -> Result<T, anyhow::Error> {
        self.context("Unexpected error")
    }
}
