use thiserror::Error;

#[derive(Error, Debug)]
pub enum OfferError {
    #[error("Offer has expired")]
    Expired,
    #[error("Invalid offer token")]
    Invalid,
    #[error("Offer was already redeemed")]
    AlreadyRedeemed,
    #[error("Capacity was claimed before redemption")]
    CapacityExceededAtRedemption,
    #[error("Payment did not complete")]
    PaymentFailed,
    #[error("RSVP is not waiting for capacity")]
    NotEligible,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}
