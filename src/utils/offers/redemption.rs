use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tracing::{debug, trace};
use uuid::Uuid;

use crate::utils::capacity::CapacityLedger;

use super::errors::OfferError;
use super::models::{PaymentOutcome, RedemptionResult};
use super::OfferSigner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OfferState {
    Redeeming,
    Confirmed,
}

/// Per-offer state machine: issued (no entry) -> redeeming -> confirmed.
/// Expiry needs no entry at all, verification rejects stale tokens on
/// presentation.
#[derive(Debug, Default)]
pub struct RedemptionFlow {
    states: Mutex<HashMap<Uuid, OfferState>>,
}

impl RedemptionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the token, re-checks capacity against the snapshotted
    /// terms and settles the payment outcome. Exactly one attempt per
    /// offer can reach `Confirmed`; a payment that falls through releases
    /// the reservation and hands the offer back for a retry until expiry.
    pub fn redeem(
        &self,
        signer: &impl OfferSigner,
        ledger: &CapacityLedger,
        token: &str,
        payment: PaymentOutcome,
    ) -> Result<RedemptionResult, OfferError> {
        let claims = signer.verify(token)?;
        self.claim(claims.jti)?;

        let units = claims.rsvp_details.units();
        if let Err(e) = ledger.try_reserve(claims.event_id, units) {
            self.reset(claims.jti);
            trace!("Capacity re-check failed for offer {}: {e}", claims.jti);
            return Err(OfferError::CapacityExceededAtRedemption);
        }

        match payment {
            PaymentOutcome::Settled => {
                self.confirm(claims.jti);
                debug!("Offer {} redeemed for RSVP {}", claims.jti, claims.rsvp_id);
                let (attendance_status, dinner_booking_status) =
                    claims.rsvp_details.confirmed_statuses();
                Ok(RedemptionResult {
                    rsvp_id: claims.rsvp_id,
                    event_id: claims.event_id,
                    attendance_status,
                    dinner_booking_status,
                })
            }
            PaymentOutcome::Failed | PaymentOutcome::Abandoned => {
                trace!(
                    "Payment fell through for offer {}, releasing the reservation",
                    claims.jti
                );
                self.reset(claims.jti);
                ledger
                    .release(claims.event_id, units)
                    .map_err(anyhow::Error::from)?;
                Err(OfferError::PaymentFailed)
            }
        }
    }

    /// Takes the offer for this attempt. A consumed or in-flight offer is
    /// reported as already redeemed, so two racers can never both commit.
    fn claim(&self, jti: Uuid) -> Result<(), OfferError> {
        let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
        match states.get(&jti) {
            Some(_) => Err(OfferError::AlreadyRedeemed),
            None => {
                states.insert(jti, OfferState::Redeeming);
                Ok(())
            }
        }
    }

    fn reset(&self, jti: Uuid) {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&jti);
    }

    fn confirm(&self, jti: Uuid) {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(jti, OfferState::Confirmed);
    }
}
