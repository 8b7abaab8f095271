pub mod errors;
pub mod models;
pub mod redemption;

use anyhow::Context;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use tracing::{debug, trace};

use crate::config::tokens::OfferSettings;
use crate::utils::admission::models::{AttendanceStatus, DinnerBookingStatus, Rsvp};

use self::errors::OfferError;
use self::models::{OfferClaims, OFFER_TOKEN_TYPE};

/// Cryptographic boundary for waitlist offers. Verification is the only
/// path from an opaque token string back to trusted claims.
pub trait OfferSigner {
    fn sign(&self, claims: &OfferClaims) -> Result<String, OfferError>;
    fn verify(&self, token: &str) -> Result<OfferClaims, OfferError>;
}

pub struct WaitlistOfferService {
    settings: OfferSettings,
}

impl WaitlistOfferService {
    pub fn new(settings: OfferSettings) -> Self {
        Self { settings }
    }

    /// Issues the signed, expiring, single-use credential for a waiting
    /// RSVP. The snapshot rides inside the signature, locking the terms.
    pub fn issue_offer(&self, rsvp: &Rsvp) -> Result<String, OfferError> {
        if !is_waiting(rsvp) {
            return Err(OfferError::NotEligible);
        }

        let claims = OfferClaims::new(rsvp, self.settings.expiration);
        debug!("Issuing waitlist offer {} for RSVP {}", claims.jti, rsvp.id);

        self.sign(&claims)
    }
}

fn is_waiting(rsvp: &Rsvp) -> bool {
    rsvp.attendance_status == AttendanceStatus::Waitlisted
        || matches!(
            rsvp.dinner_booking_status,
            DinnerBookingStatus::Waitlist | DinnerBookingStatus::CocktailsWaitlist
        )
}

impl OfferSigner for WaitlistOfferService {
    fn sign(&self, claims: &OfferClaims) -> Result<String, OfferError> {
        Ok(encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.settings.secret.expose_secret().as_bytes()),
        )
        .context("Failed to encrypt offer token")?)
    }

    fn verify(&self, token: &str) -> Result<OfferClaims, OfferError> {
        // single-use credential, no expiry leeway
        let mut validation = Validation::default();
        validation.leeway = 0;

        let data = decode::<OfferClaims>(
            token,
            &DecodingKey::from_secret(self.settings.secret.expose_secret().as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => OfferError::Expired,
            _ => OfferError::Invalid,
        })?;

        if data.claims.kind != OFFER_TOKEN_TYPE {
            trace!("Token type mismatch, not a waitlist offer");
            return Err(OfferError::Invalid);
        }

        Ok(data.claims)
    }
}
