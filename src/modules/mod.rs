use std::sync::Arc;

use dotenv::dotenv;
use tracing::info;
use uuid::Uuid;

use crate::app_errors::AppError;
use crate::config::environment::Environment;
use crate::config::tokens::OfferSettings;
use crate::config::{get_config, ConfigurationError};
use crate::utils::admission::decide_admission;
use crate::utils::admission::errors::AdmissionError;
use crate::utils::admission::models::{AdmissionRequest, AdmissionResult, Rsvp};
use crate::utils::capacity::models::CapacityConfig;
use crate::utils::capacity::CapacityLedger;
use crate::utils::offers::errors::OfferError;
use crate::utils::offers::models::{PaymentOutcome, RedemptionResult};
use crate::utils::offers::redemption::RedemptionFlow;
use crate::utils::offers::WaitlistOfferService;
use crate::validation::ValidateContent;

/// Process-wide wiring, assembled once at startup. Collaborator layers
/// (persistence, payment, notifications) hold one of these and drive the
/// engine through the facade methods.
pub struct Modules {
    pub ledger: Arc<CapacityLedger>,
    offers: WaitlistOfferService,
    redemptions: RedemptionFlow,
    environment: Environment,
}

impl Modules {
    pub fn load_from_settings() -> Result<Self, ConfigurationError> {
        dotenv().ok();
        let settings = get_config()?;
        info!("Settings loaded");
        Ok(Self::assemble(settings.offers, settings.environment))
    }

    pub fn use_custom(secret: &str, environment: Environment) -> Self {
        Self::assemble(OfferSettings::new(secret), environment)
    }

    fn assemble(offers: OfferSettings, environment: Environment) -> Self {
        info!("Environment: {environment}");
        Self {
            ledger: Arc::new(CapacityLedger::new()),
            offers: WaitlistOfferService::new(offers),
            redemptions: RedemptionFlow::new(),
            environment,
        }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Seeds the ledger from an event's capacity section. Committed RSVPs
    /// are replayed by the caller through `decide_admission`.
    pub fn register_event(
        &self,
        event_id: Uuid,
        config: &CapacityConfig,
    ) -> Result<(), AppError> {
        config.validate_content().map_err(AdmissionError::from)?;
        self.ledger.register_event(event_id, config)?;
        Ok(())
    }

    pub fn decide_admission(
        &self,
        event_id: Uuid,
        config: &CapacityConfig,
        request: &AdmissionRequest,
    ) -> Result<AdmissionResult, AdmissionError> {
        decide_admission(&self.ledger, event_id, config, request)
    }

    pub fn issue_offer(&self, rsvp: &Rsvp) -> Result<String, OfferError> {
        self.offers.issue_offer(rsvp)
    }

    pub fn redeem_offer(
        &self,
        token: &str,
        payment: PaymentOutcome,
    ) -> Result<RedemptionResult, OfferError> {
        self.redemptions
            .redeem(&self.offers, &self.ledger, token, payment)
    }
}
