use thiserror::Error;
use time::Duration;

use crate::utils::admission::models::AdmissionRequest;
use crate::utils::capacity::models::CapacityConfig;

#[derive(Debug, Error)]
pub enum ValidateContentError {
    #[error("Data rejected with validation")]
    Expected(String),
    #[error("Unexpected server error")]
    Unexpected(#[from] anyhow::Error),
}

impl ValidateContentError {
    pub fn new(content: impl ToString) -> Self {
        Self::Expected(content.to_string())
    }
}

pub trait ValidateContent {
    fn validate_content(&self) -> Result<(), ValidateContentError>;
}

impl ValidateContent for AdmissionRequest {
    fn validate_content(&self) -> Result<(), ValidateContentError> {
        if self.name.trim().is_empty() {
            return Err(ValidateContentError::new("Guest name is empty"));
        }

        if !self.wants_dinner {
            if self.dinner_time_slot.is_some() || self.dinner_party_size.is_some() {
                return Err(ValidateContentError::new(
                    "Dinner details given without a dinner request",
                ));
            }
            return Ok(());
        }

        let (Some(_), Some(seats)) = (self.dinner_time_slot, self.dinner_party_size) else {
            return Err(ValidateContentError::new(
                "Dinner request without a time slot or party size",
            ));
        };

        if seats == 0 {
            return Err(ValidateContentError::new("Dinner party size is equal to 0"));
        }
        if seats > self.party_size() {
            return Err(ValidateContentError::new(
                "Dinner party is larger than the whole party",
            ));
        }

        Ok(())
    }
}

impl ValidateContent for CapacityConfig {
    fn validate_content(&self) -> Result<(), ValidateContentError> {
        if !self.dinner_enabled {
            return Ok(());
        }

        if self.dinner_seating_interval_hours == 0 {
            return Err(ValidateContentError::new(
                "Dinner seating interval is equal to 0",
            ));
        }
        let Some(window) = &self.dinner_window else {
            return Err(ValidateContentError::new(
                "Dinner is enabled without a service window",
            ));
        };
        if window.duration() < Duration::seconds(0) {
            return Err(ValidateContentError::new("Dinner window duration is negative"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod validation_tests {
    use time::macros::datetime;

    use crate::utils::capacity::models::{OverflowAction, TimeRange};

    use super::*;

    fn cocktails_request() -> AdmissionRequest {
        AdmissionRequest {
            name: "Jan Kowalski".to_string(),
            email: "jan@example.com".to_string(),
            plus_ones: 1,
            wants_dinner: false,
            dinner_time_slot: None,
            dinner_party_size: None,
        }
    }

    fn dinner_config() -> CapacityConfig {
        CapacityConfig {
            max_attendees: Some(50),
            dinner_enabled: true,
            dinner_window: Some(TimeRange::new(
                datetime!(2023-06-10 18:00 UTC),
                datetime!(2023-06-10 22:00 UTC),
            )),
            dinner_seating_interval_hours: 2,
            dinner_max_seats_per_slot: Some(8),
            dinner_overflow_action: OverflowAction::Waitlist,
            waitlist_enabled: true,
        }
    }

    #[test]
    fn cocktails_request_validation_ok() {
        assert!(cocktails_request().validate_content().is_ok())
    }

    #[test]
    fn dinner_request_validation_ok() {
        let data = AdmissionRequest {
            wants_dinner: true,
            dinner_time_slot: Some(datetime!(2023-06-10 20:00 UTC)),
            dinner_party_size: Some(2),
            ..cocktails_request()
        };
        assert!(data.validate_content().is_ok())
    }

    #[test]
    fn dinner_details_without_dinner_request_err() {
        let data = AdmissionRequest {
            dinner_time_slot: Some(datetime!(2023-06-10 20:00 UTC)),
            ..cocktails_request()
        };
        assert!(data.validate_content().is_err())
    }

    #[test]
    fn dinner_request_without_slot_err() {
        let data = AdmissionRequest {
            wants_dinner: true,
            dinner_party_size: Some(2),
            ..cocktails_request()
        };
        assert!(data.validate_content().is_err())
    }

    #[test]
    fn zero_dinner_party_err() {
        let data = AdmissionRequest {
            wants_dinner: true,
            dinner_time_slot: Some(datetime!(2023-06-10 20:00 UTC)),
            dinner_party_size: Some(0),
            ..cocktails_request()
        };
        assert!(data.validate_content().is_err())
    }

    #[test]
    fn dinner_party_larger_than_party_err() {
        let data = AdmissionRequest {
            wants_dinner: true,
            dinner_time_slot: Some(datetime!(2023-06-10 20:00 UTC)),
            dinner_party_size: Some(3),
            ..cocktails_request()
        };
        assert!(data.validate_content().is_err())
    }

    #[test]
    fn empty_name_err() {
        let data = AdmissionRequest {
            name: " ".to_string(),
            ..cocktails_request()
        };
        assert!(data.validate_content().is_err())
    }

    #[test]
    fn config_validation_ok() {
        assert!(dinner_config().validate_content().is_ok())
    }

    #[test]
    fn config_zero_interval_err() {
        let data = CapacityConfig {
            dinner_seating_interval_hours: 0,
            ..dinner_config()
        };
        assert!(data.validate_content().is_err())
    }

    #[test]
    fn config_missing_window_err() {
        let data = CapacityConfig {
            dinner_window: None,
            ..dinner_config()
        };
        assert!(data.validate_content().is_err())
    }

    #[test]
    fn config_negative_window_err() {
        let data = CapacityConfig {
            dinner_window: Some(TimeRange::new(
                datetime!(2023-06-10 22:00 UTC),
                datetime!(2023-06-10 18:00 UTC),
            )),
            ..dinner_config()
        };
        assert!(data.validate_content().is_err())
    }

    #[test]
    fn config_without_dinner_needs_no_window() {
        let data = CapacityConfig {
            dinner_enabled: false,
            dinner_window: None,
            dinner_seating_interval_hours: 0,
            ..dinner_config()
        };
        assert!(data.validate_content().is_ok())
    }
}
