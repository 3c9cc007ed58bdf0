//! Email capture for generated landing pages.

use regex::Regex;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing::warn;

use super::{Recorded, non_blank};
use crate::constants::DEFAULT_SOURCE;
use crate::db::{InsertOutcome, SignupRecord, StoreGateway, StoreHandle, timestamp_now};
use crate::domain::PricePoint;
use crate::domain::ids::generate_id;

#[derive(Debug, Error)]
pub enum SignupError {
    #[error("Email and startupId are required")]
    MissingFields,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Price point must be one of 0, 9, 19, 29")]
    InvalidPricePoint,

    #[error("Email already signed up for this startup")]
    AlreadySignedUp,

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Raw signup as submitted by a visitor.
#[derive(Debug, Clone, Default)]
pub struct NewSignup {
    pub email: Option<String>,
    pub startup_id: Option<String>,
    pub source: Option<String>,
    pub would_pay: Option<bool>,
    pub price_point: Option<i64>,
}

/// `local@domain.tld` with no whitespace and a single `@`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"))
        .is_match(email)
}

/// Check a submission and turn it into a record ready to insert.
pub fn validate(signup: NewSignup) -> Result<SignupRecord, SignupError> {
    let (Some(email), Some(startup_id)) = (non_blank(signup.email), non_blank(signup.startup_id))
    else {
        return Err(SignupError::MissingFields);
    };

    if !is_valid_email(&email) {
        return Err(SignupError::InvalidEmail);
    }

    let price_point = signup
        .price_point
        .map(|p| PricePoint::new(p).ok_or(SignupError::InvalidPricePoint))
        .transpose()?;

    Ok(SignupRecord {
        id: generate_id(),
        email,
        startup_id,
        source: non_blank(signup.source).unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        would_pay: signup.would_pay.unwrap_or(false),
        price_point,
        created_at: timestamp_now(),
    })
}

pub struct SignupService {
    gateway: Arc<StoreGateway>,
}

impl SignupService {
    #[must_use]
    pub const fn new(gateway: Arc<StoreGateway>) -> Self {
        Self { gateway }
    }

    /// Validate and store a signup.
    ///
    /// A duplicate `(email, startupId)` pair is reported as
    /// [`SignupError::AlreadySignedUp`] straight from the insert. Without a
    /// store the signup is acknowledged but not kept.
    pub async fn record(&self, signup: NewSignup) -> Result<Recorded, SignupError> {
        let record = validate(signup)?;

        let store = match self.gateway.get().await {
            StoreHandle::Available(store) => store,
            StoreHandle::Unavailable(_) => {
                warn!(startup_id = %record.startup_id, "Store not available, signup not persisted");
                metrics::counter!("signups_total", "outcome" => "not_stored").increment(1);
                return Ok(Recorded {
                    id: record.id,
                    stored: false,
                });
            }
        };

        match store.add_signup(&record).await? {
            InsertOutcome::Inserted => {
                metrics::counter!("signups_total", "outcome" => "stored").increment(1);
                Ok(Recorded {
                    id: record.id,
                    stored: true,
                })
            }
            InsertOutcome::Duplicate => {
                metrics::counter!("signups_total", "outcome" => "duplicate").increment(1);
                Err(SignupError::AlreadySignedUp)
            }
        }
    }

    /// Signups newest first, optionally for one landing page.
    pub async fn list(&self, startup_id: Option<&str>) -> Vec<SignupRecord> {
        match self.gateway.get().await {
            StoreHandle::Available(store) => {
                store.list_signups(startup_id).await.unwrap_or_else(|e| {
                    warn!(error = %e, "Failed to list signups");
                    Vec::new()
                })
            }
            StoreHandle::Unavailable(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(email: &str, startup_id: &str) -> NewSignup {
        NewSignup {
            email: Some(email.to_string()),
            startup_id: Some(startup_id.to_string()),
            ..NewSignup::default()
        }
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("founder@example.com"));
        assert!(is_valid_email("a.b+tag@sub.domain.io"));
        assert!(!is_valid_email("founder@example"));
        assert!(!is_valid_email("founder example.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a b@c.com"));
    }

    #[test]
    fn test_validate_requires_fields() {
        assert!(matches!(
            validate(NewSignup::default()),
            Err(SignupError::MissingFields)
        ));
        assert!(matches!(
            validate(signup("a@b.co", "   ")),
            Err(SignupError::MissingFields)
        ));
        assert!(matches!(
            validate(signup("not-an-email", "s1")),
            Err(SignupError::InvalidEmail)
        ));
    }

    #[test]
    fn test_validate_price_point() {
        let mut input = signup("a@b.co", "s1");
        input.price_point = Some(15);
        assert!(matches!(validate(input), Err(SignupError::InvalidPricePoint)));

        let mut input = signup("a@b.co", "s1");
        input.price_point = Some(29);
        input.would_pay = Some(true);
        let record = validate(input).unwrap();
        assert_eq!(record.price_point.map(PricePoint::value), Some(29));
        assert!(record.would_pay);
    }

    #[test]
    fn test_validate_defaults() {
        let record = validate(signup(" a@b.co ", "s1")).unwrap();
        assert_eq!(record.email, "a@b.co");
        assert_eq!(record.source, "direct");
        assert!(!record.would_pay);
        assert!(record.price_point.is_none());
        assert!(!record.id.is_empty());
    }
}
