use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use super::{Recorded, non_blank};
use crate::constants::{DEFAULT_SOURCE, limits};
use crate::db::{FeedbackRecord, StoreGateway, StoreHandle, timestamp_now};
use crate::domain::ids::generate_id;

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("startupId, feedback, and rating are required")]
    MissingFields,

    #[error("Rating must be between 1 and 5")]
    InvalidRating,

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Default)]
pub struct NewFeedback {
    pub startup_id: Option<String>,
    pub feedback: Option<String>,
    pub rating: Option<i64>,
    pub source: Option<String>,
}

pub fn validate(input: NewFeedback) -> Result<FeedbackRecord, FeedbackError> {
    let (Some(startup_id), Some(feedback), Some(rating)) = (
        non_blank(input.startup_id),
        non_blank(input.feedback),
        input.rating,
    ) else {
        return Err(FeedbackError::MissingFields);
    };

    if !(limits::MIN_RATING..=limits::MAX_RATING).contains(&rating) {
        return Err(FeedbackError::InvalidRating);
    }

    Ok(FeedbackRecord {
        id: generate_id(),
        startup_id,
        feedback,
        rating: u8::try_from(rating).map_err(|_| FeedbackError::InvalidRating)?,
        source: non_blank(input.source).unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        created_at: timestamp_now(),
    })
}

pub struct FeedbackService {
    gateway: Arc<StoreGateway>,
}

impl FeedbackService {
    #[must_use]
    pub const fn new(gateway: Arc<StoreGateway>) -> Self {
        Self { gateway }
    }

    pub async fn record(&self, input: NewFeedback) -> Result<Recorded, FeedbackError> {
        let record = validate(input)?;

        match self.gateway.get().await {
            StoreHandle::Available(store) => {
                store.add_feedback(&record).await?;
                metrics::counter!("feedback_total", "outcome" => "stored").increment(1);
                Ok(Recorded {
                    id: record.id,
                    stored: true,
                })
            }
            StoreHandle::Unavailable(_) => {
                warn!(startup_id = %record.startup_id, "Store not available, feedback not persisted");
                metrics::counter!("feedback_total", "outcome" => "not_stored").increment(1);
                Ok(Recorded {
                    id: record.id,
                    stored: false,
                })
            }
        }
    }

    pub async fn list(&self, startup_id: Option<&str>) -> Vec<FeedbackRecord> {
        match self.gateway.get().await {
            StoreHandle::Available(store) => {
                store.list_feedback(startup_id).await.unwrap_or_else(|e| {
                    warn!(error = %e, "Failed to list feedback");
                    Vec::new()
                })
            }
            StoreHandle::Unavailable(_) => Vec::new(),
        }
    }
}
