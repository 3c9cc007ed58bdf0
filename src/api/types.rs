use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::db::{FeedbackRecord, GenerationRecord, SignupRecord, timestamp_millis};
use crate::domain::Industry;
use crate::services::AnalyticsSummary;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Kept loose so a non-string idea is reported as a missing idea.
    pub idea: Option<serde_json::Value>,
    pub source: Option<String>,
    pub startup_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: Option<String>,
    pub startup_id: Option<String>,
    pub source: Option<String>,
    pub would_pay: Option<bool>,
    pub price_point: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupAck {
    pub success: bool,
    pub signup_id: String,
    pub stored: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub startup_id: Option<String>,
    pub feedback: Option<String>,
    pub rating: Option<i64>,
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackAck {
    pub success: bool,
    pub feedback_id: String,
    pub stored: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StartupQuery {
    pub startup_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupDto {
    pub id: String,
    pub email: String,
    pub startup_id: String,
    pub source: String,
    pub would_pay: bool,
    pub price_point: Option<u8>,
    pub created_at: String,
    pub timestamp: i64,
}

impl From<SignupRecord> for SignupDto {
    fn from(record: SignupRecord) -> Self {
        Self {
            timestamp: timestamp_millis(&record.created_at),
            id: record.id,
            email: record.email,
            startup_id: record.startup_id,
            source: record.source,
            would_pay: record.would_pay,
            price_point: record.price_point.map(|p| p.value()),
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SignupList {
    pub signups: Vec<SignupDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDto {
    pub id: String,
    pub startup_id: String,
    pub feedback: String,
    pub rating: u8,
    pub source: String,
    pub created_at: String,
    pub timestamp: i64,
}

impl From<FeedbackRecord> for FeedbackDto {
    fn from(record: FeedbackRecord) -> Self {
        Self {
            timestamp: timestamp_millis(&record.created_at),
            id: record.id,
            startup_id: record.startup_id,
            feedback: record.feedback,
            rating: record.rating,
            source: record.source,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FeedbackList {
    pub feedback: Vec<FeedbackDto>,
}

#[derive(Debug, Serialize)]
pub struct LandingPageDto {
    pub id: String,
    pub idea: String,
    pub timestamp: i64,
    pub source: String,
    pub industry: Industry,
}

impl From<GenerationRecord> for LandingPageDto {
    fn from(record: GenerationRecord) -> Self {
        Self {
            timestamp: timestamp_millis(&record.created_at),
            id: record.startup_id,
            idea: record.idea,
            source: record.source,
            industry: record.content.industry,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsDto {
    pub landing_pages_generated: u64,
    pub emails_captured: usize,
    pub would_pay_signals: usize,
    pub signups_by_source: BTreeMap<String, usize>,
    pub price_points: BTreeMap<u8, usize>,
    pub feedback_count: usize,
    pub average_rating: Option<f64>,
    pub recent_signups: Vec<SignupDto>,
    pub recent_feedback: Vec<FeedbackDto>,
    pub recent_quotes: Vec<String>,
}

impl From<AnalyticsSummary> for AnalyticsDto {
    fn from(summary: AnalyticsSummary) -> Self {
        Self {
            landing_pages_generated: summary.landing_pages_generated,
            emails_captured: summary.emails_captured,
            would_pay_signals: summary.would_pay_signals,
            signups_by_source: summary.signups_by_source,
            price_points: summary.price_points,
            feedback_count: summary.feedback_count,
            average_rating: summary.average_rating,
            recent_signups: summary
                .recent_signups
                .into_iter()
                .map(SignupDto::from)
                .collect(),
            recent_feedback: summary
                .recent_feedback
                .into_iter()
                .map(FeedbackDto::from)
                .collect(),
            recent_quotes: summary.recent_quotes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub store: &'static str,
}
