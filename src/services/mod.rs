pub mod analytics;
pub use analytics::{AnalyticsService, AnalyticsSummary};

pub mod content;
pub use content::ContentService;

pub mod feedback;
pub use feedback::{FeedbackError, FeedbackService, NewFeedback};

pub mod landing_pages;
pub use landing_pages::{GenerationOutcome, GenerationRequest, LandingPageService};

pub mod signups;
pub use signups::{NewSignup, SignupError, SignupService};

/// Acknowledgement for a visitor submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub id: String,
    /// `false` when no store was available to keep it.
    pub stored: bool,
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
