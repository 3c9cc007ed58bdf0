//! Aggregate validation signals for the analytics panel.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

use crate::constants::{fallback, limits};
use crate::db::{FeedbackRecord, SignupRecord, StoreGateway, StoreHandle};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsSummary {
    pub landing_pages_generated: u64,
    pub emails_captured: usize,
    pub would_pay_signals: usize,
    pub signups_by_source: BTreeMap<String, usize>,
    pub price_points: BTreeMap<u8, usize>,
    pub feedback_count: usize,
    pub average_rating: Option<f64>,
    pub recent_signups: Vec<SignupRecord>,
    pub recent_feedback: Vec<FeedbackRecord>,
    /// Latest feedback text, or placeholder quotes while there is none.
    pub recent_quotes: Vec<String>,
}

/// Fold records into a summary. Both slices are expected newest first.
#[must_use]
pub fn summarize(
    landing_pages_generated: u64,
    signups: &[SignupRecord],
    feedback: &[FeedbackRecord],
) -> AnalyticsSummary {
    let mut signups_by_source = BTreeMap::new();
    let mut price_points = BTreeMap::new();

    for signup in signups {
        *signups_by_source.entry(signup.source.clone()).or_insert(0) += 1;
        if let Some(price) = signup.price_point {
            *price_points.entry(price.value()).or_insert(0) += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let average_rating = (!feedback.is_empty()).then(|| {
        let total: u32 = feedback.iter().map(|f| u32::from(f.rating)).sum();
        f64::from(total) / feedback.len() as f64
    });

    let recent_feedback: Vec<FeedbackRecord> = feedback
        .iter()
        .take(limits::RECENT_QUOTES)
        .cloned()
        .collect();

    let recent_quotes = if recent_feedback.is_empty() {
        fallback::QUOTES.iter().map(ToString::to_string).collect()
    } else {
        recent_feedback.iter().map(|f| f.feedback.clone()).collect()
    };

    AnalyticsSummary {
        landing_pages_generated,
        emails_captured: signups.len(),
        would_pay_signals: signups.iter().filter(|s| s.would_pay).count(),
        signups_by_source,
        price_points,
        feedback_count: feedback.len(),
        average_rating,
        recent_signups: signups.iter().take(limits::RECENT_SIGNUPS).cloned().collect(),
        recent_feedback,
        recent_quotes,
    }
}

pub struct AnalyticsService {
    gateway: Arc<StoreGateway>,
}

impl AnalyticsService {
    #[must_use]
    pub const fn new(gateway: Arc<StoreGateway>) -> Self {
        Self { gateway }
    }

    /// Summary for one landing page, or for everything when `startup_id` is `None`.
    pub async fn summary(&self, startup_id: Option<&str>) -> AnalyticsSummary {
        let StoreHandle::Available(store) = self.gateway.get().await else {
            return summarize(0, &[], &[]);
        };

        let result = futures::try_join!(
            store.count_generations(startup_id),
            store.list_signups(startup_id),
            store.list_feedback(startup_id),
        );

        match result {
            Ok((generations, signups, feedback)) => summarize(generations, &signups, &feedback),
            Err(e) => {
                warn!(error = %e, "Failed to compute analytics");
                summarize(0, &[], &[])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PricePoint;

    fn signup(n: usize, source: &str, would_pay: bool, price: Option<i64>) -> SignupRecord {
        SignupRecord {
            id: format!("sg{n}"),
            email: format!("user{n}@example.com"),
            startup_id: "s1".to_string(),
            source: source.to_string(),
            would_pay,
            price_point: price.and_then(PricePoint::new),
            created_at: format!("2026-10-18T10:00:{:02}.000000Z", 59 - n),
        }
    }

    fn feedback(n: usize, rating: u8) -> FeedbackRecord {
        FeedbackRecord {
            id: format!("fb{n}"),
            startup_id: "s1".to_string(),
            feedback: format!("quote {n}"),
            rating,
            source: "direct".to_string(),
            created_at: format!("2026-10-18T10:00:{:02}.000000Z", 59 - n),
        }
    }

    #[test]
    fn test_empty_summary_uses_placeholder_quotes() {
        let summary = summarize(0, &[], &[]);
        assert_eq!(summary.emails_captured, 0);
        assert_eq!(summary.average_rating, None);
        assert_eq!(summary.recent_quotes.len(), 3);
        assert_eq!(summary.recent_quotes[0], "This is exactly what I needed!");
        assert!(summary.recent_feedback.is_empty());
    }

    #[test]
    fn test_summary_counts() {
        let signups: Vec<SignupRecord> = (0..7)
            .map(|n| {
                let source = if n % 2 == 0 { "twitter" } else { "direct" };
                signup(n, source, n < 3, (n < 3).then_some(19))
            })
            .collect();
        let feedback = vec![feedback(0, 5), feedback(1, 4), feedback(2, 3), feedback(3, 4)];

        let summary = summarize(2, &signups, &feedback);

        assert_eq!(summary.landing_pages_generated, 2);
        assert_eq!(summary.emails_captured, 7);
        assert_eq!(summary.would_pay_signals, 3);
        assert_eq!(summary.signups_by_source["twitter"], 4);
        assert_eq!(summary.signups_by_source["direct"], 3);
        assert_eq!(summary.price_points[&19], 3);
        assert_eq!(summary.feedback_count, 4);
        assert_eq!(summary.average_rating, Some(4.0));
        assert_eq!(summary.recent_signups.len(), 5);
        assert_eq!(summary.recent_signups[0].id, "sg0");
        assert_eq!(summary.recent_quotes, vec!["quote 0", "quote 1", "quote 2"]);
        let ratings: Vec<u8> = summary.recent_feedback.iter().map(|f| f.rating).collect();
        assert_eq!(ratings, vec![5, 4, 3]);
    }
}
