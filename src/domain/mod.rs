//! Domain types for idea validation.
//!
//! The copy produced for a landing page, the closed industry taxonomy the
//! language model picks from, and the price points a visitor can signal.

pub mod ids;

use serde::Serialize;
use std::fmt;

use crate::constants::fallback;

/// Industry category attached to a generated landing page.
///
/// The set is closed; anything the model invents outside of it is mapped to
/// [`Industry::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Industry {
    #[default]
    Technology,
    Healthcare,
    Finance,
    Education,
    #[serde(rename = "E-commerce")]
    Ecommerce,
    SaaS,
    #[serde(rename = "AI/ML")]
    AiMl,
    #[serde(rename = "Mobile Apps")]
    MobileApps,
    Gaming,
    #[serde(rename = "Real Estate")]
    RealEstate,
    #[serde(rename = "Food & Beverage")]
    FoodAndBeverage,
    Transportation,
    Energy,
    Entertainment,
    Other,
}

impl Industry {
    pub const ALL: [Self; 15] = [
        Self::Technology,
        Self::Healthcare,
        Self::Finance,
        Self::Education,
        Self::Ecommerce,
        Self::SaaS,
        Self::AiMl,
        Self::MobileApps,
        Self::Gaming,
        Self::RealEstate,
        Self::FoodAndBeverage,
        Self::Transportation,
        Self::Energy,
        Self::Entertainment,
        Self::Other,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Technology => "Technology",
            Self::Healthcare => "Healthcare",
            Self::Finance => "Finance",
            Self::Education => "Education",
            Self::Ecommerce => "E-commerce",
            Self::SaaS => "SaaS",
            Self::AiMl => "AI/ML",
            Self::MobileApps => "Mobile Apps",
            Self::Gaming => "Gaming",
            Self::RealEstate => "Real Estate",
            Self::FoodAndBeverage => "Food & Beverage",
            Self::Transportation => "Transportation",
            Self::Energy => "Energy",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive lookup by display label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|industry| industry.label().eq_ignore_ascii_case(label))
    }

    /// Maps free text from the model onto the closed set.
    #[must_use]
    pub fn classify(label: &str) -> Self {
        Self::from_label(label).unwrap_or(Self::Other)
    }

    /// Comma separated list used inside the prompt.
    #[must_use]
    pub fn prompt_list() -> String {
        let labels: Vec<&str> = Self::ALL[..Self::ALL.len() - 1]
            .iter()
            .map(|i| i.label())
            .collect();
        format!("{}, or Other", labels.join(", "))
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Landing page copy for one idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedContent {
    pub headline: String,
    pub pitch: String,
    pub cta: String,
    pub features: Vec<String>,
    pub industry: Industry,
}

impl GeneratedContent {
    /// Deterministic copy used whenever the model cannot be reached or its
    /// reply cannot be read.
    #[must_use]
    pub fn fallback(idea: &str) -> Self {
        Self {
            headline: fallback_headline(idea),
            pitch: fallback_pitch(idea),
            cta: fallback::CTA.to_string(),
            features: fallback_features(),
            industry: Industry::Technology,
        }
    }
}

#[must_use]
pub fn fallback_headline(idea: &str) -> String {
    format!("Revolutionary {idea}")
}

#[must_use]
pub fn fallback_pitch(idea: &str) -> String {
    format!(
        "We're building the future of {idea}. Join thousands of early adopters who are already excited about this innovation."
    )
}

#[must_use]
pub fn fallback_features() -> Vec<String> {
    fallback::FEATURES.iter().map(ToString::to_string).collect()
}

/// Monthly price a visitor says they would pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PricePoint(u8);

impl PricePoint {
    pub const ALLOWED: [u8; 4] = [0, 9, 19, 29];

    #[must_use]
    pub fn new(value: i64) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| Self::ALLOWED.contains(v))
            .map(Self)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PricePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}/mo", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_industry_labels_round_trip() {
        for industry in Industry::ALL {
            assert_eq!(Industry::from_label(industry.label()), Some(industry));
            let json = serde_json::to_string(&industry).unwrap();
            assert_eq!(json, format!("\"{}\"", industry.label()));
        }
    }

    #[test]
    fn test_industry_classify() {
        assert_eq!(Industry::classify("ai/ml"), Industry::AiMl);
        assert_eq!(Industry::classify(" Food & Beverage "), Industry::FoodAndBeverage);
        assert_eq!(Industry::classify("Pet Care"), Industry::Other);
    }

    #[test]
    fn test_prompt_list_ends_with_other() {
        let list = Industry::prompt_list();
        assert!(list.starts_with("Technology, Healthcare"));
        assert!(list.ends_with("Entertainment, or Other"));
    }

    #[test]
    fn test_fallback_content() {
        let content = GeneratedContent::fallback("dog walking app");
        assert_eq!(content.headline, "Revolutionary dog walking app");
        assert!(content.pitch.starts_with("We're building the future of dog walking app."));
        assert_eq!(content.cta, "Get Early Access");
        assert_eq!(content.features.len(), 3);
        assert_eq!(content.industry, Industry::Technology);
    }

    #[test]
    fn test_price_point() {
        assert_eq!(PricePoint::new(19).map(PricePoint::value), Some(19));
        assert!(PricePoint::new(0).is_some());
        assert!(PricePoint::new(10).is_none());
        assert!(PricePoint::new(-9).is_none());
        assert!(PricePoint::new(290).is_none());
        assert_eq!(PricePoint::new(29).unwrap().to_string(), "$29/mo");
    }
}
