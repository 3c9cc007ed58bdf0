//! Reading landing page copy out of a free-text model completion.
//!
//! Models are asked for a bare JSON object but regularly wrap it in a
//! markdown fence or lead with prose. Extraction is best effort and never
//! panics; callers decide what to do with `None`.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

use crate::constants::fallback;
use crate::domain::{
    GeneratedContent, Industry, fallback_features, fallback_headline, fallback_pitch,
};

fn fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("Invalid regex")
    })
}

/// Pull the first JSON object out of a completion.
///
/// 1. a fenced block (```` ``` ```` or ```` ```json ````) wins;
/// 2. otherwise leading text before the first `{` is dropped;
/// 3. the remainder must parse strictly as a JSON object.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    let mut cleaned = text.trim();

    if let Some(inner) = fence_regex().captures(cleaned).and_then(|caps| caps.get(1)) {
        cleaned = inner.as_str();
    }

    if !cleaned.starts_with('{')
        && let Some(start) = cleaned.find('{')
    {
        cleaned = &cleaned[start..];
    }

    match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Parse a completion into copy for `idea`.
///
/// Returns `None` only when no JSON object can be read. Individual fields
/// that are missing, blank or of the wrong type fall back one by one.
#[must_use]
pub fn parse_generated_content(text: &str, idea: &str) -> Option<GeneratedContent> {
    extract_json_object(text).map(|fields| content_from_fields(&fields, idea))
}

#[must_use]
pub fn content_from_fields(fields: &Map<String, Value>, idea: &str) -> GeneratedContent {
    let features: Vec<String> = fields
        .get("features")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default();

    GeneratedContent {
        headline: text_field(fields, "headline").unwrap_or_else(|| fallback_headline(idea)),
        pitch: text_field(fields, "pitch").unwrap_or_else(|| fallback_pitch(idea)),
        cta: text_field(fields, "cta").unwrap_or_else(|| fallback::CTA.to_string()),
        features: if features.is_empty() {
            fallback_features()
        } else {
            features
        },
        industry: text_field(fields, "industry")
            .map_or(Industry::Technology, |label| Industry::classify(&label)),
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDEA: &str = "dog walking app";

    const FULL: &str = r#"{
        "headline": "Walks On Demand",
        "pitch": "Busy owners book vetted walkers in two taps.",
        "cta": "Book a Walk",
        "features": ["GPS tracking", "Vetted walkers", "Instant booking"],
        "industry": "Mobile Apps"
    }"#;

    #[test]
    fn test_bare_object() {
        let content = parse_generated_content(FULL, IDEA).unwrap();
        assert_eq!(content.headline, "Walks On Demand");
        assert_eq!(content.cta, "Book a Walk");
        assert_eq!(content.features.len(), 3);
        assert_eq!(content.industry, Industry::MobileApps);
    }

    #[test]
    fn test_json_fence() {
        let text = format!("Sure! Here is your copy:\n```json\n{FULL}\n```\nGood luck!");
        let content = parse_generated_content(&text, IDEA).unwrap();
        assert_eq!(content.headline, "Walks On Demand");
    }

    #[test]
    fn test_plain_fence() {
        let text = format!("```\n{FULL}\n```");
        assert!(parse_generated_content(&text, IDEA).is_some());
    }

    #[test]
    fn test_leading_prose_is_dropped() {
        let text = format!("Here you go: {FULL}");
        let content = parse_generated_content(&text, IDEA).unwrap();
        assert_eq!(content.pitch, "Busy owners book vetted walkers in two taps.");
    }

    #[test]
    fn test_trailing_prose_is_rejected() {
        let text = format!("{FULL}\nLet me know if you want changes.");
        assert!(extract_json_object(&text).is_none());
    }

    #[test]
    fn test_not_json() {
        assert!(extract_json_object("I cannot help with that.").is_none());
        assert!(extract_json_object("").is_none());
        assert!(extract_json_object("{ headline: unquoted }").is_none());
        assert!(extract_json_object("[1, 2, 3]").is_none());
    }

    #[test]
    fn test_missing_fields_fall_back_individually() {
        let content = parse_generated_content(r#"{"headline": "Only Headline"}"#, IDEA).unwrap();
        assert_eq!(content.headline, "Only Headline");
        assert_eq!(content.pitch, fallback_pitch(IDEA));
        assert_eq!(content.cta, "Get Early Access");
        assert_eq!(content.features, fallback_features());
        assert_eq!(content.industry, Industry::Technology);
    }

    #[test]
    fn test_wrong_types_and_blanks_fall_back() {
        let text = r#"{
            "headline": "   ",
            "pitch": 42,
            "cta": null,
            "features": "not a list",
            "industry": ""
        }"#;
        let content = parse_generated_content(text, IDEA).unwrap();
        assert_eq!(content, GeneratedContent::fallback(IDEA));
    }

    #[test]
    fn test_features_skip_non_strings() {
        let text = r#"{"features": ["Fast", 7, "", "Cheap", null]}"#;
        let content = parse_generated_content(text, IDEA).unwrap();
        assert_eq!(content.features, vec!["Fast", "Cheap"]);
    }

    #[test]
    fn test_unknown_industry_maps_to_other() {
        let content = parse_generated_content(r#"{"industry": "Pet Services"}"#, IDEA).unwrap();
        assert_eq!(content.industry, Industry::Other);
    }
}
