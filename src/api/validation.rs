use super::ApiError;

/// The idea text of a generation request. Absent, non-string and blank
/// ideas are all rejected the same way.
pub fn validate_idea(idea: Option<&serde_json::Value>) -> Result<String, ApiError> {
    idea.and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| ApiError::validation("Idea is required"))
}

/// Blank `startupId` filters mean "no filter".
#[must_use]
pub fn normalize_startup_id(startup_id: Option<String>) -> Option<String> {
    startup_id
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_idea() {
        assert_eq!(
            validate_idea(Some(&json!("  dog walking app "))).unwrap(),
            "dog walking app"
        );
        assert!(validate_idea(None).is_err());
        assert!(validate_idea(Some(&json!("   "))).is_err());
        assert!(validate_idea(Some(&json!(42))).is_err());
        assert!(validate_idea(Some(&json!(null))).is_err());
    }

    #[test]
    fn test_normalize_startup_id() {
        assert_eq!(normalize_startup_id(Some(" abc ".to_string())).as_deref(), Some("abc"));
        assert_eq!(normalize_startup_id(Some(String::new())), None);
        assert_eq!(normalize_startup_id(None), None);
    }
}
