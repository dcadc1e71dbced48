//! JSON candidate extraction from raw model output.
//!
//! Models wrap their JSON in prose, markdown fences, or trailing chatter.
//! We take the widest brace-delimited span and, when that fails to parse,
//! apply a fixed chain of textual repairs for the malformations local
//! models actually produce (trailing commas, newlines inside the object).

/// Widest span from the first `{` to the last `}`, inclusive.
///
/// Returns `None` when either brace is missing or the last `}` precedes
/// the first `{` (reversed braces mean there is no candidate, not an
/// empty one).
pub fn extract_candidate(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if start < end {
        Some(&raw[start..=end])
    } else {
        None
    }
}

/// One-pass textual repair of a candidate that failed to parse.
///
/// The substitution order matters: flattening newlines first lets the
/// trailing-comma patterns match across what were line breaks, and the
/// second `,}` pass catches commas exposed by the `},]` collapse.
pub fn repair_candidate(candidate: &str) -> String {
    candidate
        .replace('\n', " ")
        .replace('\r', " ")
        .replace("},}", "}}")
        .replace(",}", "}")
        .replace("},]", "}]")
        .replace(",]", "]")
        .replace("\",}", "\"}")
        .replace(",}", "}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_widest_brace_span() {
        let raw = "Here is your program: {\"name\": \"Force\"} hope it helps!";
        assert_eq!(extract_candidate(raw), Some("{\"name\": \"Force\"}"));
    }

    #[test]
    fn test_extracts_across_nested_objects() {
        let raw = "text {\"a\": {\"b\": 1}} more {\"c\": 2} end";
        assert_eq!(extract_candidate(raw), Some("{\"a\": {\"b\": 1}} more {\"c\": 2}"));
    }

    #[test]
    fn test_no_braces_yields_none() {
        assert_eq!(extract_candidate("no json here"), None);
        assert_eq!(extract_candidate(""), None);
    }

    #[test]
    fn test_reversed_braces_yield_none() {
        assert_eq!(extract_candidate("} then {"), None);
        assert_eq!(extract_candidate("}{"), None);
    }

    #[test]
    fn test_single_brace_yields_none() {
        assert_eq!(extract_candidate("only { open"), None);
        assert_eq!(extract_candidate("only } close"), None);
    }

    #[test]
    fn test_repair_strips_trailing_commas() {
        let broken = r#"{"name": "X", "exercises": [{"name":"a",},],}"#;
        let repaired = repair_candidate(broken);
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["name"], "X");
        assert_eq!(value["exercises"][0]["name"], "a");
    }

    #[test]
    fn test_repair_flattens_newlines() {
        let broken = "{\"name\": \"X\",\r\n\"category\": \"musculation\"\n}";
        let repaired = repair_candidate(broken);
        assert!(!repaired.contains('\n'));
        assert!(!repaired.contains('\r'));
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["category"], "musculation");
    }

    #[test]
    fn test_repair_catches_comma_exposed_by_array_collapse() {
        let broken = r#"{"exercises": [{"sets_count": 3},],}"#;
        let repaired = repair_candidate(broken);
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["exercises"][0]["sets_count"], 3);
    }

    #[test]
    fn test_repair_leaves_valid_json_parseable() {
        let valid = r#"{"name": "X", "duration_weeks": 8}"#;
        let repaired = repair_candidate(valid);
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["duration_weeks"], 8);
    }
}
