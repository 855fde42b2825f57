use serde_json::Value;

/// Marker appended when a string is cut at its length budget.
const TRUNCATION_MARKER: &str = "...";

/// Trim a string to at most `max_len` characters, keeping the prefix.
/// Truncated strings end in `...` and still fit the budget. Cuts happen
/// on char boundaries, never mid-codepoint.
pub fn trim_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }

    if max_len <= TRUNCATION_MARKER.len() {
        return s.chars().take(max_len).collect();
    }

    let keep = max_len - TRUNCATION_MARKER.len();
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}

/// Cap a parameter list at `max_items`, keeping the first N.
pub fn trim_params(params: Vec<Value>, max_items: usize) -> Vec<Value> {
    let mut params = params;
    params.truncate(max_items);
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_short_string_untouched() {
        assert_eq!(trim_str("hello", 1000), "hello");
    }

    #[test]
    fn test_exact_length_untouched() {
        assert_eq!(trim_str("abcde", 5), "abcde");
    }

    #[test]
    fn test_long_string_gets_marker() {
        let out = trim_str("abcdefghij", 8);
        assert_eq!(out, "abcde...");
        assert_eq!(out.chars().count(), 8);
    }

    #[test]
    fn test_tiny_budget_hard_cut() {
        // No room for the marker: keep a bare prefix.
        assert_eq!(trim_str("abcdefghij", 2), "ab");
    }

    #[test]
    fn test_multibyte_boundary_safe() {
        let out = trim_str("日本語のテキストです", 7);
        assert_eq!(out.chars().count(), 7);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_params_capped_first_n() {
        let params: Vec<_> = (0..10).map(|n| json!(n)).collect();
        let out = trim_params(params, 3);
        assert_eq!(out, vec![json!(0), json!(1), json!(2)]);
    }

    #[test]
    fn test_params_under_cap_untouched() {
        let params = vec![json!("a"), json!("b")];
        assert_eq!(trim_params(params.clone(), 1024), params);
    }
}
