//! Visit date normalization.
//!
//! Exhibition tickets are keyed on `(user_id, name, visit_date)` with an
//! exact string match, so every write and lookup path must pass the date
//! through the same canonical form first. Users type dates with `.`,
//! `-`, or `/` separators; the canonical form uses dots.

/// Normalize a visit date to the canonical dotted form.
///
/// Trims surrounding whitespace and replaces `-` and `/` separators
/// with `.`. No calendar validation is performed; two inputs group
/// together exactly when their normalized strings are equal.
#[must_use]
pub fn normalize_visit_date(raw: &str) -> String {
    raw.trim().replace(['-', '/'], ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_input_unchanged() {
        assert_eq!(normalize_visit_date("2025.01.01"), "2025.01.01");
    }

    #[test]
    fn test_hyphen_separators() {
        assert_eq!(normalize_visit_date("2025-01-01"), "2025.01.01");
    }

    #[test]
    fn test_slash_separators() {
        assert_eq!(normalize_visit_date("2025/01/01"), "2025.01.01");
    }

    #[test]
    fn test_mixed_separators_and_whitespace() {
        assert_eq!(normalize_visit_date("  2025-01/01 "), "2025.01.01");
    }

    #[test]
    fn test_all_forms_share_one_key() {
        let forms = ["2025.03.15", "2025-03-15", "2025/03/15"];
        let normalized: Vec<String> =
            forms.iter().map(|f| normalize_visit_date(f)).collect();
        assert!(normalized.iter().all(|n| n == "2025.03.15"));
    }
}
