//! Canonical form for free-text status cells.

/// Trimmed, lower-cased text of a cell; a missing cell normalizes to `""`.
pub fn normalize(raw: Option<&str>) -> String {
    raw.map(|s| s.trim().to_lowercase()).unwrap_or_default()
}

/// Normalizes every entry of a status vocabulary, dropping blanks and
/// duplicates but keeping first-seen order. A blank entry would otherwise
/// match every missing cell.
pub fn normalize_all<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for v in values {
        let n = normalize(Some(v.as_ref()));
        if !n.is_empty() && !out.contains(&n) {
            out.push(n);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_is_empty() {
        assert_eq!(normalize(None), "");
    }

    #[test]
    fn case_and_whitespace_insensitive() {
        assert_eq!(normalize(Some(" Blocked ")), normalize(Some("blocked")));
        assert_eq!(normalize(Some("\tAutomated UAT\n")), "automated uat");
    }

    #[test]
    fn idempotent() {
        for raw in ["  In Progress", "READY to be Automated ", "", "   "] {
            let once = normalize(Some(raw));
            assert_eq!(normalize(Some(&once)), once);
        }
    }

    #[test]
    fn vocabulary_is_deduplicated_after_normalizing() {
        let v = normalize_all(&["Blocked", " blocked", "  ", "On Hold"]);
        assert_eq!(v, vec!["blocked".to_string(), "on hold".to_string()]);
    }
}
