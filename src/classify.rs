//! Response classification.
//!
//! Two predicates over response text: "is this a challenge page" and "is this
//! strictly valid JSON". The challenge check is a marker-phrase heuristic, so
//! false positives (e.g. a JSON document mentioning "verification") are
//! accepted.

use serde::de::IgnoredAny;

use crate::config::CAPTCHA_MARKERS;
use crate::fetch::FetchOutcome;

/// Returns true only if the whole text parses as JSON.
///
/// Uses `serde_json`'s strict parser: no comments, no trailing commas, no
/// trailing garbage after the value. Absent or empty text is not JSON.
pub fn is_json(text: Option<&str>) -> bool {
    match text {
        Some(t) if !t.trim().is_empty() => serde_json::from_str::<IgnoredAny>(t).is_ok(),
        _ => false,
    }
}

/// Returns true if the text contains any challenge marker, ignoring case.
pub fn is_captcha(text: Option<&str>) -> bool {
    let Some(t) = text.filter(|t| !t.is_empty()) else {
        return false;
    };
    let lowered = t.to_lowercase();
    CAPTCHA_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

/// A fetch counts as a JSON success only if it completed, is not a challenge
/// page, and its body is valid JSON.
pub fn is_genuine_json(outcome: &FetchOutcome) -> bool {
    let text = outcome.text.as_deref();
    outcome.ok && !is_captcha(text) && is_json(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_json_accepts_documents() {
        assert!(is_json(Some("{\"a\": 1}")));
        assert!(is_json(Some("[1, 2, 3]")));
        assert!(is_json(Some("  \"string\"\n")));
        assert!(is_json(Some("42")));
        assert!(is_json(Some("null")));
    }

    #[test]
    fn test_is_json_rejects_non_json() {
        assert!(!is_json(None));
        assert!(!is_json(Some("")));
        assert!(!is_json(Some("   ")));
        assert!(!is_json(Some("<html><body>hi</body></html>")));
        assert!(!is_json(Some("plain text")));
    }

    #[test]
    fn test_is_json_is_strict() {
        assert!(!is_json(Some("{\"a\": 1,}")));
        assert!(!is_json(Some("{a: 1}")));
        assert!(!is_json(Some("{\"a\": 1} trailing")));
        assert!(!is_json(Some("// comment\n{}")));
        assert!(!is_json(Some("{\"a\": 1")));
    }

    #[test]
    fn test_is_captcha_markers() {
        assert!(is_captcha(Some("Please complete the CAPTCHA")));
        assert!(is_captcha(Some("<h1>Verify you are human</h1>")));
        assert!(is_captcha(Some("Email verification required")));
        assert!(is_captcha(Some("Are you a Robot?")));
        assert!(is_captcha(Some("Attention Required! | Cloudflare")));
    }

    #[test]
    fn test_is_captcha_negative() {
        assert!(!is_captcha(None));
        assert!(!is_captcha(Some("")));
        assert!(!is_captcha(Some("{\"items\": []}")));
        assert!(!is_captcha(Some("Just a regular page")));
    }

    #[test]
    fn test_genuine_json_requires_all_three() {
        assert!(is_genuine_json(&FetchOutcome::success("{\"ok\": true}")));
        assert!(!is_genuine_json(&FetchOutcome::success("not json")));
        assert!(!is_genuine_json(&FetchOutcome::failure("Request timed out")));

        // Valid JSON that trips the challenge heuristic is rejected
        let flagged = FetchOutcome::success("{\"message\": \"cloudflare says hi\"}");
        assert!(is_json(flagged.text.as_deref()));
        assert!(!is_genuine_json(&flagged));

        let not_ok = FetchOutcome {
            ok: false,
            text: Some("{}".to_string()),
            error: None,
        };
        assert!(!is_genuine_json(&not_ok));
    }
}
