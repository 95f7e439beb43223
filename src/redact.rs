//! Secret redaction for console and log output
//!
//! Tokens never appear in full anywhere the tool prints or logs.

const VISIBLE_CHARS: usize = 4;

/// Shorten a secret to a recognisable prefix plus its length,
/// e.g. `"eyJh…(842 chars)"`
pub fn preview(secret: &str) -> String {
    let total = secret.chars().count();
    if total <= VISIBLE_CHARS {
        return "[REDACTED]".to_string();
    }
    let prefix: String = secret.chars().take(VISIBLE_CHARS).collect();
    format!("{}…({} chars)", prefix, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_hides_secret() {
        let secret = "eyJhbGciOiJSUzI1NiJ9.payload.signature";
        let shown = preview(secret);
        assert!(shown.starts_with("eyJh…"));
        assert!(shown.contains("38 chars"));
        assert!(!shown.contains("signature"));
    }

    #[test]
    fn test_preview_short_secret() {
        assert_eq!(preview("abc"), "[REDACTED]");
        assert_eq!(preview(""), "[REDACTED]");
    }
}
