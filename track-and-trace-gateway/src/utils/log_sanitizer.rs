//! Log sanitization utilities
//!
//! Response bodies are truncated before they reach debug logs and secrets are
//! masked wherever a request type implements `Debug`.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Truncate a body for logging, cutting on a character boundary.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }

    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= TRUNCATE_LIMIT)
        .last()
        .unwrap_or(0);

    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

/// Replace a secret with a fixed-width mask. Empty secrets stay visibly empty.
pub fn mask_secret(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "********" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_string_unchanged() {
        assert_eq!(truncate_for_log("{\"code\":200}"), "{\"code\":200}");
    }

    #[test]
    fn long_body_truncated() {
        let s = "a".repeat(TRUNCATE_LIMIT + 100);
        let result = truncate_for_log(&s);
        assert!(result.starts_with(&"a".repeat(TRUNCATE_LIMIT)));
        assert!(result.ends_with(&format!("total {} bytes]", TRUNCATE_LIMIT + 100)));
    }

    #[test]
    fn multibyte_chars_not_split() {
        let s = "港".repeat(200);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated"));
    }

    #[test]
    fn mask_hides_content() {
        assert_eq!(mask_secret("hunter2"), "********");
        assert_eq!(mask_secret(""), "");
    }
}
