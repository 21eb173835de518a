use tracing::warn;

use crate::error::ExportError;

const API_KEY_PREFIX: &str = "SG.";
const API_KEY_DOCUMENTED_LEN: usize = 39;

/// Rejects blank keys. Keys that don't look like the documented format are
/// accepted with a warning, since SendGrid has changed key lengths before.
pub fn validate_api_key(api_key: &str) -> Result<(), ExportError> {
    let trimmed = api_key.trim();

    if trimmed.is_empty() {
        return Err(ExportError::FlagInvalid(
            "Invalid --apikey value, must be not empty and start with 'SG.'".to_string(),
        ));
    }

    if !trimmed.starts_with(API_KEY_PREFIX) || trimmed.len() != API_KEY_DOCUMENTED_LEN {
        warn!(
            key = %mask_api_key(trimmed),
            length = trimmed.len(),
            "API key does not match the documented 'SG.' format, continuing anyway"
        );
    }

    Ok(())
}

/// Keeps the first four characters and hides the rest.
pub fn mask_api_key(api_key: &str) -> String {
    let visible: String = api_key.chars().take(4).collect();
    format!("{}… ({} chars)", visible, api_key.chars().count())
}

/// Turns a remote-supplied name into a single path component.
///
/// Separators, NUL and control characters become `_`. Names that end up
/// empty, `.` or `..` are replaced by `fallback`.
pub fn sanitize_file_stem(name: &str, fallback: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." if fallback.is_empty() => "_".to_string(),
        "" | "." | ".." => sanitize_file_stem(fallback, ""),
        _ => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_is_rejected() {
        assert!(matches!(
            validate_api_key("   "),
            Err(ExportError::FlagInvalid(_))
        ));
        assert!(validate_api_key("").is_err());
    }

    #[test]
    fn unusual_key_is_only_a_warning() {
        assert!(validate_api_key("not-a-sendgrid-key").is_ok());
        assert!(validate_api_key("SG.abcdefghijklmnopqrstuvwxyz0123456789").is_ok());
    }

    #[test]
    fn masked_key_hides_secret() {
        let masked = mask_api_key("SG.supersecret");
        assert!(masked.starts_with("SG.s"));
        assert!(!masked.contains("supersecret"));
        assert!(masked.contains("14 chars"));
    }

    #[test]
    fn separators_are_replaced() {
        assert_eq!(sanitize_file_stem("a/b\\c", "T1"), "a_b_c");
        assert_eq!(sanitize_file_stem("../../etc/passwd", "T1"), ".._.._etc_passwd");
        assert_eq!(sanitize_file_stem("bad\0name\n", "T1"), "bad_name");
    }

    #[test]
    fn plain_names_are_untouched() {
        assert_eq!(sanitize_file_stem("welcome", "T1"), "welcome");
        assert_eq!(sanitize_file_stem("Order Shipped (v2)", "T1"), "Order Shipped (v2)");
    }

    #[test]
    fn degenerate_names_fall_back_to_id() {
        assert_eq!(sanitize_file_stem("", "T1"), "T1");
        assert_eq!(sanitize_file_stem("..", "T1"), "T1");
        assert_eq!(sanitize_file_stem(" . ", "T1"), "T1");
        assert_eq!(sanitize_file_stem("..", ".."), "_");
    }
}
