//! Soft field checks. None of these block a mutation; the form step surfaces
//! them as warnings.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::models::cv::PersonalInfo;

/// Cap applied to long free-text fields on intake.
pub const MAX_FREE_TEXT_CHARS: usize = 4000;

const MIN_PHONE_CHARS: usize = 8;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern compiles")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email_regex().is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone.trim().chars().count() >= MIN_PHONE_CHARS
}

/// Truncates to at most `max` characters (not bytes).
pub fn clamp_text(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldWarning {
    pub field: &'static str,
    pub message: &'static str,
}

/// Warnings for filled-in but malformed contact fields. Blank fields are not
/// flagged here; the export readiness check covers required ones.
pub fn personal_info_warnings(info: &PersonalInfo) -> Vec<FieldWarning> {
    let mut warnings = Vec::new();
    if !info.email.trim().is_empty() && !is_valid_email(&info.email) {
        warnings.push(FieldWarning {
            field: "email",
            message: "Email looks invalid.",
        });
    }
    if !info.phone.trim().is_empty() && !is_valid_phone(&info.phone) {
        warnings.push(FieldWarning {
            field: "phone",
            message: "Phone should have at least 8 characters.",
        });
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("maria@example.com"));
        assert!(is_valid_email("  maria@example.com  "));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("maria@example"));
        assert!(!is_valid_email("maria @example.com"));
        assert!(!is_valid_email("maria@@example.com"));
    }

    #[test]
    fn test_is_valid_phone() {
        assert!(is_valid_phone("+55 11 1234-5678"));
        assert!(is_valid_phone("12345678"));
        assert!(!is_valid_phone(" 1234567 "));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn test_clamp_text_counts_chars() {
        assert_eq!(clamp_text("abcdef", 3), "abc");
        assert_eq!(clamp_text("ação", 2), "aç");
        assert_eq!(clamp_text("short", 10), "short");
    }

    #[test]
    fn test_personal_info_warnings_skip_blank_fields() {
        let mut info = PersonalInfo::default();
        assert!(personal_info_warnings(&info).is_empty());

        info.email = "not-an-email".to_string();
        info.phone = "123".to_string();
        let fields: Vec<_> = personal_info_warnings(&info)
            .into_iter()
            .map(|w| w.field)
            .collect();
        assert_eq!(fields, vec!["email", "phone"]);
    }
}
