//! Email format checks.

use std::sync::LazyLock;

use regex::Regex;

/// Shortest accepted address, in bytes (`a@b`).
pub const MIN_EMAIL_LEN: usize = 3;

/// Longest accepted address, in bytes.
pub const MAX_EMAIL_LEN: usize = 254;

// Compiled once on first use.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9+_.-]+@[a-zA-Z0-9.-]+$").expect("EMAIL_REGEX is a valid regex literal")
});

/// Checks that `email` has the shape `local-part@domain`.
///
/// The local part may contain ASCII letters, digits and `+_.-`; the domain
/// letters, digits, `.` and `-`. The domain is not checked any further (no
/// dot is required). Both the length bound and the pattern must hold.
///
/// # Examples
///
/// ```
/// use usersvc_core::user::is_email_valid;
///
/// assert!(is_email_valid("a@b.com"));
/// assert!(is_email_valid("first.last+tag@localhost"));
/// assert!(!is_email_valid("not an email"));
/// assert!(!is_email_valid("a@"));
/// ```
pub fn is_email_valid(email: &str) -> bool {
    (MIN_EMAIL_LEN..=MAX_EMAIL_LEN).contains(&email.len()) && EMAIL_REGEX.is_match(email)
}

/// How emails are compared when used as keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmailMatch {
    /// Byte-for-byte; `A@b.com` and `a@b.com` are different users.
    #[default]
    Exact,
    /// Emails are lowercased before lookup and persistence.
    CaseInsensitive,
}

impl EmailMatch {
    /// Returns the key form of `email` under this policy.
    pub fn normalize(self, email: &str) -> String {
        match self {
            EmailMatch::Exact => email.to_string(),
            EmailMatch::CaseInsensitive => email.to_lowercase(),
        }
    }
}
