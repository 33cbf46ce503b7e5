//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic address check; the directory owns canonical validation
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

/// Check if an email address is plausibly valid
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Mask an email address for display and logs
///
/// Keeps the first two characters of the local part and the full domain,
/// e.g. `john.doe@example.com` becomes `jo***@example.com`.
pub fn mask_email(email: &str) -> String {
    if email.chars().count() < 3 {
        return String::from("***");
    }

    match email.find('@') {
        None => {
            let prefix: String = email.chars().take(2).collect();
            format!("{}***", prefix)
        }
        Some(at) => {
            let (local, domain) = email.split_at(at);
            if local.chars().count() <= 2 {
                let first: String = local.chars().take(1).collect();
                format!("{}***{}", first, domain)
            } else {
                let prefix: String = local.chars().take(2).collect();
                format!("{}***{}", prefix, domain)
            }
        }
    }
}
