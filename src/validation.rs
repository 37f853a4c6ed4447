//! Input checks applied to request bodies before anything reaches the store.

use thiserror::Error;

const MAX_EMAIL_LENGTH: usize = 254;
const MAX_LOCAL_PART_LENGTH: usize = 64;
const MAX_LABEL_LENGTH: usize = 63;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,

    #[error("email exceeds {MAX_EMAIL_LENGTH} characters")]
    TooLong,

    #[error("email must contain exactly one '@'")]
    AtSymbol,

    #[error("email local part is invalid")]
    LocalPart,

    #[error("email domain is invalid")]
    Domain,
}

/// Returns the trimmed value, or an error naming the field when nothing is left.
pub fn require_non_empty(field: &str, value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Validates an address and returns it trimmed, with the domain lowercased.
pub fn validate_email(email: &str) -> Result<String, EmailError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(EmailError::Empty);
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(EmailError::TooLong);
    }

    let (local, domain) = match email.split_once('@') {
        Some((l, d)) if !d.contains('@') => (l, d),
        _ => return Err(EmailError::AtSymbol),
    };

    if local.is_empty()
        || local.len() > MAX_LOCAL_PART_LENGTH
        || local.starts_with('.')
        || local.ends_with('.')
        || local.contains("..")
        || !local.chars().all(is_valid_local_char)
    {
        return Err(EmailError::LocalPart);
    }

    if !is_valid_domain(domain) {
        return Err(EmailError::Domain);
    }

    Ok(format!("{local}@{}", domain.to_ascii_lowercase()))
}

fn is_valid_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+/=?^_`{|}~.-".contains(c)
}

fn is_valid_domain(domain: &str) -> bool {
    // at least two labels, each 1..=63 of [a-z0-9-] without edge hyphens
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && label.len() <= MAX_LABEL_LENGTH
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}
