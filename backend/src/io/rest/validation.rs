//! Request body validation for person payloads.
//!
//! Every rule is checked and all failures are reported together, in field
//! declaration order, before anything reaches the domain layer.

use once_cell::sync::Lazy;
use regex::Regex;
use shared::{FieldError, PersonInsertDto};

use crate::domain::models::PersonDraft;

pub const FULL_NAME_REQUIRED: &str = "Full name is required";
pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const PHONE_SIZE: &str = "size must be between 10 and 15";
pub const EMAIL_INVALID: &str = "Email should be valid";

const PHONE_MIN_LEN: usize = 10;
const PHONE_MAX_LEN: usize = 15;
const EMAIL_LOCAL_MAX_LEN: usize = 64;

// Letters outside ASCII are allowed in both the local part and domain labels
const LOCAL_CHARS: &str = r"A-Za-z0-9!#$%&'*+/=?^_`{|}~\x{80}-\x{FFFF}-";
const LABEL_CHARS: &str = r"A-Za-z0-9\x{80}-\x{FFFF}";

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let atom = format!("[{LOCAL_CHARS}]+");
    let label = format!("[{LABEL_CHARS}](?:[{LABEL_CHARS}-]*[{LABEL_CHARS}])?");
    let pattern = format!(
        r"^{atom}(?:\.{atom})*@(?:{label}(?:\.{label})*|\[[0-9A-Fa-f:.]+\])$"
    );
    Regex::new(&pattern).expect("email pattern is a valid regex")
});

/// Check the shape of an email address. Uniqueness is not checked.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, _)) = email.rsplit_once('@') else {
        return false;
    };
    local.chars().count() <= EMAIL_LOCAL_MAX_LEN && EMAIL_PATTERN.is_match(email)
}

/// Turn a request body into a draft, or every field error it has
pub fn validate_person(dto: PersonInsertDto) -> Result<PersonDraft, Vec<FieldError>> {
    let PersonInsertDto {
        full_name,
        phone,
        email,
        blog_url,
        notes,
    } = dto;

    let mut errors = Vec::new();

    let full_name = full_name.filter(|name| !name.is_empty());
    if full_name.is_none() {
        errors.push(FieldError::new("fullName", FULL_NAME_REQUIRED));
    }

    if phone.as_deref().map_or(true, str::is_empty) {
        errors.push(FieldError::new("phone", PHONE_REQUIRED));
    }
    // An absent phone only gets the "required" message; an empty one gets both
    if let Some(ref number) = phone {
        let len = number.chars().count();
        if !(PHONE_MIN_LEN..=PHONE_MAX_LEN).contains(&len) {
            errors.push(FieldError::new("phone", PHONE_SIZE));
        }
    }

    if let Some(ref address) = email {
        if !address.is_empty() && !is_valid_email(address) {
            errors.push(FieldError::new("email", EMAIL_INVALID));
        }
    }

    match (full_name, phone) {
        (Some(full_name), Some(phone)) if errors.is_empty() => Ok(PersonDraft {
            full_name,
            phone,
            email,
            blog_url,
            notes,
        }),
        _ => Err(errors),
    }
}
