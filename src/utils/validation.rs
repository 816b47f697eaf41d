use chrono::NaiveDate;

use crate::constants::{MAX_NAME_LENGTH, MAX_PHONE_LENGTH};
use crate::models::ContactBody;
use crate::utils::string_utils::{is_empty_or_whitespace, non_blank, normalize_whitespace};

/// Validation error types
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    Blank(&'static str),
    TooLong { field: &'static str, max: usize },
    InvalidEmail(String),
    InvalidPhone(String),
    BirthDateInFuture(NaiveDate),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Blank(field) => write!(f, "{} must not be empty", field),
            ValidationError::TooLong { field, max } => {
                write!(f, "{} must be at most {} characters", field, max)
            }
            ValidationError::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            ValidationError::InvalidPhone(phone) => write!(f, "Invalid phone number: {}", phone),
            ValidationError::BirthDateInFuture(date) => {
                write!(f, "Birth date {} is in the future", date)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a required name field and return its normalized form
pub fn validate_name(field: &'static str, value: &str) -> Result<String, ValidationError> {
    if is_empty_or_whitespace(value) {
        return Err(ValidationError::Blank(field));
    }

    let normalized = normalize_whitespace(value);
    if normalized.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(normalized)
}

/// Validate an email address of the form `local@domain`
pub fn validate_email(value: &str) -> Result<String, ValidationError> {
    let email = value.trim();
    if email.is_empty() {
        return Err(ValidationError::Blank("email"));
    }

    let invalid = || ValidationError::InvalidEmail(email.to_string());

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    let well_formed = !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.split('.').all(|label| !label.is_empty());

    if !well_formed {
        return Err(invalid());
    }

    Ok(email.to_string())
}

/// Validate a phone number: digits plus common separators
pub fn validate_phone(value: &str) -> Result<String, ValidationError> {
    let phone = value.trim();
    if phone.is_empty() {
        return Err(ValidationError::Blank("phone_number"));
    }

    if phone.chars().count() > MAX_PHONE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "phone_number",
            max: MAX_PHONE_LENGTH,
        });
    }

    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | '.' | ' '));
    if !allowed || !phone.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidPhone(phone.to_string()));
    }

    Ok(phone.to_string())
}

/// Validate a birth date against `today`
pub fn validate_birth_date(birth_date: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if birth_date > today {
        return Err(ValidationError::BirthDateInFuture(birth_date));
    }

    Ok(())
}

/// Validate a whole contact body, returning it with normalized fields
pub fn validate_contact(body: ContactBody, today: NaiveDate) -> Result<ContactBody, ValidationError> {
    validate_birth_date(body.birth_date, today)?;

    Ok(ContactBody {
        first_name: validate_name("first_name", &body.first_name)?,
        last_name: validate_name("last_name", &body.last_name)?,
        email: validate_email(&body.email)?,
        phone_number: validate_phone(&body.phone_number)?,
        birth_date: body.birth_date,
        additional_info: non_blank(body.additional_info.as_deref()).map(str::to_string),
    })
}
