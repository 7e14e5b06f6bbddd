use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Form problems caught before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0} must be a whole number")]
    NotANumber(&'static str),

    #[error("minimum salary must not exceed maximum salary")]
    SalaryRange,

    #[error("email address is invalid")]
    InvalidEmail,

    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("nothing to save")]
    NothingChanged,
}

/// Trimmed value of a mandatory text input.
pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(value.to_string())
}

/// `None` for a blank input, `Some` for a trimmed non-blank one.
pub fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub fn optional_amount(field: &'static str, value: &str) -> Result<Option<i64>, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| ValidationError::NotANumber(field))
}

pub fn required_amount(field: &'static str, value: &str) -> Result<i64, ValidationError> {
    optional_amount(field, value)?.ok_or(ValidationError::Required(field))
}

pub fn salary_range(min: Option<i64>, max: Option<i64>) -> Result<(), ValidationError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(ValidationError::SalaryRange),
        _ => Ok(()),
    }
}

pub fn email(value: &str) -> Result<String, ValidationError> {
    let value = required("email", value)?;
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(value),
        _ => Err(ValidationError::InvalidEmail),
    }
}

pub fn password(value: &str) -> Result<String, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required("password"));
    }
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
    }
    Ok(value.to_string())
}
