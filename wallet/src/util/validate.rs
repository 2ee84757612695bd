//! Form input rules applied before any request leaves the client.
//!
//! Each check trims its input and returns the cleaned value, so views submit
//! exactly what was validated. Messages are user-facing.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::net::types::{Registration, TransferRequest};

/// Smallest deposit or transfer the backend accepts, in naira.
pub const MIN_AMOUNT: Decimal = Decimal::ONE_HUNDRED;

/// Preset deposit amounts offered as shortcuts.
pub const QUICK_DEPOSIT_AMOUNTS: [u32; 4] = [1000, 2000, 5000, 10000];

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_PASSWORD_CHARS: usize = 8;
pub const ACCOUNT_NUMBER_DIGITS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Name must be at least 2 characters")]
    NameTooShort,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid phone number format")]
    InvalidPhone,

    #[error("Password must be at least 8 characters")]
    PasswordTooShort,

    #[error("Password must include uppercase, lowercase, and numbers")]
    PasswordTooWeak,

    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("Minimum amount is ₦100")]
    BelowMinimum,

    #[error("Insufficient balance for this transfer")]
    InsufficientBalance,

    #[error("Enter a valid 10-digit account number")]
    InvalidAccountNumber,
}

// =============================================================================
// FIELDS
// =============================================================================

fn required<'a>(raw: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(trimmed)
}

/// # Errors
///
/// Returns a [`ValidationError`] if the name is blank or shorter than two characters.
pub fn name(raw: &str) -> Result<String, ValidationError> {
    let name = required(raw, "Full name")?;
    if name.chars().count() < MIN_NAME_CHARS {
        return Err(ValidationError::NameTooShort);
    }
    Ok(name.to_owned())
}

/// # Errors
///
/// Returns a [`ValidationError`] if the email is blank or not `local@domain.tld`.
pub fn email(raw: &str) -> Result<String, ValidationError> {
    let email = required(raw, "Email")?;
    if !is_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email.to_owned())
}

/// # Errors
///
/// Returns a [`ValidationError`] if the phone number is blank or malformed.
pub fn phone(raw: &str) -> Result<String, ValidationError> {
    let phone = required(raw, "Phone number")?;
    if !is_phone(phone) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(phone.to_owned())
}

/// Passwords are not trimmed; surrounding spaces are part of the secret.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the password is short or lacks a
/// lowercase letter, an uppercase letter or a digit.
pub fn password(raw: &str) -> Result<String, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::Required("Password"));
    }
    if raw.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }
    let strong = raw.chars().any(|c| c.is_ascii_lowercase())
        && raw.chars().any(|c| c.is_ascii_uppercase())
        && raw.chars().any(|c| c.is_ascii_digit());
    if !strong {
        return Err(ValidationError::PasswordTooWeak);
    }
    Ok(raw.to_owned())
}

/// # Errors
///
/// Returns a [`ValidationError`] if the amount is blank, not a number, or
/// below [`MIN_AMOUNT`].
pub fn deposit_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let amount = required(raw, "Amount")?;
    let amount = Decimal::from_str(amount).map_err(|_| ValidationError::InvalidAmount(amount.to_owned()))?;
    if amount < MIN_AMOUNT {
        return Err(ValidationError::BelowMinimum);
    }
    Ok(amount)
}

/// Like [`deposit_amount`], and the amount may not exceed `balance`. With no
/// cached profile the balance counts as zero.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the amount is invalid or exceeds the balance.
pub fn transfer_amount(raw: &str, balance: Option<Decimal>) -> Result<Decimal, ValidationError> {
    let amount = deposit_amount(raw)?;
    if amount > balance.unwrap_or_default() {
        return Err(ValidationError::InsufficientBalance);
    }
    Ok(amount)
}

/// # Errors
///
/// Returns [`ValidationError::Required`] if no bank is selected.
pub fn bank_code(raw: &str) -> Result<String, ValidationError> {
    required(raw, "Bank").map(str::to_owned)
}

/// # Errors
///
/// Returns a [`ValidationError`] unless the input is exactly ten digits.
pub fn account_number(raw: &str) -> Result<String, ValidationError> {
    let account = required(raw, "Account number")?;
    if account.len() != ACCOUNT_NUMBER_DIGITS || !account.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidAccountNumber);
    }
    Ok(account.to_owned())
}

// =============================================================================
// FORMS
// =============================================================================

/// Sign-in form: both fields must be present; no format checks.
///
/// # Errors
///
/// Returns [`ValidationError::Required`] naming the first missing field.
pub fn login(email: &str, password: &str) -> Result<(String, String), ValidationError> {
    let email = required(email, "Email")?;
    if password.is_empty() {
        return Err(ValidationError::Required("Password"));
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// # Errors
///
/// Returns the first failing field's [`ValidationError`].
pub fn registration(
    name_raw: &str,
    email_raw: &str,
    phone_raw: &str,
    password_raw: &str,
    profile_image: Option<PathBuf>,
) -> Result<Registration, ValidationError> {
    Ok(Registration {
        name: name(name_raw)?,
        email: email(email_raw)?,
        phone: phone(phone_raw)?,
        password: password(password_raw)?,
        profile_image,
    })
}

/// # Errors
///
/// Returns the first failing field's [`ValidationError`].
pub fn transfer(
    amount_raw: &str,
    bank_code_raw: &str,
    account_number_raw: &str,
    narration: Option<&str>,
    balance: Option<Decimal>,
) -> Result<TransferRequest, ValidationError> {
    let amount = transfer_amount(amount_raw, balance)?;
    let bank_code = bank_code(bank_code_raw)?;
    let account_number = account_number(account_number_raw)?;
    Ok(TransferRequest::new(amount, &bank_code, &account_number, narration))
}

// =============================================================================
// PATTERNS
// =============================================================================

/// `local@domain.tld`: local part of letters, digits and `._%+-`; domain of
/// letters, digits, `.` and `-`; a TLD of at least two letters.
fn is_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    let local_ok = !local.is_empty() && local.chars().all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let host_ok = !host.is_empty() && host.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());
    local_ok && host_ok && tld_ok
}

/// `[+][(]ddd[)][sep]ddd[sep]dddd..dddddd` where every bracketed piece is
/// optional and `sep` is `-`, `.` or whitespace.
fn is_phone(raw: &str) -> bool {
    let rest = raw.strip_prefix('+').unwrap_or(raw);
    let rest = rest.strip_prefix('(').unwrap_or(rest);
    let Some(rest) = take_digits(rest, 3) else {
        return false;
    };
    let rest = rest.strip_prefix(')').unwrap_or(rest);
    let rest = skip_separator(rest);
    let Some(rest) = take_digits(rest, 3) else {
        return false;
    };
    let rest = skip_separator(rest);
    (4..=6).contains(&rest.len()) && rest.bytes().all(|b| b.is_ascii_digit())
}

fn take_digits(raw: &str, count: usize) -> Option<&str> {
    let head = raw.get(..count)?;
    head.bytes().all(|b| b.is_ascii_digit()).then(|| &raw[count..])
}

fn skip_separator(raw: &str) -> &str {
    match raw.chars().next() {
        Some(c) if c == '-' || c == '.' || c.is_whitespace() => &raw[c.len_utf8()..],
        _ => raw,
    }
}
