use rust_decimal_macros::dec;

use super::*;

#[test]
fn name_requires_two_characters() {
    assert_eq!(name("  Ada Obi "), Ok("Ada Obi".to_owned()));
    assert_eq!(name("   "), Err(ValidationError::Required("Full name")));
    assert_eq!(name("A"), Err(ValidationError::NameTooShort));
}

#[test]
fn email_shapes() {
    assert_eq!(email(" ada.obi+wallet@mail.example.ng "), Ok("ada.obi+wallet@mail.example.ng".to_owned()));
    assert!(email("ADA@EXAMPLE.COM").is_ok());
    for bad in ["ada", "ada@", "@example.com", "ada@example", "ada@example.c", "ada@ex ample.com", "a@b@c.com", "ada@example.c0m"] {
        assert_eq!(email(bad), Err(ValidationError::InvalidEmail), "{bad}");
    }
    assert_eq!(email(""), Err(ValidationError::Required("Email")));
}

#[test]
fn phone_shapes() {
    for good in ["08012345678", "(080) 123 45678", "+234-801-2345", "080.123.456789"] {
        assert!(phone(good).is_ok(), "{good}");
    }
    for bad in ["0801234", "+2348012345678", "080-123-4567890", "080-12a-4567", "phone"] {
        assert_eq!(phone(bad), Err(ValidationError::InvalidPhone), "{bad}");
    }
}

#[test]
fn password_strength() {
    assert_eq!(password("Secret123"), Ok("Secret123".to_owned()));
    assert_eq!(password(""), Err(ValidationError::Required("Password")));
    assert_eq!(password("Sec123"), Err(ValidationError::PasswordTooShort));
    assert_eq!(password("secret123"), Err(ValidationError::PasswordTooWeak));
    assert_eq!(password("SECRET123"), Err(ValidationError::PasswordTooWeak));
    assert_eq!(password("SecretPass"), Err(ValidationError::PasswordTooWeak));
}

#[test]
fn deposit_amount_minimum() {
    assert_eq!(deposit_amount(" 100 "), Ok(dec!(100)));
    assert_eq!(deposit_amount("2500.75"), Ok(dec!(2500.75)));
    assert_eq!(deposit_amount("99.99"), Err(ValidationError::BelowMinimum));
    assert_eq!(deposit_amount(""), Err(ValidationError::Required("Amount")));
    assert_eq!(deposit_amount("ten"), Err(ValidationError::InvalidAmount("ten".into())));
}

#[test]
fn transfer_amount_checks_balance() {
    assert_eq!(transfer_amount("1000", Some(dec!(1000))), Ok(dec!(1000)));
    assert_eq!(transfer_amount("1000.01", Some(dec!(1000))), Err(ValidationError::InsufficientBalance));
    assert_eq!(transfer_amount("150", None), Err(ValidationError::InsufficientBalance));
    assert_eq!(
        ValidationError::InsufficientBalance.to_string(),
        "Insufficient balance for this transfer"
    );
}

#[test]
fn account_number_is_ten_digits() {
    assert_eq!(account_number(" 0123456789 "), Ok("0123456789".to_owned()));
    assert_eq!(account_number("012345678"), Err(ValidationError::InvalidAccountNumber));
    assert_eq!(account_number("01234567890"), Err(ValidationError::InvalidAccountNumber));
    assert_eq!(account_number("01234x6789"), Err(ValidationError::InvalidAccountNumber));
}

#[test]
fn login_requires_both_fields() {
    assert_eq!(login(" ada@example.com ", "pw"), Ok(("ada@example.com".to_owned(), "pw".to_owned())));
    assert_eq!(login("", "pw"), Err(ValidationError::Required("Email")));
    assert_eq!(login("ada@example.com", ""), Err(ValidationError::Required("Password")));
}

#[test]
fn registration_reports_first_failure() {
    let ok = registration("Ada Obi", "ada@example.com", "08012345678", "Secret123", None).unwrap();
    assert_eq!(ok.email, "ada@example.com");
    let err = registration("Ada Obi", "nope", "bad", "weak", None).unwrap_err();
    assert_eq!(err, ValidationError::InvalidEmail);
}

#[test]
fn transfer_builds_request_with_default_narration() {
    let request = transfer("500", "035", "0123456789", Some("  "), Some(dec!(1000))).unwrap();
    assert_eq!(request.amount, dec!(500));
    assert_eq!(request.bank_code, "035");
    assert_eq!(request.narration, "Transfer");
    assert_eq!(transfer("500", "", "0123456789", None, Some(dec!(1000))), Err(ValidationError::Required("Bank")));
}
