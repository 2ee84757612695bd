//! Wire DTOs for the wallet backend.
//!
//! DESIGN
//! ======
//! Field names follow the backend's JSON exactly (`_id`, `bankCode`,
//! `wallet_balance`) so serde does the mapping and views never see raw JSON.
//! Money is `Decimal`; the backend sends plain JSON numbers.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// USER
// =============================================================================

/// Cached snapshot of the authenticated user's profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Backend identifier; used to list the user's transactions.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    /// Current wallet balance in naira.
    #[serde(default)]
    pub wallet_balance: Decimal,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    /// URL of the uploaded profile picture.
    #[serde(default)]
    pub profile_image: Option<String>,
}

// =============================================================================
// AUTH
// =============================================================================

/// Response body of `POST /auth/login/`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "token")]
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Sign-up form. Sent as multipart so the optional picture can ride along.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub profile_image: Option<PathBuf>,
}

// =============================================================================
// BANKING
// =============================================================================

/// One entry of the bank directory used to pick a transfer destination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    #[serde(rename = "bankCode")]
    pub code: String,
    #[serde(rename = "bankName")]
    pub name: String,
}

impl Bank {
    /// Case-insensitive substring match on the bank name.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Banks whose name contains `query`, in directory order. An empty query
/// keeps every bank.
#[must_use]
pub fn filter_banks<'a>(banks: &'a [Bank], query: &str) -> Vec<&'a Bank> {
    banks.iter().filter(|bank| bank.matches(query)).collect()
}

/// Outbound transfer to a bank account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferRequest {
    pub amount: Decimal,
    pub bank_code: String,
    pub account_number: String,
    pub narration: String,
}

/// Narration used when the sender leaves it blank.
pub const DEFAULT_NARRATION: &str = "Transfer";

impl TransferRequest {
    /// Build a transfer, substituting [`DEFAULT_NARRATION`] for a blank narration.
    #[must_use]
    pub fn new(amount: Decimal, bank_code: &str, account_number: &str, narration: Option<&str>) -> Self {
        let narration = narration
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_NARRATION);
        Self {
            amount,
            bank_code: bank_code.trim().to_owned(),
            account_number: account_number.trim().to_owned(),
            narration: narration.to_owned(),
        }
    }
}

/// Response body of `POST /banking/monnify/deposit/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositResponse {
    /// Hosted payment page the user must open to fund the wallet.
    pub payment_url: String,
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

/// Direction of a history row. Kinds the client does not know are kept
/// verbatim and treated as money out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionKind {
    Deposit,
    Transfer,
    Other(String),
}

impl TransactionKind {
    /// Everything except a deposit takes money out of the wallet.
    #[must_use]
    pub fn is_outgoing(&self) -> bool {
        !matches!(self, Self::Deposit)
    }
}

impl From<String> for TransactionKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "deposit" => Self::Deposit,
            "transfer" => Self::Transfer,
            _ => Self::Other(raw),
        }
    }
}

impl From<TransactionKind> for String {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Deposit => "deposit".to_owned(),
            TransactionKind::Transfer => "transfer".to_owned(),
            TransactionKind::Other(raw) => raw,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => f.pad("deposit"),
            Self::Transfer => f.pad("transfer"),
            Self::Other(raw) => f.pad(raw),
        }
    }
}

/// Settlement state. Anything other than `success` or `pending` is a failure
/// of some kind; the raw value is kept for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    Success,
    Pending,
    Failed(String),
}

impl From<String> for TransactionStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "success" => Self::Success,
            "pending" => Self::Pending,
            _ => Self::Failed(raw),
        }
    }
}

impl From<TransactionStatus> for String {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Success => "success".to_owned(),
            TransactionStatus::Pending => "pending".to_owned(),
            TransactionStatus::Failed(raw) => raw,
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.pad("success"),
            Self::Pending => f.pad("pending"),
            Self::Failed(raw) => f.pad(raw),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub reference: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub status: TransactionStatus,
    /// ISO-8601 timestamp as sent by the backend.
    pub timestamp: String,
    #[serde(default)]
    pub recipient_bank_code: Option<String>,
    #[serde(default)]
    pub recipient_account_number: Option<String>,
    #[serde(default)]
    pub narration: Option<String>,
}

/// Envelope of `GET /banking/transactions/{user_id}`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TransactionList {
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub transactions: Vec<Transaction>,
}

fn deserialize_null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
