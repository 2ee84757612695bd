//! Plain-text views printed by the CLI.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use rust_decimal::Decimal;
use wallet::net::types::{Bank, DepositResponse, Transaction, TransactionKind, TransferRequest, User};
use wallet::util::format;
use wallet::{AuthStatus, GuardDecision, Route};

pub fn dashboard(user: &User) -> String {
    let first_name = user.name.split_whitespace().next().unwrap_or(&user.name);
    [
        format!("Welcome back, {first_name}!\n"),
        format!("Balance:        {}", format::naira(user.wallet_balance)),
        format!("Account number: {}", user.account_number.as_deref().unwrap_or("not assigned")),
        format!("Bank:           {}", user.bank_name.as_deref().unwrap_or("-")),
    ]
    .join("\n")
}

pub fn banks(banks: &[&Bank]) -> String {
    if banks.is_empty() {
        return "No banks found.".to_owned();
    }
    let width = banks.iter().map(|b| b.code.len()).max().unwrap_or(0);
    banks
        .iter()
        .map(|bank| format!("{:<width$}  {}", bank.code, bank.name))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn transfer_submitted(transfer: &TransferRequest) -> String {
    format!(
        "Transfer of {} to {} ({}) submitted.\nNarration: {}",
        format::naira(transfer.amount),
        transfer.account_number,
        transfer.bank_code,
        transfer.narration
    )
}

pub fn deposit_started(amount: Decimal, deposit: &DepositResponse) -> String {
    format!(
        "Deposit of {} started. Open this page to complete payment:\n{}",
        format::naira(amount),
        deposit.payment_url
    )
}

pub fn transactions(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions yet.".to_owned();
    }
    transactions.iter().map(transaction_row).collect::<Vec<_>>().join("\n")
}

fn transaction_row(tx: &Transaction) -> String {
    let row = format!(
        "{:<14} {:<8} {:<9} {}  {}",
        format::transaction_amount(tx),
        tx.kind,
        tx.status,
        format::timestamp(&tx.timestamp),
        tx.reference
    );
    let has_recipient = tx.recipient_account_number.is_some() || tx.recipient_bank_code.is_some();
    if !tx.kind.is_outgoing() || (tx.kind != TransactionKind::Transfer && !has_recipient) {
        return row;
    }
    let account = tx.recipient_account_number.as_deref().unwrap_or("?");
    let bank = tx.recipient_bank_code.as_deref().unwrap_or("?");
    match tx.narration.as_deref().filter(|n| !n.is_empty()) {
        Some(narration) => format!("{row}\n    to {account} (bank {bank}): {narration}"),
        None => format!("{row}\n    to {account} (bank {bank})"),
    }
}

pub fn status(status: AuthStatus, decisions: &[(Route, GuardDecision)]) -> String {
    let label = match status {
        AuthStatus::Authenticated => "Authenticated",
        AuthStatus::Unauthenticated => "Unauthenticated",
    };
    let rows = decisions.iter().map(|(route, decision)| {
        let verdict = match decision {
            GuardDecision::Allow => "allow".to_owned(),
            GuardDecision::Redirect(to) => format!("redirect to {to}"),
        };
        format!("  {:<14} {verdict}", route.path())
    });
    std::iter::once(format!("Session: {label}")).chain(rows).collect::<Vec<_>>().join("\n")
}
