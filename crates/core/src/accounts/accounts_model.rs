//! Account and ledger domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::CURRENCY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountKind {
    /// Main current account; transfers are debited from it
    Checking,
    Savings,
    /// Balance is the amount owed (negative), bounded by the credit limit
    CreditCard,
}

/// Domain model representing an account shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub kind: AccountKind,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub balance: Decimal,
    pub iban: Option<String>,
    /// Account number as printed on statements
    pub account_number: Option<String>,
    /// Masked card number, for credit cards
    pub card_number: Option<String>,
    pub credit_limit: Option<Decimal>,
}

fn default_currency() -> String {
    CURRENCY.to_string()
}

impl Account {
    /// Remaining spending capacity of a credit card.
    pub fn available_credit(&self) -> Option<Decimal> {
        self.credit_limit.map(|limit| limit + self.balance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionDirection {
    Incoming,
    Outgoing,
}

/// A booked movement on an account.
///
/// `amount` is signed: negative for outgoing movements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTransaction {
    pub id: String,
    pub account_id: String,
    pub direction: TransactionDirection,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: String,
}

/// Initial ledger content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSeed {
    /// Account that transfers are debited from
    pub debit_account_id: String,
    pub accounts: Vec<Account>,
    /// Most recent first
    pub transactions: Vec<LedgerTransaction>,
}

/// Accounts and recent activity, as shown on the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOverview {
    pub accounts: Vec<Account>,
    pub recent_transactions: Vec<LedgerTransaction>,
    /// Sum of all account balances
    pub net_position: Decimal,
}
