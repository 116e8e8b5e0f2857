//! Demo ledger content.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::accounts_model::{
    Account, AccountKind, LedgerSeed, LedgerTransaction, TransactionDirection,
};
use crate::constants::CURRENCY;

pub const MAIN_ACCOUNT_ID: &str = "main";
pub const SAVINGS_ACCOUNT_ID: &str = "savings";
pub const CREDIT_CARD_ACCOUNT_ID: &str = "credit-card";

/// Category of transactions booked by the transfer wizard
pub const TRANSFER_CATEGORY: &str = "Virement";

/// Description of an outgoing transfer in the transaction list.
pub fn transfer_description(beneficiary_name: &str) -> String {
    format!("Virement à {}", beneficiary_name)
}

fn account(
    id: &str,
    name: &str,
    kind: AccountKind,
    balance: Decimal,
    iban: Option<&str>,
) -> Account {
    Account {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        currency: CURRENCY.to_string(),
        balance,
        iban: iban.map(str::to_string),
        account_number: None,
        card_number: None,
        credit_limit: None,
    }
}

fn transaction(
    id: &str,
    description: &str,
    amount: Decimal,
    (y, m, d): (i32, u32, u32),
    category: &str,
) -> LedgerTransaction {
    let direction = if amount.is_sign_negative() {
        TransactionDirection::Outgoing
    } else {
        TransactionDirection::Incoming
    };
    LedgerTransaction {
        id: id.to_string(),
        account_id: MAIN_ACCOUNT_ID.to_string(),
        direction,
        description: description.to_string(),
        amount,
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        category: category.to_string(),
    }
}

impl Default for LedgerSeed {
    /// The demo customer's accounts and last five transactions.
    fn default() -> Self {
        let main = Account {
            account_number: Some("1623-8529-57".to_string()),
            ..account(
                MAIN_ACCOUNT_ID,
                "Compte Principal",
                AccountKind::Checking,
                dec!(45750.85),
                Some("CH93 0076 2011 6238 5295 7"),
            )
        };
        let savings = account(
            SAVINGS_ACCOUNT_ID,
            "Compte Épargne",
            AccountKind::Savings,
            dec!(128340.20),
            Some("CH58 0076 2011 6238 5295 8"),
        );
        let credit_card = Account {
            card_number: Some("**** **** **** 8529".to_string()),
            credit_limit: Some(dec!(15000)),
            ..account(
                CREDIT_CARD_ACCOUNT_ID,
                "Carte de Crédit",
                AccountKind::CreditCard,
                dec!(-2150.60),
                None,
            )
        };

        Self {
            debit_account_id: MAIN_ACCOUNT_ID.to_string(),
            accounts: vec![main, savings, credit_card],
            transactions: vec![
                transaction("1", "Migros Genève", dec!(-87.45), (2025, 1, 27), "Alimentaire"),
                transaction(
                    "2",
                    "Salaire - Entreprise SA",
                    dec!(8500.00),
                    (2025, 1, 25),
                    "Salaire",
                ),
                transaction(
                    "3",
                    "Loyer Appartement",
                    dec!(-1850.00),
                    (2025, 1, 25),
                    "Logement",
                ),
                transaction(
                    "4",
                    "Swisscom AG",
                    dec!(-89.90),
                    (2025, 1, 24),
                    "Télécommunications",
                ),
                transaction(
                    "5",
                    "Remboursement assurance",
                    dec!(450.00),
                    (2025, 1, 23),
                    "Assurance",
                ),
            ],
        }
    }
}
