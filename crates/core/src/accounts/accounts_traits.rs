//! Ledger trait.
//!
//! The dashboard and the transfer wizard only see this contract, so the
//! in-memory ledger can be swapped for a real core-banking client.

use rust_decimal::Decimal;

use super::accounts_model::{Account, AccountOverview, LedgerTransaction};
use crate::errors::Result;
use crate::transfers::TransferRecord;

pub trait LedgerTrait: Send + Sync {
    /// Balance of the account transfers are debited from.
    fn current_balance(&self) -> Result<Decimal>;

    fn get_account(&self, account_id: &str) -> Result<Account>;

    fn list_accounts(&self) -> Result<Vec<Account>>;

    /// Most recent transactions first, at most `limit`.
    fn recent_transactions(&self, limit: usize) -> Result<Vec<LedgerTransaction>>;

    /// Debits an executed transfer and books it as an outgoing transaction.
    ///
    /// Fails without changing anything when the balance no longer covers the
    /// amount or the transaction was already booked.
    fn apply_transfer(&self, record: &TransferRecord) -> Result<LedgerTransaction>;

    fn overview(&self, transaction_limit: usize) -> Result<AccountOverview> {
        let accounts = self.list_accounts()?;
        let net_position: Decimal = accounts.iter().map(|a| a.balance).sum();
        Ok(AccountOverview {
            accounts,
            recent_transactions: self.recent_transactions(transaction_limit)?,
            net_position,
        })
    }
}
