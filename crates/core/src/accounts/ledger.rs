use std::collections::VecDeque;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, warn};
use rust_decimal::Decimal;

use super::accounts_constants::{transfer_description, TRANSFER_CATEGORY};
use super::accounts_model::{Account, LedgerSeed, LedgerTransaction, TransactionDirection};
use super::accounts_traits::LedgerTrait;
use crate::errors::{Error, LedgerError, Result};
use crate::transfers::{TransferListenerTrait, TransferRecord};

struct LedgerState {
    accounts: Vec<Account>,
    /// Most recent first
    transactions: VecDeque<LedgerTransaction>,
}

/// Process-local ledger seeded from configuration.
pub struct InMemoryLedger {
    debit_account_id: String,
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    /// Creates a ledger from its seed. The debit account must exist.
    pub fn new(seed: LedgerSeed) -> Result<Self> {
        if !seed.accounts.iter().any(|a| a.id == seed.debit_account_id) {
            return Err(Error::InvalidConfigValue(format!(
                "debit account '{}' is not one of the seeded accounts",
                seed.debit_account_id
            )));
        }
        Ok(Self {
            debit_account_id: seed.debit_account_id,
            state: RwLock::new(LedgerState {
                accounts: seed.accounts,
                transactions: seed.transactions.into(),
            }),
        })
    }

    pub fn debit_account_id(&self) -> &str {
        &self.debit_account_id
    }

    fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LedgerTrait for InMemoryLedger {
    fn current_balance(&self) -> Result<Decimal> {
        Ok(self.get_account(&self.debit_account_id)?.balance)
    }

    fn get_account(&self, account_id: &str) -> Result<Account> {
        self.read()
            .accounts
            .iter()
            .find(|a| a.id == account_id)
            .cloned()
            .ok_or_else(|| LedgerError::AccountNotFound(account_id.to_string()).into())
    }

    fn list_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.read().accounts.clone())
    }

    fn recent_transactions(&self, limit: usize) -> Result<Vec<LedgerTransaction>> {
        Ok(self.read().transactions.iter().take(limit).cloned().collect())
    }

    fn apply_transfer(&self, record: &TransferRecord) -> Result<LedgerTransaction> {
        let mut state = self.write();

        if state
            .transactions
            .iter()
            .any(|t| t.id == record.transaction_id)
        {
            return Err(LedgerError::DuplicateTransaction(record.transaction_id.clone()).into());
        }

        let account = state
            .accounts
            .iter_mut()
            .find(|a| a.id == self.debit_account_id)
            .ok_or_else(|| LedgerError::AccountNotFound(self.debit_account_id.clone()))?;

        if record.amount > account.balance {
            warn!(
                "Rejecting transfer {}: balance {} no longer covers {}",
                record.transaction_id, account.balance, record.amount
            );
            return Err(LedgerError::InsufficientFunds {
                account_id: account.id.clone(),
                available: account.balance,
                requested: record.amount,
            }
            .into());
        }
        account.balance -= record.amount;
        debug!(
            "Debited {} from account '{}', new balance {}",
            record.amount, account.id, account.balance
        );

        let transaction = LedgerTransaction {
            id: record.transaction_id.clone(),
            account_id: self.debit_account_id.clone(),
            direction: TransactionDirection::Outgoing,
            description: transfer_description(&record.beneficiary_name),
            amount: -record.amount,
            date: record.execution_date,
            category: TRANSFER_CATEGORY.to_string(),
        };
        state.transactions.push_front(transaction.clone());
        Ok(transaction)
    }
}

impl TransferListenerTrait for InMemoryLedger {
    fn on_transfer_executed(&self, record: &TransferRecord) -> Result<()> {
        self.apply_transfer(record).map(|_| ())
    }
}
