//! Dashboard session: wires the ledger, login and transfer wizard together.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Local};
use log::info;

use crate::accounts::{AccountOverview, InMemoryLedger, LedgerTrait};
use crate::auth::{AuthServiceTrait, MockAuthService, Session};
use crate::config::BankConfig;
use crate::constants::RECENT_TRANSACTIONS_LIMIT;
use crate::errors::Result;
use crate::notifications::NotificationSink;
use crate::scheduler::ScheduledTask;
use crate::transfers::{MockTransferGateway, TransferWizard};

/// Long-lived services of the banking mock.
pub struct BankServices {
    pub ledger: Arc<dyn LedgerTrait>,
    pub auth: Arc<dyn AuthServiceTrait>,
    pub wizard: Arc<TransferWizard>,
    pub notifications: Arc<dyn NotificationSink>,
    clock_tick: std::time::Duration,
}

impl BankServices {
    /// Builds the in-memory services described by `config`.
    pub fn from_config(
        config: &BankConfig,
        notifications: Arc<dyn NotificationSink>,
    ) -> Result<Self> {
        config.validate()?;

        let ledger = Arc::new(InMemoryLedger::new(config.ledger.clone())?);
        let auth = Arc::new(MockAuthService::new(
            config.credentials.clone(),
            config.login_delay(),
            notifications.clone(),
        ));
        let gateway = Arc::new(MockTransferGateway::new(config.transfer_processing_delay()));
        let wizard = Arc::new(TransferWizard::new(
            gateway,
            ledger.clone(),
            notifications.clone(),
        ));

        Ok(Self {
            ledger,
            auth,
            wizard,
            notifications,
            clock_tick: config.clock_tick(),
        })
    }

    /// Logs in and starts a dashboard session.
    pub async fn login(&self, username: &str, password: &str) -> Result<DashboardSession> {
        let session = self.auth.login(username, password).await?;
        Ok(DashboardSession::start(
            session,
            self.ledger.clone(),
            self.wizard.clone(),
            self.clock_tick,
        ))
    }
}

/// What a logged-in user sees. Dropping the session stops its clock.
pub struct DashboardSession {
    session: Session,
    ledger: Arc<dyn LedgerTrait>,
    wizard: Arc<TransferWizard>,
    clock: Arc<RwLock<DateTime<Local>>>,
    clock_task: ScheduledTask,
}

impl DashboardSession {
    /// Must be called from within a tokio runtime.
    pub fn start(
        session: Session,
        ledger: Arc<dyn LedgerTrait>,
        wizard: Arc<TransferWizard>,
        clock_tick: std::time::Duration,
    ) -> Self {
        let clock = Arc::new(RwLock::new(Local::now()));
        let clock_for_task = clock.clone();
        let clock_task = ScheduledTask::spawn("dashboard-clock", clock_tick, move || {
            let clock = clock_for_task.clone();
            async move {
                *clock.write().unwrap_or_else(PoisonError::into_inner) = Local::now();
            }
        });

        Self {
            session,
            ledger,
            wizard,
            clock,
            clock_task,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn username(&self) -> &str {
        &self.session.username
    }

    pub fn greeting(&self) -> String {
        format!("Bonjour {}", self.session.username)
    }

    /// Time shown in the header, refreshed by the clock task.
    pub fn current_time(&self) -> DateTime<Local> {
        *self.clock.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock_task.is_running()
    }

    pub fn overview(&self) -> Result<AccountOverview> {
        self.ledger.overview(RECENT_TRANSACTIONS_LIMIT)
    }

    /// Opens the transfer wizard with the current balance of the debit
    /// account.
    pub fn open_transfer(&self) -> Result<Arc<TransferWizard>> {
        let balance = self.ledger.current_balance()?;
        self.wizard.open(balance)?;
        Ok(self.wizard.clone())
    }

    /// Ends the session, discarding any open transfer draft and stopping the
    /// clock.
    ///
    /// Refused while a transfer is being submitted.
    pub fn logout(&self) -> Result<()> {
        self.wizard.cancel()?;
        self.clock_task.cancel();
        info!("User '{}' logged out", self.session.username);
        Ok(())
    }
}
