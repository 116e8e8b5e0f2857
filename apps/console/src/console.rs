//! Line-oriented terminal front end: login, account overview and the
//! three-step transfer form.

use std::io::Write;

use ebanking_core::accounts::AccountKind;
use ebanking_core::dashboard::{BankServices, DashboardSession};
use ebanking_core::transfers::{DraftEdit, TransferWizard, Urgency, WizardStep};
use ebanking_core::utils::format::format_chf;
use ebanking_core::utils::time_utils::{format_display_date, parse_input_date, INPUT_DATE_FORMAT};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

enum Command {
    Next,
    Back,
    Cancel,
    Confirm,
}

pub struct Console<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }

    /// Runs one session: login, then the dashboard until logout or end of
    /// input.
    pub async fn run(&mut self, services: &BankServices) -> anyhow::Result<()> {
        writeln!(self.out, "Online Banking")?;
        let Some(dashboard) = self.login(services).await? else {
            return Ok(());
        };
        self.dashboard(&dashboard).await
    }

    async fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.out, "{}: ", label)?;
        self.out.flush()?;
        Ok(self
            .lines
            .next_line()
            .await?
            .map(|line| line.trim_end().to_string()))
    }

    /// Empty input keeps `current`.
    async fn prompt_or_keep(&mut self, label: &str, current: &str) -> anyhow::Result<Option<String>> {
        let label = if current.is_empty() {
            label.to_string()
        } else {
            format!("{} [{}]", label, current)
        };
        Ok(self.prompt(&label).await?.map(|value| {
            if value.trim().is_empty() {
                current.to_string()
            } else {
                value
            }
        }))
    }

    async fn login(&mut self, services: &BankServices) -> anyhow::Result<Option<DashboardSession>> {
        loop {
            let Some(username) = self.prompt("Username").await? else {
                return Ok(None);
            };
            let Some(password) = self.prompt("Password").await? else {
                return Ok(None);
            };

            writeln!(self.out, "Connecting...")?;
            match services.login(&username, &password).await {
                Ok(dashboard) => return Ok(Some(dashboard)),
                Err(e) => writeln!(self.out, "Login failed: {}", e)?,
            }
        }
    }

    async fn dashboard(&mut self, dashboard: &DashboardSession) -> anyhow::Result<()> {
        loop {
            self.render_overview(dashboard)?;
            writeln!(self.out, "[1] New transfer  [2] Refresh  [3] Logout")?;

            let Some(choice) = self.prompt("Choice").await? else {
                dashboard.logout()?;
                return Ok(());
            };
            match choice.trim() {
                "1" => self.transfer(dashboard).await?,
                "2" => {}
                "3" => {
                    dashboard.logout()?;
                    writeln!(self.out, "Au revoir {}", dashboard.username())?;
                    return Ok(());
                }
                other => writeln!(self.out, "Unknown choice '{}'", other)?,
            }
        }
    }

    fn render_overview(&mut self, dashboard: &DashboardSession) -> anyhow::Result<()> {
        let overview = dashboard.overview()?;

        writeln!(self.out)?;
        writeln!(
            self.out,
            "{}  ({})",
            dashboard.greeting(),
            dashboard.current_time().format("%d.%m.%Y %H:%M:%S")
        )?;
        writeln!(self.out)?;
        writeln!(self.out, "Accounts")?;
        for account in &overview.accounts {
            let number = match account.kind {
                AccountKind::CreditCard => account.card_number.as_deref(),
                _ => account.iban.as_deref(),
            }
            .unwrap_or("");
            writeln!(
                self.out,
                "  {:<24} {:<28} {:>18}",
                account.name,
                number,
                format_chf(account.balance)
            )?;
            if let Some(available) = account.available_credit() {
                writeln!(self.out, "  {:<24} available credit {}", "", format_chf(available))?;
            }
        }
        writeln!(self.out, "  Net position: {}", format_chf(overview.net_position))?;

        writeln!(self.out)?;
        writeln!(self.out, "Recent transactions")?;
        for transaction in &overview.recent_transactions {
            writeln!(
                self.out,
                "  {}  {:<32} {:<14} {:>16}",
                format_display_date(transaction.date),
                transaction.description,
                transaction.category,
                format_chf(transaction.amount)
            )?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    async fn transfer(&mut self, dashboard: &DashboardSession) -> anyhow::Result<()> {
        let wizard = dashboard.open_transfer()?;

        while wizard.is_open() {
            let step = wizard.step();
            if let Some(number) = step.number() {
                writeln!(self.out)?;
                writeln!(self.out, "New transfer - step {}/3 ({})", number, step)?;
            }

            let completed = match step {
                WizardStep::Beneficiary => self.beneficiary_step(&wizard).await?,
                WizardStep::Details => self.details_step(&wizard).await?,
                WizardStep::Confirm => self.confirm_step(&wizard).await?,
                WizardStep::Closed { .. } => true,
            };
            if !completed {
                // Input ended mid-form.
                wizard.cancel()?;
            }
        }
        Ok(())
    }

    /// Returns `false` when input ended.
    async fn beneficiary_step(&mut self, wizard: &TransferWizard) -> anyhow::Result<bool> {
        let draft = wizard.draft();
        let fields: [(&str, String, fn(String) -> DraftEdit); 3] = [
            ("Beneficiary name", draft.beneficiary_name, DraftEdit::BeneficiaryName),
            ("IBAN (CH.. .... ....)", draft.beneficiary_iban, DraftEdit::BeneficiaryIban),
            ("Beneficiary address", draft.beneficiary_address, DraftEdit::BeneficiaryAddress),
        ];
        for (label, current, edit) in fields {
            let Some(value) = self.prompt_or_keep(label, &current).await? else {
                return Ok(false);
            };
            wizard.edit(edit(value))?;
        }

        match self.choose("[n]ext  [c]ancel", &[Command::Next, Command::Cancel]).await? {
            Some(Command::Next) => self.advance(wizard)?,
            Some(_) => wizard.cancel()?,
            None => return Ok(false),
        }
        Ok(true)
    }

    async fn details_step(&mut self, wizard: &TransferWizard) -> anyhow::Result<bool> {
        let snapshot = wizard.snapshot();
        let draft = snapshot.draft;
        writeln!(self.out, "Available balance: {}", format_chf(snapshot.current_balance))?;

        let Some(amount) = self.prompt_or_keep("Amount (CHF)", &draft.amount).await? else {
            return Ok(false);
        };
        wizard.edit(DraftEdit::Amount(amount))?;

        let Some(reference) = self.prompt_or_keep("Payment reference", &draft.reference).await?
        else {
            return Ok(false);
        };
        wizard.edit(DraftEdit::Reference(reference))?;

        for urgency in Urgency::ALL {
            writeln!(
                self.out,
                "  {:<9} {:<9} fee {}",
                urgency.as_str(),
                urgency.delivery_time(),
                format_chf(urgency.fee())
            )?;
        }
        let urgency = loop {
            let Some(value) = self.prompt_or_keep("Transfer type", draft.urgency.as_str()).await?
            else {
                return Ok(false);
            };
            match value.parse::<Urgency>() {
                Ok(urgency) => break urgency,
                Err(e) => writeln!(self.out, "{}", e)?,
            }
        };
        wizard.edit(DraftEdit::Urgency(urgency))?;

        let current_date = draft.execution_date.format(INPUT_DATE_FORMAT).to_string();
        let execution_date = loop {
            let Some(value) = self.prompt_or_keep("Execution date", &current_date).await? else {
                return Ok(false);
            };
            match parse_input_date(value.trim()) {
                Ok(date) => break date,
                Err(_) => writeln!(self.out, "Expected a date like {}", current_date)?,
            }
        };
        wizard.edit(DraftEdit::ExecutionDate(execution_date))?;

        match self
            .choose(
                "[n]ext  [b]ack  [c]ancel",
                &[Command::Next, Command::Back, Command::Cancel],
            )
            .await?
        {
            Some(Command::Next) => self.advance(wizard)?,
            Some(Command::Back) => {
                wizard.previous()?;
            }
            Some(_) => wizard.cancel()?,
            None => return Ok(false),
        }
        Ok(true)
    }

    async fn confirm_step(&mut self, wizard: &TransferWizard) -> anyhow::Result<bool> {
        let request = wizard.pending_request()?;
        writeln!(self.out, "  Beneficiary:    {}", request.beneficiary_name)?;
        writeln!(self.out, "  IBAN:           {}", request.beneficiary_iban)?;
        writeln!(self.out, "  Address:        {}", request.beneficiary_address)?;
        writeln!(self.out, "  Reference:      {}", request.reference)?;
        writeln!(
            self.out,
            "  Type:           {} ({})",
            request.urgency,
            request.urgency.delivery_time()
        )?;
        writeln!(
            self.out,
            "  Execution date: {}",
            format_display_date(request.execution_date)
        )?;
        writeln!(self.out, "  Amount:         {}", format_chf(request.amount))?;
        if request.fee() > rust_decimal::Decimal::ZERO {
            writeln!(self.out, "  Fee:            {}", format_chf(request.fee()))?;
        }
        writeln!(self.out, "  Total:          {}", format_chf(request.total()))?;

        match self
            .choose(
                "[y] confirm  [b]ack  [c]ancel",
                &[Command::Confirm, Command::Back, Command::Cancel],
            )
            .await?
        {
            Some(Command::Confirm) => {
                writeln!(self.out, "Processing...")?;
                self.out.flush()?;
                match wizard.confirm().await {
                    Ok(record) => writeln!(
                        self.out,
                        "Transfer executed: {} to {} (transaction {})",
                        format_chf(record.amount),
                        record.beneficiary_name,
                        record.transaction_id
                    )?,
                    Err(e) => writeln!(self.out, "Transfer failed: {}", e)?,
                }
            }
            Some(Command::Back) => {
                wizard.previous()?;
            }
            Some(_) => wizard.cancel()?,
            None => return Ok(false),
        }
        Ok(true)
    }

    /// Validates the current step and prints the field errors, if any.
    fn advance(&mut self, wizard: &TransferWizard) -> anyhow::Result<()> {
        wizard.next()?;
        let errors = wizard.errors();
        if !errors.is_empty() {
            writeln!(self.out, "Please correct the following:")?;
            for (field, error) in errors.iter() {
                writeln!(self.out, "  {}: {}", field.label(), error)?;
            }
        }
        Ok(())
    }

    async fn choose(
        &mut self,
        options: &str,
        allowed: &[Command],
    ) -> anyhow::Result<Option<Command>> {
        loop {
            let Some(answer) = self.prompt(options).await? else {
                return Ok(None);
            };
            let command = match answer.trim().to_ascii_lowercase().as_str() {
                "n" | "next" => Command::Next,
                "b" | "back" => Command::Back,
                "c" | "cancel" => Command::Cancel,
                "y" | "yes" | "confirm" => Command::Confirm,
                _ => {
                    writeln!(self.out, "Unknown option '{}'", answer.trim())?;
                    continue;
                }
            };
            if allowed
                .iter()
                .any(|c| std::mem::discriminant(c) == std::mem::discriminant(&command))
            {
                return Ok(Some(command));
            }
            writeln!(self.out, "Option not available here")?;
        }
    }
}
