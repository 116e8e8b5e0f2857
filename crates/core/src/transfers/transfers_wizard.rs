//! Three-step transfer wizard: beneficiary, details, confirmation.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transfers_model::{DraftEdit, TransferDraft, TransferRecord, TransferRequest};
use super::transfers_traits::{TransferGatewayTrait, TransferListenerTrait};
use super::transfers_validation::{validate_beneficiary, validate_details, FieldErrors};
use crate::errors::{Result, WizardError};
use crate::notifications::{Notification, NotificationSink};
use crate::utils::format::format_chf;
use crate::utils::time_utils;

/// Why the wizard is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CloseReason {
    NotOpened,
    Cancelled,
    Completed,
}

/// Position of the wizard in its workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum WizardStep {
    Beneficiary,
    Details,
    Confirm,
    Closed { reason: CloseReason },
}

impl WizardStep {
    /// 1-based step number, `None` when closed.
    pub fn number(self) -> Option<u8> {
        match self {
            WizardStep::Beneficiary => Some(1),
            WizardStep::Details => Some(2),
            WizardStep::Confirm => Some(3),
            WizardStep::Closed { .. } => None,
        }
    }

    pub fn is_open(self) -> bool {
        !matches!(self, WizardStep::Closed { .. })
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardStep::Beneficiary => f.write_str("beneficiary"),
            WizardStep::Details => f.write_str("details"),
            WizardStep::Confirm => f.write_str("confirm"),
            WizardStep::Closed { .. } => f.write_str("closed"),
        }
    }
}

/// Read-only view of the wizard, for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    pub step: WizardStep,
    pub draft: TransferDraft,
    pub errors: FieldErrors,
    pub current_balance: Decimal,
    pub is_submitting: bool,
    pub submission_error: Option<String>,
}

#[derive(Debug)]
struct WizardState {
    step: WizardStep,
    draft: TransferDraft,
    errors: FieldErrors,
    current_balance: Decimal,
    submitting: bool,
    submission_error: Option<String>,
}

impl WizardState {
    fn closed(reason: CloseReason) -> Self {
        Self {
            step: WizardStep::Closed { reason },
            draft: TransferDraft::empty(time_utils::today()),
            errors: FieldErrors::new(),
            current_balance: Decimal::ZERO,
            submitting: false,
            submission_error: None,
        }
    }

    fn reset(&mut self, step: WizardStep) {
        self.step = step;
        self.draft = TransferDraft::empty(time_utils::today());
        self.errors = FieldErrors::new();
        self.submission_error = None;
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.submitting {
            return Err(WizardError::SubmissionInProgress.into());
        }
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        self.ensure_idle()?;
        if !self.step.is_open() {
            return Err(WizardError::Closed.into());
        }
        Ok(())
    }
}

/// Drives one transfer attempt at a time.
///
/// All methods take `&self`; the state sits behind a mutex that is never held
/// across the submission await, so the wizard can be shared with the task
/// that runs `confirm` while the UI keeps calling `cancel` or `snapshot`.
pub struct TransferWizard {
    gateway: Arc<dyn TransferGatewayTrait>,
    listener: Arc<dyn TransferListenerTrait>,
    notifications: Arc<dyn NotificationSink>,
    state: Mutex<WizardState>,
}

impl TransferWizard {
    pub fn new(
        gateway: Arc<dyn TransferGatewayTrait>,
        listener: Arc<dyn TransferListenerTrait>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            gateway,
            listener,
            notifications,
            state: Mutex::new(WizardState::closed(CloseReason::NotOpened)),
        }
    }

    fn state(&self) -> MutexGuard<'_, WizardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens the wizard on an empty draft. `current_balance` is the amount
    /// available on the debited account at open time.
    pub fn open(&self, current_balance: Decimal) -> Result<()> {
        let mut state = self.state();
        state.ensure_idle()?;
        state.reset(WizardStep::Beneficiary);
        state.current_balance = current_balance;
        debug!(
            "Transfer wizard opened, available balance {}",
            format_chf(current_balance)
        );
        Ok(())
    }

    /// Abandons the current attempt and discards the draft.
    ///
    /// Refused while a submission is in flight. Cancelling a closed wizard is
    /// a no-op.
    pub fn cancel(&self) -> Result<()> {
        let mut state = self.state();
        state.ensure_idle()?;
        if !state.step.is_open() {
            return Ok(());
        }
        debug!("Transfer wizard cancelled on step '{}'", state.step);
        state.reset(WizardStep::Closed {
            reason: CloseReason::Cancelled,
        });
        Ok(())
    }

    /// Applies one form edit and clears the error previously reported on
    /// that field.
    ///
    /// Only fields shown on the current step can be edited; the confirmation
    /// step is read-only.
    pub fn edit(&self, edit: DraftEdit) -> Result<()> {
        let mut state = self.state();
        state.ensure_open()?;

        let field = edit.field();
        let editable = match state.step {
            WizardStep::Beneficiary => field.is_beneficiary_field(),
            WizardStep::Details => !field.is_beneficiary_field(),
            _ => false,
        };
        if !editable {
            return Err(WizardError::FieldNotEditable {
                field: field.key().to_string(),
                step: state.step,
            }
            .into());
        }

        state.draft.apply(edit);
        state.errors.clear(field);
        Ok(())
    }

    /// Validates the current step and advances when it has no errors.
    ///
    /// Leaving the details step re-checks the beneficiary as well; if that
    /// fails the wizard goes back to the beneficiary step. Returns the step
    /// the wizard is on afterwards.
    pub fn next(&self) -> Result<WizardStep> {
        let mut state = self.state();
        state.ensure_open()?;

        match state.step {
            WizardStep::Beneficiary => {
                state.errors = validate_beneficiary(&state.draft);
                if state.errors.is_empty() {
                    state.step = WizardStep::Details;
                }
            }
            WizardStep::Details => {
                let mut errors = validate_beneficiary(&state.draft);
                errors.extend(validate_details(&state.draft, state.current_balance));
                if errors.has_beneficiary_errors() {
                    state.step = WizardStep::Beneficiary;
                } else if errors.is_empty() {
                    state.step = WizardStep::Confirm;
                }
                state.errors = errors;
            }
            step => {
                return Err(WizardError::InvalidTransition {
                    from: step,
                    action: "advance",
                }
                .into());
            }
        }

        if !state.errors.is_empty() {
            debug!("Transfer wizard validation failed: {}", state.errors);
        }
        Ok(state.step)
    }

    /// Goes back one step without validating.
    pub fn previous(&self) -> Result<WizardStep> {
        let mut state = self.state();
        state.ensure_open()?;

        state.step = match state.step {
            WizardStep::Details => WizardStep::Beneficiary,
            WizardStep::Confirm => WizardStep::Details,
            step => {
                return Err(WizardError::InvalidTransition {
                    from: step,
                    action: "go back",
                }
                .into());
            }
        };
        state.submission_error = None;
        Ok(state.step)
    }

    /// Transfer that `confirm` would submit, for the confirmation summary.
    pub fn pending_request(&self) -> Result<TransferRequest> {
        let state = self.state();
        if state.step != WizardStep::Confirm {
            return Err(WizardError::InvalidTransition {
                from: state.step,
                action: "summarize",
            }
            .into());
        }
        TransferRequest::try_from(&state.draft)
    }

    /// Submits the confirmed transfer.
    ///
    /// While the gateway works, `cancel`, `edit`, navigation and a second
    /// `confirm` are refused. On success the listener receives the record,
    /// the draft is reset and the wizard closes. On failure the wizard stays
    /// on the confirmation step with the draft intact and the error recorded.
    pub async fn confirm(&self) -> Result<TransferRecord> {
        let request = {
            let mut state = self.state();
            state.ensure_open()?;
            if state.step != WizardStep::Confirm {
                return Err(WizardError::InvalidTransition {
                    from: state.step,
                    action: "confirm",
                }
                .into());
            }
            let request = TransferRequest::try_from(&state.draft)?;
            state.submitting = true;
            state.submission_error = None;
            request
        };

        let in_flight = InFlight::new(self);
        let outcome = match self.gateway.submit(&request).await {
            Ok(()) => {
                let record = TransferRecord::from_request(request, time_utils::now_utc());
                self.listener
                    .on_transfer_executed(&record)
                    .map(|_| record)
            }
            Err(e) => Err(e),
        };

        let mut state = in_flight.settle();
        match outcome {
            Ok(record) => {
                state.reset(WizardStep::Closed {
                    reason: CloseReason::Completed,
                });
                drop(state);
                info!(
                    "Transfer {} executed: {} to {}",
                    record.transaction_id,
                    format_chf(record.amount),
                    record.beneficiary_name
                );
                self.notifications.notify(Notification::success(
                    "Transfer executed",
                    format!(
                        "{} transferred to {}",
                        format_chf(record.amount),
                        record.beneficiary_name
                    ),
                ));
                Ok(record)
            }
            Err(e) => {
                state.submission_error = Some(e.to_string());
                drop(state);
                warn!("Transfer submission failed: {}", e);
                self.notifications
                    .notify(Notification::error("Transfer failed", e.to_string()));
                Err(e)
            }
        }
    }

    pub fn step(&self) -> WizardStep {
        self.state().step
    }

    pub fn is_open(&self) -> bool {
        self.state().step.is_open()
    }

    pub fn is_submitting(&self) -> bool {
        self.state().submitting
    }

    pub fn draft(&self) -> TransferDraft {
        self.state().draft.clone()
    }

    pub fn errors(&self) -> FieldErrors {
        self.state().errors.clone()
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        let state = self.state();
        WizardSnapshot {
            step: state.step,
            draft: state.draft.clone(),
            errors: state.errors.clone(),
            current_balance: state.current_balance,
            is_submitting: state.submitting,
            submission_error: state.submission_error.clone(),
        }
    }
}

/// Clears the in-flight flag if the `confirm` future is dropped mid-await.
struct InFlight<'a> {
    wizard: &'a TransferWizard,
    settled: bool,
}

impl<'a> InFlight<'a> {
    fn new(wizard: &'a TransferWizard) -> Self {
        Self {
            wizard,
            settled: false,
        }
    }

    /// Clears the flag and hands back the locked state, so the outcome is
    /// recorded before any other caller sees the wizard idle.
    fn settle(mut self) -> MutexGuard<'a, WizardState> {
        self.settled = true;
        let mut state = self.wizard.state();
        state.submitting = false;
        state
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.wizard.state().submitting = false;
        }
    }
}
