//! Field validation for the transfer wizard.
//!
//! Validators are pure: they read the draft and return the complete set of
//! problems for the fields of one step. Callers replace any previous set with
//! the returned one instead of merging.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use crate::constants::MAX_TRANSFER_AMOUNT;
use crate::utils::format::format_chf;
use crate::utils::time_utils;

use super::transfers_model::{TransferDraft, TransferField};

lazy_static! {
    /// Swiss IBAN: `CH`, 2 check digits, four groups of 4 digits, 1 digit.
    /// A single space is tolerated at each group boundary.
    static ref SWISS_IBAN_REGEX: Regex =
        Regex::new(r"^CH[0-9]{2} ?[0-9]{4} ?[0-9]{4} ?[0-9]{4} ?[0-9]{4} ?[0-9]$")
            .expect("Invalid regex pattern");
}

/// Length of a Swiss IBAN once whitespace is removed.
pub const SWISS_IBAN_LENGTH: usize = 21;

/// Problem with a single form field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{} is required", .0.label())]
    Required(TransferField),

    #[error("Invalid IBAN format (Swiss format expected)")]
    InvalidIban,

    #[error("Amount must be a number")]
    AmountNotNumeric,

    #[error("Amount must be positive")]
    AmountNotPositive,

    #[error("Insufficient balance (available: {})", chf(.available))]
    InsufficientFunds { available: Decimal },

    #[error("Maximum amount: {}", chf(.ceiling))]
    AboveCeiling { ceiling: Decimal },

    #[error("Execution date cannot be before {}", display_date(.earliest))]
    ExecutionDateInPast { earliest: NaiveDate },
}

fn chf(amount: &Decimal) -> String {
    format_chf(*amount)
}

fn display_date(date: &NaiveDate) -> String {
    time_utils::format_display_date(*date)
}

/// Field name to error mapping produced by one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<TransferField, FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: TransferField, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn get(&self, field: TransferField) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: TransferField) -> bool {
        self.0.contains_key(&field)
    }

    /// Drops the error of one field, e.g. when the user edits it.
    pub fn clear(&mut self, field: TransferField) -> Option<FieldError> {
        self.0.remove(&field)
    }

    /// Adds every error of `other`, overwriting errors on the same field.
    pub fn extend(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TransferField, &FieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    pub fn fields(&self) -> Vec<TransferField> {
        self.0.keys().copied().collect()
    }

    /// Whether any field of the beneficiary step has an error.
    pub fn has_beneficiary_errors(&self) -> bool {
        self.0.keys().any(|field| field.is_beneficiary_field())
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, error)?;
            first = false;
        }
        Ok(())
    }
}

/// Serialized as `{ "<fieldKey>": "<message>" }`, the shape form UIs expect.
impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, error) in &self.0 {
            map.serialize_entry(field.key(), &error.to_string())?;
        }
        map.end()
    }
}

/// Returns true if `iban` is a well-formed Swiss IBAN.
///
/// Only the layout is checked; the mod-97 checksum is not.
pub fn is_valid_swiss_iban(iban: &str) -> bool {
    let compact_len = iban.chars().filter(|c| !c.is_whitespace()).count();
    compact_len == SWISS_IBAN_LENGTH && SWISS_IBAN_REGEX.is_match(iban.trim())
}

/// Parses a user-entered amount.
///
/// Surrounding whitespace and Swiss thousands separators (`1'000.50`) are
/// accepted. Returns `None` when the input is not a decimal number.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != '\'').collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

fn require(errors: &mut FieldErrors, field: TransferField, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.insert(field, FieldError::Required(field));
        return false;
    }
    true
}

/// Validates the beneficiary step: name, IBAN and address.
pub fn validate_beneficiary(draft: &TransferDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    require(
        &mut errors,
        TransferField::BeneficiaryName,
        &draft.beneficiary_name,
    );

    if require(
        &mut errors,
        TransferField::BeneficiaryIban,
        &draft.beneficiary_iban,
    ) && !is_valid_swiss_iban(&draft.beneficiary_iban)
    {
        errors.insert(TransferField::BeneficiaryIban, FieldError::InvalidIban);
    }

    require(
        &mut errors,
        TransferField::BeneficiaryAddress,
        &draft.beneficiary_address,
    );

    errors
}

/// Validates the details step against the available balance, using today's
/// date as the earliest execution date.
pub fn validate_details(draft: &TransferDraft, current_balance: Decimal) -> FieldErrors {
    validate_details_on(draft, current_balance, time_utils::today())
}

/// Validates the details step: amount, reference and execution date.
///
/// The amount reports only the first failing rule, in this order:
/// required, numeric, positive, covered by the balance, under the ceiling.
pub fn validate_details_on(
    draft: &TransferDraft,
    current_balance: Decimal,
    today: NaiveDate,
) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Some(error) = check_amount(&draft.amount, current_balance) {
        errors.insert(TransferField::Amount, error);
    }

    require(&mut errors, TransferField::Reference, &draft.reference);

    if draft.execution_date < today {
        errors.insert(
            TransferField::ExecutionDate,
            FieldError::ExecutionDateInPast { earliest: today },
        );
    }

    errors
}

fn check_amount(raw: &str, current_balance: Decimal) -> Option<FieldError> {
    if raw.trim().is_empty() {
        return Some(FieldError::Required(TransferField::Amount));
    }
    let Some(amount) = parse_amount(raw) else {
        return Some(FieldError::AmountNotNumeric);
    };
    if amount <= Decimal::ZERO {
        return Some(FieldError::AmountNotPositive);
    }
    if amount > current_balance {
        return Some(FieldError::InsufficientFunds {
            available: current_balance,
        });
    }
    if amount > MAX_TRANSFER_AMOUNT {
        return Some(FieldError::AboveCeiling {
            ceiling: MAX_TRANSFER_AMOUNT,
        });
    }
    None
}
