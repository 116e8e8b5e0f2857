//! Transfer domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{EXPRESS_FEE, INSTANT_FEE, TRANSACTION_ID_PREFIX};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::time_utils;

use super::transfers_validation::parse_amount;

/// Transfer speed and fee class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// 1-2 business days, free of charge
    #[default]
    Standard,
    /// Within 4 hours
    Express,
    /// Within 30 seconds
    Instant,
}

impl Urgency {
    pub const ALL: [Urgency; 3] = [Urgency::Standard, Urgency::Express, Urgency::Instant];

    /// Fixed fee charged for this tier.
    pub fn fee(self) -> Decimal {
        match self {
            Urgency::Standard => Decimal::ZERO,
            Urgency::Express => EXPRESS_FEE,
            Urgency::Instant => INSTANT_FEE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Standard => "standard",
            Urgency::Express => "express",
            Urgency::Instant => "instant",
        }
    }

    /// Expected delivery time, as shown next to the tier.
    pub fn delivery_time(self) -> &'static str {
        match self {
            Urgency::Standard => "1-2 days",
            Urgency::Express => "4h",
            Urgency::Instant => "30s",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Urgency::Standard),
            "express" => Ok(Urgency::Express),
            "instant" => Ok(Urgency::Instant),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown transfer urgency '{}'",
                other
            )))),
        }
    }
}

/// Fields of the transfer form, in the order they appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransferField {
    BeneficiaryName,
    BeneficiaryIban,
    BeneficiaryAddress,
    Amount,
    Reference,
    Urgency,
    ExecutionDate,
}

impl TransferField {
    /// Form key of the field, matching the serialized draft.
    pub fn key(self) -> &'static str {
        match self {
            TransferField::BeneficiaryName => "beneficiaryName",
            TransferField::BeneficiaryIban => "beneficiaryIban",
            TransferField::BeneficiaryAddress => "beneficiaryAddress",
            TransferField::Amount => "amount",
            TransferField::Reference => "reference",
            TransferField::Urgency => "urgency",
            TransferField::ExecutionDate => "executionDate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransferField::BeneficiaryName => "Beneficiary name",
            TransferField::BeneficiaryIban => "IBAN",
            TransferField::BeneficiaryAddress => "Beneficiary address",
            TransferField::Amount => "Amount",
            TransferField::Reference => "Payment reference",
            TransferField::Urgency => "Transfer type",
            TransferField::ExecutionDate => "Execution date",
        }
    }

    /// Whether the field is entered on the beneficiary step (as opposed to
    /// the details step).
    pub fn is_beneficiary_field(self) -> bool {
        matches!(
            self,
            TransferField::BeneficiaryName
                | TransferField::BeneficiaryIban
                | TransferField::BeneficiaryAddress
        )
    }
}

impl fmt::Display for TransferField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// In-progress transfer form data.
///
/// The amount is kept as the raw user input; it is parsed during validation
/// so that "required" and "not a number" can be reported separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferDraft {
    pub beneficiary_name: String,
    pub beneficiary_iban: String,
    pub beneficiary_address: String,
    pub amount: String,
    pub reference: String,
    pub urgency: Urgency,
    pub execution_date: NaiveDate,
}

impl TransferDraft {
    /// Empty draft scheduled for the given day.
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            beneficiary_name: String::new(),
            beneficiary_iban: String::new(),
            beneficiary_address: String::new(),
            amount: String::new(),
            reference: String::new(),
            urgency: Urgency::Standard,
            execution_date: today,
        }
    }

    pub fn apply(&mut self, edit: DraftEdit) {
        match edit {
            DraftEdit::BeneficiaryName(value) => self.beneficiary_name = value,
            DraftEdit::BeneficiaryIban(value) => self.beneficiary_iban = value,
            DraftEdit::BeneficiaryAddress(value) => self.beneficiary_address = value,
            DraftEdit::Amount(value) => self.amount = value,
            DraftEdit::Reference(value) => self.reference = value,
            DraftEdit::Urgency(value) => self.urgency = value,
            DraftEdit::ExecutionDate(value) => self.execution_date = value,
        }
    }
}

impl Default for TransferDraft {
    fn default() -> Self {
        Self::empty(time_utils::today())
    }
}

/// A single change to the draft, as produced by one form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    BeneficiaryName(String),
    BeneficiaryIban(String),
    BeneficiaryAddress(String),
    Amount(String),
    Reference(String),
    Urgency(Urgency),
    ExecutionDate(NaiveDate),
}

impl DraftEdit {
    pub fn field(&self) -> TransferField {
        match self {
            DraftEdit::BeneficiaryName(_) => TransferField::BeneficiaryName,
            DraftEdit::BeneficiaryIban(_) => TransferField::BeneficiaryIban,
            DraftEdit::BeneficiaryAddress(_) => TransferField::BeneficiaryAddress,
            DraftEdit::Amount(_) => TransferField::Amount,
            DraftEdit::Reference(_) => TransferField::Reference,
            DraftEdit::Urgency(_) => TransferField::Urgency,
            DraftEdit::ExecutionDate(_) => TransferField::ExecutionDate,
        }
    }
}

/// Validated transfer handed to the gateway for execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub beneficiary_name: String,
    pub beneficiary_iban: String,
    pub beneficiary_address: String,
    pub amount: Decimal,
    pub reference: String,
    pub urgency: Urgency,
    pub execution_date: NaiveDate,
}

impl TransferRequest {
    pub fn fee(&self) -> Decimal {
        self.urgency.fee()
    }

    /// Amount plus the urgency fee.
    pub fn total(&self) -> Decimal {
        self.amount + self.fee()
    }
}

impl TryFrom<&TransferDraft> for TransferRequest {
    type Error = Error;

    fn try_from(draft: &TransferDraft) -> Result<Self> {
        let amount = parse_amount(&draft.amount).ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "'{}' is not a valid amount",
                draft.amount
            )))
        })?;

        Ok(Self {
            beneficiary_name: draft.beneficiary_name.trim().to_string(),
            beneficiary_iban: draft.beneficiary_iban.trim().to_string(),
            beneficiary_address: draft.beneficiary_address.trim().to_string(),
            amount,
            reference: draft.reference.trim().to_string(),
            urgency: draft.urgency,
            execution_date: draft.execution_date,
        })
    }
}

/// Executed transfer, emitted once per successful confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    pub transaction_id: String,
    pub beneficiary_name: String,
    pub beneficiary_iban: String,
    pub beneficiary_address: String,
    pub amount: Decimal,
    pub fee: Decimal,
    pub reference: String,
    pub urgency: Urgency,
    pub execution_date: NaiveDate,
    pub timestamp: DateTime<Utc>,
}

impl TransferRecord {
    /// Builds the record for an executed request, stamping it with `timestamp`.
    pub fn from_request(request: TransferRequest, timestamp: DateTime<Utc>) -> Self {
        Self {
            transaction_id: generate_transaction_id(timestamp),
            fee: request.fee(),
            beneficiary_name: request.beneficiary_name,
            beneficiary_iban: request.beneficiary_iban,
            beneficiary_address: request.beneficiary_address,
            amount: request.amount,
            reference: request.reference,
            urgency: request.urgency,
            execution_date: request.execution_date,
            timestamp,
        }
    }
}

/// `TXN<epoch millis>-<random suffix>`; the suffix keeps ids unique when two
/// transfers settle within the same millisecond.
pub fn generate_transaction_id(timestamp: DateTime<Utc>) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{}{}-{}",
        TRANSACTION_ID_PREFIX,
        timestamp.timestamp_millis(),
        suffix[..8].to_ascii_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_urgency_fees() {
        assert_eq!(Urgency::Standard.fee(), Decimal::ZERO);
        assert_eq!(Urgency::Express.fee(), dec!(10));
        assert_eq!(Urgency::Instant.fee(), dec!(25));
    }

    #[test]
    fn test_urgency_serialization() {
        assert_eq!(
            serde_json::to_string(&Urgency::Express).unwrap(),
            "\"express\""
        );
        assert_eq!(
            serde_json::from_str::<Urgency>("\"instant\"").unwrap(),
            Urgency::Instant
        );
    }

    #[test]
    fn test_urgency_from_str() {
        assert_eq!("Express".parse::<Urgency>().unwrap(), Urgency::Express);
        assert_eq!(" standard ".parse::<Urgency>().unwrap(), Urgency::Standard);
        assert!("overnight".parse::<Urgency>().is_err());
    }

    #[test]
    fn test_empty_draft() {
        let draft = TransferDraft::empty(date(2025, 1, 27));
        assert!(draft.beneficiary_name.is_empty());
        assert!(draft.amount.is_empty());
        assert_eq!(draft.urgency, Urgency::Standard);
        assert_eq!(draft.execution_date, date(2025, 1, 27));
    }

    #[test]
    fn test_draft_serializes_camel_case() {
        let draft = TransferDraft::empty(date(2025, 1, 27));
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["beneficiaryIban"], "");
        assert_eq!(json["executionDate"], "2025-01-27");
        assert_eq!(json["urgency"], "standard");
    }

    #[test]
    fn test_draft_edit_targets_field() {
        let mut draft = TransferDraft::empty(date(2025, 1, 27));
        let edit = DraftEdit::Reference("Loyer".to_string());
        assert_eq!(edit.field(), TransferField::Reference);
        draft.apply(edit);
        assert_eq!(draft.reference, "Loyer");

        draft.apply(DraftEdit::Urgency(Urgency::Instant));
        assert_eq!(draft.urgency, Urgency::Instant);
    }

    #[test]
    fn test_request_from_draft_trims_and_parses() {
        let mut draft = TransferDraft::empty(date(2025, 1, 27));
        draft.beneficiary_name = "  Jean Dupont ".to_string();
        draft.amount = "200.00".to_string();
        draft.urgency = Urgency::Express;

        let request = TransferRequest::try_from(&draft).unwrap();
        assert_eq!(request.beneficiary_name, "Jean Dupont");
        assert_eq!(request.amount, dec!(200.00));
        assert_eq!(request.total(), dec!(210.00));
    }

    #[test]
    fn test_request_from_draft_rejects_bad_amount() {
        let mut draft = TransferDraft::empty(date(2025, 1, 27));
        draft.amount = "abc".to_string();
        assert!(TransferRequest::try_from(&draft).is_err());
    }

    #[test]
    fn test_transaction_ids_are_unique() {
        let now = Utc::now();
        let first = generate_transaction_id(now);
        let second = generate_transaction_id(now);
        assert!(first.starts_with(&format!("TXN{}-", now.timestamp_millis())));
        assert_ne!(first, second);
    }
}
