//! Tests for transfer field validation.

#[cfg(test)]
mod tests {
    use crate::transfers::{
        is_valid_swiss_iban, parse_amount, validate_beneficiary, validate_details_on, FieldError,
        TransferDraft, TransferField,
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 27).unwrap()
    }

    fn valid_draft() -> TransferDraft {
        TransferDraft {
            beneficiary_name: "Jean Dupont".to_string(),
            beneficiary_iban: "CH93 0076 2011 6238 5295 7".to_string(),
            beneficiary_address: "Rue du Lac 1, Genève".to_string(),
            amount: "200.00".to_string(),
            reference: "Loyer".to_string(),
            ..TransferDraft::empty(today())
        }
    }

    fn amount_error(amount: &str, balance: Decimal) -> Option<FieldError> {
        let draft = TransferDraft {
            amount: amount.to_string(),
            ..valid_draft()
        };
        validate_details_on(&draft, balance, today())
            .get(TransferField::Amount)
            .cloned()
    }

    // ==================== IBAN Tests ====================

    #[test]
    fn test_iban_grouped_and_compact_forms_pass() {
        assert!(is_valid_swiss_iban("CH93 0076 2011 6238 5295 7"));
        assert!(is_valid_swiss_iban("CH9300762011623852957"));
        assert!(is_valid_swiss_iban("CH58 0076 2011 6238 5295 8"));
    }

    #[test]
    fn test_iban_too_short_fails() {
        assert!(!is_valid_swiss_iban("CH93007620116238"));
        assert!(!is_valid_swiss_iban("CH93 0076 2011 6238 5295"));
    }

    #[test]
    fn test_iban_too_long_fails() {
        assert!(!is_valid_swiss_iban("CH93 0076 2011 6238 5295 77"));
    }

    #[test]
    fn test_iban_wrong_country_or_case_fails() {
        assert!(!is_valid_swiss_iban("DE93 0076 2011 6238 5295 7"));
        assert!(!is_valid_swiss_iban("ch93 0076 2011 6238 5295 7"));
    }

    #[test]
    fn test_iban_letters_in_digit_groups_fail() {
        assert!(!is_valid_swiss_iban("CH93 0076 2011 XXXX XXXX X"));
    }

    #[test]
    fn test_iban_irregular_spacing_fails() {
        assert!(!is_valid_swiss_iban("CH93  0076 2011 6238 5295 7"));
        assert!(!is_valid_swiss_iban("CH 93 0076 2011 6238 5295 7"));
        assert!(!is_valid_swiss_iban("CH930 076 2011 6238 5295 7"));
    }

    // ==================== Beneficiary Step Tests ====================

    #[test]
    fn test_valid_beneficiary_has_no_errors() {
        assert!(validate_beneficiary(&valid_draft()).is_empty());
    }

    #[test]
    fn test_empty_beneficiary_reports_every_field() {
        let errors = validate_beneficiary(&TransferDraft::empty(today()));
        assert_eq!(
            errors.fields(),
            vec![
                TransferField::BeneficiaryName,
                TransferField::BeneficiaryIban,
                TransferField::BeneficiaryAddress,
            ]
        );
        assert_eq!(
            errors.get(TransferField::BeneficiaryIban),
            Some(&FieldError::Required(TransferField::BeneficiaryIban))
        );
    }

    #[test]
    fn test_whitespace_only_name_is_missing() {
        let draft = TransferDraft {
            beneficiary_name: "   ".to_string(),
            ..valid_draft()
        };
        let errors = validate_beneficiary(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(TransferField::BeneficiaryName),
            Some(&FieldError::Required(TransferField::BeneficiaryName))
        );
    }

    #[test]
    fn test_malformed_iban_is_reported_as_invalid() {
        let draft = TransferDraft {
            beneficiary_iban: "CH93007620116238".to_string(),
            ..valid_draft()
        };
        let errors = validate_beneficiary(&draft);
        assert_eq!(
            errors.get(TransferField::BeneficiaryIban),
            Some(&FieldError::InvalidIban)
        );
    }

    #[test]
    fn test_beneficiary_validation_ignores_details() {
        let draft = TransferDraft {
            amount: String::new(),
            reference: String::new(),
            ..valid_draft()
        };
        assert!(validate_beneficiary(&draft).is_empty());
    }

    // ==================== Amount Tests ====================

    #[test]
    fn test_amount_within_balance_and_ceiling_passes() {
        assert_eq!(amount_error("50000", dec!(100000)), None);
        assert_eq!(amount_error("100000", dec!(100000)), None);
        assert_eq!(amount_error("0.01", dec!(1)), None);
    }

    #[test]
    fn test_amount_equal_to_balance_passes() {
        assert_eq!(amount_error("5000.00", dec!(5000)), None);
    }

    #[test]
    fn test_amount_missing() {
        assert_eq!(
            amount_error("", dec!(5000)),
            Some(FieldError::Required(TransferField::Amount))
        );
        assert_eq!(
            amount_error("  ", dec!(5000)),
            Some(FieldError::Required(TransferField::Amount))
        );
    }

    #[test]
    fn test_amount_not_numeric() {
        assert_eq!(
            amount_error("abc", dec!(5000)),
            Some(FieldError::AmountNotNumeric)
        );
        assert_eq!(
            amount_error("12.5.3", dec!(5000)),
            Some(FieldError::AmountNotNumeric)
        );
    }

    #[test]
    fn test_amount_not_positive() {
        assert_eq!(amount_error("0", dec!(5000)), Some(FieldError::AmountNotPositive));
        assert_eq!(amount_error("-5", dec!(5000)), Some(FieldError::AmountNotPositive));
    }

    #[test]
    fn test_amount_insufficient_funds() {
        assert_eq!(
            amount_error("500", dec!(100)),
            Some(FieldError::InsufficientFunds {
                available: dec!(100)
            })
        );
    }

    #[test]
    fn test_amount_above_ceiling() {
        assert_eq!(
            amount_error("150000", dec!(200000)),
            Some(FieldError::AboveCeiling {
                ceiling: dec!(100000)
            })
        );
    }

    #[test]
    fn test_insufficient_funds_wins_over_ceiling() {
        assert_eq!(
            amount_error("150000", dec!(120000)),
            Some(FieldError::InsufficientFunds {
                available: dec!(120000)
            })
        );
    }

    #[test]
    fn test_amount_accepts_swiss_thousands_separator() {
        assert_eq!(parse_amount("1'000.50"), Some(dec!(1000.50)));
        assert_eq!(amount_error(" 1'000 ", dec!(5000)), None);
    }

    // ==================== Details Step Tests ====================

    #[test]
    fn test_missing_reference() {
        let draft = TransferDraft {
            reference: " ".to_string(),
            ..valid_draft()
        };
        let errors = validate_details_on(&draft, dec!(5000), today());
        assert_eq!(errors.fields(), vec![TransferField::Reference]);
    }

    #[test]
    fn test_execution_date_today_or_later_passes() {
        let tomorrow = today().succ_opt().unwrap();
        let draft = TransferDraft {
            execution_date: tomorrow,
            ..valid_draft()
        };
        assert!(validate_details_on(&draft, dec!(5000), today()).is_empty());
        assert!(validate_details_on(&valid_draft(), dec!(5000), today()).is_empty());
    }

    #[test]
    fn test_execution_date_in_past_fails() {
        let yesterday = today().pred_opt().unwrap();
        let draft = TransferDraft {
            execution_date: yesterday,
            ..valid_draft()
        };
        let errors = validate_details_on(&draft, dec!(5000), today());
        assert_eq!(
            errors.get(TransferField::ExecutionDate),
            Some(&FieldError::ExecutionDateInPast { earliest: today() })
        );
    }

    #[test]
    fn test_details_validation_is_idempotent() {
        let draft = TransferDraft {
            amount: "abc".to_string(),
            reference: String::new(),
            ..valid_draft()
        };
        let first = validate_details_on(&draft, dec!(5000), today());
        let second = validate_details_on(&draft, dec!(5000), today());
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    // ==================== Messages ====================

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FieldError::Required(TransferField::Reference).to_string(),
            "Payment reference is required"
        );
        assert_eq!(
            FieldError::AboveCeiling {
                ceiling: dec!(100000)
            }
            .to_string(),
            "Maximum amount: CHF 100'000.00"
        );
        assert_eq!(
            FieldError::InsufficientFunds {
                available: dec!(45750.85)
            }
            .to_string(),
            "Insufficient balance (available: CHF 45'750.85)"
        );
    }

    #[test]
    fn test_field_errors_serialize_as_message_map() {
        let errors = validate_beneficiary(&TransferDraft::empty(today()));
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["beneficiaryName"], "Beneficiary name is required");
        assert_eq!(json["beneficiaryIban"], "IBAN is required");
        assert!(json.get("amount").is_none());
    }
}
