//! End-to-end tests: login, transfer wizard, ledger booking.

use std::sync::Arc;
use std::time::Duration;

use ebanking_core::accounts::{LedgerTrait, TransactionDirection, TRANSFER_CATEGORY};
use ebanking_core::auth::Credentials;
use ebanking_core::dashboard::BankServices;
use ebanking_core::notifications::MemoryNotificationSink;
use ebanking_core::transfers::{CloseReason, DraftEdit, TransferField, Urgency, WizardStep};
use ebanking_core::utils::time_utils;
use ebanking_core::{BankConfig, Error};
use rust_decimal_macros::dec;

fn setup() -> (BankServices, MemoryNotificationSink) {
    let sink = MemoryNotificationSink::new();
    let config = BankConfig {
        credentials: Some(Credentials::new("monicka", "chocolat")),
        ..BankConfig::default()
    };
    let services = BankServices::from_config(&config, Arc::new(sink.clone())).unwrap();
    (services, sink)
}

#[tokio::test(start_paused = true)]
async fn test_express_transfer_is_booked_on_the_ledger() {
    let (services, sink) = setup();
    let dashboard = services.login("monicka", "chocolat").await.unwrap();
    assert_eq!(sink.drain().len(), 1);

    let wizard = dashboard.open_transfer().unwrap();

    // Step 1
    wizard
        .edit(DraftEdit::BeneficiaryName("Jean Dupont".to_string()))
        .unwrap();
    wizard
        .edit(DraftEdit::BeneficiaryIban("CH93 0076 2011 6238 5295 7".to_string()))
        .unwrap();
    wizard
        .edit(DraftEdit::BeneficiaryAddress("Rue du Lac 1, 1200 Genève".to_string()))
        .unwrap();
    assert_eq!(wizard.next().unwrap(), WizardStep::Details);

    // Step 2, first with an amount above the balance
    wizard.edit(DraftEdit::Amount("50000".to_string())).unwrap();
    wizard.edit(DraftEdit::Reference("Loyer janvier".to_string())).unwrap();
    wizard.edit(DraftEdit::Urgency(Urgency::Express)).unwrap();
    assert_eq!(wizard.next().unwrap(), WizardStep::Details);
    assert!(wizard.errors().contains(TransferField::Amount));

    wizard.edit(DraftEdit::Amount("200".to_string())).unwrap();
    assert!(wizard.errors().is_empty());
    assert_eq!(wizard.next().unwrap(), WizardStep::Confirm);

    // Step 3
    let request = wizard.pending_request().unwrap();
    assert_eq!(request.fee(), dec!(10));
    assert_eq!(request.total(), dec!(210));

    let started = tokio::time::Instant::now();
    let record = wizard.confirm().await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(3000));

    assert!(record.transaction_id.starts_with("TXN"));
    assert_eq!(record.amount, dec!(200));
    assert_eq!(record.fee, dec!(10));
    assert_eq!(record.execution_date, time_utils::today());
    assert_eq!(
        wizard.step(),
        WizardStep::Closed {
            reason: CloseReason::Completed
        }
    );

    let notifications = sink.drain();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Transfer executed");
    assert_eq!(
        notifications[0].description,
        "CHF 200.00 transferred to Jean Dupont"
    );

    let overview = dashboard.overview().unwrap();
    assert_eq!(overview.accounts[0].balance, dec!(45550.85));
    let booked = &overview.recent_transactions[0];
    assert_eq!(booked.id, record.transaction_id);
    assert_eq!(booked.amount, dec!(-200));
    assert_eq!(booked.direction, TransactionDirection::Outgoing);
    assert_eq!(booked.category, TRANSFER_CATEGORY);
    assert_eq!(booked.description, "Virement à Jean Dupont");
}

#[tokio::test(start_paused = true)]
async fn test_second_transfer_sees_reduced_balance() {
    let (services, _sink) = setup();
    let dashboard = services.login("monicka", "chocolat").await.unwrap();

    for amount in ["40000", "5750.85"] {
        let wizard = dashboard.open_transfer().unwrap();
        wizard
            .edit(DraftEdit::BeneficiaryName("Marie Rochat".to_string()))
            .unwrap();
        wizard
            .edit(DraftEdit::BeneficiaryIban("CH5604835012345678009".to_string()))
            .unwrap();
        wizard
            .edit(DraftEdit::BeneficiaryAddress("Avenue de la Gare 12".to_string()))
            .unwrap();
        wizard.next().unwrap();
        wizard.edit(DraftEdit::Amount(amount.to_string())).unwrap();
        wizard.edit(DraftEdit::Reference("Épargne".to_string())).unwrap();
        assert_eq!(wizard.next().unwrap(), WizardStep::Confirm);
        wizard.confirm().await.unwrap();
    }

    assert_eq!(services.ledger.current_balance().unwrap(), dec!(0));

    let wizard = dashboard.open_transfer().unwrap();
    assert_eq!(wizard.snapshot().current_balance, dec!(0));
}

#[tokio::test(start_paused = true)]
async fn test_wrong_password_is_rejected() {
    let (services, sink) = setup();
    let result = services.login("monicka", "vanille").await;

    assert!(matches!(result, Err(Error::Auth(_))));
    let notifications = sink.drain();
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].is_error());
    assert!(!services.wizard.is_open());
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_transfer_leaves_ledger_untouched() {
    let (services, sink) = setup();
    let dashboard = services.login("monicka", "chocolat").await.unwrap();
    sink.drain();

    let wizard = dashboard.open_transfer().unwrap();
    wizard
        .edit(DraftEdit::BeneficiaryName("Jean Dupont".to_string()))
        .unwrap();
    wizard.cancel().unwrap();

    assert_eq!(
        wizard.step(),
        WizardStep::Closed {
            reason: CloseReason::Cancelled
        }
    );
    assert!(wizard.draft().beneficiary_name.is_empty());
    assert_eq!(services.ledger.current_balance().unwrap(), dec!(45750.85));
    assert!(sink.is_empty());
}
