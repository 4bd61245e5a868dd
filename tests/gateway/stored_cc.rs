use claims::assert_ok;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use prairiepay::service::gateway::error::GatewayError;
use prairiepay::service::gateway::models::{CardExpiration, StoredAccountRef, TransactionStatus};
use prairiepay::CcOffsitePayments;

use crate::helpers::{approved_body, spawn_gateway, test_card, test_contact, test_invoices};

#[tokio::test]
async fn requires_cc_storage_reflects_the_stored_flag() {
    let direct = spawn_gateway(false).await;
    assert!(!direct.service.requires_cc_storage());

    let stored = spawn_gateway(true).await;
    assert!(stored.service.requires_cc_storage());
}

#[tokio::test]
async fn store_process_remove_round_trip() {
    let app = spawn_gateway(true).await;

    Mock::given(method("POST"))
        .and(path("/v1/customers"))
        .and(body_partial_json(serde_json::json!({
            "first_name": "John",
            "email": "john.smith@test.test",
            "credit_card": { "card_number": "4111111111111111" },
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "customer_ref": "cust-1",
            "account_ref": "acct-1",
        })))
        .mount(&app.processor)
        .await;

    let account = app
        .service
        .store_cc(&test_card(), &test_contact(), None)
        .await
        .expect("store_cc failed");
    assert_eq!(account.client_reference_id, "cust-1");
    assert_eq!(account.account_reference_id, "acct-1");

    // The charge carries the token instead of raw card data.
    Mock::given(method("POST"))
        .and(path("/v1/transactions"))
        .and(body_partial_json(serde_json::json!({
            "transaction_type": "purchase",
            "amount": 1000,
            "token": { "token_type": "FDToken", "customer_ref": "cust-1", "value": "acct-1" },
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(approved_body("txn-500")))
        .up_to_n_times(1)
        .mount(&app.processor)
        .await;

    let result = app
        .service
        .process_stored_cc(&account, 10.00, &test_invoices())
        .await
        .expect("process_stored_cc failed");
    assert_eq!(result.status, TransactionStatus::Approved);

    Mock::given(method("DELETE"))
        .and(path("/v1/customers/cust-1/accounts/acct-1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&app.processor)
        .await;

    let removed = app.service.remove_cc(&account).await;
    let removed = assert_ok!(removed);
    assert_eq!(removed, account);

    // Charging the removed token is now rejected by the processor.
    Mock::given(method("POST"))
        .and(path("/v1/transactions"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&app.processor)
        .await;

    let err = app
        .service
        .process_stored_cc(&account, 10.00, &[])
        .await
        .expect_err("charge against removed account succeeded");
    assert!(matches!(err, GatewayError::NotFound { .. }));
}

#[tokio::test]
async fn store_cc_rejects_an_expired_card_without_calling_the_processor() {
    let app = spawn_gateway(true).await;

    let mut card = test_card();
    card.expiration = CardExpiration {
        year: 2020,
        month: 1,
    };

    let err = app
        .service
        .store_cc(&card, &test_contact(), None)
        .await
        .expect_err("expired card was stored");
    match err {
        GatewayError::Validation { field, .. } => assert_eq!(field, "card_exp"),
        other => panic!("unexpected error: {}", other),
    }
    assert!(app.processor.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_cc_of_unknown_account_is_not_found() {
    let app = spawn_gateway(true).await;

    Mock::given(method("PUT"))
        .and(path("/v1/customers/cust-9/accounts/acct-9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&app.processor)
        .await;

    let account = StoredAccountRef {
        client_reference_id: "cust-9".to_string(),
        account_reference_id: "acct-9".to_string(),
    };
    let err = app
        .service
        .update_cc(&test_card(), &test_contact(), &account)
        .await
        .expect_err("update of unknown account succeeded");
    assert!(matches!(err, GatewayError::NotFound { .. }));
}

#[tokio::test]
async fn capture_stored_cc_then_refund_stored_cc() {
    let app = spawn_gateway(true).await;

    let account = StoredAccountRef {
        client_reference_id: "cust-3".to_string(),
        account_reference_id: "acct-3".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/v1/transactions/txn-700"))
        .and(body_partial_json(
            serde_json::json!({"transaction_type": "capture", "amount": 1000}),
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(approved_body("txn-700")))
        .mount(&app.processor)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/transactions/txn-700"))
        .and(body_partial_json(
            serde_json::json!({"transaction_type": "refund", "amount": 400}),
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(approved_body("txn-700")))
        .mount(&app.processor)
        .await;

    let captured = app
        .service
        .capture_stored_cc(&account, "ref-7", "txn-700", 10.00, &test_invoices())
        .await
        .expect("capture_stored_cc failed");
    assert_eq!(captured.status, TransactionStatus::Approved);
    assert_eq!(captured.transaction_id, "txn-700");

    let refunded = app
        .service
        .refund_stored_cc(&account, "ref-7", "txn-700", 4.00)
        .await
        .expect("refund_stored_cc failed");
    assert_eq!(refunded.status, TransactionStatus::Refunded);
}

#[tokio::test]
async fn authorize_stored_cc_then_void_stored_cc() {
    let app = spawn_gateway(true).await;

    let account = StoredAccountRef {
        client_reference_id: "cust-2".to_string(),
        account_reference_id: "acct-2".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/v1/transactions"))
        .and(body_partial_json(serde_json::json!({
            "transaction_type": "authorize",
            "token": { "value": "acct-2" },
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(approved_body("txn-600")))
        .mount(&app.processor)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/transactions/txn-600"))
        .and(body_partial_json(
            serde_json::json!({"transaction_type": "void"}),
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(approved_body("txn-600")))
        .mount(&app.processor)
        .await;

    let auth = app
        .service
        .authorize_stored_cc(&account, 25.00, &[])
        .await
        .expect("authorize_stored_cc failed");
    assert_eq!(auth.status, TransactionStatus::Pending);

    let reference_id = auth.reference_id.expect("authorization has no reference id");
    let voided = app
        .service
        .void_stored_cc(&account, &reference_id, &auth.transaction_id)
        .await
        .expect("void_stored_cc failed");
    assert_eq!(voided.status, TransactionStatus::Void);
}
