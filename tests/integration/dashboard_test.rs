//! Integration tests for dashboard statistics.

mod helpers;

use serde_json::json;

use schooladmin_client::DashboardService;
use schooladmin_core::error::ErrorKind;

use helpers::{Reply, TestApp, token_expiring_at};

#[tokio::test]
async fn test_dashboard_aggregates_three_reads() {
    let app = TestApp::new(|req| match req.path.as_str() {
        "/students" => Reply::ok(json!({"students": [{"id": 1, "name": "A"}], "totalItems": 312})),
        "/teachers" => Reply::ok(json!({"teachers": [], "totalItems": "27"})),
        "/bills" => Reply::ok(json!({"bills": [
            {"id": 1, "amount": "150000.00", "status": "Paid"},
            {"id": 2, "amount": 100000, "status": "Paid"},
            {"id": 3, "amount": "75000", "status": "Pending"},
            {"id": 4, "amount": "75000", "status": "Verifying"},
            {"id": 5, "amount": "75000", "status": "Overdue"}
        ]})),
        _ => Reply::rejected(404, None),
    });

    let stats = DashboardService::new(app.client.clone(), 1000)
        .fetch()
        .await
        .unwrap();
    assert_eq!(stats.total_students, 312);
    assert_eq!(stats.total_teachers, 27);
    assert_eq!(stats.pending_bills, 2);
    assert_eq!(stats.total_revenue, 250_000.0);

    let calls = app.backend.calls();
    assert_eq!(calls.len(), 3);
    let bills = calls.iter().find(|c| c.path == "/bills").unwrap();
    assert_eq!(bills.param_value("limit"), Some("1000"));
    assert!(
        calls
            .iter()
            .all(|c| c.header_value("Authorization") == Some("Bearer test-token"))
    );
}

#[tokio::test]
async fn test_missing_counts_read_as_zero() {
    let app = TestApp::new(|_| Reply::ok(json!([])));
    let stats = DashboardService::new(app.client.clone(), 100)
        .fetch()
        .await
        .unwrap();
    assert_eq!(stats.total_students, 0);
    assert_eq!(stats.total_teachers, 0);
    assert_eq!(stats.pending_bills, 0);
    assert_eq!(stats.total_revenue, 0.0);
}

#[tokio::test]
async fn test_one_failed_read_fails_the_fetch() {
    let app = TestApp::new(|req| match req.path.as_str() {
        "/teachers" => Reply::rejected(500, Some("teachers table locked")),
        _ => Reply::ok(json!({"totalItems": 1})),
    });
    let err = DashboardService::new(app.client.clone(), 100)
        .fetch()
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::ServerRejected);
    assert_eq!(err.user_message("fallback"), "teachers table locked");
}

#[tokio::test]
async fn test_signed_out_dashboard_sends_nothing() {
    let app = TestApp::signed_out(|_| Reply::ok(json!({})));
    let err = DashboardService::new(app.client.clone(), 100)
        .fetch()
        .await
        .unwrap_err();
    assert!(err.is_auth_missing());
    assert!(app.backend.calls().is_empty());
}

#[tokio::test]
async fn test_expired_dashboard_sends_nothing() {
    let app = TestApp::with_token(|_| Reply::ok(json!({})), &token_expiring_at(1_000));
    let err = DashboardService::new(app.client.clone(), 100)
        .fetch()
        .await
        .unwrap_err();
    assert!(err.is_auth_missing());
    assert!(app.backend.calls().is_empty());
}
