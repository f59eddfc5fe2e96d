//! Integration tests for the list controller against a fake backend.

mod helpers;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use schooladmin_controller::controller::{DELETE_FAILED_MESSAGE, LOAD_FAILED_MESSAGE};
use schooladmin_controller::{FormMode, NoticeKind, ResourceConfig};
use schooladmin_core::traits::{CredentialProvider, HttpMethod, Resource};
use schooladmin_core::types::FormFields;
use schooladmin_entity::{Fee, Student};

use helpers::{Reply, TestApp, student_page, token_expiring_at};

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Widget {
    id: u64,
}

impl Resource for Widget {
    const PATH: &'static str = "/widgets";
    const COLLECTION_KEY: &'static str = "widgets";
    const LABEL: &'static str = "Widget";

    fn id(&self) -> u64 {
        self.id
    }

    fn form_fields(&self) -> FormFields {
        FormFields::new()
    }
}

#[tokio::test]
async fn test_every_envelope_normalizes() {
    for body in [
        json!([{"id": 1}]),
        json!({"data": [{"id": 1}]}),
        json!({"widgets": [{"id": 1}]}),
    ] {
        let app = TestApp::new(move |_| Reply::ok(body.clone()));
        let c = app.controller(ResourceConfig::<Widget>::new(), true);
        c.load(1, "").await;
        assert_eq!(c.snapshot().list.items, vec![Widget { id: 1 }]);
    }
}

#[tokio::test]
async fn test_unrecognized_envelope_is_empty() {
    let app = TestApp::new(|_| Reply::ok(json!({"message": "ok"})));
    let c = app.controller(ResourceConfig::<Widget>::new(), true);
    c.load(1, "").await;
    let snap = c.snapshot();
    assert!(snap.list.items.is_empty());
    assert!(snap.list.last_error.is_none());
    assert_eq!(snap.list.total_pages, 1);
}

#[tokio::test(start_paused = true)]
async fn test_search_debounce_coalesces() {
    let app = TestApp::new(|_| Reply::ok(student_page(&[1], 1)));
    let c = app.controller(ResourceConfig::<Student>::new(), true);

    c.search("a");
    tokio::time::sleep(Duration::from_millis(100)).await;
    c.search("ab");
    tokio::time::sleep(Duration::from_millis(100)).await;
    c.search("abc");
    tokio::time::sleep(Duration::from_secs(2)).await;

    let calls = app.backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].param_value("search"), Some("abc"));
    assert_eq!(calls[0].param_value("page"), Some("1"));
    assert_eq!(c.snapshot().list.search_term, "abc");
}

#[tokio::test(start_paused = true)]
async fn test_out_of_order_response_is_discarded() {
    let app = TestApp::new(|req| match req.param_value("page") {
        Some("1") => Reply::ok(student_page(&[1, 2], 2)).after(Duration::from_millis(200)),
        _ => Reply::ok(student_page(&[11, 12], 2)).after(Duration::from_millis(50)),
    });
    let c = app.controller(ResourceConfig::<Student>::new(), true);

    tokio::join!(c.load(1, ""), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        c.load(2, "").await;
    });

    let snap = c.snapshot();
    assert_eq!(snap.list.page, 2);
    assert_eq!(
        snap.list.items.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![11, 12]
    );
    assert!(!snap.list.is_loading);
}

#[tokio::test]
async fn test_pagination_clamps() {
    let app = TestApp::new(|_| Reply::ok(student_page(&[1, 2, 3], 4)));
    let c = app.controller(ResourceConfig::<Student>::new(), true);
    c.load(1, "").await;

    c.set_page(0).await;
    assert_eq!(c.snapshot().list.page, 1);
    assert_eq!(
        app.backend.last(HttpMethod::Get).unwrap().param_value("page"),
        Some("1")
    );

    c.set_page(9).await;
    assert_eq!(c.snapshot().list.page, 4);
    assert_eq!(
        app.backend.last(HttpMethod::Get).unwrap().param_value("page"),
        Some("4")
    );
}

#[tokio::test]
async fn test_large_page_size_is_sent_as_configured() {
    let app = TestApp::new(|_| Reply::ok(student_page(&[1], 1)));
    let c = app.controller(ResourceConfig::<Student>::new().page_size(250), true);
    c.load(1, "").await;

    assert_eq!(c.snapshot().list.page_size, 250);
    assert_eq!(
        app.backend.last(HttpMethod::Get).unwrap().param_value("limit"),
        Some("250")
    );
}

#[tokio::test]
async fn test_server_filter_keeps_current_page() {
    let app = TestApp::new(|req| match req.param_value("page") {
        Some("3") => Reply::ok(student_page(&[31, 32], 4)),
        _ => Reply::ok(student_page(&[1, 2], 4)),
    });
    let c = app.controller(ResourceConfig::<Student>::new(), true);
    c.load(3, "").await;

    c.set_filter("status", "active");
    let snap = c.snapshot();
    assert_eq!(snap.list.page, 3);
    let ids: Vec<u64> = snap.list.items.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![31, 32]);
    assert_eq!(app.backend.count(HttpMethod::Get), 1);

    c.reload().await;
    assert_eq!(
        app.backend.last(HttpMethod::Get).unwrap().param_value("page"),
        Some("3")
    );
    let ids: Vec<u64> = c.snapshot().list.items.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![31, 32]);
}

#[tokio::test]
async fn test_missing_total_pages_means_one() {
    let app = TestApp::new(|_| Reply::ok(json!({"students": [{"id": 1, "name": "A"}]})));
    let c = app.controller(ResourceConfig::<Student>::new(), true);
    c.load(1, "").await;
    let snap = c.snapshot();
    assert_eq!(snap.list.total_pages, 1);
    assert!(!snap.list.has_next());
}

#[tokio::test]
async fn test_failed_create_keeps_input() {
    let app = TestApp::new(|req| match req.method {
        HttpMethod::Post => Reply::rejected(409, Some("duplicate name")),
        _ => Reply::ok(student_page(&[], 1)),
    });
    let c = app.controller(
        ResourceConfig::<Student>::new().create_form(Student::create_form()),
        true,
    );

    c.open_create();
    c.set_field("name", "X");
    let result = c.submit().await;
    assert_eq!(result, Err("duplicate name".to_string()));

    let snap = c.snapshot();
    let form = snap.form.expect("draft stays open");
    assert_eq!(form.mode, FormMode::Create);
    assert_eq!(form.fields.text("name"), Some("X"));
    assert!(!form.is_submitting);
    assert_eq!(form.error.as_deref(), Some("duplicate name"));
    let notice = snap.notice.unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, "duplicate name");
    // No reload after a failed write.
    assert_eq!(app.backend.count(HttpMethod::Get), 0);
}

#[tokio::test]
async fn test_successful_create_closes_and_reloads() {
    let app = TestApp::new(|req| match req.method {
        HttpMethod::Post => Reply::ok(json!({"id": 99})),
        _ => Reply::ok(student_page(&[99], 1)),
    });
    let c = app.controller(
        ResourceConfig::<Student>::new().create_form(Student::create_form()),
        true,
    );

    c.open_create();
    c.set_field("name", "Nur");
    c.set_field("isCatering", true);
    assert_eq!(c.submit().await, Ok(()));

    let post = app.backend.last(HttpMethod::Post).unwrap();
    assert_eq!(post.path, "/students");
    let body = post.body.unwrap();
    assert_eq!(body["name"], "Nur");
    assert_eq!(body["isCatering"], true);

    let snap = c.snapshot();
    assert!(snap.form.is_none());
    assert_eq!(snap.notice.unwrap().kind, NoticeKind::Success);
    assert_eq!(snap.list.items.len(), 1);
}

#[tokio::test]
async fn test_raw_input_keeps_text_fields_as_text() {
    let app = TestApp::new(|req| match req.method {
        HttpMethod::Post => Reply::ok(json!({"id": 99})),
        _ => Reply::ok(student_page(&[99], 1)),
    });
    let c = app.controller(
        ResourceConfig::<Student>::new().create_form(Student::create_form()),
        true,
    );

    assert!(!c.set_field_raw("name", "ignored"));
    c.open_create();
    assert!(c.set_field_raw("name", "true"));
    assert!(c.set_field_raw("isCatering", "true"));
    assert_eq!(c.submit().await, Ok(()));

    let body = app.backend.last(HttpMethod::Post).unwrap().body.unwrap();
    assert_eq!(body["name"], json!("true"));
    assert_eq!(body["isCatering"], json!(true));
}

#[tokio::test]
async fn test_fees_list_for_bill_picker() {
    let app = TestApp::new(|_| {
        Reply::ok(json!({"fees": [
            {"id": 1, "name": "SPP", "amount": "150000.00"},
            {"id": 2, "name": "Buku", "amount": 85000}
        ]}))
    });
    let c = app.controller(
        ResourceConfig::<Fee>::new().create_form(Fee::create_form()),
        true,
    );
    c.load(1, "").await;

    let snap = c.snapshot();
    let names: Vec<&str> = snap.list.items.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["SPP", "Buku"]);
    assert_eq!(snap.list.items[1].amount, "85000");

    let get = app.backend.last(HttpMethod::Get).unwrap();
    assert_eq!(get.path, "/fees");
    assert_eq!(get.param_value("page"), Some("1"));

    c.open_create();
    c.set_field("name", "Seragam");
    c.set_field("amount", "250000");
    assert_eq!(c.submit().await, Ok(()));
    let post = app.backend.last(HttpMethod::Post).unwrap();
    assert_eq!(post.path, "/fees");
    assert_eq!(post.body.unwrap()["amount"], "250000");
}

#[tokio::test]
async fn test_failed_load_keeps_stale_rows() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = TestApp::new(move |_| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Reply::ok(student_page(&[1, 2, 3, 4, 5], 1))
        } else {
            Reply::network_down()
        }
    });
    let c = app.controller(ResourceConfig::<Student>::new(), true);

    c.load(1, "").await;
    assert_eq!(c.snapshot().list.items.len(), 5);

    c.load(1, "").await;
    let snap = c.snapshot();
    assert_eq!(snap.list.items.len(), 5);
    assert!(!snap.list.is_loading);
    assert_eq!(snap.list.last_error.as_deref(), Some(LOAD_FAILED_MESSAGE));
}

#[tokio::test]
async fn test_first_load_failure_still_finishes() {
    let app = TestApp::new(|_| Reply::rejected(500, Some("database offline")));
    let c = app.controller(ResourceConfig::<Student>::new(), true);
    assert!(c.snapshot().list.is_loading);

    c.load(1, "").await;
    let snap = c.snapshot();
    assert!(!snap.list.is_loading);
    assert!(snap.list.has_loaded);
    assert!(snap.list.is_empty());
    assert_eq!(snap.list.last_error.as_deref(), Some("database offline"));
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let app = TestApp::new(|_| Reply::ok(student_page(&[3], 1)));
    let c = app.controller(ResourceConfig::<Student>::new(), false);
    c.load(1, "").await;

    assert_eq!(c.remove(3).await, Ok(false));
    assert_eq!(app.backend.count(HttpMethod::Delete), 0);
    assert_eq!(c.snapshot().list.items.len(), 1);
}

#[tokio::test]
async fn test_confirmed_delete_reloads() {
    let deleted = Arc::new(AtomicUsize::new(0));
    let flag = deleted.clone();
    let app = TestApp::new(move |req| match req.method {
        HttpMethod::Delete => {
            flag.store(1, Ordering::SeqCst);
            Reply::ok(json!({"message": "deleted"}))
        }
        _ if flag.load(Ordering::SeqCst) == 1 => Reply::ok(student_page(&[], 1)),
        _ => Reply::ok(student_page(&[3], 1)),
    });
    let c = app.controller(ResourceConfig::<Student>::new(), true);
    c.load(1, "").await;

    assert_eq!(c.remove(3).await, Ok(true));
    assert_eq!(app.backend.last(HttpMethod::Delete).unwrap().path, "/students/3");
    assert!(c.snapshot().list.items.is_empty());
}

#[tokio::test]
async fn test_failed_delete_leaves_row() {
    let app = TestApp::new(|req| match req.method {
        HttpMethod::Delete => Reply::rejected(500, None),
        _ => Reply::ok(student_page(&[3], 1)),
    });
    let c = app.controller(ResourceConfig::<Student>::new(), true);
    c.load(1, "").await;

    assert_eq!(c.remove(3).await, Err(DELETE_FAILED_MESSAGE.to_string()));
    let snap = c.snapshot();
    assert_eq!(snap.list.items.len(), 1);
    assert_eq!(snap.notice.unwrap().message, DELETE_FAILED_MESSAGE);
    assert_eq!(app.backend.count(HttpMethod::Get), 1);
}

#[tokio::test]
async fn test_missing_credential_sends_nothing() {
    let app = TestApp::signed_out(|_| Reply::ok(student_page(&[1], 1)));
    let c = app.controller(ResourceConfig::<Student>::new(), true);

    c.load(1, "").await;
    let snap = c.snapshot();
    assert!(snap.auth_required);
    assert!(!snap.list.is_loading);
    assert!(snap.notice.is_none());

    c.open_create();
    c.set_field("name", "X");
    assert!(c.submit().await.is_err());
    let snap = c.snapshot();
    assert!(snap.notice.is_none());
    assert_eq!(snap.form.unwrap().fields.text("name"), Some("X"));

    assert!(app.backend.calls().is_empty());
}

#[tokio::test]
async fn test_expired_token_sends_nothing() {
    let app = TestApp::with_token(
        |_| Reply::ok(student_page(&[1], 1)),
        &token_expiring_at(1_000),
    );
    let c = app.controller(ResourceConfig::<Student>::new(), true);

    c.load(1, "").await;
    let snap = c.snapshot();
    assert!(snap.auth_required);
    assert!(!snap.list.is_loading);
    assert!(app.backend.calls().is_empty());
    assert!(app.credentials.get().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_watchdog_clears_loading() {
    let app = TestApp::new(|_| {
        Reply::ok(student_page(&[1], 1)).after(Duration::from_secs(3600))
    });
    let c = app.controller(
        ResourceConfig::<Student>::new().load_watchdog(Duration::from_secs(30)),
        true,
    );

    c.load(1, "").await;
    let snap = c.snapshot();
    assert!(!snap.list.is_loading);
    assert_eq!(snap.list.last_error.as_deref(), Some(LOAD_FAILED_MESSAGE));
}

#[tokio::test]
async fn test_subscribers_observe_changes() {
    let app = TestApp::new(|_| Reply::ok(student_page(&[1, 2], 1)));
    let c = app.controller(ResourceConfig::<Student>::new(), true);
    let mut rx = c.subscribe();

    c.load(1, "").await;
    assert!(rx.has_changed().unwrap());
    let snap = rx.borrow_and_update().clone();
    assert_eq!(snap.list.items.len(), 2);

    c.set_filter("status", "inactive");
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().list.items.is_empty());
}
