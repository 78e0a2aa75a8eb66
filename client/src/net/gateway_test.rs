use std::sync::atomic::{AtomicUsize, Ordering};

use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::types::Role;
use crate::test_support::{ScriptedTransport, json_response, sample_user};
use crate::util::storage::MemoryStorage;

struct Fixture {
    gateway: Gateway<ScriptedTransport>,
    transport: ScriptedTransport,
    store: SessionStore,
    hook_calls: Arc<AtomicUsize>,
}

fn fixture() -> Fixture {
    let transport = ScriptedTransport::default();
    let store = SessionStore::new(Arc::new(MemoryStorage::default()));
    let hook_calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hook_calls);
    let gateway = Gateway::new(
        "http://api.test/api/",
        transport.clone(),
        store.clone(),
        Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );
    Fixture { gateway, transport, store, hook_calls }
}

// =============================================================
// Request stage
// =============================================================

#[test]
fn anonymous_request_has_no_authorization() {
    let f = fixture();
    f.transport.reply(json_response(200, &json!([])));

    block_on(f.gateway.execute(ApiRequest::get("/services"))).unwrap();

    let sent = &f.transport.sent()[0];
    assert_eq!(sent.url, "http://api.test/api/services");
    assert_eq!(sent.header("Authorization"), None);
    assert_eq!(sent.header("Content-Type"), None);
}

#[test]
fn stored_token_is_attached_as_bearer() {
    let f = fixture();
    f.store.write("abc.def.ghi", &sample_user(Role::User)).unwrap();
    f.transport.reply(json_response(200, &json!({})));

    block_on(f.gateway.execute(ApiRequest::get("/users/me"))).unwrap();

    assert_eq!(f.transport.sent()[0].header("authorization"), Some("Bearer abc.def.ghi"));
}

#[test]
fn token_is_read_at_dispatch_time() {
    let f = fixture();
    f.transport.reply(json_response(200, &json!({})));
    f.transport.reply(json_response(200, &json!({})));

    block_on(f.gateway.execute(ApiRequest::get("/staff"))).unwrap();
    f.store.write("late.token.x", &sample_user(Role::User)).unwrap();
    block_on(f.gateway.execute(ApiRequest::get("/staff"))).unwrap();

    let sent = f.transport.sent();
    assert_eq!(sent[0].header("Authorization"), None);
    assert_eq!(sent[1].header("Authorization"), Some("Bearer late.token.x"));
}

#[test]
fn json_body_sets_content_type_and_query_passes_through() {
    let f = fixture();
    f.transport.reply(json_response(201, &json!({})));
    let request = ApiRequest::post("appointments")
        .json(&json!({ "staffId": 1 }))
        .unwrap()
        .query(vec![("dryRun".to_owned(), "true".to_owned())]);

    block_on(f.gateway.execute(request)).unwrap();

    let sent = &f.transport.sent()[0];
    assert_eq!(sent.url, "http://api.test/api/appointments");
    assert_eq!(sent.header("content-type"), Some("application/json"));
    assert_eq!(sent.body.as_deref(), Some(r#"{"staffId":1}"#));
    assert_eq!(sent.query, vec![("dryRun".to_owned(), "true".to_owned())]);
}

// =============================================================
// Response stage
// =============================================================

#[test]
fn unauthorized_clears_store_runs_hook_and_fails() {
    let f = fixture();
    f.store.write("abc.def.ghi", &sample_user(Role::User)).unwrap();
    f.transport.reply(json_response(401, &json!({ "message": "expired" })));

    let result = block_on(f.gateway.execute(ApiRequest::get("/appointments")));

    assert_eq!(result, Err(ApiError::Unauthorized));
    assert_eq!(f.store.read().unwrap(), None);
    assert_eq!(f.store.token().unwrap(), None);
    assert_eq!(f.hook_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn unauthorized_on_credential_exchange_is_plain_status() {
    let f = fixture();
    f.store.write("abc.def.ghi", &sample_user(Role::User)).unwrap();
    f.transport.reply(json_response(401, &json!({ "message": "Bad credentials" })));

    let result = block_on(f.gateway.execute(ApiRequest::post("/auth/login").credential_exchange()));

    assert_eq!(
        result,
        Err(ApiError::Status { status: 401, message: Some("Bad credentials".to_owned()) })
    );
    assert_eq!(f.hook_calls.load(Ordering::SeqCst), 0);
    assert!(f.store.token().unwrap().is_some());
}

#[test]
fn other_errors_pass_through_with_message() {
    let f = fixture();
    f.transport.reply(json_response(403, &json!({ "message": "Forbidden" })));
    f.transport.reply(Ok(HttpResponse { status: 500, body: String::new() }));

    let forbidden = block_on(f.gateway.execute(ApiRequest::get("/admin/analytics")));
    let crashed = block_on(f.gateway.execute(ApiRequest::get("/admin/analytics")));

    assert_eq!(forbidden, Err(ApiError::Status { status: 403, message: Some("Forbidden".to_owned()) }));
    assert_eq!(crashed, Err(ApiError::Status { status: 500, message: None }));
    assert_eq!(f.hook_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn blank_error_message_is_ignored() {
    assert_eq!(error_message(r#"{"message":"  "}"#), None);
    assert_eq!(error_message("not json"), None);
    assert_eq!(error_message(r#"{"message":"nope"}"#), Some("nope".to_owned()));
}

#[test]
fn transport_errors_propagate() {
    let f = fixture();
    f.transport.reply(Err(ApiError::Transport("offline".to_owned())));

    let result = block_on(f.gateway.execute(ApiRequest::get("/staff")));

    assert_eq!(result, Err(ApiError::Transport("offline".to_owned())));
}

#[test]
fn send_json_decodes_and_reports_mismatch() {
    let f = fixture();
    f.transport.reply(json_response(200, &json!({ "message": "hi" })));
    f.transport.reply(json_response(200, &json!([1, 2])));

    let ok: ErrorBody = block_on(f.gateway.send_json(ApiRequest::get("/x"))).unwrap();
    let bad = block_on(f.gateway.send_json::<ErrorBody>(ApiRequest::get("/x")));

    assert_eq!(ok.message.as_deref(), Some("hi"));
    assert!(matches!(bad, Err(ApiError::Decode(_))));
}

#[test]
fn send_empty_accepts_no_content() {
    let f = fixture();
    f.transport.reply(Ok(HttpResponse { status: 204, body: String::new() }));
    assert_eq!(block_on(f.gateway.send_empty(ApiRequest::delete("/appointments/3"))), Ok(()));
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let f = fixture();
    assert_eq!(f.gateway.base_url(), "http://api.test/api");
    assert_eq!(join_url("http://h/api", "/a"), "http://h/api/a");
}

#[test]
fn user_message_prefers_backend_text() {
    assert_eq!(ApiError::Status { status: 400, message: Some("x".to_owned()) }.user_message(), Some("x"));
    assert_eq!(ApiError::Invalid("bad".to_owned()).user_message(), Some("bad"));
    assert_eq!(ApiError::Unauthorized.user_message(), None);
    assert_eq!(ApiError::Transport("t".to_owned()).user_message(), None);
}
