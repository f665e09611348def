//! Internal tests for the tool implementations
//!
//! Runs the tool logic against a local mock of the upstream API so the
//! composition behavior (validation order, fan-out, partial failure) can be
//! asserted without network access.

use super::tools;
use crate::credentials::CredentialDefaults;
use crate::mcp::params::{
    AuthParams, MuteMonitorsByServiceParams, MuteResourcesByWildcardParams,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Requests captured by the mock upstream
#[derive(Clone, Default)]
struct MockState {
    mute_rule_bodies: Arc<Mutex<Vec<Value>>>,
    monitors: Value,
    resources: Value,
}

async fn monitors_handler(State(state): State<MockState>) -> Json<Value> {
    Json(state.monitors.clone())
}

async fn resources_handler(State(state): State<MockState>) -> Json<Value> {
    Json(state.resources.clone())
}

async fn create_mute_handler(
    State(state): State<MockState>,
    Path(_account): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let poisoned = body
        .get("resource")
        .and_then(|r| r.get("arn"))
        .and_then(|a| a.as_str())
        .map(|arn| arn.contains("poison"))
        .unwrap_or(false);
    state
        .mute_rule_bodies
        .lock()
        .expect("mock state lock")
        .push(body);
    if poisoned {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "resource rejected"})),
        )
    } else {
        (StatusCode::OK, Json(json!({})))
    }
}

/// Spawn a mock upstream and return its base URL plus the captured bodies
async fn spawn_mock(monitors: Value, resources: Value) -> (String, Arc<Mutex<Vec<Value>>>) {
    let state = MockState {
        mute_rule_bodies: Arc::new(Mutex::new(Vec::new())),
        monitors,
        resources,
    };
    let bodies = state.mute_rule_bodies.clone();

    let router = Router::new()
        .route("/zi/accounts/{account}/mutes/monitors", get(monitors_handler))
        .route(
            "/zi/accounts/{account}/mutes/resources",
            get(resources_handler),
        )
        .route("/zi/accounts/{account}/mutes", post(create_mute_handler))
        .with_state(state);

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("bind mock listener");
    let addr = listener.local_addr().expect("mock addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    (format!("http://{addr}"), bodies)
}

fn defaults_for(base_url: &str) -> CredentialDefaults {
    CredentialDefaults {
        api_key: Some("test-key".to_string()),
        account_id: Some("acct-1".to_string()),
        base_url: Some(base_url.to_string()),
    }
}

fn service_params(service_name: &str, monitor_names: Option<Vec<&str>>) -> MuteMonitorsByServiceParams {
    MuteMonitorsByServiceParams {
        auth: AuthParams::default(),
        service_name: service_name.to_string(),
        monitor_names: monitor_names
            .map(|names| names.into_iter().map(String::from).collect()),
        hide: false,
        projects: None,
        regions: None,
    }
}

fn wildcard_params(pattern: &str, service_type: Option<&str>) -> MuteResourcesByWildcardParams {
    MuteResourcesByWildcardParams {
        auth: AuthParams::default(),
        resource_pattern: pattern.to_string(),
        service_type: service_type.map(String::from),
        hide: true,
        projects: None,
        regions: None,
    }
}

fn sqs_monitors() -> Value {
    json!({"monitors": {"sqs": ["queue-depth", "age-of-oldest"], "rds": ["cpu"]}})
}

#[tokio::test]
async fn mute_by_service_creates_one_scoped_rule() {
    let (base, bodies) = spawn_mock(sqs_monitors(), json!({"resources": []})).await;
    let defaults = defaults_for(&base);

    let result =
        tools::mute_monitors_by_service_impl(&defaults, service_params("sqs", None))
            .await
            .expect("mute by service");

    assert_eq!(result.service, "sqs");
    assert_eq!(result.monitors, vec!["queue-depth", "age-of-oldest"]);

    let captured = bodies.lock().unwrap();
    assert_eq!(captured.len(), 1, "exactly one rule created");
    assert_eq!(
        captured[0]["monitors"]["sqs"],
        json!(["queue-depth", "age-of-oldest"])
    );
    assert!(captured[0].get("resource").is_none());
}

#[tokio::test]
async fn mute_by_service_resolves_names_case_insensitively() {
    let (base, _bodies) = spawn_mock(sqs_monitors(), json!({"resources": []})).await;
    let defaults = defaults_for(&base);

    let result = tools::mute_monitors_by_service_impl(&defaults, service_params("SQS", None))
        .await
        .expect("case-insensitive service");
    // Canonical key from the monitor table, not the caller's casing
    assert_eq!(result.service, "sqs");
    assert!(result.build_message().contains("for sqs service"));
}

#[tokio::test]
async fn mute_by_service_rejects_unknown_service_before_any_write() {
    let (base, bodies) = spawn_mock(sqs_monitors(), json!({"resources": []})).await;
    let defaults = defaults_for(&base);

    let err = tools::mute_monitors_by_service_impl(&defaults, service_params("lambda", None))
        .await
        .unwrap_err();
    assert!(err.message.contains("Service \"lambda\" not found"));
    assert!(err.message.contains("Available services:"));
    assert!(bodies.lock().unwrap().is_empty(), "no rule may be created");
}

#[tokio::test]
async fn mute_by_service_rejects_invalid_monitors_before_any_write() {
    let (base, bodies) = spawn_mock(sqs_monitors(), json!({"resources": []})).await;
    let defaults = defaults_for(&base);

    let err = tools::mute_monitors_by_service_impl(
        &defaults,
        service_params("sqs", Some(vec!["queue-depth", "bogus"])),
    )
    .await
    .unwrap_err();
    assert!(err
        .message
        .contains("Invalid monitors for service \"sqs\": bogus"));
    assert!(err.message.contains("Available monitors: queue-depth"));
    assert!(bodies.lock().unwrap().is_empty());
}

#[tokio::test]
async fn wildcard_fans_out_one_rule_per_match_and_survives_failures() {
    let resources = json!({"resources": [
        {"arn": "arn:aws:sqs:us-east-1:1:sqs-prod-1", "refType": "aws_arn"},
        {"arn": "arn:aws:sqs:us-east-1:1:sqs-poison", "refType": "aws_arn"},
        {"arn": "arn:aws:rds:us-east-1:1:db-prod", "refType": "aws_arn"}
    ]});
    let (base, bodies) = spawn_mock(sqs_monitors(), resources).await;
    let defaults = defaults_for(&base);

    let result =
        tools::mute_resources_by_wildcard_impl(&defaults, wildcard_params("*sqs-*", None))
            .await
            .expect("fan-out");

    assert_eq!(result.matched, 2);
    assert_eq!(result.success_count, 1);
    assert_eq!(result.failure_count, 1);
    assert_eq!(bodies.lock().unwrap().len(), 2, "one POST per match");

    let message = result.build_message();
    assert!(message.contains("**Matched Resources:** 2"));
    assert!(message.contains("**Successfully Muted:** 1"));
    assert!(message.contains("**Failed:** 1"));
    assert!(message.contains("✅ arn:aws:sqs:us-east-1:1:sqs-prod-1"));
    assert!(message.contains("❌ arn:aws:sqs:us-east-1:1:sqs-poison"));
    assert!(message.contains("Events will be completely hidden."));
}

#[tokio::test]
async fn wildcard_service_filter_drops_other_services() {
    let resources = json!({"resources": [
        {"arn": "arn:aws:sqs:us-east-1:1:orders-prod", "refType": "aws_arn"},
        {"arn": "arn:aws:rds:us-east-1:1:orders-prod", "refType": "aws_arn"},
        {"arn": "orders-prod-plain-name", "refType": "other"}
    ]});
    let (base, bodies) = spawn_mock(sqs_monitors(), resources).await;
    let defaults = defaults_for(&base);

    let result =
        tools::mute_resources_by_wildcard_impl(&defaults, wildcard_params("*orders*", Some("sqs")))
            .await
            .expect("filtered fan-out");

    assert_eq!(result.matched, 1);
    let captured = bodies.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(
        captured[0]["resource"]["arn"],
        "arn:aws:sqs:us-east-1:1:orders-prod"
    );
}

#[tokio::test]
async fn wildcard_skips_resources_with_empty_references() {
    let resources = json!({"resources": [
        {"arn": "arn:aws:sqs:us-east-1:1:orders-prod", "refType": "aws_arn"},
        {"arn": "", "refType": "aws_arn"}
    ]});
    let (base, bodies) = spawn_mock(sqs_monitors(), resources).await;
    let defaults = defaults_for(&base);

    let result = tools::mute_resources_by_wildcard_impl(&defaults, wildcard_params("*", None))
        .await
        .expect("fan-out over everything");

    // An unscoped rule for an empty reference would mute the whole account
    assert_eq!(result.matched, 1);
    let captured = bodies.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(
        captured[0]["resource"]["arn"],
        "arn:aws:sqs:us-east-1:1:orders-prod"
    );
}

#[tokio::test]
async fn wildcard_with_no_resources_fails_without_writes() {
    let (base, bodies) = spawn_mock(sqs_monitors(), json!({"resources": []})).await;
    let defaults = defaults_for(&base);

    let err = tools::mute_resources_by_wildcard_impl(&defaults, wildcard_params("*", None))
        .await
        .unwrap_err();
    assert!(err
        .message
        .contains("No resources found in the account to apply wildcard pattern to."));
    assert!(bodies.lock().unwrap().is_empty());
}

#[tokio::test]
async fn wildcard_with_no_matches_reports_the_total() {
    let resources = json!({"resources": [
        {"arn": "arn:aws:rds:us-east-1:1:db-1", "refType": "aws_arn"},
        {"arn": "arn:aws:rds:us-east-1:1:db-2", "refType": "aws_arn"}
    ]});
    let (base, bodies) = spawn_mock(sqs_monitors(), resources).await;
    let defaults = defaults_for(&base);

    let err =
        tools::mute_resources_by_wildcard_impl(&defaults, wildcard_params("sqs-*", Some("sqs")))
            .await
            .unwrap_err();
    assert!(err
        .message
        .contains("No resources found matching pattern \"sqs-*\" and service type \"sqs\""));
    assert!(err.message.contains("Total resources available: 2"));
    assert!(bodies.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_credentials_fail_before_the_network() {
    // Unroutable defaults: the call must fail on credentials, not on I/O
    let defaults = CredentialDefaults::empty();
    let err = tools::mute_monitors_by_service_impl(&defaults, service_params("sqs", None))
        .await
        .unwrap_err();
    assert!(err.message.contains("API key is required"));
}
