#![allow(dead_code)]

use std::sync::Arc;

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use backend::config::AppConfig;
use backend::services::{GameService, SnapshotCache};
use backend::{GameStore, InMemoryStore};
use once_cell::sync::OnceCell;
use serde_json::Value;
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: OnceCell<()> = OnceCell::new();

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// A coordinator over a fresh in-memory store, plus the store itself so
/// tests can inspect persisted aggregates directly.
pub fn service_with_store() -> (Arc<GameService>, Arc<InMemoryStore>) {
    let config = AppConfig::default();
    let store = Arc::new(InMemoryStore::new());
    let service = Arc::new(GameService::new(
        store.clone() as Arc<dyn GameStore>,
        SnapshotCache::new(&config.cache),
        config.coordinator,
    ));
    (service, store)
}

pub fn service() -> Arc<GameService> {
    service_with_store().0
}

/// Assert a problem+json rejection: status, `code` field, and that the
/// body's `trace_id` matches the `x-trace-id` header.
pub async fn assert_problem(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
) -> Value {
    assert_eq!(resp.status().as_u16(), expected_status);

    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/problem+json"),
        "unexpected content type: {content_type}"
    );

    let header_trace_id = resp
        .headers()
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["code"], expected_code);
    assert_eq!(json["status"], expected_status);
    assert_eq!(json["trace_id"], header_trace_id);
    json
}
