//! Step definitions for dashboard.feature

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use cucumber::{given, then, when};
use tower::ServiceExt;

use hostmonk::dashboard::build_router;
use hostmonk::engine::Engine;
use hostmonk::state::new_state_handle;

use crate::world::{Behavior, FakeService, HostmonkWorld};

#[given(expr = "a dashboard whose services respond after {int} ms")]
fn dashboard_with_services(world: &mut HostmonkWorld, ms: u64) {
    let config = world.config.clone().expect("config not normalized");
    let fake = Arc::new(FakeService::new(Behavior::RespondAfter(Duration::from_millis(
        ms,
    ))));
    let engine = Engine::start(&config, fake.clone());
    world.dashboard_state = Some(new_state_handle(config, engine.subscribers()));
    world.engine = Some(engine);
    world.fake = Some(fake);
}

#[when(expr = "I request {string}")]
async fn request_path(world: &mut HostmonkWorld, path: String) {
    let state = world
        .dashboard_state
        .as_ref()
        .expect("dashboard not set")
        .clone();
    let response = build_router(state)
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    world.response_status = Some(response.status().as_u16());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    world.response_body = Some(String::from_utf8(body.to_vec()).unwrap());
}

#[then(expr = "the response status should be {int}")]
fn response_status(world: &mut HostmonkWorld, expected: u16) {
    assert_eq!(world.response_status, Some(expected));
}

#[then(expr = "the response should contain {string}")]
fn response_contains(world: &mut HostmonkWorld, expected: String) {
    let body = world.response_body.as_ref().expect("no response body");
    assert!(
        body.contains(&expected),
        "Expected response to contain '{}', but it didn't.\nResponse body:\n{}",
        expected,
        body
    );
}

#[then(expr = "service {string} should be reported {string}")]
fn service_reported(world: &mut HostmonkWorld, name: String, expected: String) {
    let body = world.response_body.as_ref().expect("no response body");
    let statuses: Vec<serde_json::Value> = serde_json::from_str(body).unwrap();
    let entry = statuses
        .iter()
        .find(|s| s["name"] == name.as_str())
        .unwrap_or_else(|| panic!("service '{}' missing from {}", name, body));
    assert_eq!(entry["status"], expected.as_str());
}
