//! Step definitions for status_monitor.feature

use std::sync::Arc;
use std::time::Duration;

use cucumber::{given, then, when};

use hostmonk::config::Service;
use hostmonk::monitor::{MonitorOptions, StatusKind, StatusMonitor};

use crate::world::{Behavior, FakeService, HostmonkWorld};

fn parse_status(s: &str) -> StatusKind {
    match s {
        "loading" => StatusKind::Loading,
        "online" => StatusKind::Online,
        "offline" => StatusKind::Offline,
        "unknown" => StatusKind::Unknown,
        other => panic!("Unknown status: {}", other),
    }
}

fn test_service(name: &str, ping: bool) -> Service {
    Service {
        name: name.to_string(),
        icon: name.to_lowercase(),
        url: format!("http://{}.local", name.to_lowercase()),
        description: None,
        category: None,
        ping,
        tags: Vec::new(),
    }
}

#[given(expr = "a service {string} with ping enabled")]
fn service_ping_enabled(world: &mut HostmonkWorld, name: String) {
    world.service = Some(test_service(&name, true));
}

#[given(expr = "a service {string} with ping disabled")]
fn service_ping_disabled(world: &mut HostmonkWorld, name: String) {
    world.service = Some(test_service(&name, false));
}

#[given("pinging is disabled globally")]
fn ping_disabled_globally(world: &mut HostmonkWorld) {
    world.ping_disabled_globally = true;
}

#[given(expr = "the service responds after {int} ms")]
fn service_responds(world: &mut HostmonkWorld, ms: u64) {
    world.fake = Some(Arc::new(FakeService::new(Behavior::RespondAfter(
        Duration::from_millis(ms),
    ))));
}

#[given("the service refuses connections")]
fn service_refuses(world: &mut HostmonkWorld) {
    world.fake = Some(Arc::new(FakeService::new(Behavior::Refuse)));
}

#[given("the service never responds")]
fn service_hangs(world: &mut HostmonkWorld) {
    world.fake = Some(Arc::new(FakeService::new(Behavior::Hang)));
}

#[given(expr = "a probe timeout of {int} ms")]
fn probe_timeout(world: &mut HostmonkWorld, ms: u64) {
    world.options = Some(MonitorOptions {
        timeout: Duration::from_millis(ms),
        ..MonitorOptions::default()
    });
}

#[when("monitoring starts")]
fn monitoring_starts(world: &mut HostmonkWorld) {
    let service = world.service.clone().expect("service not set");
    let fake = Arc::clone(world.fake.as_ref().expect("service behavior not set"));
    let options = world.options.unwrap_or_default();

    let handle = StatusMonitor::new(service, fake, options).start(!world.ping_disabled_globally);
    world.observed = Some(handle.status());
    world.handle = Some(handle);
}

#[when("the first probe completes")]
async fn first_probe_completes(world: &mut HostmonkWorld) {
    let handle = world.handle.as_ref().expect("monitoring not started");
    let mut rx = handle.subscribe();
    tokio::time::timeout(Duration::from_secs(10), rx.changed())
        .await
        .expect("no probe result within 10s")
        .expect("monitor stopped");
    world.observed = Some(rx.borrow().clone());
}

#[when(expr = "I wait {int} ms")]
async fn wait_ms(world: &mut HostmonkWorld, ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    if let Some(handle) = &world.handle {
        world.observed = Some(handle.status());
    }
}

#[when("the monitor is stopped")]
fn monitor_stopped(world: &mut HostmonkWorld) {
    let handle = world.handle.as_ref().expect("monitoring not started");
    handle.stop();
    assert!(handle.is_stopped());
}

#[then(expr = "the status should be {string}")]
fn status_should_be(world: &mut HostmonkWorld, expected: String) {
    let status = world.observed.as_ref().expect("no status observed");
    assert_eq!(status.status, parse_status(&expected));
}

#[then(expr = "the response time should be at least {int} ms")]
fn response_time_at_least(world: &mut HostmonkWorld, ms: u64) {
    let status = world.observed.as_ref().expect("no status observed");
    let actual = status.response_time_ms.expect("no response time");
    assert!(actual >= ms, "response time {}ms < {}ms", actual, ms);
    assert!(actual < ms + 1000, "response time {}ms far above {}ms", actual, ms);
}

#[then("the response time should be absent")]
fn response_time_absent(world: &mut HostmonkWorld) {
    let status = world.observed.as_ref().expect("no status observed");
    assert_eq!(status.response_time_ms, None);
}

#[then("the last checked time should be set")]
fn last_checked_set(world: &mut HostmonkWorld) {
    let status = world.observed.as_ref().expect("no status observed");
    assert!(status.last_checked_epoch_ms.is_some());
}

#[then("the last checked time should be absent")]
fn last_checked_absent(world: &mut HostmonkWorld) {
    let status = world.observed.as_ref().expect("no status observed");
    assert_eq!(status.last_checked_epoch_ms, None);
}

#[then(expr = "{int} probes should have been issued")]
fn probes_issued(world: &mut HostmonkWorld, count: u32) {
    let fake = world.fake.as_ref().expect("service behavior not set");
    assert_eq!(fake.calls(), count);
}
