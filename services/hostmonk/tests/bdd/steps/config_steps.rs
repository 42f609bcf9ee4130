//! Step definitions for config_normalization.feature

use cucumber::gherkin::Step;
use cucumber::{given, then, when};

use hostmonk::config::{default_config, normalize, to_yaml};
use hostmonk::HostmonkError;

use crate::world::HostmonkWorld;

fn normalize_raw(world: &mut HostmonkWorld) {
    let raw = world.raw_config.as_deref().expect("config document not set");
    match normalize(raw) {
        Ok(config) => world.config = Some(config),
        Err(e) => world.parse_error = Some(e),
    }
}

fn service(world: &HostmonkWorld, position: usize) -> &hostmonk::Service {
    let config = world.config.as_ref().expect("config not normalized");
    config
        .services
        .get(position - 1)
        .unwrap_or_else(|| panic!("no service at position {}", position))
}

#[given("the config document:")]
fn config_document(world: &mut HostmonkWorld, step: &Step) {
    world.raw_config = Some(step.docstring.clone().expect("docstring missing"));
}

#[given("the config is normalized")]
fn given_normalized(world: &mut HostmonkWorld) {
    normalize_raw(world);
    assert!(world.config.is_some(), "{:?}", world.parse_error);
}

#[when("the config is normalized")]
fn when_normalized(world: &mut HostmonkWorld) {
    normalize_raw(world);
}

#[then(expr = "service {int} should have name {string}")]
fn service_name(world: &mut HostmonkWorld, position: usize, expected: String) {
    assert_eq!(service(world, position).name, expected);
}

#[then(expr = "service {int} should have icon {string}")]
fn service_icon(world: &mut HostmonkWorld, position: usize, expected: String) {
    assert_eq!(service(world, position).icon, expected);
}

#[then(expr = "service {int} should have url {string}")]
fn service_url(world: &mut HostmonkWorld, position: usize, expected: String) {
    assert_eq!(service(world, position).url, expected);
}

#[then(expr = "service {int} should have ping {word}")]
fn service_ping(world: &mut HostmonkWorld, position: usize, state: String) {
    let expected = match state.as_str() {
        "enabled" => true,
        "disabled" => false,
        other => panic!("Unknown ping state: {}", other),
    };
    assert_eq!(service(world, position).ping, expected);
}

#[then(expr = "setting {string} should be {string}")]
fn setting_value(world: &mut HostmonkWorld, key: String, expected: String) {
    let settings = &world.config.as_ref().expect("config not normalized").settings;
    let actual = match key.as_str() {
        "showCategories" => settings.show_categories.to_string(),
        "compactMode" => settings.compact_mode.to_string(),
        "refreshInterval" => settings.refresh_interval_ms.to_string(),
        "enablePing" => settings.enable_ping.to_string(),
        other => panic!("Unknown setting: {}", other),
    };
    assert_eq!(actual, expected);
}

#[then(expr = "the theme should be {string}")]
fn theme_is(world: &mut HostmonkWorld, expected: String) {
    assert_eq!(world.config.as_ref().expect("config not normalized").theme, expected);
}

#[then(expr = "the version should be {string}")]
fn version_is(world: &mut HostmonkWorld, expected: String) {
    assert_eq!(world.config.as_ref().expect("config not normalized").version, expected);
}

#[then("normalization should fail")]
fn normalization_fails(world: &mut HostmonkWorld) {
    assert!(world.config.is_none());
    let err = world.parse_error.as_ref().expect("expected a parse error");
    assert!(matches!(err, HostmonkError::ConfigParse(_)), "{err:?}");
}

#[then(expr = "the fallback config should have {int} service with ping disabled")]
fn fallback_config(world: &mut HostmonkWorld, count: usize) {
    assert!(world.parse_error.is_some());
    let fallback = default_config();
    assert_eq!(fallback.services.len(), count);
    assert!(fallback.services.iter().all(|s| !s.ping));
}

#[then("re-normalizing the config should yield the same config")]
fn round_trip(world: &mut HostmonkWorld) {
    let config = world.config.as_ref().expect("config not normalized");
    let yaml = to_yaml(config).unwrap();
    let reparsed = normalize(&yaml).unwrap();
    assert_eq!(&reparsed, config, "re-normalized from:\n{}", yaml);
}
