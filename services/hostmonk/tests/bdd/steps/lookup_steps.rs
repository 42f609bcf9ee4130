//! Step definitions for lookups.feature

use cucumber::{then, when};

use hostmonk::icons::get_icon_path;
use hostmonk::theme::get_theme;

use crate::world::HostmonkWorld;

#[when(expr = "I look up the icon {string}")]
fn look_up_icon(world: &mut HostmonkWorld, name: String) {
    world.icon_path = Some(get_icon_path(&name));
}

#[then(expr = "it should resolve to the same path as {string}")]
fn same_icon_path(world: &mut HostmonkWorld, other: String) {
    assert_eq!(world.icon_path, Some(get_icon_path(&other)));
}

#[then(expr = "it should resolve to {string}")]
fn icon_path_is(world: &mut HostmonkWorld, expected: String) {
    assert_eq!(world.icon_path, Some(expected.as_str()));
}

#[when(expr = "I look up the theme {string}")]
fn look_up_theme(world: &mut HostmonkWorld, name: String) {
    world.theme_name = Some(get_theme(&name).name);
}

#[then(expr = "the resolved theme should be {string}")]
fn resolved_theme(world: &mut HostmonkWorld, expected: String) {
    assert_eq!(world.theme_name, Some(expected.as_str()));
}
