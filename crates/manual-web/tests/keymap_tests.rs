// Host-side tests for the pure key and label helpers.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]

mod keymap {
    include!("../src/keymap.rs");
}

use keymap::*;

#[test]
fn arrows_step_dials_both_ways() {
    assert_eq!(dial_step_direction("ArrowLeft"), Some(-1.0));
    assert_eq!(dial_step_direction("ArrowDown"), Some(-1.0));
    assert_eq!(dial_step_direction("ArrowRight"), Some(1.0));
    assert_eq!(dial_step_direction("ArrowUp"), Some(1.0));
    assert_eq!(dial_step_direction("PageUp"), None);
    assert_eq!(dial_step_direction("a"), None);
}

#[test]
fn only_enter_fires_the_shutter() {
    assert!(is_shutter_key("Enter"));
    assert!(!is_shutter_key(" "));
    assert!(!is_shutter_key("enter"));
}

#[test]
fn play_label_shows_the_next_action() {
    assert!(play_button_label(true).starts_with('\u{23F8}'));
    assert!(play_button_label(false).starts_with('\u{25B6}'));
}

#[test]
fn knob_and_aria_strings() {
    assert_eq!(knob_transform(0.0), "rotate(-150.0deg)");
    assert_eq!(knob_transform(0.5), "rotate(0.0deg)");
    assert_eq!(knob_transform(1.0), "rotate(150.0deg)");
    assert_eq!(aria_value(0.25), "0.250");
    assert_eq!(aria_value(1.7), "1.000");
}

#[test]
fn flash_opacity_is_zero_once_faded() {
    assert_eq!(flash_opacity(0.6), "0.60");
    assert_eq!(flash_opacity(0.123), "0.12");
    assert_eq!(flash_opacity(0.0), "0");
    assert_eq!(flash_opacity(-0.2), "0");
}

#[test]
fn blur_filter_strings() {
    assert_eq!(blur_filter(0), "none");
    assert_eq!(blur_filter(4), "blur(4px)");
}
