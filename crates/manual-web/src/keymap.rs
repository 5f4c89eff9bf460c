// Pure key and label helpers shared by the DOM wiring. Kept free of web-sys
// so the host tests can include this file directly.

use manual_core::knob_rotation_degrees;

/// Arrow keys nudge a focused dial: left/down decrease, right/up increase.
#[inline]
pub fn dial_step_direction(key: &str) -> Option<f64> {
    match key {
        "ArrowLeft" | "ArrowDown" => Some(-1.0),
        "ArrowRight" | "ArrowUp" => Some(1.0),
        _ => None,
    }
}

#[inline]
pub fn is_shutter_key(key: &str) -> bool {
    key == "Enter"
}

/// The play button shows the action it will perform next.
#[inline]
pub fn play_button_label(running: bool) -> &'static str {
    if running {
        "\u{23F8}\u{FE0E}"
    } else {
        "\u{25B6}\u{FE0E}"
    }
}

pub fn knob_transform(t: f64) -> String {
    format!("rotate({:.1}deg)", knob_rotation_degrees(t))
}

pub fn aria_value(t: f64) -> String {
    format!("{:.3}", t.clamp(0.0, 1.0))
}

pub fn flash_opacity(alpha: f32) -> String {
    if alpha > 0.0 {
        format!("{:.2}", alpha)
    } else {
        "0".to_string()
    }
}

pub fn blur_filter(radius_px: u32) -> String {
    if radius_px == 0 {
        "none".to_string()
    } else {
        format!("blur({}px)", radius_px)
    }
}
