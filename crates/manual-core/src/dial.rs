//! Logarithmic dial mapping, dial geometry and readout formatting.

use crate::constants::*;
use crate::error::{CameraError, Result};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Logarithmic bijection between a normalized position `t ∈ [0, 1]` and a
/// parameter value in `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DialMapping {
    min: f64,
    max: f64,
}

impl DialMapping {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min < max) {
            return Err(CameraError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn shutter() -> Self {
        Self {
            min: SHUTTER_MIN_SEC,
            max: SHUTTER_MAX_SEC,
        }
    }

    pub fn aperture() -> Self {
        Self {
            min: APERTURE_MIN,
            max: APERTURE_MAX,
        }
    }

    pub fn iso() -> Self {
        Self {
            min: ISO_MIN,
            max: ISO_MAX,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn to_normalized(&self, value: f64) -> f64 {
        let v = value.clamp(self.min, self.max);
        ((v / self.min).ln() / (self.max / self.min).ln()).clamp(0.0, 1.0)
    }

    pub fn from_normalized(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        (self.min * (self.max / self.min).powf(t)).clamp(self.min, self.max)
    }
}

// ---------------- Readouts ----------------

pub fn format_shutter(seconds: f64) -> String {
    if seconds >= 1.0 {
        return format!("{:.1}s", seconds);
    }
    let denom = (1.0 / seconds).round();
    format!("1/{}", denom as i64)
}

pub fn format_aperture(f_number: f64) -> String {
    let r = (f_number * 10.0).round() / 10.0;
    if r.fract() == 0.0 {
        format!("f/{}", r as i64)
    } else {
        format!("f/{:.1}", r)
    }
}

pub fn format_iso(iso: f64) -> String {
    format!("ISO {}", iso.round() as i64)
}

/// Parse a shutter speed written as `1/250`, `0.5` or `2s`.
pub fn parse_shutter(text: &str) -> Option<f64> {
    let s = text.trim();
    let s = s.strip_suffix('s').unwrap_or(s).trim();
    let value = match s.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => s.parse().ok()?,
    };
    (value.is_finite() && value > 0.0).then_some(value)
}

/// ISO slider text to a target value: leading integer, falling back to the
/// default for empty, invalid or zero input, then clamped.
pub fn parse_iso_input(text: &str) -> f64 {
    let s = text.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let parsed = digits[..end].parse::<i64>().ok().map(|n| n * sign);
    match parsed {
        Some(n) if n != 0 => (n as f64).clamp(ISO_MIN, ISO_MAX),
        _ => DEFAULT_ISO,
    }
}

// ---------------- Dial geometry ----------------

/// Map a pointer offset from the dial centre (screen coordinates, +y down)
/// to a normalized position. The circle is unrolled over `[0, 1]` with a
/// `DIAL_DEAD_ZONE_DEG` band (just below the right-hand side) pinned to 1.
pub fn angle_position(dx: f64, dy: f64) -> f64 {
    let a = dy.atan2(dx) + FRAC_PI_2;
    let t = (a + PI) / TAU;
    let dead = DIAL_DEAD_ZONE_DEG / 360.0;
    let t = (t + dead / 2.0).rem_euclid(1.0);
    (t / (1.0 - dead)).clamp(0.0, 1.0)
}

pub fn knob_rotation_degrees(t: f64) -> f64 {
    t.clamp(0.0, 1.0) * DIAL_SWEEP_DEG - DIAL_SWEEP_DEG / 2.0
}

/// One step of keyboard adjustment; `direction` is +1 or -1.
pub fn step_position(t: f64, direction: f64, coarse: bool) -> f64 {
    let step = if coarse {
        DIAL_KEY_STEP_COARSE
    } else {
        DIAL_KEY_STEP_FINE
    };
    (t + direction.signum() * step).clamp(0.0, 1.0)
}

/// Relative drag on a dial: the position moves by the change in pointer
/// angle since the drag began, so grabbing the knob never makes it jump.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DialDrag {
    start_angle: f64,
    start_position: f64,
}

impl DialDrag {
    pub fn begin(pointer_position: f64, current_position: f64) -> Self {
        Self {
            start_angle: pointer_position,
            start_position: current_position.clamp(0.0, 1.0),
        }
    }

    pub fn position_for(&self, pointer_position: f64) -> f64 {
        (self.start_position + (pointer_position - self.start_angle)).clamp(0.0, 1.0)
    }
}
