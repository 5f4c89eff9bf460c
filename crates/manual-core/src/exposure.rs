//! Current and target exposure settings.
//!
//! Targets are written by input adapters and always clamped to the physical
//! domain of their parameter. Current values chase the targets with a fixed
//! per-frame easing step (see [`ExposureState::advance`]), so they inherit the
//! domain bounds without any further clamping.

use crate::constants::*;

/// Per-tick easing rates for each parameter, each in (0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothingRates {
    pub shutter: f64,
    pub aperture: f64,
    pub iso: f64,
}

impl Default for SmoothingRates {
    fn default() -> Self {
        Self {
            shutter: SHUTTER_SMOOTHING,
            aperture: APERTURE_SMOOTHING,
            iso: ISO_SMOOTHING,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExposureState {
    shutter_seconds: f64,
    target_shutter_seconds: f64,
    aperture: f64,
    target_aperture: f64,
    iso: f64,
    target_iso: f64,
    base_light: f64,
}

impl Default for ExposureState {
    fn default() -> Self {
        Self {
            shutter_seconds: DEFAULT_SHUTTER_SEC,
            target_shutter_seconds: DEFAULT_SHUTTER_SEC,
            aperture: DEFAULT_APERTURE,
            target_aperture: DEFAULT_APERTURE,
            iso: DEFAULT_ISO,
            target_iso: DEFAULT_ISO,
            base_light: BASE_LIGHT,
        }
    }
}

impl ExposureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shutter_seconds(&self) -> f64 {
        self.shutter_seconds
    }
    pub fn target_shutter_seconds(&self) -> f64 {
        self.target_shutter_seconds
    }
    pub fn aperture(&self) -> f64 {
        self.aperture
    }
    pub fn target_aperture(&self) -> f64 {
        self.target_aperture
    }
    pub fn iso(&self) -> f64 {
        self.iso
    }
    pub fn target_iso(&self) -> f64 {
        self.target_iso
    }
    pub fn base_light(&self) -> f64 {
        self.base_light
    }

    pub fn set_target_shutter(&mut self, seconds: f64) {
        if let Some(v) = clamp_number(seconds, SHUTTER_MIN_SEC, SHUTTER_MAX_SEC) {
            self.target_shutter_seconds = v;
        }
    }

    pub fn set_target_aperture(&mut self, f_number: f64) {
        if let Some(v) = clamp_number(f_number, APERTURE_MIN, APERTURE_MAX) {
            self.target_aperture = v;
        }
    }

    pub fn set_target_iso(&mut self, iso: f64) {
        if let Some(v) = clamp_number(iso, ISO_MIN, ISO_MAX) {
            self.target_iso = v;
        }
    }

    /// Move every current value one easing step toward its target.
    ///
    /// Applied once per rendered frame, not scaled by dt: higher frame rates
    /// converge faster in wall-clock time.
    pub fn advance(&mut self, rates: SmoothingRates) {
        self.shutter_seconds = ease(
            self.shutter_seconds,
            self.target_shutter_seconds,
            rates.shutter,
        );
        self.aperture = ease(self.aperture, self.target_aperture, rates.aperture);
        self.iso = ease(self.iso, self.target_iso, rates.iso);
    }

    /// Jump current values straight to their targets.
    pub fn settle(&mut self) {
        self.shutter_seconds = self.target_shutter_seconds;
        self.aperture = self.target_aperture;
        self.iso = self.target_iso;
    }

    /// Stylized brightness indicator in `[0, EXPOSURE_DISPLAY_MAX]`.
    pub fn compute_exposure(&self) -> f64 {
        let raw = self.base_light * self.shutter_seconds * (self.iso / 100.0)
            / (self.aperture * self.aperture);
        (raw * EXPOSURE_DISPLAY_GAIN).clamp(0.0, EXPOSURE_DISPLAY_MAX)
    }
}

#[inline]
fn ease(current: f64, target: f64, rate: f64) -> f64 {
    if current == target {
        return current;
    }
    let next = current + (target - current) * rate.clamp(0.0, 1.0);
    // rounding must never carry the value past its target
    if (target - next) * (target - current) < 0.0 {
        target
    } else {
        next
    }
}

#[inline]
fn clamp_number(v: f64, lo: f64, hi: f64) -> Option<f64> {
    (!v.is_nan()).then(|| v.clamp(lo, hi))
}
