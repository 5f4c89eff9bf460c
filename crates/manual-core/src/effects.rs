//! Pure mappings from exposure settings to the visual parameters a scene
//! renders with. Nothing in here holds state.

use crate::constants::*;
use crate::exposure::ExposureState;

/// Per-scene tuning of the shared effect curves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectProfile {
    pub max_motion_samples: u32,
    pub max_dof_blur_px: f64,
    pub wash_gain: f64,
    pub wash_cap: f64,
    pub ghost_alpha_base: f32,
    pub ghost_alpha_span: f32,
}

impl EffectProfile {
    pub const RUNNER: EffectProfile = EffectProfile {
        max_motion_samples: 18,
        max_dof_blur_px: 6.0,
        wash_gain: 0.4,
        wash_cap: 0.8,
        ghost_alpha_base: 0.08,
        ghost_alpha_span: 0.22,
    };

    pub const WATERFALL: EffectProfile = EffectProfile {
        max_motion_samples: 24,
        max_dof_blur_px: 7.0,
        wash_gain: 0.5,
        wash_cap: 0.9,
        ghost_alpha_base: 0.05,
        ghost_alpha_span: 0.12,
    };
}

/// Everything a scene needs from the current exposure for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Effects {
    pub exposure: f64,
    pub dof: f64,
    pub blur_px: u32,
    pub motion_samples: u32,
    pub wash_alpha: f32,
    pub grain: f64,
}

impl Effects {
    pub fn derive(exposure: &ExposureState, profile: &EffectProfile) -> Self {
        let e = exposure.compute_exposure();
        Self {
            exposure: e,
            dof: dof_amount(exposure.aperture()),
            blur_px: dof_blur_px(exposure.aperture(), profile.max_dof_blur_px),
            motion_samples: motion_sample_count(
                exposure.shutter_seconds(),
                profile.max_motion_samples,
            ),
            wash_alpha: wash_alpha(e, profile.wash_gain, profile.wash_cap),
            grain: grain_intensity(exposure.iso()),
        }
    }
}

/// Background defocus in `[0, 1]`: 1 wide open, 0 once `ln(aperture)`
/// reaches `DOF_LOG_APERTURE_SHARP`.
pub fn dof_amount(aperture: f64) -> f64 {
    if !(aperture > 0.0) {
        return 1.0;
    }
    ((DOF_LOG_APERTURE_SHARP - aperture.ln()) / DOF_LOG_APERTURE_SHARP).clamp(0.0, 1.0)
}

pub fn dof_blur_px(aperture: f64, max_px: f64) -> u32 {
    (dof_amount(aperture) * max_px.max(0.0)).round() as u32
}

/// Number of ghost copies for motion blur, from 1 at the fastest shutter up
/// to `max` at `SHUTTER_MAX_SEC`.
pub fn motion_sample_count(shutter_seconds: f64, max: u32) -> u32 {
    let max = max.max(1);
    let t = (shutter_seconds / SHUTTER_MAX_SEC).clamp(0.0, 1.0);
    let t = if t.is_nan() { 0.0 } else { t };
    let n = (1.0 + (max as f64 - 1.0) * t).round();
    (n as u32).clamp(1, max)
}

/// Distance travelled while the shutter is open.
pub fn trail_length(speed: f64, shutter_seconds: f64) -> f64 {
    speed * shutter_seconds
}

/// Opacity of the ghost at fraction `t` along the trail (0 = newest).
pub fn ghost_alpha(t: f32, base: f32, span: f32) -> f32 {
    (base + (1.0 - t.clamp(0.0, 1.0)) * span).clamp(0.0, 1.0)
}

/// Additive over-exposure wash; zero until the exposure passes 1.
pub fn wash_alpha(exposure: f64, gain: f64, cap: f64) -> f32 {
    if !(exposure > 1.0) {
        return 0.0;
    }
    ((exposure - 1.0) * gain).clamp(0.0, cap) as f32
}

pub fn grain_intensity(iso: f64) -> f64 {
    let t = ((iso - ISO_MIN) / (ISO_MAX - ISO_MIN)).clamp(0.0, 1.0);
    if t.is_nan() {
        return 0.0;
    }
    t * GRAIN_MAX_INTENSITY
}
