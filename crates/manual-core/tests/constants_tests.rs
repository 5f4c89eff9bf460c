// Host-side tests for tuning constants and their relationships.

use manual_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn domains_are_ordered_and_hold_the_defaults() {
    assert!(0.0 < SHUTTER_MIN_SEC && SHUTTER_MIN_SEC < SHUTTER_MAX_SEC);
    assert!(0.0 < APERTURE_MIN && APERTURE_MIN < APERTURE_MAX);
    assert!(0.0 < ISO_MIN && ISO_MIN < ISO_MAX);

    assert!((SHUTTER_MIN_SEC..=SHUTTER_MAX_SEC).contains(&DEFAULT_SHUTTER_SEC));
    assert!((APERTURE_MIN..=APERTURE_MAX).contains(&DEFAULT_APERTURE));
    assert!((ISO_MIN..=ISO_MAX).contains(&DEFAULT_ISO));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn rates_and_alphas_are_fractions() {
    for rate in [SHUTTER_SMOOTHING, APERTURE_SMOOTHING, ISO_SMOOTHING] {
        assert!(rate > 0.0 && rate <= 1.0);
    }
    assert!(FLASH_PEAK_ALPHA > 0.0 && FLASH_PEAK_ALPHA <= 1.0);
    assert!(FLASH_DECAY_PER_SEC > 0.0);
    assert!(GRAIN_MAX_INTENSITY > 0.0 && GRAIN_MAX_INTENSITY <= 1.0);
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn dial_sweep_and_dead_zone_fill_the_circle() {
    assert_eq!(DIAL_SWEEP_DEG + DIAL_DEAD_ZONE_DEG, 360.0);
    assert!(DIAL_KEY_STEP_FINE < DIAL_KEY_STEP_COARSE);
}

#[test]
fn loop_config_defaults_come_from_constants() {
    let c = LoopConfig::default();
    assert_eq!(c.max_dt, MAX_FRAME_DT_SEC);
    assert_eq!(c.flash_peak, FLASH_PEAK_ALPHA);
    assert_eq!(c.smoothing.iso, ISO_SMOOTHING);
}

#[test]
fn overlay_colours_are_translucent_white() {
    assert!((THIRDS_COLOR.a as f32 / 255.0 - 0.25).abs() < 0.01);
    assert!((CORNER_COLOR.a as f32 / 255.0 - 0.9).abs() < 0.01);
    assert_eq!((CORNER_COLOR.r, CORNER_COLOR.g, CORNER_COLOR.b), (255, 255, 255));
    assert_eq!(WASH_COLOR, Color::hex(0xb8d9ff));
}
