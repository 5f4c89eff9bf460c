// Host-side tests for the exposure-to-effect curves.

use manual_core::effects::*;
use manual_core::ExposureState;

#[test]
fn motion_samples_span_one_to_profile_max() {
    assert_eq!(motion_sample_count(0.5, 18), 18);
    assert_eq!(motion_sample_count(0.001, 18), 1);
    assert_eq!(motion_sample_count(0.25, 18), 10);
    assert_eq!(motion_sample_count(0.5, 24), 24);
    assert_eq!(motion_sample_count(10.0, 24), 24);
    assert_eq!(motion_sample_count(f64::NAN, 24), 1);
}

#[test]
fn depth_of_field_is_widest_open() {
    assert!((dof_amount(1.8) - 0.7328).abs() < 1e-3);
    assert_eq!(dof_amount(16.0), 0.0);
    assert!(dof_amount(2.8) > dof_amount(5.6));
    assert_eq!(dof_blur_px(1.8, 6.0), 4);
    assert_eq!(dof_blur_px(4.0, 6.0), 2);
    assert_eq!(dof_blur_px(4.0, 7.0), 3);
    assert_eq!(dof_blur_px(16.0, 7.0), 0);
}

#[test]
fn wash_starts_above_unit_exposure_and_caps() {
    assert_eq!(wash_alpha(0.5, 0.4, 0.8), 0.0);
    assert_eq!(wash_alpha(1.0, 0.4, 0.8), 0.0);
    assert!((wash_alpha(2.0, 0.4, 0.8) - 0.4).abs() < 1e-6);
    assert!((wash_alpha(3.5, 0.4, 0.8) - 0.8).abs() < 1e-6);
    assert!((wash_alpha(3.5, 0.5, 0.9) - 0.9).abs() < 1e-6);
}

#[test]
fn grain_scales_with_iso() {
    assert_eq!(grain_intensity(100.0), 0.0);
    assert!((grain_intensity(6400.0) - 0.25).abs() < 1e-12);
    assert!((grain_intensity(3250.0) - 0.125).abs() < 1e-12);
    assert_eq!(grain_intensity(50.0), 0.0);
}

#[test]
fn ghosts_fade_along_the_trail() {
    let p = EffectProfile::RUNNER;
    assert!((ghost_alpha(0.0, p.ghost_alpha_base, p.ghost_alpha_span) - 0.30).abs() < 1e-6);
    assert!((ghost_alpha(1.0, p.ghost_alpha_base, p.ghost_alpha_span) - 0.08).abs() < 1e-6);
    assert!((trail_length(140.0, 0.5) - 70.0).abs() < 1e-12);
}

#[test]
fn derive_bundles_the_curves_per_profile() {
    let mut e = ExposureState::new();
    e.set_target_shutter(0.5);
    e.set_target_aperture(1.8);
    e.set_target_iso(6400.0);
    e.settle();

    let runner = Effects::derive(&e, &EffectProfile::RUNNER);
    assert_eq!(runner.motion_samples, 18);
    assert_eq!(runner.blur_px, 4);
    assert!((runner.wash_alpha - 0.8).abs() < 1e-6);
    assert!((runner.grain - 0.25).abs() < 1e-12);

    let water = Effects::derive(&e, &EffectProfile::WATERFALL);
    assert_eq!(water.motion_samples, 24);
    assert_eq!(water.blur_px, 5);
    assert!((water.wash_alpha - 0.9).abs() < 1e-6);

    let calm = Effects::derive(&ExposureState::new(), &EffectProfile::RUNNER);
    assert_eq!(calm.wash_alpha, 0.0);
    assert_eq!(calm.motion_samples, 1);
}
