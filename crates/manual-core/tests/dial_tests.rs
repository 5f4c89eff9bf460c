// Host-side tests for dial mapping, readout formatting and dial geometry.

use manual_core::*;

fn presets() -> [DialMapping; 3] {
    [DialMapping::shutter(), DialMapping::aperture(), DialMapping::iso()]
}

#[test]
fn endpoints_map_to_zero_and_one() {
    for m in presets() {
        assert_eq!(m.to_normalized(m.min()), 0.0);
        assert!((m.to_normalized(m.max()) - 1.0).abs() < 1e-12);
        assert!((m.from_normalized(0.0) - m.min()).abs() < 1e-12);
        assert!((m.from_normalized(1.0) - m.max()).abs() < 1e-9);
    }
}

#[test]
fn mapping_round_trips_across_the_range() {
    for m in presets() {
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let v = m.from_normalized(t);
            assert!((m.to_normalized(v) - t).abs() < 1e-9, "t={t} range {:?}", m);
            assert!((m.from_normalized(m.to_normalized(v)) - v).abs() < 1e-9 * v);
        }
    }
}

#[test]
fn mapping_is_logarithmic_and_monotonic() {
    let m = DialMapping::shutter();
    // geometric mean at the midpoint
    let mid = m.from_normalized(0.5);
    assert!((mid - (0.001f64 * 0.5).sqrt()).abs() < 1e-12);
    let mut prev = m.from_normalized(0.0);
    for i in 1..=50 {
        let v = m.from_normalized(i as f64 / 50.0);
        assert!(v > prev);
        prev = v;
    }
}

#[test]
fn out_of_range_input_clamps() {
    let m = DialMapping::aperture();
    assert_eq!(m.to_normalized(0.1), 0.0);
    assert_eq!(m.to_normalized(100.0), m.to_normalized(16.0));
    assert_eq!(m.from_normalized(-3.0), m.min());
    assert!((m.from_normalized(7.0) - m.max()).abs() < 1e-9);
    assert_eq!(m.from_normalized(f64::NAN), m.min());
}

#[test]
fn invalid_ranges_are_rejected() {
    assert!(matches!(
        DialMapping::new(0.0, 1.0),
        Err(CameraError::InvalidRange { .. })
    ));
    assert!(DialMapping::new(5.0, 5.0).is_err());
    assert!(DialMapping::new(8.0, 2.0).is_err());
    assert!(DialMapping::new(f64::NAN, 2.0).is_err());
    assert!(DialMapping::new(1.0, f64::INFINITY).is_err());
    assert!(DialMapping::new(2.0, 8.0).is_ok());
}

#[test]
fn shutter_readouts() {
    assert_eq!(format_shutter(1.0 / 250.0), "1/250");
    assert_eq!(format_shutter(0.5), "1/2");
    assert_eq!(format_shutter(1.0 / 1000.0), "1/1000");
    assert_eq!(format_shutter(1.0), "1.0s");
    assert_eq!(format_shutter(2.5), "2.5s");
}

#[test]
fn aperture_readouts_drop_trailing_zero() {
    assert_eq!(format_aperture(4.0), "f/4");
    assert_eq!(format_aperture(2.8), "f/2.8");
    assert_eq!(format_aperture(1.8), "f/1.8");
    assert_eq!(format_aperture(16.0), "f/16");
    assert_eq!(format_aperture(5.64), "f/5.6");
}

#[test]
fn iso_readouts_round() {
    assert_eq!(format_iso(200.0), "ISO 200");
    assert_eq!(format_iso(6399.6), "ISO 6400");
}

#[test]
fn shutter_text_parses() {
    assert_eq!(parse_shutter("1/250"), Some(1.0 / 250.0));
    assert_eq!(parse_shutter(" 0.5 "), Some(0.5));
    assert_eq!(parse_shutter("2s"), Some(2.0));
    assert_eq!(parse_shutter("1/8s"), Some(0.125));
    assert_eq!(parse_shutter("1/0"), None);
    assert_eq!(parse_shutter("-1"), None);
    assert_eq!(parse_shutter("fast"), None);
    assert_eq!(parse_shutter(""), None);
}

#[test]
fn iso_slider_text_falls_back_and_clamps() {
    assert_eq!(parse_iso_input("800"), 800.0);
    assert_eq!(parse_iso_input(""), 200.0);
    assert_eq!(parse_iso_input("abc"), 200.0);
    assert_eq!(parse_iso_input("0"), 200.0);
    assert_eq!(parse_iso_input("99999"), 6400.0);
    assert_eq!(parse_iso_input("50"), 100.0);
    assert_eq!(parse_iso_input("1600abc"), 1600.0);
    assert_eq!(parse_iso_input("-5"), 100.0);
}

#[test]
fn angle_position_unrolls_the_circle() {
    // pointer straight below the centre starts the sweep
    assert!((angle_position(0.0, 1.0) - 0.1).abs() < 1e-9);
    assert!((angle_position(-1.0, 0.0) - 0.4).abs() < 1e-9);
    assert!((angle_position(0.0, -1.0) - 0.7).abs() < 1e-9);
    assert!((angle_position(1.0, 0.0) - 1.0).abs() < 1e-9);
    for i in 0..360 {
        let a = (i as f64).to_radians();
        let t = angle_position(a.cos(), a.sin());
        assert!((0.0..=1.0).contains(&t));
    }
}

#[test]
fn knob_rotation_spans_three_hundred_degrees() {
    assert_eq!(knob_rotation_degrees(0.0), -150.0);
    assert_eq!(knob_rotation_degrees(0.5), 0.0);
    assert_eq!(knob_rotation_degrees(1.0), 150.0);
    assert_eq!(knob_rotation_degrees(4.0), 150.0);
}

#[test]
fn keyboard_steps_are_fine_or_coarse_and_clamped() {
    assert!((step_position(0.5, 1.0, false) - 0.515).abs() < 1e-12);
    assert!((step_position(0.5, -1.0, true) - 0.45).abs() < 1e-12);
    assert_eq!(step_position(0.99, 1.0, true), 1.0);
    assert_eq!(step_position(0.01, -1.0, true), 0.0);
}

#[test]
fn drag_moves_relative_to_the_grab_point() {
    let drag = DialDrag::begin(0.3, 0.6);
    assert_eq!(drag.position_for(0.3), 0.6);
    assert!((drag.position_for(0.4) - 0.7).abs() < 1e-12);
    assert!((drag.position_for(0.1) - 0.4).abs() < 1e-12);
    assert_eq!(drag.position_for(1.0), 1.0);
    assert_eq!(drag.position_for(-1.0), 0.0);
}
