use crate::paint::Color;

// Shared exposure/rendering tuning constants used by both web and native frontends.

// Parameter domains
pub const SHUTTER_MIN_SEC: f64 = 1.0 / 1000.0;
pub const SHUTTER_MAX_SEC: f64 = 0.5;
pub const APERTURE_MIN: f64 = 1.8;
pub const APERTURE_MAX: f64 = 16.0;
pub const ISO_MIN: f64 = 100.0;
pub const ISO_MAX: f64 = 6400.0;

// Startup values
pub const DEFAULT_SHUTTER_SEC: f64 = 1.0 / 250.0;
pub const DEFAULT_APERTURE: f64 = 4.0;
pub const DEFAULT_ISO: f64 = 200.0;
pub const BASE_LIGHT: f64 = 1.0;

// Exposure display rescaling (not a physical unit)
pub const EXPOSURE_DISPLAY_GAIN: f64 = 2.4;
pub const EXPOSURE_DISPLAY_MAX: f64 = 3.5;

// Per-frame easing rates, applied once per tick
pub const SHUTTER_SMOOTHING: f64 = 0.15;
pub const APERTURE_SMOOTHING: f64 = 0.15;
pub const ISO_SMOOTHING: f64 = 0.25;

// Frame timing
pub const MAX_FRAME_DT_SEC: f64 = 0.05; // absorbs stalls (tab backgrounding)
pub const PIXEL_RATIO_MIN: f32 = 1.0;
pub const PIXEL_RATIO_MAX: f32 = 2.0;

// Shutter flash
pub const FLASH_PEAK_ALPHA: f32 = 0.6;
pub const FLASH_DECAY_PER_SEC: f32 = 3.8;

// Depth of field: ln(aperture) at which the background is fully sharp
pub const DOF_LOG_APERTURE_SHARP: f64 = 2.2;

// Sensor grain
pub const GRAIN_MAX_INTENSITY: f64 = 0.25;
pub const GRAIN_TILE_SIZE: u32 = 128;

// Dial geometry
pub const DIAL_SWEEP_DEG: f64 = 300.0;
pub const DIAL_DEAD_ZONE_DEG: f64 = 60.0;
pub const DIAL_KEY_STEP_FINE: f64 = 0.015;
pub const DIAL_KEY_STEP_COARSE: f64 = 0.05;

// Composition overlay
pub const GUIDE_CORNER_LEN_PX: f32 = 24.0;
pub const GUIDE_CORNER_INSET_PX: f32 = 2.0;
pub const THIRDS_COLOR: Color = Color::rgba(255, 255, 255, 64);
pub const CORNER_COLOR: Color = Color::rgba(255, 255, 255, 230);

// Exposure wash and flash tint
pub const WASH_COLOR: Color = Color::hex(0xb8d9ff);
pub const FLASH_COLOR: Color = Color::hex(0xffffff);
