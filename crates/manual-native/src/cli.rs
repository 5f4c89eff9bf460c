// Command-line arguments.

use clap::Parser;
use manual_core::{
    parse_shutter, SceneKind, Viewport, APERTURE_MAX, APERTURE_MIN, DEFAULT_APERTURE,
    DEFAULT_ISO, ISO_MAX, ISO_MIN, SHUTTER_MAX_SEC, SHUTTER_MIN_SEC,
};
use std::path::PathBuf;

/// Ten simulated minutes at 60 fps.
pub const MAX_FRAMES: u32 = 36_000;

/// Headless manual-mode camera: expose a scene and save the frame as a PNG
#[derive(Parser, Debug)]
#[command(name = "manual-shot", long_about = None)]
pub struct Args {
    /// Scene to shoot: runner or waterfall
    #[arg(long, value_name = "SCENE", default_value = "runner", value_parser = scene_arg)]
    pub scene: SceneKind,

    /// Shutter speed, e.g. 1/250, 0.5 or 0.5s
    #[arg(long, value_name = "SPEED", default_value = "1/250", value_parser = shutter_arg)]
    pub shutter: f64,

    /// Aperture f-number
    #[arg(long, value_name = "F", default_value_t = DEFAULT_APERTURE)]
    pub aperture: f64,

    /// Sensor sensitivity
    #[arg(long, value_name = "ISO", default_value_t = DEFAULT_ISO)]
    pub iso: f64,

    /// Simulated seconds to run before the shot
    #[arg(long, value_name = "SECONDS", default_value_t = 1.0)]
    pub seconds: f64,

    /// Simulated frame rate
    #[arg(long, value_name = "FPS", default_value_t = 60.0)]
    pub fps: f64,

    /// Output width in pixels
    #[arg(long, default_value_t = 960)]
    pub width: u32,

    /// Output height in pixels
    #[arg(long, default_value_t = 540)]
    pub height: u32,

    /// Device pixel ratio the layout scales by (clamped to 1..=2)
    #[arg(long, value_name = "RATIO", default_value_t = 1.0)]
    pub pixel_ratio: f32,

    /// Ease from the default settings instead of starting settled
    #[arg(long)]
    pub ease: bool,

    /// Fire the shutter flash just before the captured frame
    #[arg(long)]
    pub flash: bool,

    /// Where to write the PNG
    #[arg(long, short, value_name = "PATH", default_value = "shot.png")]
    pub out: PathBuf,

    /// Runner sprite sheet image (placeholder art when omitted)
    #[arg(long, value_name = "PATH")]
    pub runner_sheet: Option<PathBuf>,

    /// Width of one runner frame in the sheet
    #[arg(long, value_name = "PX", default_value_t = 64)]
    pub frame_width: u32,

    /// Height of one runner frame in the sheet
    #[arg(long, value_name = "PX", default_value_t = 64)]
    pub frame_height: u32,

    /// Number of frames in the sheet (guessed from the grid when omitted)
    #[arg(long, value_name = "N")]
    pub frames: Option<u32>,

    /// Water strip textures for the waterfall, back to front
    #[arg(long = "water", value_name = "PATH")]
    pub water: Vec<PathBuf>,

    /// Seed for placeholder textures and grain
    #[arg(long, default_value_t = 7)]
    pub seed: u64,
}

pub fn scene_arg(s: &str) -> Result<SceneKind, String> {
    SceneKind::from_id(s).ok_or_else(|| {
        let known: Vec<&str> = SceneKind::ALL.iter().map(|k| k.id()).collect();
        format!("unknown scene '{}' (expected one of: {})", s, known.join(", "))
    })
}

pub fn shutter_arg(s: &str) -> Result<f64, String> {
    parse_shutter(s).ok_or_else(|| format!("cannot read shutter speed '{}'", s))
}

impl Args {
    /// Frames to simulate: at least one, at most [`MAX_FRAMES`].
    pub fn frame_count(&self) -> u32 {
        let n = self.requested_frames();
        if n.is_nan() || n < 1.0 {
            1
        } else if n > MAX_FRAMES as f64 {
            MAX_FRAMES
        } else {
            n as u32
        }
    }

    fn requested_frames(&self) -> f64 {
        (self.seconds * self.fps).round()
    }

    pub fn frame_dt(&self) -> f64 {
        if self.fps.is_finite() && self.fps > 0.0 {
            1.0 / self.fps
        } else {
            0.0
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width.max(1), self.height.max(1), self.pixel_ratio)
    }

    /// Warn about settings the exposure model will clamp.
    pub fn out_of_range(&self) -> Vec<String> {
        let mut notes = Vec::new();
        if !(SHUTTER_MIN_SEC..=SHUTTER_MAX_SEC).contains(&self.shutter) {
            notes.push(format!(
                "shutter {}s outside {}..={}s",
                self.shutter, SHUTTER_MIN_SEC, SHUTTER_MAX_SEC
            ));
        }
        if !(APERTURE_MIN..=APERTURE_MAX).contains(&self.aperture) {
            notes.push(format!(
                "aperture f/{} outside f/{}..=f/{}",
                self.aperture, APERTURE_MIN, APERTURE_MAX
            ));
        }
        if !(ISO_MIN..=ISO_MAX).contains(&self.iso) {
            notes.push(format!("ISO {} outside {}..={}", self.iso, ISO_MIN, ISO_MAX));
        }
        if self.requested_frames() > MAX_FRAMES as f64 {
            notes.push(format!(
                "{}s at {} fps is more than {} frames",
                self.seconds, self.fps, MAX_FRAMES
            ));
        }
        notes
    }
}
