//! Host-agnostic frame loop.
//!
//! The host calls [`RenderLoop::frame`] (or [`RenderLoop::tick`] with its own
//! dt) once per display refresh. Each tick eases the exposure, advances the
//! active scene, renders it, draws the viewfinder overlay and composites the
//! shutter flash.

use crate::constants::*;
use crate::effects::grain_intensity;
use crate::error::Result;
use crate::exposure::{ExposureState, SmoothingRates};
use crate::overlay::draw_composition_guides;
use crate::paint::{Bitmap, Painter, Rect, Viewport};
use crate::scene::{SceneKind, SceneSet};
use instant::Instant;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopConfig {
    pub smoothing: SmoothingRates,
    /// Upper bound on a single tick's dt, in seconds.
    pub max_dt: f64,
    pub flash_peak: f32,
    pub flash_decay_per_sec: f32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            smoothing: SmoothingRates::default(),
            max_dt: MAX_FRAME_DT_SEC,
            flash_peak: FLASH_PEAK_ALPHA,
            flash_decay_per_sec: FLASH_DECAY_PER_SEC,
        }
    }
}

/// What one tick did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    /// The clamped dt actually applied.
    pub dt: f64,
    pub scene_rendered: bool,
    /// Flash opacity after this tick's decay.
    pub flash_alpha: f32,
}

/// Turns wall-clock instants into frame deltas.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call; 0 on the first.
    pub fn delta(&mut self, now: Instant) -> f64 {
        let dt = match self.last {
            Some(last) if now > last => now.duration_since(last).as_secs_f64(),
            _ => 0.0,
        };
        self.last = Some(now);
        dt
    }

    /// Forget the previous instant so the next frame starts from `now`.
    pub fn reset(&mut self, now: Instant) {
        self.last = Some(now);
    }
}

/// Plays the shutter click when a photo is taken.
pub trait ShutterSound {
    fn play_click(&self) -> Result<()>;
}

/// No sound at all, for headless use.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl ShutterSound for Silent {
    fn play_click(&self) -> Result<()> {
        Ok(())
    }
}

pub struct RenderLoop {
    exposure: ExposureState,
    scenes: SceneSet,
    grain_tile: Bitmap,
    config: LoopConfig,
    viewport: Viewport,
    clock: FrameClock,
    flash_alpha: f32,
    running: bool,
    render_failing: bool,
}

impl RenderLoop {
    /// A running loop over `scenes`, with default exposure settings.
    pub fn new(scenes: SceneSet, grain_tile: Bitmap, config: LoopConfig) -> Self {
        Self {
            exposure: ExposureState::default(),
            scenes,
            grain_tile,
            config,
            viewport: Viewport::default(),
            clock: FrameClock::new(),
            flash_alpha: 0.0,
            running: true,
            render_failing: false,
        }
    }

    pub fn exposure(&self) -> &ExposureState {
        &self.exposure
    }

    pub fn exposure_mut(&mut self) -> &mut ExposureState {
        &mut self.exposure
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    pub fn scenes(&self) -> &SceneSet {
        &self.scenes
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn active_scene(&self) -> Option<SceneKind> {
        self.scenes.active()
    }

    pub fn flash_alpha(&self) -> f32 {
        self.flash_alpha
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_pixel_ratio(&mut self, ratio: f32) {
        let (w, h) = (self.viewport.width as u32, self.viewport.height as u32);
        self.apply_viewport(Viewport::new(w, h, ratio));
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.apply_viewport(Viewport::new(width, height, self.viewport.pixel_ratio));
    }

    fn apply_viewport(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.scenes.resize(viewport);
        }
    }

    /// Switch scenes. While stopped the incoming scene stays paused.
    pub fn select_scene(&mut self, kind: SceneKind) -> Result<()> {
        self.scenes.select(kind)?;
        if !self.running {
            if let Some(scene) = self.scenes.active_scene_mut() {
                scene.pause();
            }
        }
        Ok(())
    }

    /// Take a photo: flash at full strength and click. A failing sound is
    /// logged and otherwise ignored.
    pub fn fire_shutter(&mut self, sound: &dyn ShutterSound) {
        self.flash_alpha = self.config.flash_peak;
        if let Err(e) = sound.play_click() {
            log::warn!("shutter click failed: {}", e);
        }
    }

    /// Resume with `now` as the new time baseline, so the pause is not
    /// replayed as one long frame.
    pub fn start(&mut self, now: Instant) {
        self.clock.reset(now);
        if self.running {
            return;
        }
        self.running = true;
        if let Some(scene) = self.scenes.active_scene_mut() {
            scene.play();
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
        if let Some(scene) = self.scenes.active_scene_mut() {
            scene.pause();
        }
    }

    /// Wall-clock tick: dt is measured from the previous frame.
    pub fn frame(&mut self, now: Instant, painter: &mut dyn Painter) -> Option<FrameStats> {
        let dt = self.clock.delta(now);
        self.tick(dt, painter)
    }

    /// Advance and draw one frame. Returns `None` while stopped.
    pub fn tick(&mut self, dt: f64, painter: &mut dyn Painter) -> Option<FrameStats> {
        if !self.running {
            return None;
        }
        let dt = if dt.is_nan() {
            0.0
        } else {
            dt.clamp(0.0, self.config.max_dt)
        };

        self.exposure.advance(self.config.smoothing);

        let (w, h) = painter.size();
        self.apply_viewport(Viewport::new(w, h, self.viewport.pixel_ratio));

        if let Some(scene) = self.scenes.active_scene_mut() {
            scene.update(dt);
        }

        painter.clear();
        let scene_rendered = self.render_scene(painter);

        let grain = grain_intensity(self.exposure.iso());
        if let Err(e) = draw_composition_guides(painter, self.viewport, &self.grain_tile, grain) {
            log::debug!("overlay draw failed: {}", e);
        }

        if self.flash_alpha > 0.0 {
            painter.save();
            painter.set_alpha(self.flash_alpha);
            painter.fill_rect(
                Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height),
                FLASH_COLOR,
            );
            painter.restore();
            self.flash_alpha =
                (self.flash_alpha - self.config.flash_decay_per_sec * dt as f32).max(0.0);
        }

        Some(FrameStats {
            dt,
            scene_rendered,
            flash_alpha: self.flash_alpha,
        })
    }

    // Failures are logged once per unbroken run of failing frames.
    fn render_scene(&mut self, painter: &mut dyn Painter) -> bool {
        let Some(scene) = self.scenes.active_scene() else {
            return false;
        };
        match scene.render(painter, &self.exposure) {
            Ok(()) => {
                if self.render_failing {
                    log::info!("{} scene rendering again", scene.kind());
                }
                self.render_failing = false;
                true
            }
            Err(e) => {
                if !self.render_failing {
                    log::warn!("{} scene render failed: {}", scene.kind(), e);
                }
                self.render_failing = true;
                false
            }
        }
    }
}
