use super::{Scene, SceneKind};
use crate::constants::WASH_COLOR;
use crate::effects::{ghost_alpha, trail_length, EffectProfile, Effects};
use crate::error::Result;
use crate::exposure::ExposureState;
use crate::paint::{BlendMode, Color, Painter, Rect, Viewport};
use crate::sprite::{AnimatedSprite, SpriteSheet};

pub const RUNNER_FPS: f64 = 12.0;
pub const RUNNER_SCALE: f32 = 2.4;
pub const RUNNER_SPEED: f32 = 140.0; // px/s before pixel ratio
const WRAP_MARGIN: f32 = 20.0;

const BACKGROUND: Color = Color::hex(0x0c121a);
const SKYLINE_NEAR: Color = Color::hex(0x0f1a24);
const SKYLINE_FAR: Color = Color::hex(0x0e1620);
const GROUND: Color = Color::hex(0x0a1016);
const HORIZON: Color = Color::hex(0x101a24);

/// A sprite running left to right across a city street, wrapping around.
pub struct RunnerScene {
    sprite: AnimatedSprite,
    viewport: Viewport,
    x: f32,
    y: f32,
    elapsed: f64,
}

impl RunnerScene {
    pub fn new(sheet: SpriteSheet, viewport: Viewport) -> Result<Self> {
        let sprite = AnimatedSprite::new(sheet, RUNNER_FPS, RUNNER_SCALE)?;
        let mut scene = Self {
            sprite,
            viewport,
            x: 0.0,
            y: 0.0,
            elapsed: 0.0,
        };
        scene.place_on_ground();
        Ok(scene)
    }

    pub fn sprite(&self) -> &AnimatedSprite {
        &self.sprite
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Top-left of the newest sprite copy.
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn place_on_ground(&mut self) {
        let (_, fh) = self.sprite.scaled_size();
        self.y = self.viewport.height * 0.6 - fh;
    }

    fn draw_skyline(&self, painter: &mut dyn Painter) {
        let (w, h) = (self.viewport.width, self.viewport.height);
        for i in 0..12 {
            let dy = (i % 3) as f32 * 6.0;
            painter.fill_rect(
                Rect::new(i as f32 * w / 12.0, h * 0.35 + dy, w / 18.0, h * 0.4),
                SKYLINE_NEAR,
            );
        }
        for i in 0..10 {
            let dy = (i % 2) as f32 * 4.0;
            painter.fill_rect(
                Rect::new(i as f32 * w / 10.0 + 15.0, h * 0.42 + dy, w / 20.0, h * 0.35),
                SKYLINE_FAR,
            );
        }
    }

    // Back to front: the oldest, faintest copy first.
    fn draw_ghosts(
        &self,
        painter: &mut dyn Painter,
        fx: &Effects,
        exposure: &ExposureState,
    ) -> Result<()> {
        let profile = EffectProfile::RUNNER;
        let n = fx.motion_samples.max(1);
        let trail = trail_length(RUNNER_SPEED as f64, exposure.shutter_seconds()) as f32;
        for i in (0..n).rev() {
            let t = i as f32 / n as f32;
            let x = self.x - trail * t * self.viewport.pixel_ratio;
            painter.set_alpha(ghost_alpha(
                t,
                profile.ghost_alpha_base,
                profile.ghost_alpha_span,
            ));
            self.sprite.draw(painter, x, self.y)?;
        }
        Ok(())
    }
}

impl Scene for RunnerScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Runner
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.place_on_ground();
    }

    fn update(&mut self, dt: f64) {
        if !self.sprite.is_playing() {
            return;
        }
        self.elapsed += dt;
        self.sprite.update(dt);
        self.place_on_ground();
        self.x += RUNNER_SPEED * dt as f32 * self.viewport.pixel_ratio;
        let (fw, _) = self.sprite.scaled_size();
        if self.x > self.viewport.width + WRAP_MARGIN {
            self.x = -fw - WRAP_MARGIN;
        }
    }

    fn render(&self, painter: &mut dyn Painter, exposure: &ExposureState) -> Result<()> {
        let fx = Effects::derive(exposure, &EffectProfile::RUNNER);
        let (w, h) = (self.viewport.width, self.viewport.height);

        painter.fill_rect(Rect::new(0.0, 0.0, w, h), BACKGROUND);
        painter.save();
        painter.set_blur(fx.blur_px);
        self.draw_skyline(painter);
        painter.restore();

        if fx.wash_alpha > 0.0 {
            painter.save();
            painter.set_blend(BlendMode::Additive);
            painter.set_alpha(fx.wash_alpha);
            painter.fill_rect(Rect::new(0.0, 0.0, w, h), WASH_COLOR);
            painter.restore();
        }

        painter.fill_rect(Rect::new(0.0, h * 0.7, w, h * 0.3), GROUND);
        painter.fill_rect(Rect::new(0.0, h * 0.68, w, 3.0), HORIZON);

        painter.save();
        let ghosts = self.draw_ghosts(painter, &fx, exposure);
        painter.restore();
        ghosts
    }

    fn play(&mut self) {
        self.sprite.play();
    }

    fn pause(&mut self) {
        self.sprite.pause();
    }

    fn is_playing(&self) -> bool {
        self.sprite.is_playing()
    }

    fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
