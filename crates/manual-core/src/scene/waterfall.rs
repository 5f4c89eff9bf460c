use super::{Scene, SceneKind};
use crate::constants::WASH_COLOR;
use crate::effects::{ghost_alpha, EffectProfile, Effects};
use crate::error::{CameraError, Result};
use crate::exposure::ExposureState;
use crate::paint::{Bitmap, BlendMode, Color, Painter, Rect, Viewport};
use glam::Vec2;
use std::rc::Rc;

/// Height every strip texture is generated at.
pub const WATER_LAYER_HEIGHT: u32 = 720;

/// Placement of each water strip: (x, width, fall speed px/s).
pub const WATER_LAYER_LAYOUT: [(f32, f32, f32); 3] =
    [(300.0, 320.0, 140.0), (620.0, 400.0, 220.0), (980.0, 260.0, 180.0)];

const ROCK: Color = Color::hex(0x0b0f14);
const ROCK_LOW: Color = Color::hex(0x0e141c);
const LEDGE: Color = Color::hex(0x121a24);
const CLIFF: Color = Color::hex(0x0c131b);

#[derive(Clone, Debug)]
pub struct WaterLayer {
    pub image: Rc<Bitmap>,
    pub x: f32,
    pub width: f32,
    pub speed: f32,
}

/// Water strips falling past a dark cliff face.
pub struct WaterfallScene {
    layers: Vec<WaterLayer>,
    viewport: Viewport,
    y_offset: f64,
    playing: bool,
}

impl WaterfallScene {
    /// Pair strip textures with [`WATER_LAYER_LAYOUT`] in order; extra
    /// textures are ignored.
    pub fn new(textures: Vec<Rc<Bitmap>>, viewport: Viewport) -> Result<Self> {
        if textures.is_empty() {
            return Err(CameraError::MissingResource("waterfall strip textures".into()));
        }
        let layers = textures
            .into_iter()
            .zip(WATER_LAYER_LAYOUT)
            .map(|(image, (x, width, speed))| WaterLayer {
                image,
                x,
                width,
                speed,
            })
            .collect();
        Ok(Self {
            layers,
            viewport,
            y_offset: 0.0,
            playing: true,
        })
    }

    pub fn layers(&self) -> &[WaterLayer] {
        &self.layers
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn draw_background(&self, painter: &mut dyn Painter) {
        let (w, h) = (self.viewport.width, self.viewport.height);
        painter.fill_rect(Rect::new(0.0, 0.0, w, h), ROCK);
        painter.fill_rect(Rect::new(0.0, h * 0.55, w, h * 0.45), ROCK_LOW);
        painter.fill_rect(Rect::new(0.0, h * 0.6, w, 6.0), LEDGE);
    }

    fn draw_cliffs(&self, painter: &mut dyn Painter) {
        let (w, h) = (self.viewport.width, self.viewport.height);
        painter.fill_polygon(
            &[Vec2::new(200.0, 0.0), Vec2::new(260.0, h), Vec2::new(200.0, h)],
            CLIFF,
        );
        painter.fill_polygon(
            &[
                Vec2::new(w - 200.0, 0.0),
                Vec2::new(w - 240.0, h),
                Vec2::new(w - 200.0, h),
            ],
            CLIFF,
        );
    }

    fn draw_water(&self, painter: &mut dyn Painter, fx: &Effects) -> Result<()> {
        let profile = EffectProfile::WATERFALL;
        let (h, ratio) = (self.viewport.height, self.viewport.pixel_ratio);
        let n = fx.motion_samples.max(1);
        for layer in &self.layers {
            let src = Rect::new(
                0.0,
                0.0,
                layer.image.width() as f32,
                layer.image.height() as f32,
            );
            for i in 0..n {
                let t = i as f64 / n as f64;
                let y = ((self.y_offset + t) * (layer.speed * ratio) as f64).rem_euclid(h as f64)
                    as f32;
                painter.set_alpha(ghost_alpha(
                    t as f32,
                    profile.ghost_alpha_base,
                    profile.ghost_alpha_span,
                ));
                // tile vertically so the strip always covers the frame
                for k in -1..=1 {
                    let dst = Rect::new(
                        (layer.x * ratio).floor(),
                        (y + k as f32 * h).floor(),
                        (layer.width * ratio).floor(),
                        h,
                    );
                    painter.draw_image(&layer.image, src, dst)?;
                }
            }
        }
        Ok(())
    }
}

impl Scene for WaterfallScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Waterfall
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn update(&mut self, dt: f64) {
        if self.playing {
            self.y_offset += dt;
        }
    }

    fn render(&self, painter: &mut dyn Painter, exposure: &ExposureState) -> Result<()> {
        let fx = Effects::derive(exposure, &EffectProfile::WATERFALL);
        let (w, h) = (self.viewport.width, self.viewport.height);

        self.draw_background(painter);

        painter.save();
        painter.set_blur(fx.blur_px);
        self.draw_cliffs(painter);
        painter.restore();

        painter.save();
        let water = self.draw_water(painter, &fx);
        painter.restore();
        water?;

        if fx.wash_alpha > 0.0 {
            painter.save();
            painter.set_blend(BlendMode::Additive);
            painter.set_alpha(fx.wash_alpha);
            painter.fill_rect(Rect::new(0.0, 0.0, w, h), WASH_COLOR);
            painter.restore();
        }
        Ok(())
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn elapsed(&self) -> f64 {
        self.y_offset
    }
}
