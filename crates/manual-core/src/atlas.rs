//! Scene textures: the provider seam plus procedural placeholders.
//!
//! Placeholders are painted with the software [`Framebuffer`] and are fully
//! determined by their seed, so headless renders are reproducible.

use crate::constants::GRAIN_TILE_SIZE;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::paint::{Bitmap, Color, Painter, Rect};
use crate::scene::{WATER_LAYER_HEIGHT, WATER_LAYER_LAYOUT};
use crate::sprite::{FrameGrid, SpriteSheet};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};
use std::rc::Rc;

pub const RUNNER_FRAME_SIZE: u32 = 64;
pub const RUNNER_FRAMES: u32 = 6;

const WATER_STREAKS: usize = 48;
const WATER_FOAM_DOTS: usize = 200;

/// Supplies the textures scenes are built from.
pub trait AtlasProvider {
    fn runner_sheet(&mut self) -> Result<SpriteSheet>;
    fn waterfall_layers(&mut self) -> Result<Vec<Rc<Bitmap>>>;
}

/// Procedurally painted stand-ins for real artwork.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderAtlases {
    pub seed: u64,
}

impl PlaceholderAtlases {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl AtlasProvider for PlaceholderAtlases {
    fn runner_sheet(&mut self) -> Result<SpriteSheet> {
        Ok(make_runner_sheet())
    }

    fn waterfall_layers(&mut self) -> Result<Vec<Rc<Bitmap>>> {
        Ok(WATER_LAYER_LAYOUT
            .iter()
            .enumerate()
            .map(|(i, &(_, width, _))| {
                let seed = self.seed.wrapping_add(i as u64 + 1);
                Rc::new(make_waterfall_layer(width as u32, WATER_LAYER_HEIGHT, seed))
            })
            .collect())
    }
}

/// Six-frame blocky runner cycle, one row of 64×64 frames.
pub fn make_runner_sheet() -> SpriteSheet {
    let (fw, fh) = (RUNNER_FRAME_SIZE, RUNNER_FRAME_SIZE);
    let mut fb = Framebuffer::new(fw * RUNNER_FRAMES, fh);
    let body = Color::hex(0xd6e6ff);
    fb.fill_rect(
        Rect::new(0.0, 0.0, (fw * RUNNER_FRAMES) as f32, fh as f32),
        Color::hex(0x000000),
    );

    for f in 0..RUNNER_FRAMES {
        let ox = (f * fw) as f32;
        let stripe = if f % 2 == 1 {
            Color::hex(0x081019)
        } else {
            Color::hex(0x0a0f14)
        };
        fb.fill_rect(Rect::new(ox, 0.0, fw as f32, fh as f32), stripe);

        fb.fill_rect(Rect::new(ox + 28.0, 18.0, 8.0, 22.0), body);
        fb.fill_circle(Vec2::new(ox + 32.0, 12.0), 6.0, body);

        let phase = f as f32 / RUNNER_FRAMES as f32 * TAU;
        fb.fill_rect(Rect::new(ox + 28.0, 40.0, 6.0, 14.0), body);
        limb(&mut fb, Vec2::new(ox + 30.0, 48.0), phase.sin() * 10.0 * 0.08, body);
        limb(&mut fb, Vec2::new(ox + 34.0, 48.0), (phase + PI).sin() * 10.0 * 0.08, body);
        // arms swing against the legs
        limb(&mut fb, Vec2::new(ox + 26.0, 24.0), (phase + PI).sin() * 8.0 * 0.09, body);
        limb(&mut fb, Vec2::new(ox + 38.0, 24.0), phase.sin() * 8.0 * 0.09, body);

        fb.fill_rect(Rect::new(ox, 56.0, fw as f32, 4.0), Color::hex(0x152433));
    }

    SpriteSheet {
        image: Rc::new(fb.into_bitmap()),
        grid: FrameGrid {
            frame_width: fw,
            frame_height: fh,
            frame_count: RUNNER_FRAMES,
        },
    }
}

// A 4×12 limb hanging from `pivot`, rotated by `angle` radians.
fn limb(fb: &mut Framebuffer, pivot: Vec2, angle: f32, color: Color) {
    let rot = Vec2::from_angle(angle);
    let corners = [
        Vec2::new(-2.0, 0.0),
        Vec2::new(2.0, 0.0),
        Vec2::new(2.0, 12.0),
        Vec2::new(-2.0, 12.0),
    ]
    .map(|c| pivot + rot.rotate(c));
    fb.fill_polygon(&corners, color);
}

/// One water strip: vertical gradient streaks plus sparse foam.
pub fn make_waterfall_layer(width: u32, height: u32, seed: u64) -> Bitmap {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut fb = Framebuffer::new(width, height);
    let (w, h) = (width as f32, height as f32);

    for _ in 0..WATER_STREAKS {
        let streak_w = rng.gen::<f32>() * 6.0 + 2.0;
        let x = rng.gen::<f32>() * w;
        let a = 0.7 + rng.gen::<f32>() * 0.3;
        for row in 0..height {
            let t = (row as f32 + 0.5) / h;
            let color = Color::rgba(
                lerp_u8(180, 140, t),
                lerp_u8(220, 180, t),
                lerp_u8(255, 220, t),
                0,
            )
            .with_alpha(a * (1.0 - 0.2 * t));
            fb.fill_rect(Rect::new(x, row as f32, streak_w, 1.0), color);
        }
    }

    let foam = Color::rgba(255, 255, 255, 0).with_alpha(0.4);
    for _ in 0..WATER_FOAM_DOTS {
        let (x, y) = (rng.gen::<f32>() * w, rng.gen::<f32>() * h);
        fb.fill_rect(Rect::new(x, y, 1.0, 1.0), foam);
    }
    fb.into_bitmap()
}

/// Opaque grey noise tile used for ISO grain.
pub fn grain_tile(seed: u64) -> Bitmap {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tile = Bitmap::new(GRAIN_TILE_SIZE, GRAIN_TILE_SIZE);
    for px in tile.pixels_mut() {
        let n: u8 = rng.gen();
        *px = [n, n, n, 255];
    }
    tile
}

fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}
