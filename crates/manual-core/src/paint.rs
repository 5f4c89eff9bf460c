//! Drawing seam shared by every scene.
//!
//! Scenes only ever talk to a [`Painter`]: the web front end implements it on
//! top of a Canvas2D context, while [`crate::framebuffer::Framebuffer`] is a
//! software rasteriser used for headless export, procedural textures and
//! tests. Painter state (alpha, blend, blur) behaves like a canvas context:
//! `save`/`restore` push and pop it.

use crate::error::{CameraError, Result};
use glam::Vec2;
use std::sync::atomic::{AtomicU64, Ordering};

/// Straight-alpha 8-bit colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from `0xRRGGBB`.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 255,
        }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn to_css(self) -> String {
        format!(
            "rgba({},{},{},{:.3})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Same rectangle with non-negative width and height.
    pub fn normalized(self) -> Self {
        let (x, w) = if self.w < 0.0 {
            (self.x + self.w, -self.w)
        } else {
            (self.x, self.w)
        };
        let (y, h) = if self.h < 0.0 {
            (self.y + self.h, -self.h)
        } else {
            (self.y, self.h)
        };
        Self { x, y, w, h }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    SourceOver,
    /// Additive ("lighter") compositing.
    Additive,
}

impl BlendMode {
    pub fn css_name(self) -> &'static str {
        match self {
            BlendMode::SourceOver => "source-over",
            BlendMode::Additive => "lighter",
        }
    }
}

/// Backing-store size of the output and the device pixel ratio the scene
/// layout should scale by.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, pixel_ratio: f32) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() {
            pixel_ratio.clamp(
                crate::constants::PIXEL_RATIO_MIN,
                crate::constants::PIXEL_RATIO_MAX,
            )
        } else {
            crate::constants::PIXEL_RATIO_MIN
        };
        Self {
            width: width.max(1) as f32,
            height: height.max(1) as f32,
            pixel_ratio,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720, 1.0)
    }
}

static NEXT_BITMAP_ID: AtomicU64 = AtomicU64::new(1);

/// RGBA8 image, straight alpha, row-major.
#[derive(Debug)]
pub struct Bitmap {
    id: u64,
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Bitmap {
    /// Fully transparent bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            id: NEXT_BITMAP_ID.fetch_add(1, Ordering::Relaxed),
            width,
            height,
            pixels: vec![color.to_array(); width as usize * height as usize],
        }
    }

    /// Wrap raw RGBA8 bytes, e.g. a decoded PNG.
    pub fn from_rgba(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(CameraError::InvalidGrid(format!(
                "{}x{} image needs {} bytes, got {}",
                width,
                height,
                expected,
                bytes.len()
            )));
        }
        let pixels: Vec<[u8; 4]> = bytemuck::cast_slice(&bytes).to_vec();
        Ok(Self {
            id: NEXT_BITMAP_ID.fetch_add(1, Ordering::Relaxed),
            width,
            height,
            pixels,
        })
    }

    /// Process-unique identity, stable for the lifetime of this bitmap.
    pub fn id(&self) -> u64 {
        self.id
    }
    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b, a] = self.pixels[(y * self.width + x) as usize];
        Some(Color::rgba(r, g, b, a))
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [[u8; 4]] {
        &mut self.pixels
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

impl Clone for Bitmap {
    fn clone(&self) -> Self {
        Self {
            id: NEXT_BITMAP_ID.fetch_add(1, Ordering::Relaxed),
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// 2D drawing target with canvas-like state.
pub trait Painter {
    /// Output size in pixels.
    fn size(&self) -> (u32, u32);
    fn save(&mut self);
    fn restore(&mut self);
    /// Global alpha applied to every subsequent draw, in `[0, 1]`.
    fn set_alpha(&mut self, alpha: f32);
    fn set_blend(&mut self, mode: BlendMode);
    /// Blur radius in pixels for subsequent draws; 0 disables.
    fn set_blur(&mut self, radius_px: u32);
    /// Reset every pixel to transparent black, ignoring state.
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Stroke every segment as one path: overlapping segments are blended once.
    fn stroke_segments(&mut self, segments: &[(Vec2, Vec2)], width: f32, color: Color);
    /// Copy `src` from `image` scaled into `dst`.
    fn draw_image(&mut self, image: &Bitmap, src: Rect, dst: Rect) -> Result<()>;
}
