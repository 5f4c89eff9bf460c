//! Frame-indexed playback over a grid atlas.

use crate::error::{CameraError, Result};
use crate::paint::{Bitmap, Painter, Rect};
use std::rc::Rc;

pub const DEFAULT_SPRITE_FPS: f64 = 12.0;

// Accumulated dt lands a hair below exact frame boundaries (six steps of
// 1/12 sum to 0.49999999999999994).
const FRAME_EPSILON: f64 = 1e-9;

/// Frame layout of an atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameGrid {
    pub frame_width: u32,
    pub frame_height: u32,
    pub frame_count: u32,
}

impl FrameGrid {
    /// Frames in an atlas that is an exact grid of `frame_width`×`frame_height`
    /// cells, or `None` when it is not.
    pub fn guess_frame_count(
        atlas_width: u32,
        atlas_height: u32,
        frame_width: u32,
        frame_height: u32,
    ) -> Option<u32> {
        if frame_width == 0 || frame_height == 0 || atlas_width == 0 || atlas_height == 0 {
            return None;
        }
        if atlas_width % frame_width != 0 || atlas_height % frame_height != 0 {
            return None;
        }
        Some((atlas_width / frame_width) * (atlas_height / frame_height))
    }
}

/// A shared atlas plus its frame grid.
#[derive(Clone, Debug)]
pub struct SpriteSheet {
    pub image: Rc<Bitmap>,
    pub grid: FrameGrid,
}

#[derive(Clone, Debug)]
pub struct AnimatedSprite {
    sheet: SpriteSheet,
    fps: f64,
    scale: f32,
    columns: u32,
    rows: u32,
    elapsed: f64,
    current_frame: u32,
    playing: bool,
}

impl AnimatedSprite {
    /// Non-positive `fps` and `scale` fall back to 12 and 1. A zero frame
    /// dimension is rejected.
    pub fn new(sheet: SpriteSheet, fps: f64, scale: f32) -> Result<Self> {
        let grid = sheet.grid;
        if grid.frame_width == 0 || grid.frame_height == 0 {
            return Err(CameraError::InvalidGrid(format!(
                "frame size {}x{}",
                grid.frame_width, grid.frame_height
            )));
        }
        let columns = (sheet.image.width() / grid.frame_width).max(1);
        let rows = (sheet.image.height() / grid.frame_height).max(1);
        Ok(Self {
            sheet: SpriteSheet {
                grid: FrameGrid {
                    frame_count: grid.frame_count.max(1),
                    ..grid
                },
                ..sheet
            },
            fps: if fps > 0.0 { fps } else { DEFAULT_SPRITE_FPS },
            scale: if scale > 0.0 { scale } else { 1.0 },
            columns,
            rows,
            elapsed: 0.0,
            current_frame: 0,
            playing: true,
        })
    }

    pub fn update(&mut self, dt: f64) {
        if !self.playing {
            return;
        }
        self.elapsed += dt;
        let index = (self.elapsed * self.fps + FRAME_EPSILON).floor().max(0.0) as u64;
        self.current_frame = (index % self.sheet.grid.frame_count as u64) as u32;
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn grid(&self) -> FrameGrid {
        self.sheet.grid
    }

    /// Size of one frame once scaled.
    pub fn scaled_size(&self) -> (f32, f32) {
        (
            self.sheet.grid.frame_width as f32 * self.scale,
            self.sheet.grid.frame_height as f32 * self.scale,
        )
    }

    /// Atlas rectangle of the current frame.
    pub fn source_rect(&self) -> Rect {
        let g = self.sheet.grid;
        let col = self.current_frame % self.columns;
        let row = self.current_frame / self.columns;
        Rect::new(
            (col * g.frame_width) as f32,
            (row * g.frame_height) as f32,
            g.frame_width as f32,
            g.frame_height as f32,
        )
    }

    /// Blit the current frame with its top-left at the truncated `(x, y)`,
    /// scaled to the floored frame size.
    pub fn draw(&self, painter: &mut dyn Painter, x: f32, y: f32) -> Result<()> {
        let (w, h) = self.scaled_size();
        let dst = Rect::new(x.trunc(), y.trunc(), w.floor(), h.floor());
        painter.draw_image(&self.sheet.image, self.source_rect(), dst)
    }
}
