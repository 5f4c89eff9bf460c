//! Viewfinder overlay: rule-of-thirds grid, corner brackets and ISO grain.

use crate::constants::*;
use crate::error::Result;
use crate::paint::{Bitmap, Painter, Rect, Viewport};
use glam::Vec2;

pub fn thirds_segments(viewport: Viewport) -> [(Vec2, Vec2); 4] {
    let (w, h) = (viewport.width, viewport.height);
    [
        (Vec2::new(w / 3.0, 0.0), Vec2::new(w / 3.0, h)),
        (Vec2::new(2.0 * w / 3.0, 0.0), Vec2::new(2.0 * w / 3.0, h)),
        (Vec2::new(0.0, h / 3.0), Vec2::new(w, h / 3.0)),
        (Vec2::new(0.0, 2.0 * h / 3.0), Vec2::new(w, 2.0 * h / 3.0)),
    ]
}

/// Two segments per corner, each `GUIDE_CORNER_LEN_PX·ratio` long.
pub fn corner_segments(viewport: Viewport) -> [(Vec2, Vec2); 8] {
    let (w, h) = (viewport.width, viewport.height);
    let l = (GUIDE_CORNER_LEN_PX * viewport.pixel_ratio).floor();
    let i = GUIDE_CORNER_INSET_PX;
    let v = Vec2::new;
    [
        (v(i, l), v(i, i)),
        (v(i, i), v(l, i)),
        (v(w - i, l), v(w - i, i)),
        (v(w - i, i), v(w - l, i)),
        (v(i, h - l), v(i, h - i)),
        (v(i, h - i), v(l, h - i)),
        (v(w - i, h - l), v(w - i, h - i)),
        (v(w - i, h - i), v(w - l, h - i)),
    ]
}

pub fn guide_line_width(pixel_ratio: f32) -> f32 {
    pixel_ratio.floor().max(1.0)
}

/// Draw the composition guides and, when `grain` is positive, the grain tile
/// repeated over the frame at that opacity.
pub fn draw_composition_guides(
    painter: &mut dyn Painter,
    viewport: Viewport,
    grain_tile: &Bitmap,
    grain: f64,
) -> Result<()> {
    let lw = guide_line_width(viewport.pixel_ratio);
    painter.stroke_segments(&thirds_segments(viewport), lw, THIRDS_COLOR);
    painter.stroke_segments(&corner_segments(viewport), lw, CORNER_COLOR);

    if !(grain > 0.0) || grain_tile.width() == 0 || grain_tile.height() == 0 {
        return Ok(());
    }
    painter.save();
    painter.set_alpha(grain as f32);
    let drawn = tile_grain(painter, viewport, grain_tile);
    painter.restore();
    drawn
}

fn tile_grain(painter: &mut dyn Painter, viewport: Viewport, tile: &Bitmap) -> Result<()> {
    let (tw, th) = (tile.width() as f32, tile.height() as f32);
    let reps_x = (viewport.width / tw).ceil() as u32;
    let reps_y = (viewport.height / th).ceil() as u32;
    let src = Rect::new(0.0, 0.0, tw, th);
    for y in 0..reps_y {
        for x in 0..reps_x {
            let dst = Rect::new(x as f32 * tw, y as f32 * th, tw, th);
            painter.draw_image(tile, src, dst)?;
        }
    }
    Ok(())
}
