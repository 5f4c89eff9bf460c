//! Software [`Painter`]: an RGBA8 framebuffer with canvas-like compositing.
//!
//! Coverage is decided at pixel centres (no anti-aliasing). Blurred draws are
//! rasterised into a transparent scratch layer first, box-blurred in
//! premultiplied space, then composited with the current alpha and blend mode,
//! which is how a canvas `filter: blur()` behaves from the caller's point of
//! view. The scratch layer is kept between draws and only the touched region
//! is cleared afterwards.

use crate::error::Result;
use crate::paint::{Bitmap, BlendMode, Color, Painter, Rect};
use glam::Vec2;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
struct PaintState {
    alpha: f32,
    blend: BlendMode,
    blur: u32,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            blend: BlendMode::SourceOver,
            blur: 0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Ink {
    alpha: f32,
    blend: BlendMode,
}

impl Ink {
    const OPAQUE: Ink = Ink {
        alpha: 1.0,
        blend: BlendMode::SourceOver,
    };
}

#[derive(Debug)]
pub struct Framebuffer {
    target: Bitmap,
    /// Transparent outside of a blurred draw; matches `target` in size once used.
    layer: Bitmap,
    state: PaintState,
    stack: SmallVec<[PaintState; 8]>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_bitmap(Bitmap::new(width, height))
    }

    pub fn from_bitmap(target: Bitmap) -> Self {
        Self {
            target,
            layer: Bitmap::new(0, 0),
            state: PaintState::default(),
            stack: SmallVec::new(),
        }
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.target
    }

    pub fn into_bitmap(self) -> Bitmap {
        self.target
    }

    /// Replace the backing store with a transparent one of the new size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.target.width(), self.target.height()) {
            self.target = Bitmap::new(width, height);
        }
    }

    /// Number of un-restored `save` calls.
    pub fn state_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn alpha(&self) -> f32 {
        self.state.alpha
    }

    pub fn blend(&self) -> BlendMode {
        self.state.blend
    }

    pub fn blur(&self) -> u32 {
        self.state.blur
    }

    /// Run `draw` with the current state. `bounds` must cover everything
    /// the closure touches; blurred draws only process that area.
    fn paint_with(&mut self, bounds: Rect, draw: impl FnOnce(&mut Bitmap, Ink)) {
        let ink = Ink {
            alpha: self.state.alpha,
            blend: self.state.blend,
        };
        if ink.alpha <= 0.0 {
            return;
        }
        if self.state.blur == 0 {
            draw(&mut self.target, ink);
            return;
        }
        let (w, h) = (self.target.width() as i64, self.target.height() as i64);
        let r = self.state.blur as i64;
        let region = Region {
            x0: (bounds.x.floor() as i64 - r).clamp(0, w) as usize,
            y0: (bounds.y.floor() as i64 - r).clamp(0, h) as usize,
            x1: ((bounds.x + bounds.w).ceil() as i64 + r).clamp(0, w) as usize,
            y1: ((bounds.y + bounds.h).ceil() as i64 + r).clamp(0, h) as usize,
        };
        if region.is_empty() {
            return;
        }
        let size = (self.target.width(), self.target.height());
        if (self.layer.width(), self.layer.height()) != size {
            self.layer = Bitmap::new(size.0, size.1);
        }
        draw(&mut self.layer, Ink::OPAQUE);
        box_blur(&mut self.layer, self.state.blur, region);
        let stride = w as usize;
        let target = self.target.pixels_mut();
        let layer = self.layer.pixels_mut();
        for y in region.y0..region.y1 {
            let row = y * stride;
            for i in row + region.x0..row + region.x1 {
                blend_pixel(&mut target[i], layer[i], ink);
            }
            layer[row + region.x0..row + region.x1].fill([0; 4]);
        }
    }
}

impl Painter for Framebuffer {
    fn size(&self) -> (u32, u32) {
        (self.target.width(), self.target.height())
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(s) = self.stack.pop() {
            self.state = s;
        }
    }

    fn set_alpha(&mut self, alpha: f32) {
        if !alpha.is_nan() {
            self.state.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    fn set_blend(&mut self, mode: BlendMode) {
        self.state.blend = mode;
    }

    fn set_blur(&mut self, radius_px: u32) {
        self.state.blur = radius_px;
    }

    fn clear(&mut self) {
        self.target.pixels_mut().fill([0; 4]);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let r = rect.normalized();
        self.paint_with(r, |bm, ink| {
            let (x0, x1) = (pixel_start(r.x), pixel_start(r.x + r.w));
            let (y0, y1) = (pixel_start(r.y), pixel_start(r.y + r.h));
            for y in y0..y1 {
                fill_span(bm, y, x0, x1, color, ink);
            }
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        self.paint_with(bounding_rect(points.iter().copied(), 0.0), |bm, ink| {
            raster_polygon(bm, points, color, ink)
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let bounds = Rect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0);
        self.paint_with(bounds, |bm, ink| {
            let y0 = pixel_start(center.y - radius);
            let y1 = pixel_start(center.y + radius);
            for y in y0..y1 {
                let dy = y as f32 + 0.5 - center.y;
                let half_sq = radius * radius - dy * dy;
                if half_sq < 0.0 {
                    continue;
                }
                let half = half_sq.sqrt();
                fill_span(
                    bm,
                    y,
                    pixel_start(center.x - half),
                    pixel_start(center.x + half),
                    color,
                    ink,
                );
            }
        });
    }

    fn stroke_segments(&mut self, segments: &[(Vec2, Vec2)], width: f32, color: Color) {
        if segments.is_empty() {
            return;
        }
        let ends = segments.iter().flat_map(|&(a, b)| [a, b]);
        let bounds = bounding_rect(ends, width.max(1.0) / 2.0);
        self.paint_with(bounds, |bm, ink| {
            raster_stroke(bm, segments, width, color, ink)
        });
    }

    fn draw_image(&mut self, image: &Bitmap, src: Rect, dst: Rect) -> Result<()> {
        let (src, dst) = (src.normalized(), dst.normalized());
        if src.w <= 0.0 || src.h <= 0.0 || dst.w <= 0.0 || dst.h <= 0.0 {
            return Ok(());
        }
        if image.width() == 0 || image.height() == 0 {
            return Ok(());
        }
        self.paint_with(dst, |bm, ink| raster_image(bm, image, src, dst, ink));
        Ok(())
    }
}

// ---------------- rasterisation helpers ----------------

/// First pixel whose centre lies at or after `edge`.
#[inline]
fn pixel_start(edge: f32) -> i64 {
    (edge - 0.5).ceil() as i64
}

#[inline]
fn to_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn blend_pixel(dst: &mut [u8; 4], src: [u8; 4], ink: Ink) {
    let sa = src[3] as f32 / 255.0 * ink.alpha;
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    match ink.blend {
        BlendMode::SourceOver => {
            let oa = sa + da * (1.0 - sa);
            for c in 0..3 {
                let v = (src[c] as f32 * sa + dst[c] as f32 * da * (1.0 - sa)) / oa;
                dst[c] = to_channel(v);
            }
            dst[3] = to_channel(oa * 255.0);
        }
        BlendMode::Additive => {
            let oa = (sa + da).min(1.0);
            for c in 0..3 {
                let premul = src[c] as f32 * sa + dst[c] as f32 * da;
                dst[c] = to_channel(premul / oa);
            }
            dst[3] = to_channel(oa * 255.0);
        }
    }
}

fn fill_span(bm: &mut Bitmap, y: i64, x0: i64, x1: i64, color: Color, ink: Ink) {
    let (w, h) = (bm.width() as i64, bm.height() as i64);
    if y < 0 || y >= h {
        return;
    }
    let (x0, x1) = (x0.max(0), x1.min(w));
    if x0 >= x1 {
        return;
    }
    let row = (y * w) as usize;
    let src = color.to_array();
    for px in &mut bm.pixels_mut()[row + x0 as usize..row + x1 as usize] {
        blend_pixel(px, src, ink);
    }
}

fn raster_polygon(bm: &mut Bitmap, points: &[Vec2], color: Color, ink: Ink) {
    let (min_y, max_y) = points
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    let y0 = pixel_start(min_y).max(0);
    let y1 = pixel_start(max_y).min(bm.height() as i64);
    let mut crossings: SmallVec<[f32; 8]> = SmallVec::new();
    for y in y0..y1 {
        let yc = y as f32 + 0.5;
        crossings.clear();
        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            if (a.y <= yc && yc < b.y) || (b.y <= yc && yc < a.y) {
                crossings.push(a.x + (yc - a.y) * (b.x - a.x) / (b.y - a.y));
            }
        }
        crossings.sort_by(|l, r| l.total_cmp(r));
        for pair in crossings.chunks_exact(2) {
            fill_span(bm, y, pixel_start(pair[0]), pixel_start(pair[1]), color, ink);
        }
    }
}

fn raster_stroke(
    bm: &mut Bitmap,
    segments: &[(Vec2, Vec2)],
    width: f32,
    color: Color,
    ink: Ink,
) {
    let (w, h) = (bm.width() as i64, bm.height() as i64);
    let half = width.max(1.0) / 2.0;
    let bounds = bounding_rect(segments.iter().flat_map(|&(a, b)| [a, b]), half);
    let (bx0, bx1) = (pixel_start(bounds.x).max(0), pixel_start(bounds.x + bounds.w).min(w));
    let (by0, by1) = (pixel_start(bounds.y).max(0), pixel_start(bounds.y + bounds.h).min(h));
    if bx0 >= bx1 || by0 >= by1 {
        return;
    }
    // Coverage mask over the stroke's bounds so overlaps blend once.
    let mw = bx1 - bx0;
    let mut mask = vec![false; (mw * (by1 - by0)) as usize];
    for &(a, b) in segments {
        let steps = ((b - a).length() * 2.0).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let p = a.lerp(b, i as f32 / steps as f32);
            let (x0, x1) = (pixel_start(p.x - half).max(bx0), pixel_start(p.x + half).min(bx1));
            let (y0, y1) = (pixel_start(p.y - half).max(by0), pixel_start(p.y + half).min(by1));
            for y in y0..y1 {
                for x in x0..x1 {
                    mask[((y - by0) * mw + x - bx0) as usize] = true;
                }
            }
        }
    }
    let src = color.to_array();
    for y in by0..by1 {
        let hits = &mask[((y - by0) * mw) as usize..((y - by0 + 1) * mw) as usize];
        let row = (y * w + bx0) as usize;
        for (px, hit) in bm.pixels_mut()[row..row + mw as usize].iter_mut().zip(hits) {
            if *hit {
                blend_pixel(px, src, ink);
            }
        }
    }
}

fn raster_image(bm: &mut Bitmap, image: &Bitmap, src: Rect, dst: Rect, ink: Ink) {
    let (w, h) = (bm.width() as i64, bm.height() as i64);
    let x0 = pixel_start(dst.x).max(0);
    let x1 = pixel_start(dst.x + dst.w).min(w);
    let y0 = pixel_start(dst.y).max(0);
    let y1 = pixel_start(dst.y + dst.h).min(h);
    let sx_lo = src.x.floor().max(0.0) as i64;
    let sx_hi = ((src.x + src.w).ceil() as i64).min(image.width() as i64) - 1;
    let sy_lo = src.y.floor().max(0.0) as i64;
    let sy_hi = ((src.y + src.h).ceil() as i64).min(image.height() as i64) - 1;
    if sx_hi < sx_lo || sy_hi < sy_lo {
        return;
    }
    let img_w = image.width() as usize;
    for y in y0..y1 {
        let v = src.y + (y as f32 + 0.5 - dst.y) / dst.h * src.h;
        let sy = (v.floor() as i64).clamp(sy_lo, sy_hi) as usize;
        let row = (y * w) as usize;
        for x in x0..x1 {
            let u = src.x + (x as f32 + 0.5 - dst.x) / dst.w * src.w;
            let sx = (u.floor() as i64).clamp(sx_lo, sx_hi) as usize;
            let texel = image.pixels()[sy * img_w + sx];
            if texel[3] == 0 {
                continue;
            }
            blend_pixel(&mut bm.pixels_mut()[row + x as usize], texel, ink);
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Region {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

impl Region {
    fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }
}

fn bounding_rect(points: impl Iterator<Item = Vec2>, pad: f32) -> Rect {
    let (lo, hi) = points.fold((Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)), |(lo, hi), p| {
        (lo.min(p), hi.max(p))
    });
    if lo.x > hi.x {
        return Rect::default();
    }
    Rect::new(lo.x - pad, lo.y - pad, hi.x - lo.x + 2.0 * pad, hi.y - lo.y + 2.0 * pad)
}

/// Separable box blur of `region`; pixels outside it count as transparent.
fn box_blur(bm: &mut Bitmap, radius: u32, region: Region) {
    if radius == 0 || region.is_empty() {
        return;
    }
    let stride = bm.width() as usize;
    let (w, h) = (region.x1 - region.x0, region.y1 - region.y0);
    let r = radius as usize;
    let norm = 1.0 / (2 * r + 1) as f32;
    let mut buf: Vec<[f32; 4]> = Vec::with_capacity(w * h);
    for y in region.y0..region.y1 {
        let row = &bm.pixels()[y * stride + region.x0..y * stride + region.x1];
        buf.extend(row.iter().map(|p| {
            let a = p[3] as f32 / 255.0;
            [p[0] as f32 * a, p[1] as f32 * a, p[2] as f32 * a, p[3] as f32]
        }));
    }

    let mut prefix = vec![[0.0f32; 4]; w.max(h) + 1];
    blur_pass(&mut buf, &mut prefix, w, h, r, norm, |row, x| row * w + x);
    blur_pass(&mut buf, &mut prefix, h, w, r, norm, |col, y| y * w + col);

    for (i, v) in buf.iter().enumerate() {
        let (x, y) = (region.x0 + i % w, region.y0 + i / w);
        let a = v[3] / 255.0;
        bm.pixels_mut()[y * stride + x] = if a <= 0.0 {
            [0; 4]
        } else {
            [
                to_channel(v[0] / a),
                to_channel(v[1] / a),
                to_channel(v[2] / a),
                to_channel(v[3]),
            ]
        };
    }
}

/// One box-filter pass over `count` lines of `len` samples each.
fn blur_pass(
    buf: &mut [[f32; 4]],
    prefix: &mut [[f32; 4]],
    len: usize,
    count: usize,
    r: usize,
    norm: f32,
    index: impl Fn(usize, usize) -> usize,
) {
    for line in 0..count {
        for i in 0..len {
            let v = buf[index(line, i)];
            for c in 0..4 {
                prefix[i + 1][c] = prefix[i][c] + v[c];
            }
        }
        for i in 0..len {
            let lo = i.saturating_sub(r);
            let hi = (i + r).min(len - 1);
            let out = &mut buf[index(line, i)];
            for c in 0..4 {
                out[c] = (prefix[hi + 1][c] - prefix[lo][c]) * norm;
            }
        }
    }
}
