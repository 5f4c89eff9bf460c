use crate::keymap::blur_filter;
use fnv::FnvHashMap;
use glam::Vec2;
use manual_core::{Bitmap, BlendMode, CameraError, Color, Painter, Rect};
use std::f64::consts::TAU;
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys as web;

fn paint_err(e: JsValue) -> CameraError {
    CameraError::Paint(format!("{:?}", e))
}

fn context_2d(canvas: &web::HtmlCanvasElement) -> Result<web::CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

/// `Painter` over a 2D canvas context. Bitmaps are uploaded once into
/// offscreen canvases keyed by bitmap id and blitted from there.
pub struct CanvasPainter {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    document: web::Document,
    uploads: FnvHashMap<u64, web::HtmlCanvasElement>,
}

impl CanvasPainter {
    pub fn new(document: &web::Document, canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = context_2d(&canvas).map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        ctx.set_image_smoothing_enabled(true);
        Ok(Self {
            canvas,
            ctx,
            document: document.clone(),
            uploads: FnvHashMap::default(),
        })
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    fn upload(&mut self, image: &Bitmap) -> Result<&web::HtmlCanvasElement, CameraError> {
        if !self.uploads.contains_key(&image.id()) {
            let el = self
                .document
                .create_element("canvas")
                .map_err(paint_err)?
                .dyn_into::<web::HtmlCanvasElement>()
                .map_err(|e| paint_err(e.into()))?;
            el.set_width(image.width());
            el.set_height(image.height());
            let data = web::ImageData::new_with_u8_clamped_array_and_sh(
                Clamped(image.as_bytes()),
                image.width(),
                image.height(),
            )
            .map_err(paint_err)?;
            context_2d(&el)
                .and_then(|c| c.put_image_data(&data, 0.0, 0.0))
                .map_err(paint_err)?;
            log::debug!("uploaded bitmap {} ({}x{})", image.id(), image.width(), image.height());
            self.uploads.insert(image.id(), el);
        }
        self.uploads
            .get(&image.id())
            .ok_or_else(|| CameraError::Paint("bitmap upload lost".into()))
    }

    fn trace_polygon(&self, points: &[Vec2]) {
        self.ctx.begin_path();
        let mut it = points.iter();
        if let Some(p) = it.next() {
            self.ctx.move_to(p.x as f64, p.y as f64);
        }
        for p in it {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
    }
}

impl Painter for CanvasPainter {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_alpha(&mut self, alpha: f32) {
        let a = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        self.ctx.set_global_alpha(a as f64);
    }

    fn set_blend(&mut self, mode: BlendMode) {
        _ = self.ctx.set_global_composite_operation(mode.css_name());
    }

    fn set_blur(&mut self, radius_px: u32) {
        self.ctx.set_filter(&blur_filter(radius_px));
    }

    fn clear(&mut self) {
        self.ctx.save();
        _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx
            .clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
        self.ctx.restore();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_css());
        self.trace_polygon(points);
        self.ctx.fill();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn stroke_segments(&mut self, segments: &[(Vec2, Vec2)], width: f32, color: Color) {
        if segments.is_empty() {
            return;
        }
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        for (a, b) in segments {
            self.ctx.move_to(a.x as f64, a.y as f64);
            self.ctx.line_to(b.x as f64, b.y as f64);
        }
        self.ctx.stroke();
    }

    fn draw_image(&mut self, image: &Bitmap, src: Rect, dst: Rect) -> manual_core::Result<()> {
        let ctx = self.ctx.clone();
        let source = self.upload(image)?;
        ctx.draw_image_with_html_canvas_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
            source,
            src.x as f64,
            src.y as f64,
            src.w as f64,
            src.h as f64,
            dst.x as f64,
            dst.y as f64,
            dst.w as f64,
            dst.h as f64,
        )
        .map_err(paint_err)
    }
}
