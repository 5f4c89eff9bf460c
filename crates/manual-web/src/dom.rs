use manual_core::{PIXEL_RATIO_MAX, PIXEL_RATIO_MIN};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Look up a required element by id and cast it to the expected type.
pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!(format!("#{} has the wrong type: {:?}", id, e)))
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Device pixel ratio, clamped to the range the scenes are laid out for.
pub fn pixel_ratio() -> f32 {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0) as f32;
    if dpr.is_finite() {
        dpr.clamp(PIXEL_RATIO_MIN, PIXEL_RATIO_MAX)
    } else {
        PIXEL_RATIO_MIN
    }
}

/// Keep the canvas backing store at CSS size times the clamped pixel ratio.
/// Returns the ratio used.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> f32 {
    let dpr = pixel_ratio();
    let w_px = (canvas.client_width() as f32 * dpr).floor() as u32;
    let h_px = (canvas.client_height() as f32 * dpr).floor() as u32;
    if canvas.width() != w_px.max(1) {
        canvas.set_width(w_px.max(1));
    }
    if canvas.height() != h_px.max(1) {
        canvas.set_height(h_px.max(1));
    }
    dpr
}

pub fn set_body_class(document: &web::Document, class: &str, on: bool) {
    if let Some(body) = document.body() {
        let list = body.class_list();
        _ = if on {
            list.add_1(class)
        } else {
            list.remove_1(class)
        };
    }
}
