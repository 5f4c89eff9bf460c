use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub const EXPORT_FILE_NAME: &str = "shot.png";
const EXPORT_FAILED: &str =
    "Export failed. Make sure this is served via http(s) (GitHub Pages is fine).";

fn download_png(document: &web::Document, canvas: &web::HtmlCanvasElement) -> Result<(), JsValue> {
    // throws on a tainted canvas
    let url = canvas.to_data_url_with_type("image/png")?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;
    let link = document
        .create_element("a")?
        .dyn_into::<web::HtmlAnchorElement>()
        .map_err(JsValue::from)?;
    link.set_download(EXPORT_FILE_NAME);
    link.set_href(&url);
    body.append_child(&link)?;
    link.click();
    link.remove();
    Ok(())
}

/// Save the current frame as a PNG download, alerting the user on failure.
pub fn export_frame(document: &web::Document, canvas: &web::HtmlCanvasElement) {
    if let Err(e) = download_png(document, canvas) {
        log::error!("export failed: {:?}", e);
        if let Some(w) = web::window() {
            _ = w.alert_with_message(EXPORT_FAILED);
        }
    }
}
