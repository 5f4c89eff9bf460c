#![cfg(target_arch = "wasm32")]
use manual_core::{grain_tile, LoopConfig, PlaceholderAtlases, RenderLoop, SceneSet, Viewport};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod dials;
mod dom;
mod events;
mod export;
mod frame;
mod keymap;
mod painter;
mod ui;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("manual-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, "vf")?;

    let dpr = dom::sync_canvas_backing_size(&canvas);
    let viewport = Viewport::new(canvas.width(), canvas.height(), dpr);
    let painter = painter::CanvasPainter::new(&document, canvas.clone())?;

    // procedural textures differ per page load
    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let scenes = SceneSet::build(&mut PlaceholderAtlases::new(seed), viewport);
    if scenes.is_empty() {
        anyhow::bail!("no scene could be built");
    }
    let mut engine = RenderLoop::new(scenes, grain_tile(seed), LoopConfig::default());
    engine.set_pixel_ratio(dpr);
    let engine = Rc::new(RefCell::new(engine));

    let ui = Rc::new(ui::Ui::from_document(&document)?);
    for param in [dials::DialParam::Shutter, dials::DialParam::Aperture] {
        dials::wire_dial(&document, param, engine.clone())?;
    }
    let controls = events::Controls {
        document: document.clone(),
        canvas,
        engine: engine.clone(),
        ui: ui.clone(),
        audio: Rc::new(audio::ShutterAudio::new()),
    };
    events::wire_controls(&controls)?;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        engine,
        painter,
        ui,
    }));
    frame::start_loop(frame_ctx);
    log::info!("manual-web ready");
    Ok(())
}
