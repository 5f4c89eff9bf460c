use crate::audio::ShutterAudio;
use crate::dom::{add_click_listener, element_by_id};
use crate::export::export_frame;
use crate::keymap::is_shutter_key;
use crate::ui::{tab_id, Ui};
use instant::Instant;
use manual_core::{parse_iso_input, RenderLoop, SceneKind};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Shared handles the control listeners close over.
#[derive(Clone)]
pub struct Controls {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub engine: Rc<RefCell<RenderLoop>>,
    pub ui: Rc<Ui>,
    pub audio: Rc<ShutterAudio>,
}

impl Controls {
    pub fn fire_shutter(&self) {
        self.engine.borrow_mut().fire_shutter(self.audio.as_ref());
        self.ui.set_flash(self.engine.borrow().flash_alpha());
    }

    pub fn toggle_running(&self) {
        let mut engine = self.engine.borrow_mut();
        if engine.is_running() {
            engine.stop();
        } else {
            engine.start(Instant::now());
        }
        self.ui.set_running(engine.is_running());
        log::info!("loop {}", if engine.is_running() { "running" } else { "stopped" });
    }

    pub fn select_scene(&self, kind: SceneKind) {
        let result = self.engine.borrow_mut().select_scene(kind);
        match result {
            Ok(()) => self.ui.mark_active_tab(kind),
            Err(e) => log::warn!("cannot switch scene: {}", e),
        }
    }

    fn apply_iso(&self, input: &web::HtmlInputElement) {
        let iso = parse_iso_input(&input.value());
        self.engine.borrow_mut().exposure_mut().set_target_iso(iso);
        self.ui.set_iso(iso);
    }
}

/// Wire buttons, tabs, the ISO slider and the global shutter key.
pub fn wire_controls(controls: &Controls) -> anyhow::Result<()> {
    let document = &controls.document;

    let iso: web::HtmlInputElement = element_by_id(document, "iso")?;
    controls.apply_iso(&iso);
    {
        let c = controls.clone();
        let input = iso.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
            c.apply_iso(&input);
        }) as Box<dyn FnMut(web::Event)>);
        _ = iso.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let c = controls.clone();
        add_click_listener(document, "btn-play", move || c.toggle_running());
    }
    {
        let c = controls.clone();
        add_click_listener(document, "btn-shutter", move || c.fire_shutter());
    }
    {
        let c = controls.clone();
        add_click_listener(document, "btn-export", move || {
            export_frame(&c.document, &c.canvas)
        });
    }
    for kind in SceneKind::ALL {
        let c = controls.clone();
        add_click_listener(document, &tab_id(kind), move || c.select_scene(kind));
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    {
        let c = controls.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            handle_global_keydown(&ev, &c);
        }) as Box<dyn FnMut(web::KeyboardEvent)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    let running = controls.engine.borrow().is_running();
    controls.ui.set_running(running);
    if let Some(active) = controls.engine.borrow().active_scene() {
        controls.ui.mark_active_tab(active);
    }
    Ok(())
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, controls: &Controls) {
    if is_shutter_key(&ev.key()) {
        controls.fire_shutter();
    }
}
