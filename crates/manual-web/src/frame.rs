use crate::dom;
use crate::painter::CanvasPainter;
use crate::ui::Ui;
use instant::Instant;
use manual_core::RenderLoop;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub engine: Rc<RefCell<RenderLoop>>,
    pub painter: CanvasPainter,
    pub ui: Rc<Ui>,
}

impl FrameContext {
    /// One animation frame. The HUD is refreshed even while the loop is
    /// stopped so the dials stay live.
    pub fn frame(&mut self) {
        let dpr = dom::sync_canvas_backing_size(self.painter.canvas());
        let mut engine = self.engine.borrow_mut();
        engine.set_pixel_ratio(dpr);
        engine.frame(Instant::now(), &mut self.painter);
        self.ui.refresh_readouts(engine.exposure());
        self.ui.set_flash(engine.flash_alpha());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
