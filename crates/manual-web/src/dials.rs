use crate::dom::{element_by_id, set_body_class};
use crate::keymap::{aria_value, dial_step_direction, knob_transform};
use manual_core::{angle_position, step_position, DialDrag, DialMapping, ExposureState, RenderLoop};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::{Closure, WasmClosure};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Which exposure parameter a rotary dial drives.
#[derive(Clone, Copy, Debug)]
pub enum DialParam {
    Shutter,
    Aperture,
}

impl DialParam {
    pub fn element_id(self) -> &'static str {
        match self {
            DialParam::Shutter => "dial-shutter",
            DialParam::Aperture => "dial-aperture",
        }
    }

    fn mapping(self) -> DialMapping {
        match self {
            DialParam::Shutter => DialMapping::shutter(),
            DialParam::Aperture => DialMapping::aperture(),
        }
    }

    fn target(self, exposure: &ExposureState) -> f64 {
        match self {
            DialParam::Shutter => exposure.target_shutter_seconds(),
            DialParam::Aperture => exposure.target_aperture(),
        }
    }

    fn set_target(self, exposure: &mut ExposureState, value: f64) {
        match self {
            DialParam::Shutter => exposure.set_target_shutter(value),
            DialParam::Aperture => exposure.set_target_aperture(value),
        }
    }
}

/// One dial element plus the state its listeners share.
#[derive(Clone)]
struct Dial {
    param: DialParam,
    mapping: DialMapping,
    el: web::HtmlElement,
    knob: Option<web::HtmlElement>,
    document: web::Document,
    engine: Rc<RefCell<RenderLoop>>,
    drag: Rc<RefCell<Option<DialDrag>>>,
}

impl Dial {
    fn position(&self) -> f64 {
        let target = self.param.target(self.engine.borrow().exposure());
        self.mapping.to_normalized(target)
    }

    fn set_position(&self, t: f64) {
        let t = t.clamp(0.0, 1.0);
        let value = self.mapping.from_normalized(t);
        self.param
            .set_target(self.engine.borrow_mut().exposure_mut(), value);
        self.show(t);
    }

    fn show(&self, t: f64) {
        if let Some(knob) = &self.knob {
            _ = knob.style().set_property("transform", &knob_transform(t));
        }
        _ = self.el.set_attribute("aria-valuenow", &aria_value(t));
    }

    fn pointer_position(&self, ev: &web::PointerEvent) -> f64 {
        let rect = self.el.get_bounding_client_rect();
        let cx = rect.left() + rect.width() / 2.0;
        let cy = rect.top() + rect.height() / 2.0;
        angle_position(ev.client_x() as f64 - cx, ev.client_y() as f64 - cy)
    }
}

fn listen<E>(el: &web::HtmlElement, event: &str, handler: impl FnMut(E) + 'static)
where
    dyn FnMut(E): WasmClosure,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Attach pointer, keyboard and focus handling to a dial and show its
/// starting position.
pub fn wire_dial(
    document: &web::Document,
    param: DialParam,
    engine: Rc<RefCell<RenderLoop>>,
) -> anyhow::Result<()> {
    let el: web::HtmlElement = element_by_id(document, param.element_id())?;
    let knob = el
        .query_selector(".dial-knob")
        .ok()
        .flatten()
        .and_then(|k| k.dyn_into::<web::HtmlElement>().ok());
    if knob.is_none() {
        log::warn!("#{} has no .dial-knob", param.element_id());
    }
    let dial = Dial {
        param,
        mapping: param.mapping(),
        el: el.clone(),
        knob,
        document: document.clone(),
        engine,
        drag: Rc::new(RefCell::new(None)),
    };
    dial.show(dial.position());

    {
        let d = dial.clone();
        listen(&el, "pointerdown", move |ev: web::PointerEvent| {
            _ = d.el.set_pointer_capture(ev.pointer_id());
            set_body_class(&d.document, "dragging", true);
            let drag = DialDrag::begin(d.pointer_position(&ev), d.position());
            *d.drag.borrow_mut() = Some(drag);
            ev.prevent_default();
        });
    }
    {
        let d = dial.clone();
        listen(&el, "pointermove", move |ev: web::PointerEvent| {
            let drag = *d.drag.borrow();
            if let Some(drag) = drag {
                d.set_position(drag.position_for(d.pointer_position(&ev)));
            }
        });
    }
    for event in ["pointerup", "pointercancel"] {
        let d = dial.clone();
        listen(&el, event, move |_ev: web::PointerEvent| {
            d.drag.borrow_mut().take();
            set_body_class(&d.document, "dragging", false);
        });
    }
    {
        let d = dial.clone();
        listen(&el, "keydown", move |ev: web::KeyboardEvent| {
            if let Some(direction) = dial_step_direction(&ev.key()) {
                d.set_position(step_position(d.position(), direction, ev.shift_key()));
                ev.prevent_default();
            }
        });
    }
    {
        let d = dial.clone();
        listen(&el, "click", move |_ev: web::MouseEvent| {
            _ = d.el.focus();
        });
    }
    Ok(())
}
