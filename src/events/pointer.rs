use crate::app::{self, SharedApp};
use crate::input;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub surface: web::HtmlElement,
    pub app: SharedApp,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w, "pointerup");
    wire_pointerup(&w, "pointercancel");
}

fn pointer_surface_point(ev: &web::PointerEvent, surface: &web::HtmlElement) -> Option<mixer_core::NormalizedPoint> {
    let rect = surface.get_bounding_client_rect();
    input::surface_point(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
    )
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let surface_for_listener = w.surface.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if w.app.borrow().session.is_auto_mixing() {
            log::debug!("[input] ignored pointerdown during autopilot");
            return;
        }
        let Some(p) = pointer_surface_point(&ev, &w.surface) else {
            return;
        };
        {
            let mut a = w.app.borrow_mut();
            a.drag.active = true;
            a.drag.pointer_id = ev.pointer_id();
        }
        _ = w.surface.set_pointer_capture(ev.pointer_id());
        app::move_controller(&w.app, p);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = surface_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let surface_for_listener = w.surface.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let drag = w.app.borrow().drag;
        if !drag.active || drag.pointer_id != ev.pointer_id() {
            return;
        }
        if let Some(p) = pointer_surface_point(&ev, &w.surface) {
            if !app::move_controller(&w.app, p) {
                // autopilot took over mid-drag
                w.app.borrow_mut().drag.active = false;
            }
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = surface_for_listener
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring, event: &str) {
    let w = w.clone();
    let surface_for_listener = w.surface.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut a = w.app.borrow_mut();
        if a.drag.active && a.drag.pointer_id == ev.pointer_id() {
            a.drag.active = false;
            _ = w.surface.release_pointer_capture(ev.pointer_id());
        }
    }) as Box<dyn FnMut(_)>);
    _ = surface_for_listener.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}
