mod keyboard;
mod pointer;

pub use keyboard::{wire_controls, wire_global_keydown};
pub use pointer::{wire_input_handlers, InputWiring};

use crate::app::{self, SharedApp};
use wasm_bindgen::JsCast;
use web_sys as web;

// Release the audio graph when the page goes away
pub fn wire_shutdown(app: &SharedApp) {
    let Some(window) = web::window() else {
        return;
    };
    let app = app.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::Event| {
        app::shutdown(&app);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    closure.forget();
}
