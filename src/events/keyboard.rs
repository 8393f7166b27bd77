use crate::app::{self, SharedApp};
use crate::constants::{
    preset_button_id, track_toggle_id, AUTOPILOT_BUTTON_ID, PLAY_BUTTON_ID,
};
use crate::dom;
use crate::input::{key_command, KeyCommand};
use mixer_core::{PresetId, TRACK_COUNT};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, app: &SharedApp) {
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let Some(command) = key_command(&ev.key()) else {
        return;
    };
    log::info!("[keys] {:?}", command);
    match command {
        KeyCommand::SelectPreset(preset) => app::select_preset(app, preset),
        KeyCommand::TogglePlay => {
            app::toggle_playing(app);
            // keep space from scrolling or re-clicking a focused button
            ev.prevent_default();
        }
        KeyCommand::ToggleAutopilot => app::toggle_autopilot(app),
    }
}

pub fn wire_global_keydown(app: SharedApp) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &app);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Click handlers for preset buttons, transport and per-track toggles.
pub fn wire_controls(document: &web::Document, app: &SharedApp) {
    for preset in PresetId::all() {
        let app = app.clone();
        dom::add_click_listener(document, &preset_button_id(preset.get()), move || {
            app::select_preset(&app, preset);
        });
    }

    let app_play = app.clone();
    dom::add_click_listener(document, PLAY_BUTTON_ID, move || app::toggle_playing(&app_play));

    let app_auto = app.clone();
    dom::add_click_listener(document, AUTOPILOT_BUTTON_ID, move || {
        app::toggle_autopilot(&app_auto)
    });

    for track in 0..TRACK_COUNT {
        let app = app.clone();
        dom::add_click_listener(document, &track_toggle_id(track as u8 + 1), move || {
            app::toggle_track(&app, track);
        });
    }
}
