use crate::audio::WebAudioBackend;
use crate::constants::*;
use crate::dom;
use crate::input::marker_percent;
use mixer_core::{EngineError, LoadErrorKind, SessionController};
use wasm_bindgen::JsCast;
use web_sys as web;

fn load_error_text(kind: LoadErrorKind) -> Option<&'static str> {
    match kind {
        LoadErrorKind::None => None,
        LoadErrorKind::CrossOriginBlocked => Some(
            "Audio blocked by cross-origin policy. Host the files with CORS enabled or serve them from this site.",
        ),
        LoadErrorKind::NotFound => Some("No audio files found for this preset. Add the MP3 files and reload."),
        LoadErrorKind::Timeout => Some("Audio took too long to load. Check the connection and try again."),
        LoadErrorKind::Unsupported => Some("This browser cannot play the audio format provided."),
    }
}

/// Push session state to the DOM: volumes, play flags, progress, errors and
/// the controller marker.
pub fn render(document: &web::Document, session: &SessionController<WebAudioBackend>) {
    for track in session.tracks() {
        dom::set_text(document, &track_volume_id(track.id), &track.volume.to_string());
        dom::set_class(document, &track_toggle_id(track.id), MUTED_CLASS, !track.is_playing);
    }
    dom::set_class(document, PLAY_BUTTON_ID, ACTIVE_CLASS, session.is_playing());
    dom::set_class(document, AUTOPILOT_BUTTON_ID, ACTIVE_CLASS, session.is_auto_mixing());
    if let Some(preset) = session.preset() {
        for id in mixer_core::PresetId::all() {
            dom::set_class(document, &preset_button_id(id.get()), ACTIVE_CLASS, id == preset);
        }
    }

    let status = session.status();
    dom::set_text(document, PROGRESS_ID, &format!("{:.0}%", status.progress));
    match load_error_text(status.load_error) {
        Some(text) => {
            dom::set_text(document, LOAD_ERROR_ID, text);
            dom::set_visible(document, LOAD_ERROR_ID, true);
        }
        None => dom::set_visible(document, LOAD_ERROR_ID, false),
    }

    if let Some(marker) = document
        .get_element_by_id(CONTROLLER_ID)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        let (left, top) = marker_percent(session.controller_position());
        let style = marker.style();
        _ = style.set_property("left", &format!("{:.3}%", left));
        _ = style.set_property("top", &format!("{:.3}%", top));
    }
}

pub fn show_engine_error(document: &web::Document, err: &EngineError) {
    let text = match err {
        EngineError::AllSourcesFailed { cause, .. } => {
            load_error_text(*cause).unwrap_or("Audio could not be loaded.").to_string()
        }
        EngineError::EngineInit(_) => "Audio is not supported in this browser.".to_string(),
    };
    dom::set_text(document, LOAD_ERROR_ID, &text);
    dom::set_visible(document, LOAD_ERROR_ID, true);
}
