#![cfg(target_arch = "wasm32")]
use crate::app::App;
use crate::audio::WebAudioBackend;
use mixer_core::PresetId;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod audio;
mod clock;
mod constants;
mod dom;
mod events;
mod input;
mod ui;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("mandala-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let surface: web::HtmlElement = document
        .get_element_by_id(constants::SURFACE_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::SURFACE_ID))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let backend = match WebAudioBackend::new() {
        Ok(b) => b,
        Err(e) => {
            ui::show_engine_error(&document, &e);
            return Err(e.into());
        }
    };

    let app = Rc::new(RefCell::new(App::new(backend, document.clone())));

    events::wire_controls(&document, &app);
    events::wire_global_keydown(app.clone());
    events::wire_input_handlers(events::InputWiring {
        surface,
        app: app.clone(),
    });
    events::wire_shutdown(&app);

    app::select_preset(&app, PresetId::FIRST);
    Ok(())
}
