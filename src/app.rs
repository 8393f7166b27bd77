use crate::audio::WebAudioBackend;
use crate::clock::{SessionClock, TickTimer};
use crate::constants::AUDIO_BASE_PATH;
use crate::input::DragState;
use crate::ui;
use mixer_core::{
    LocalLayout, MixerConfig, NormalizedPoint, PresetId, SessionController, TickOutcome,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub struct App {
    pub session: SessionController<WebAudioBackend>,
    pub sources: LocalLayout,
    pub clock: SessionClock,
    pub ticker: TickTimer,
    pub drag: DragState,
    pub document: web::Document,
}

pub type SharedApp = Rc<RefCell<App>>;

impl App {
    pub fn new(backend: WebAudioBackend, document: web::Document) -> Self {
        Self {
            session: SessionController::new(backend, MixerConfig::default()),
            sources: LocalLayout::new(AUDIO_BASE_PATH),
            clock: SessionClock::new(),
            ticker: TickTimer::default(),
            drag: DragState::default(),
            document,
        }
    }

    fn render(&self) {
        ui::render(&self.document, &self.session);
    }
}

/// Tear down the current preset and start loading `preset`'s tracks, one
/// independent task per track.
pub fn select_preset(app: &SharedApp, preset: PresetId) {
    let (requests, loader, timeout) = {
        let mut guard = app.borrow_mut();
        let a = &mut *guard;
        a.ticker.stop();
        let requests = a.session.select_preset(preset, &a.sources);
        a.render();
        (
            requests,
            a.session.mix().backend().loader(),
            a.session.config().load_timeout,
        )
    };

    for request in requests {
        let app = app.clone();
        let loader = loader.clone();
        spawn_local(async move {
            let result = loader.load(request.locator, timeout).await;
            let mut guard = app.borrow_mut();
            if let Some(err) = guard.session.complete_load(request.ticket, result) {
                ui::show_engine_error(&guard.document, &err);
            }
            guard.render();
        });
    }
}

pub fn toggle_playing(app: &SharedApp) {
    let mut a = app.borrow_mut();
    a.session.toggle_playing();
    a.render();
}

pub fn toggle_track(app: &SharedApp, track: usize) {
    let mut a = app.borrow_mut();
    let playing = a.session.toggle_track(track);
    log::info!("[click] track {} playing={}", track + 1, playing);
    a.render();
}

pub fn toggle_autopilot(app: &SharedApp) {
    let mut guard = app.borrow_mut();
    let a = &mut *guard;
    let now = a.clock.now();
    if a.session.toggle_autopilot(now, rand::random()) {
        a.drag.active = false;
        let interval = a.session.config().tick_interval;
        let app_tick = app.clone();
        a.ticker.start(interval, move || on_tick(&app_tick));
    } else {
        a.ticker.stop();
    }
    a.render();
}

fn on_tick(app: &SharedApp) {
    // re-entrant call; the next tick catches up
    let Ok(mut guard) = app.try_borrow_mut() else {
        return;
    };
    let a = &mut *guard;
    let now = a.clock.now();
    if a.session.tick(now) == TickOutcome::Finished {
        a.ticker.stop();
        a.session.reset_controller();
    }
    a.render();
}

/// Manual controller move. Returns false while the autopilot is steering.
pub fn move_controller(app: &SharedApp, p: NormalizedPoint) -> bool {
    let mut a = app.borrow_mut();
    let moved = a.session.move_controller(p);
    if moved {
        a.render();
    }
    moved
}

pub fn shutdown(app: &SharedApp) {
    let mut a = app.borrow_mut();
    a.ticker.stop();
    a.session.close();
    a.session.mix().backend().close();
    log::info!("[session] closed");
}
