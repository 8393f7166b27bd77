use instant::Instant;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Wall-clock reference shared by the autopilot and everything it drives.
pub struct SessionClock {
    epoch: Instant,
}

impl SessionClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    #[inline]
    pub fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Periodic callback on a `setInterval` timer.
///
/// `stop` clears the interval so nothing fires afterwards, but keeps the last
/// closure alive until the next `start`: the timer may be stopped from inside
/// its own callback.
#[derive(Default)]
pub struct TickTimer {
    handle: Option<i32>,
    callback: Option<Closure<dyn FnMut()>>,
}

impl TickTimer {
    pub fn start(&mut self, interval: Duration, tick: impl FnMut() + 'static) {
        self.stop();
        let Some(window) = web::window() else {
            log::error!("[clock] no window; autopilot timer not started");
            return;
        };
        let callback = Closure::wrap(Box::new(tick) as Box<dyn FnMut()>);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            interval.as_millis() as i32,
        ) {
            Ok(handle) => {
                self.handle = Some(handle);
                self.callback = Some(callback);
            }
            Err(e) => log::error!("[clock] setInterval error: {:?}", e),
        }
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Some(window) = web::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
