use crate::constants::MASTER_GAIN;
use mixer_core::{classify_media_error, AudioBackend, EngineError, SourceLoadError};
use std::cell::Cell;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

const TIMEOUT_REASON: &str = "timeout";

/// One loaded track: media element -> source node -> gain -> master bus.
pub struct TrackNodes {
    element: web::HtmlAudioElement,
    source: web::MediaElementAudioSourceNode,
    gain: web::GainNode,
}

/// WebAudio implementation of the mix graph's backend commands.
pub struct WebAudioBackend {
    ctx: web::AudioContext,
    master: web::GainNode,
}

/// Cloneable handle for building track chains from async load tasks.
#[derive(Clone)]
pub struct TrackLoader {
    ctx: web::AudioContext,
    master: web::GainNode,
}

fn create_gain(ctx: &web::AudioContext, value: f32, label: &str) -> Result<web::GainNode, JsValue> {
    match web::GainNode::new(ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(e)
        }
    }
}

impl WebAudioBackend {
    pub fn new() -> Result<Self, EngineError> {
        let ctx = web::AudioContext::new()
            .map_err(|e| EngineError::EngineInit(format!("AudioContext: {:?}", e)))?;
        let master = create_gain(&ctx, MASTER_GAIN, "Master")
            .map_err(|e| EngineError::EngineInit(format!("master gain: {:?}", e)))?;
        master
            .connect_with_audio_node(&ctx.destination())
            .map_err(|e| EngineError::EngineInit(format!("connect master: {:?}", e)))?;
        Ok(Self { ctx, master })
    }

    pub fn loader(&self) -> TrackLoader {
        TrackLoader {
            ctx: self.ctx.clone(),
            master: self.master.clone(),
        }
    }

    // Browsers start contexts suspended until a user gesture
    pub fn resume_if_suspended(&self) {
        if self.ctx.state() == web::AudioContextState::Suspended {
            _ = self.ctx.resume();
        }
    }

    pub fn close(&self) {
        _ = self.master.disconnect();
        _ = self.ctx.close();
    }
}

impl AudioBackend for WebAudioBackend {
    type Binding = TrackNodes;

    fn schedule_gain(&mut self, binding: &TrackNodes, target: f32, ramp: Duration) {
        let param = binding.gain.gain();
        if ramp.is_zero() {
            param.set_value(target);
            return;
        }
        let now = self.ctx.current_time();
        _ = param.cancel_scheduled_values(now);
        _ = param.set_value_at_time(param.value(), now);
        _ = param.linear_ramp_to_value_at_time(target, now + ramp.as_secs_f64());
    }

    fn set_playing(&mut self, binding: &TrackNodes, playing: bool) {
        let el = &binding.element;
        if !playing {
            if !el.paused() {
                _ = el.pause();
            }
            return;
        }
        self.resume_if_suspended();
        if !el.paused() {
            return;
        }
        match el.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("[mix] play rejected: {:?}", e);
                }
            }),
            Err(e) => log::warn!("[mix] play failed: {:?}", e),
        }
    }

    fn release(&mut self, binding: TrackNodes) {
        _ = binding.gain.gain().cancel_scheduled_values(0.0);
        _ = binding.element.pause();
        binding.element.set_src("");
        _ = binding.source.disconnect();
        _ = binding.gain.disconnect();
    }
}

impl TrackLoader {
    /// Fetch and wire one track. The gain starts at zero; the mix graph sets
    /// the real level once the chain is handed over.
    pub async fn load(self, locator: String, timeout: Duration) -> Result<TrackNodes, SourceLoadError> {
        let element = web::HtmlAudioElement::new().map_err(|e| {
            log::error!("[load] HtmlAudioElement error: {:?}", e);
            SourceLoadError::Unsupported
        })?;
        element.set_cross_origin(Some("anonymous"));
        element.set_loop(true);
        element.set_preload("auto");

        wait_until_playable(&element, &locator, timeout).await?;

        let source = self
            .ctx
            .create_media_element_source(&element)
            .map_err(|e| classify_js_error(&e))?;
        let gain = create_gain(&self.ctx, 0.0, "Track").map_err(|_| SourceLoadError::Unsupported)?;
        source
            .connect_with_audio_node(&gain)
            .map_err(|e| classify_js_error(&e))?;
        gain.connect_with_audio_node(&self.master)
            .map_err(|e| classify_js_error(&e))?;
        Ok(TrackNodes {
            element,
            source,
            gain,
        })
    }
}

async fn wait_until_playable(
    element: &web::HtmlAudioElement,
    locator: &str,
    timeout: Duration,
) -> Result<(), SourceLoadError> {
    let target = element.clone();
    let timer = Cell::new(None::<i32>);
    let timeout_ms = timeout.as_millis().min(i32::MAX as u128) as i32;
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let opts = web::AddEventListenerOptions::new();
        opts.set_once(true);

        let on_ready = Closure::once_into_js(move || {
            _ = resolve.call0(&JsValue::NULL);
        });
        let reject_error = reject.clone();
        let on_error = Closure::once_into_js(move || {
            _ = reject_error.call1(&JsValue::NULL, &JsValue::from_str("error"));
        });
        _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            "canplaythrough",
            on_ready.unchecked_ref(),
            &opts,
        );
        _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            "error",
            on_error.unchecked_ref(),
            &opts,
        );

        if let Some(window) = web::window() {
            let on_timeout = Closure::once_into_js(move || {
                _ = reject.call1(&JsValue::NULL, &JsValue::from_str(TIMEOUT_REASON));
            });
            if let Ok(handle) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                on_timeout.unchecked_ref(),
                timeout_ms,
            ) {
                timer.set(Some(handle));
            }
        }
    });

    element.set_src(locator);
    element.load();

    let settled = JsFuture::from(promise).await;
    if let (Some(handle), Some(window)) = (timer.get(), web::window()) {
        window.clear_timeout_with_handle(handle);
    }

    match settled {
        Ok(_) => Ok(()),
        Err(reason) => {
            if reason.as_string().as_deref() == Some(TIMEOUT_REASON) {
                _ = element.pause();
                element.set_src("");
                return Err(SourceLoadError::Timeout);
            }
            let err = match element.error() {
                Some(media) => classify_media_error(Some(media.code()), &media.message()),
                None => classify_js_error(&reason),
            };
            log::error!("[load] {} -> {} ({:?})", locator, err, reason);
            Err(err)
        }
    }
}

fn classify_js_error(e: &JsValue) -> SourceLoadError {
    let text = e
        .dyn_ref::<js_sys::Error>()
        .map(|err| format!("{}: {}", String::from(err.name()), String::from(err.message())))
        .unwrap_or_else(|| format!("{:?}", e));
    classify_media_error(None, &text)
}
