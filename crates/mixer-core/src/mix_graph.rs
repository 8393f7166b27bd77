//! Per-track audio chains and click-free gain automation.
//!
//! The graph never touches an audio API directly. It tracks each track's load
//! state, target volume and play state, and issues a small set of commands to
//! an [`AudioBackend`]: ramp a gain, start or pause a source, release a chain.
//! Loading itself happens outside (it is asynchronous); the graph hands out
//! [`LoadRequest`]s and accepts completions tagged with a [`LoadTicket`].

use crate::constants::{TRACK_COUNT, VOLUME_MAX};
use crate::error::{EngineError, LoadErrorKind, SourceLoadError};
use crate::mapper::TrackVolumes;
use crate::preset::{track_id, PresetId, SourceResolver};
use smallvec::SmallVec;
use std::time::Duration;

/// Commands the mix graph issues to a concrete audio subsystem.
pub trait AudioBackend {
    /// A loaded chain: source, per-track gain stage, connection to the output bus.
    type Binding;

    /// Move the binding's gain from its current value to `target` (0..1)
    /// linearly over `ramp`. A zero ramp sets the value outright.
    fn schedule_gain(&mut self, binding: &Self::Binding, target: f32, ramp: Duration);

    /// Resume or pause the source without resetting its position.
    fn set_playing(&mut self, binding: &Self::Binding, playing: bool);

    /// Stop the source, cancel pending ramps and disconnect from the output bus.
    fn release(&mut self, binding: Self::Binding);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackLoadState {
    Unloaded,
    Loading,
    Ready,
    Failed(SourceLoadError),
}

/// Identifies one load attempt. Completions from a torn-down preset carry a
/// stale generation and are discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub track: usize,
    generation: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    pub preset: PresetId,
    pub track_id: u8,
    pub locator: String,
}

pub type LoadRequests = SmallVec<[LoadRequest; TRACK_COUNT]>;

struct TrackChain<H> {
    state: TrackLoadState,
    handle: Option<H>,
    volume: u8,
    track_playing: bool,
    audible: bool,
}

impl<H> TrackChain<H> {
    fn empty() -> Self {
        Self {
            state: TrackLoadState::Unloaded,
            handle: None,
            volume: 0,
            track_playing: true,
            audible: false,
        }
    }
}

pub struct MixGraph<B: AudioBackend> {
    backend: B,
    chains: [TrackChain<B::Binding>; TRACK_COUNT],
    generation: u64,
    session_playing: bool,
    ramp: Duration,
    attempted: usize,
    failures: SmallVec<[SourceLoadError; TRACK_COUNT]>,
}

#[inline]
fn gain_of(volume: u8) -> f32 {
    volume as f32 / VOLUME_MAX as f32
}

impl<B: AudioBackend> MixGraph<B> {
    pub fn new(backend: B, ramp: Duration) -> Self {
        Self {
            backend,
            chains: std::array::from_fn(|_| TrackChain::empty()),
            generation: 0,
            session_playing: false,
            ramp,
            attempted: 0,
            failures: SmallVec::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn state(&self, track: usize) -> TrackLoadState {
        self.chains[track].state
    }

    /// Release every chain and forget all pending loads. Idempotent.
    pub fn teardown(&mut self) {
        let mut released = 0usize;
        for chain in self.chains.iter_mut() {
            if let Some(handle) = chain.handle.take() {
                self.backend.release(handle);
                released += 1;
            }
            *chain = TrackChain::empty();
        }
        self.generation += 1;
        self.attempted = 0;
        self.failures.clear();
        self.session_playing = false;
        if released > 0 {
            log::info!("[mix] released {} track chains", released);
        }
    }

    /// Resolve every track of `preset` and mark the resolvable ones as loading.
    /// Tracks without a locator stay unloaded and are not counted as attempts.
    pub fn begin_loads(&mut self, preset: PresetId, sources: &dyn SourceResolver) -> LoadRequests {
        let mut requests = LoadRequests::new();
        for (track, chain) in self.chains.iter_mut().enumerate() {
            let id = track_id(track);
            let locator = match sources.audio_source(preset, id) {
                Some(l) if !l.trim().is_empty() => l,
                _ => {
                    log::debug!("[load] preset {} track {}: no source, skipping", preset, id);
                    continue;
                }
            };
            chain.state = TrackLoadState::Loading;
            requests.push(LoadRequest {
                ticket: LoadTicket {
                    track,
                    generation: self.generation,
                },
                preset,
                track_id: id,
                locator,
            });
        }
        self.attempted = requests.len();
        log::info!("[load] preset {}: loading {} tracks", preset, self.attempted);
        requests
    }

    /// Record the outcome of one load attempt.
    ///
    /// Returns `Some` exactly once per preset, when the last attempt resolves
    /// and none of them succeeded.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<B::Binding, SourceLoadError>,
    ) -> Option<EngineError> {
        let current = ticket.generation == self.generation
            && self.chains[ticket.track].state == TrackLoadState::Loading;
        if !current {
            if let Ok(handle) = result {
                log::debug!("[load] discarding stale load for track {}", ticket.track);
                self.backend.release(handle);
            }
            return None;
        }

        match result {
            Ok(handle) => {
                let chain = &mut self.chains[ticket.track];
                chain.state = TrackLoadState::Ready;
                self.backend.schedule_gain(&handle, gain_of(chain.volume), Duration::ZERO);
                chain.handle = Some(handle);
                self.sync_playback(ticket.track);
            }
            Err(e) => {
                log::warn!("[load] track {} failed: {}", track_id(ticket.track), e);
                self.chains[ticket.track].state = TrackLoadState::Failed(e);
                self.failures.push(e);
            }
        }

        if !self.all_resolved() {
            return None;
        }
        let ready = self.ready_count();
        if ready == 0 && self.attempted > 0 {
            let err = EngineError::AllSourcesFailed {
                cause: LoadErrorKind::summarize(&self.failures),
                attempted: self.attempted,
            };
            log::error!("[load] {}", err);
            return Some(err);
        }
        if ready < self.attempted {
            log::warn!("[load] loaded {} of {} tracks", ready, self.attempted);
        } else {
            log::info!("[load] all {} tracks ready", ready);
        }
        None
    }

    /// Ramp every ready track whose volume changed toward its new target.
    pub fn apply_volumes(&mut self, volumes: &TrackVolumes) {
        for (chain, &volume) in self.chains.iter_mut().zip(volumes.iter()) {
            if chain.volume == volume {
                continue;
            }
            chain.volume = volume;
            if let Some(handle) = &chain.handle {
                self.backend.schedule_gain(handle, gain_of(volume), self.ramp);
            }
        }
    }

    pub fn set_session_playing(&mut self, playing: bool) {
        self.session_playing = playing;
        for track in 0..TRACK_COUNT {
            self.sync_playback(track);
        }
    }

    pub fn set_track_playing(&mut self, track: usize, playing: bool) {
        self.chains[track].track_playing = playing;
        self.sync_playback(track);
    }

    fn sync_playback(&mut self, track: usize) {
        let session_playing = self.session_playing;
        let chain = &mut self.chains[track];
        let audible = session_playing && chain.track_playing;
        if let Some(handle) = &chain.handle {
            if chain.audible != audible {
                self.backend.set_playing(handle, audible);
            }
        }
        chain.audible = audible && chain.handle.is_some();
    }

    pub fn is_audible(&self, track: usize) -> bool {
        self.chains[track].audible
    }

    pub fn attempted(&self) -> usize {
        self.attempted
    }

    pub fn ready_count(&self) -> usize {
        self.count(|s| s == TrackLoadState::Ready)
    }

    fn resolved_count(&self) -> usize {
        self.count(|s| matches!(s, TrackLoadState::Ready | TrackLoadState::Failed(_)))
    }

    fn count(&self, pred: impl Fn(TrackLoadState) -> bool) -> usize {
        self.chains.iter().filter(|c| pred(c.state)).count()
    }

    pub fn all_resolved(&self) -> bool {
        self.resolved_count() == self.attempted
    }

    /// Percent of attempted tracks that have resolved, ready or failed.
    pub fn progress(&self) -> f32 {
        if self.attempted == 0 {
            return 100.0;
        }
        self.resolved_count() as f32 / self.attempted as f32 * 100.0
    }

    /// Non-`None` only once every attempt has resolved and none succeeded.
    pub fn load_error(&self) -> LoadErrorKind {
        if self.attempted > 0 && self.all_resolved() && self.ready_count() == 0 {
            LoadErrorKind::summarize(&self.failures)
        } else {
            LoadErrorKind::None
        }
    }
}
