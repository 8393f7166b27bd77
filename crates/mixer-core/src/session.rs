//! One mixing session: the active preset's nine tracks, the controller, the
//! optional autopilot, and the mix graph they drive.
//!
//! Every position change, manual or automatic, runs the mapper and issues the
//! resulting gain ramps before returning, so ticks are applied whole and in order.

use crate::constants::{GAIN_RAMP, LOAD_TIMEOUT, TICK_INTERVAL, TICK_INTERVAL_MAX, TRACK_COUNT};
use crate::error::{EngineError, LoadErrorKind, SourceLoadError};
use crate::geometry::{NormalizedPoint, SurfaceGeometry};
use crate::mapper::{map_volumes, AnchorSet, TrackVolumes, SILENCE};
use crate::mix_graph::{AudioBackend, LoadRequests, LoadTicket, MixGraph};
use crate::motion::{MotionGenerator, MotionParameters, MotionPhase, MotionTick, MotionTiming};
use crate::preset::{track_id, PresetId, SourceResolver};
use std::time::Duration;

/// Top-level mixer configuration.
///
/// - `geometry`: control-surface dimensions the mapper works in
/// - `timing`: autopilot session length and fade windows
/// - `gain_ramp`: length of every volume transition
/// - `load_timeout`: budget for one track to become playable
/// - `tick_interval`: autopilot tick cadence
#[derive(Clone, Debug, PartialEq)]
pub struct MixerConfig {
    pub geometry: SurfaceGeometry,
    pub timing: MotionTiming,
    pub gain_ramp: Duration,
    pub load_timeout: Duration,
    pub tick_interval: Duration,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            geometry: SurfaceGeometry::default(),
            timing: MotionTiming::default(),
            gain_ramp: GAIN_RAMP,
            load_timeout: LOAD_TIMEOUT,
            tick_interval: TICK_INTERVAL,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Track {
    pub id: u8,
    pub volume: u8,
    pub is_playing: bool,
}

/// Loading and readiness, for the UI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineStatus {
    pub progress: f32,
    pub load_error: LoadErrorKind,
    pub ready_tracks: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// No autopilot running; nothing changed.
    Idle,
    Moved(NormalizedPoint),
    /// The autopilot reached the end of its session; playback is stopped.
    Finished,
}

fn fresh_tracks() -> [Track; TRACK_COUNT] {
    std::array::from_fn(|i| Track {
        id: track_id(i),
        volume: 0,
        is_playing: true,
    })
}

pub struct SessionController<B: AudioBackend> {
    config: MixerConfig,
    anchors: AnchorSet,
    preset: Option<PresetId>,
    tracks: [Track; TRACK_COUNT],
    is_playing: bool,
    controller: NormalizedPoint,
    autopilot: Option<MotionGenerator>,
    mix: MixGraph<B>,
}

impl<B: AudioBackend> SessionController<B> {
    pub fn new(backend: B, config: MixerConfig) -> Self {
        debug_assert!(config.tick_interval <= TICK_INTERVAL_MAX, "autopilot tick too slow");
        let anchors = AnchorSet::new(config.geometry);
        let mix = MixGraph::new(backend, config.gain_ramp);
        Self {
            config,
            anchors,
            preset: None,
            tracks: fresh_tracks(),
            is_playing: false,
            controller: NormalizedPoint::BOUNDARY_TOP,
            autopilot: None,
            mix,
        }
    }

    /// Switch to `preset`: stop the autopilot, tear down the previous chains,
    /// reset volumes and the controller, and return the loads to perform.
    pub fn select_preset(&mut self, preset: PresetId, sources: &dyn SourceResolver) -> LoadRequests {
        if self.autopilot.take().is_some() {
            log::info!("[session] autopilot cancelled by preset switch");
        }
        self.mix.teardown();
        self.preset = Some(preset);
        self.tracks = fresh_tracks();
        self.is_playing = false;
        self.controller = NormalizedPoint::BOUNDARY_TOP;
        log::info!("[session] preset {} selected", preset);
        self.mix.begin_loads(preset, sources)
    }

    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<B::Binding, SourceLoadError>,
    ) -> Option<EngineError> {
        self.mix.complete_load(ticket, result)
    }

    /// Manual pointer input. Rejected while the autopilot is steering.
    pub fn move_controller(&mut self, p: NormalizedPoint) -> bool {
        if self.autopilot.is_some() {
            log::debug!("[input] manual move ignored during autopilot");
            return false;
        }
        self.apply_position(p);
        true
    }

    /// Park the controller at the top of the boundary, silencing every track.
    pub fn reset_controller(&mut self) {
        self.apply_position(NormalizedPoint::BOUNDARY_TOP);
    }

    fn apply_position(&mut self, p: NormalizedPoint) {
        self.controller = p;
        let volumes = map_volumes(p, &self.anchors);
        self.set_volumes(&volumes);
    }

    fn set_volumes(&mut self, volumes: &TrackVolumes) {
        for (track, &v) in self.tracks.iter_mut().zip(volumes.iter()) {
            track.volume = v;
        }
        self.mix.apply_volumes(volumes);
    }

    fn set_all_playing(&mut self, session: bool, tracks: bool) {
        self.is_playing = session;
        for (i, track) in self.tracks.iter_mut().enumerate() {
            track.is_playing = tracks;
            self.mix.set_track_playing(i, tracks);
        }
        self.mix.set_session_playing(session);
    }

    /// Flip session playback for all nine tracks and park the controller.
    pub fn toggle_playing(&mut self) -> bool {
        let playing = !self.is_playing;
        self.set_all_playing(playing, playing);
        self.reset_controller();
        log::info!("[session] playing={}", playing);
        playing
    }

    /// Mute or unmute one track, independent of its volume.
    pub fn toggle_track(&mut self, track: usize) -> bool {
        if track >= TRACK_COUNT {
            log::warn!("[session] no track at index {}", track);
            return false;
        }
        let playing = !self.tracks[track].is_playing;
        self.tracks[track].is_playing = playing;
        self.mix.set_track_playing(track, playing);
        playing
    }

    /// Start a fresh autopilot session at clock reading `now`. Returns false
    /// if one is already running.
    pub fn start_autopilot(&mut self, now: Duration, seed: u64) -> bool {
        if self.autopilot.is_some() {
            return false;
        }
        self.set_all_playing(true, true);
        self.set_volumes(&SILENCE);
        let params = MotionParameters::seeded(seed);
        let generator = MotionGenerator::start(params, self.config.timing, now);
        self.controller = generator.position();
        self.autopilot = Some(generator);
        log::info!("[session] autopilot on");
        true
    }

    /// Cancel the autopilot immediately: no fade-out, controller parked,
    /// playback stopped. Idempotent.
    pub fn stop_autopilot(&mut self) -> bool {
        if self.autopilot.take().is_none() {
            return false;
        }
        self.set_all_playing(false, true);
        self.reset_controller();
        log::info!("[session] autopilot off");
        true
    }

    /// Returns whether the autopilot is running afterwards.
    pub fn toggle_autopilot(&mut self, now: Duration, seed: u64) -> bool {
        if self.autopilot.is_some() {
            self.stop_autopilot();
            false
        } else {
            self.start_autopilot(now, seed)
        }
    }

    /// Advance the autopilot to clock reading `now` and apply its position.
    pub fn tick(&mut self, now: Duration) -> TickOutcome {
        let Some(generator) = self.autopilot.as_mut() else {
            return TickOutcome::Idle;
        };
        match generator.tick(now) {
            MotionTick::Moved { position, .. } => {
                self.apply_position(position);
                TickOutcome::Moved(position)
            }
            MotionTick::Finished => {
                self.autopilot = None;
                self.set_all_playing(false, true);
                log::info!("[session] autopilot session complete; playback stopped");
                TickOutcome::Finished
            }
        }
    }

    /// Stop everything and release all audio chains. Idempotent.
    pub fn close(&mut self) {
        self.autopilot = None;
        self.mix.teardown();
        self.is_playing = false;
        self.tracks = fresh_tracks();
        self.controller = NormalizedPoint::BOUNDARY_TOP;
    }

    pub fn config(&self) -> &MixerConfig {
        &self.config
    }

    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    pub fn preset(&self) -> Option<PresetId> {
        self.preset
    }

    pub fn tracks(&self) -> &[Track; TRACK_COUNT] {
        &self.tracks
    }

    pub fn volumes(&self) -> TrackVolumes {
        self.tracks.map(|t| t.volume)
    }

    pub fn controller_position(&self) -> NormalizedPoint {
        self.controller
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_auto_mixing(&self) -> bool {
        self.autopilot.is_some()
    }

    pub fn autopilot_phase(&self) -> Option<MotionPhase> {
        self.autopilot.as_ref().map(|g| g.phase())
    }

    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            progress: self.mix.progress(),
            load_error: self.mix.load_error(),
            ready_tracks: self.mix.ready_count(),
        }
    }

    pub fn mix(&self) -> &MixGraph<B> {
        &self.mix
    }

    pub fn mix_mut(&mut self) -> &mut MixGraph<B> {
        &mut self.mix
    }
}
