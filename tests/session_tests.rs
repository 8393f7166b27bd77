// Host-side tests for the session controller: presets, manual input,
// playback and the autopilot lifecycle.

mod common;

use common::RecordingBackend;
use mixer_core::*;
use std::time::Duration;

type Session = SessionController<RecordingBackend>;

fn session() -> Session {
    SessionController::new(RecordingBackend::default(), MixerConfig::default())
}

fn short_timing() -> MixerConfig {
    MixerConfig {
        timing: MotionTiming {
            session: Duration::from_secs(60),
            fade_in: Duration::from_secs(10),
            fade_out: Duration::from_secs(5),
        },
        ..MixerConfig::default()
    }
}

/// Select `id` and complete every load successfully.
fn loaded(s: &mut Session, id: u8) {
    let preset = PresetId::new(id).expect("valid preset");
    let requests = s.select_preset(preset, &LocalLayout::new("/audio"));
    for r in requests {
        s.complete_load(r.ticket, Ok(r.track_id));
    }
}

/// Tick every 50 ms from `from` (exclusive) to `to` (inclusive).
fn tick_until(s: &mut Session, from: Duration, to: Duration) -> TickOutcome {
    let mut now = from;
    let mut last = TickOutcome::Idle;
    while now < to {
        now += TICK_INTERVAL;
        last = s.tick(now);
        if last == TickOutcome::Finished {
            break;
        }
    }
    last
}

#[test]
fn new_session_is_parked_and_silent() {
    let s = session();
    assert_eq!(s.controller_position(), NormalizedPoint::BOUNDARY_TOP);
    assert_eq!(s.volumes(), SILENCE);
    assert!(!s.is_playing());
    assert!(!s.is_auto_mixing());
    assert_eq!(s.preset(), None);
    assert!(s.tracks().iter().all(|t| t.is_playing));
    assert_eq!(s.tracks()[8].id, 9);
}

#[test]
fn manual_move_maps_volumes() {
    let mut s = session();
    loaded(&mut s, 1);
    assert!(s.move_controller(NormalizedPoint::CENTER));
    assert_eq!(s.volumes(), [9; TRACK_COUNT]);
    assert_eq!(s.controller_position(), NormalizedPoint::CENTER);

    let anchor = s.anchors().normalized(6);
    assert!(s.move_controller(anchor));
    assert_eq!(s.volumes()[6], 80);
}

#[test]
fn preset_switch_resets_everything() {
    let mut s = session();
    loaded(&mut s, 1);
    s.toggle_playing();
    s.move_controller(NormalizedPoint::CENTER);
    s.start_autopilot(Duration::ZERO, 1);
    s.mix_mut().backend_mut().take();

    let requests = s.select_preset(PresetId::new(5).expect("valid preset"), &LocalLayout::new("/audio"));
    assert_eq!(requests.len(), 9);
    assert!(requests.iter().all(|r| r.preset.get() == 5));
    assert_eq!(s.preset().map(PresetId::get), Some(5));
    assert!(!s.is_auto_mixing());
    assert!(!s.is_playing());
    assert_eq!(s.volumes(), SILENCE);
    assert_eq!(s.controller_position(), NormalizedPoint::BOUNDARY_TOP);
    assert_eq!(s.mix().backend().released().len(), 9);
    assert_eq!(s.status().progress, 0.0);
}

#[test]
fn toggle_playing_parks_controller() {
    let mut s = session();
    loaded(&mut s, 1);
    s.move_controller(NormalizedPoint::CENTER);

    assert!(s.toggle_playing());
    assert!(s.is_playing());
    assert_eq!(s.controller_position(), NormalizedPoint::BOUNDARY_TOP);
    assert_eq!(s.volumes(), SILENCE);
    assert!((0..TRACK_COUNT).all(|i| s.mix().is_audible(i)));

    assert!(!s.toggle_playing());
    assert!(!s.is_playing());
    assert!((0..TRACK_COUNT).all(|i| !s.mix().is_audible(i)));
}

#[test]
fn track_toggle_mutes_without_touching_volume() {
    let mut s = session();
    loaded(&mut s, 1);
    s.toggle_playing();
    s.move_controller(NormalizedPoint::CENTER);

    assert!(!s.toggle_track(3));
    assert!(!s.tracks()[3].is_playing);
    assert_eq!(s.tracks()[3].volume, 9);
    assert!(!s.mix().is_audible(3));

    assert!(s.toggle_track(3));
    assert!(s.mix().is_audible(3));
    assert!(!s.toggle_track(TRACK_COUNT));
}

#[test]
fn autopilot_start_plays_everything_from_silence() {
    let mut s = session();
    loaded(&mut s, 1);
    s.toggle_track(0);
    assert!(s.start_autopilot(Duration::ZERO, 123));
    assert!(s.is_auto_mixing());
    assert!(s.is_playing());
    assert!(s.tracks().iter().all(|t| t.is_playing));
    assert_eq!(s.volumes(), SILENCE);
    assert!((s.controller_position().radius() - 0.5).abs() < 1e-4);
    assert_eq!(s.autopilot_phase(), Some(MotionPhase::FadeIn));

    // already running
    assert!(!s.start_autopilot(Duration::from_secs(1), 9));
}

#[test]
fn manual_input_ignored_during_autopilot() {
    let mut s = session();
    loaded(&mut s, 1);
    s.start_autopilot(Duration::ZERO, 4);
    tick_until(&mut s, Duration::ZERO, Duration::from_secs(5));
    let before = s.controller_position();

    assert!(!s.move_controller(NormalizedPoint::CENTER));
    assert_eq!(s.controller_position(), before);
}

#[test]
fn stop_mid_session_resets_to_silence() {
    let mut s = session();
    loaded(&mut s, 2);
    s.start_autopilot(Duration::ZERO, 77);
    let outcome = tick_until(&mut s, Duration::ZERO, Duration::from_secs(120));
    assert!(matches!(outcome, TickOutcome::Moved(_)));
    assert_eq!(s.autopilot_phase(), Some(MotionPhase::Sustain));
    assert!(s.controller_position().radius() < 0.5);

    assert!(s.stop_autopilot());
    assert!(!s.is_auto_mixing());
    assert!(!s.is_playing());
    assert_eq!(s.controller_position(), NormalizedPoint::new(0.5, 0.0));
    assert_eq!(s.volumes(), SILENCE);
    assert!(s.tracks().iter().all(|t| t.is_playing));

    // idempotent
    assert!(!s.stop_autopilot());
    assert_eq!(s.tick(Duration::from_secs(121)), TickOutcome::Idle);
}

#[test]
fn toggle_autopilot_round_trip() {
    let mut s = session();
    loaded(&mut s, 1);
    assert!(s.toggle_autopilot(Duration::ZERO, 5));
    assert!(!s.toggle_autopilot(Duration::from_secs(1), 5));
    assert!(!s.is_auto_mixing());
}

#[test]
fn natural_end_stops_playback() {
    let mut s = SessionController::new(RecordingBackend::default(), short_timing());
    loaded(&mut s, 1);
    s.start_autopilot(Duration::ZERO, 8);
    let outcome = tick_until(&mut s, Duration::ZERO, Duration::from_secs(61));
    assert_eq!(outcome, TickOutcome::Finished);
    assert!(!s.is_auto_mixing());
    assert!(!s.is_playing());
    assert!((0..TRACK_COUNT).all(|i| !s.mix().is_audible(i)));
    assert!(s.tracks().iter().all(|t| t.is_playing));

    s.reset_controller();
    assert_eq!(s.volumes(), SILENCE);
    assert_eq!(s.controller_position(), NormalizedPoint::BOUNDARY_TOP);
    assert!(s.move_controller(NormalizedPoint::CENTER));
}

#[test]
fn autopilot_ticks_ramp_gains() {
    let mut s = session();
    loaded(&mut s, 1);
    s.start_autopilot(Duration::ZERO, 21);
    s.mix_mut().backend_mut().take();
    tick_until(&mut s, Duration::ZERO, Duration::from_secs(30));
    let gains = s.mix().backend().gains();
    assert!(!gains.is_empty());
    assert!(gains.iter().all(|&(_, target, ramp)| ramp == GAIN_RAMP && (0.0..=0.8).contains(&target)));
}

#[test]
fn same_seed_same_mix() {
    let run = |seed| {
        let mut s = session();
        loaded(&mut s, 1);
        s.start_autopilot(Duration::ZERO, seed);
        tick_until(&mut s, Duration::ZERO, Duration::from_secs(90));
        (s.controller_position(), s.volumes())
    };
    assert_eq!(run(31), run(31));
}

#[test]
fn status_tracks_loading() {
    let mut s = session();
    let requests = s.select_preset(PresetId::FIRST, &LocalLayout::new("/audio"));
    let status = s.status();
    assert_eq!(status.progress, 0.0);
    assert_eq!(status.ready_tracks, 0);

    for r in requests {
        let result = if r.track_id % 2 == 0 {
            Err(SourceLoadError::NotFound)
        } else {
            Ok(r.track_id)
        };
        assert_eq!(s.complete_load(r.ticket, result), None);
    }
    let status = s.status();
    assert_eq!(status.progress, 100.0);
    assert_eq!(status.ready_tracks, 5);
    assert_eq!(status.load_error, LoadErrorKind::None);
}

#[test]
fn close_is_idempotent() {
    let mut s = session();
    loaded(&mut s, 1);
    s.toggle_playing();
    s.start_autopilot(Duration::ZERO, 2);
    s.mix_mut().backend_mut().take();

    s.close();
    assert_eq!(s.mix().backend().released().len(), 9);
    assert!(!s.is_auto_mixing());
    assert!(!s.is_playing());

    s.mix_mut().backend_mut().take();
    s.close();
    assert!(s.mix().backend().calls.is_empty());
}
