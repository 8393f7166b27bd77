//! Autopilot: a timed, three-phase controller trajectory.
//!
//! A session fades in from the boundary circle along a randomized spiral,
//! drifts on a sum of slow sine oscillators, then fades back out to the
//! boundary at a random exit angle. Every random choice lives in an immutable
//! [`MotionParameters`] value so a seed reproduces a trajectory exactly.

use crate::constants::{
    FADE_IN_DURATION, FADE_IN_SMOOTHING, FADE_IN_TARGET_RADIUS_MAX, FADE_IN_TARGET_RADIUS_MIN,
    FADE_OUT_DURATION, FADE_OUT_SMOOTHING, MOVEMENT_RADIUS_MAX, MOVEMENT_RADIUS_MIN,
    NORMALIZED_BOUNDARY_RADIUS, OSCILLATOR_AMP_BANDS, OSCILLATOR_BASE_FREQS,
    OSCILLATOR_FREQ_JITTER, SESSION_DURATION, SPIRAL_ROTATION_MAX_RAD, SUSTAIN_SMOOTHING,
};
use crate::geometry::NormalizedPoint;
use rand::prelude::*;
use std::f32::consts::TAU;
use std::time::Duration;

/// Quintic easing `t^3 (t (6t - 15) + 10)`, flat at both ends.
#[inline]
pub fn smootherstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Wrap an angle difference into `[-pi, pi]`.
#[inline]
fn wrap_angle(a: f32) -> f32 {
    a.sin().atan2(a.cos())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionPhase {
    FadeIn,
    Sustain,
    FadeOut,
    Finished,
}

/// Session length and fade windows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionTiming {
    pub session: Duration,
    pub fade_in: Duration,
    pub fade_out: Duration,
}

impl MotionTiming {
    pub fn fade_out_start(&self) -> Duration {
        self.session.saturating_sub(self.fade_out)
    }

    pub fn phase_at(&self, elapsed: Duration) -> MotionPhase {
        if elapsed >= self.session {
            MotionPhase::Finished
        } else if elapsed < self.fade_in {
            MotionPhase::FadeIn
        } else if elapsed < self.fade_out_start() {
            MotionPhase::Sustain
        } else {
            MotionPhase::FadeOut
        }
    }
}

impl Default for MotionTiming {
    fn default() -> Self {
        Self {
            session: SESSION_DURATION,
            fade_in: FADE_IN_DURATION,
            fade_out: FADE_OUT_DURATION,
        }
    }
}

/// One sine component of the sustain drift.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillator {
    /// Radians per millisecond of session time.
    pub freq: f64,
    pub phase: f64,
    pub amplitude: f32,
}

impl Oscillator {
    #[inline]
    fn sample(&self, elapsed_ms: f64) -> f32 {
        (self.freq * elapsed_ms + self.phase).sin() as f32 * self.amplitude
    }
}

fn sample_oscillators<R: Rng + ?Sized>(rng: &mut R) -> [Oscillator; 3] {
    std::array::from_fn(|i| {
        let jitter = rng.gen_range(1.0 - OSCILLATOR_FREQ_JITTER..1.0 + OSCILLATOR_FREQ_JITTER);
        let (amp_lo, amp_hi) = OSCILLATOR_AMP_BANDS[i];
        Oscillator {
            freq: OSCILLATOR_BASE_FREQS[i] * jitter,
            phase: rng.gen_range(0.0..std::f64::consts::TAU),
            amplitude: rng.gen_range(amp_lo..amp_hi),
        }
    })
}

/// Normalized sum of a bank of oscillators, in `[-1, 1]`.
fn drift(bank: &[Oscillator; 3], elapsed_ms: f64) -> f32 {
    let sum: f32 = bank.iter().map(|o| o.sample(elapsed_ms)).sum();
    let amp: f32 = bank.iter().map(|o| o.amplitude).sum();
    sum / amp
}

/// Everything random about one autopilot session, sampled once at start.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionParameters {
    pub start_angle: f32,
    pub spiral_rotation: f32,
    pub fade_in_radius: f32,
    pub drift_x: [Oscillator; 3],
    pub drift_y: [Oscillator; 3],
    pub movement_radius: f32,
    pub exit_angle: f32,
}

impl MotionParameters {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            start_angle: rng.gen_range(0.0..TAU),
            spiral_rotation: rng.gen_range(-SPIRAL_ROTATION_MAX_RAD..SPIRAL_ROTATION_MAX_RAD),
            fade_in_radius: rng.gen_range(FADE_IN_TARGET_RADIUS_MIN..FADE_IN_TARGET_RADIUS_MAX),
            drift_x: sample_oscillators(rng),
            drift_y: sample_oscillators(rng),
            movement_radius: rng.gen_range(MOVEMENT_RADIUS_MIN..MOVEMENT_RADIUS_MAX),
            exit_angle: rng.gen_range(0.0..TAU),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::sample(&mut StdRng::seed_from_u64(seed))
    }
}

/// Result of advancing the generator to a new clock reading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionTick {
    Moved {
        position: NormalizedPoint,
        phase: MotionPhase,
    },
    Finished,
}

/// Live autopilot state for one session.
#[derive(Clone, Debug)]
pub struct MotionGenerator {
    params: MotionParameters,
    timing: MotionTiming,
    started_at: Duration,
    elapsed: Duration,
    position: NormalizedPoint,
}

impl MotionGenerator {
    /// Begin a session at clock reading `now`, on the boundary circle at the
    /// session's start angle.
    pub fn start(params: MotionParameters, timing: MotionTiming, now: Duration) -> Self {
        log::info!(
            "[motion] start: fade-in {:?}, drift radius {:.3}, session {:?}",
            timing.fade_in,
            params.movement_radius,
            timing.session
        );
        let position = NormalizedPoint::from_polar(params.start_angle, NORMALIZED_BOUNDARY_RADIUS);
        Self {
            params,
            timing,
            started_at: now,
            elapsed: Duration::ZERO,
            position,
        }
    }

    pub fn params(&self) -> &MotionParameters {
        &self.params
    }

    pub fn position(&self) -> NormalizedPoint {
        self.position
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn phase(&self) -> MotionPhase {
        self.timing.phase_at(self.elapsed)
    }

    /// Advance to clock reading `now`. A reading earlier than the last one
    /// does not move time backwards.
    pub fn tick(&mut self, now: Duration) -> MotionTick {
        self.elapsed = self.elapsed.max(now.saturating_sub(self.started_at));
        let phase = self.timing.phase_at(self.elapsed);
        let (target, smoothing) = match phase {
            MotionPhase::Finished => return MotionTick::Finished,
            MotionPhase::FadeIn => (self.fade_in_target(), FADE_IN_SMOOTHING),
            MotionPhase::Sustain => (self.sustain_target(), SUSTAIN_SMOOTHING),
            MotionPhase::FadeOut => (self.fade_out_target(), FADE_OUT_SMOOTHING),
        };
        self.position = self.position.approach(target, smoothing);
        MotionTick::Moved {
            position: self.position,
            phase,
        }
    }

    fn fade_in_target(&self) -> NormalizedPoint {
        let t = self.elapsed.as_secs_f32() / self.timing.fade_in.as_secs_f32();
        let eased = smootherstep(t);
        let radius = NORMALIZED_BOUNDARY_RADIUS
            - (NORMALIZED_BOUNDARY_RADIUS - self.params.fade_in_radius) * eased;
        let angle = self.params.start_angle + self.params.spiral_rotation * eased;
        NormalizedPoint::from_polar(angle, radius)
    }

    fn sustain_target(&self) -> NormalizedPoint {
        let ms = self.elapsed.as_secs_f64() * 1000.0;
        let r = self.params.movement_radius;
        NormalizedPoint::new(
            0.5 + drift(&self.params.drift_x, ms) * r,
            0.5 + drift(&self.params.drift_y, ms) * r,
        )
    }

    fn fade_out_target(&self) -> NormalizedPoint {
        let into = self.elapsed.saturating_sub(self.timing.fade_out_start());
        let eased = smootherstep(into.as_secs_f32() / self.timing.fade_out.as_secs_f32());
        let radius = self.position.radius();
        let new_radius = radius + (NORMALIZED_BOUNDARY_RADIUS - radius) * eased;
        let angle = self.position.angle();
        let new_angle = angle + wrap_angle(self.params.exit_angle - angle) * eased;
        NormalizedPoint::from_polar(new_angle, new_radius)
    }
}
