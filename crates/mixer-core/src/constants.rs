use std::time::Duration;

// Mixer tuning constants shared by the mapper, the autopilot and the mix graph.

// Track layout
pub const TRACK_COUNT: usize = 9;
pub const PRESET_COUNT: u8 = 7;
pub const ANCHOR_SPACING_DEG: f32 = 360.0 / TRACK_COUNT as f32; // 40 degrees

// Control surface (logical pixels)
pub const SURFACE_SIZE_PX: f32 = 600.0;
pub const OUTER_RADIUS_RATIO: f32 = 0.45; // boundary circle, relative to surface size
pub const INNER_RADIUS_RATIO: f32 = 0.38; // active zone, relative to surface size
pub const ANCHOR_RADIUS_RATIO: f32 = 0.85; // anchors, relative to the active zone

// Normalized surface: center (0.5, 0.5), boundary radius 0.5
pub const NORMALIZED_CENTER: f32 = 0.5;
pub const NORMALIZED_BOUNDARY_RADIUS: f32 = 0.5;

// Volume mapping
pub const VOLUME_CEILING: f32 = 80.0; // headroom below 100 for stacked loud tracks
pub const VOLUME_MAX: u8 = 100;
pub const PROXIMITY_EPSILON_PX: f32 = 5.0;
pub const PROXIMITY_EXPONENT: i32 = 3;
pub const SOLO_THRESHOLD_PX: f32 = 30.0;
pub const SOLO_VOLUME: f32 = 80.0;
pub const SOLO_SUPPRESSION: f32 = 0.9; // other tracks at the anchor keep 10%

// Autopilot timing
pub const SESSION_DURATION: Duration = Duration::from_secs(15 * 60);
pub const FADE_IN_DURATION: Duration = Duration::from_secs(45);
pub const FADE_OUT_DURATION: Duration = Duration::from_secs(10);
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);
pub const TICK_INTERVAL_MAX: Duration = Duration::from_millis(100);

// Autopilot smoothing (fraction of the remaining distance covered per tick)
pub const FADE_IN_SMOOTHING: f32 = 0.006;
pub const SUSTAIN_SMOOTHING: f32 = 0.008;
pub const FADE_OUT_SMOOTHING: f32 = 0.08;

// Autopilot randomization ranges (normalized units / radians)
pub const FADE_IN_TARGET_RADIUS_MIN: f32 = 0.20;
pub const FADE_IN_TARGET_RADIUS_MAX: f32 = 0.35;
pub const SPIRAL_ROTATION_MAX_RAD: f32 = std::f32::consts::PI * 0.75; // +/-135 degrees
pub const MOVEMENT_RADIUS_MIN: f32 = 0.25;
pub const MOVEMENT_RADIUS_MAX: f32 = 0.35;

// Sustain oscillators: base frequency (radians per millisecond) and amplitude band
pub const OSCILLATOR_BASE_FREQS: [f64; 3] = [8.0e-5, 1.5e-4, 2.5e-4];
pub const OSCILLATOR_FREQ_JITTER: f64 = 0.3; // +/-30%
pub const OSCILLATOR_AMP_BANDS: [(f32, f32); 3] = [(0.7, 1.0), (0.4, 0.6), (0.2, 0.4)];

// Gain automation and loading
pub const GAIN_RAMP: Duration = Duration::from_millis(100);
pub const LOAD_TIMEOUT: Duration = Duration::from_secs(15);
