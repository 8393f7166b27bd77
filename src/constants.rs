// DOM hooks and front-end defaults.

// Elements
pub const SURFACE_ID: &str = "mixer-surface"; // circular control surface
pub const CONTROLLER_ID: &str = "controller"; // draggable marker inside the surface
pub const PLAY_BUTTON_ID: &str = "play-toggle";
pub const AUTOPILOT_BUTTON_ID: &str = "autopilot-toggle";
pub const PROGRESS_ID: &str = "load-progress";
pub const LOAD_ERROR_ID: &str = "load-error";

// CSS classes toggled on buttons
pub const ACTIVE_CLASS: &str = "active";
pub const MUTED_CLASS: &str = "muted";

// Audio
pub const AUDIO_BASE_PATH: &str = "/audio"; // {base}/{preset}/track-{n}.mp3
pub const MASTER_GAIN: f32 = 1.0;

#[inline]
pub fn preset_button_id(preset: u8) -> String {
    format!("preset-{}", preset)
}

#[inline]
pub fn track_toggle_id(track_id: u8) -> String {
    format!("track-{}-toggle", track_id)
}

#[inline]
pub fn track_volume_id(track_id: u8) -> String {
    format!("track-{}-volume", track_id)
}
