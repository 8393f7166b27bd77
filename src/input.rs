use glam::Vec2;
use mixer_core::{NormalizedPoint, PresetId};

#[derive(Default, Clone, Copy)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
}

// ---------------- Pointer helpers ----------------

/// Map a pointer position (CSS pixels) over the surface element's bounding
/// box to a normalized point, projected radially onto the boundary circle
/// when it falls outside it.
#[inline]
pub fn surface_point(client: Vec2, rect_origin: Vec2, rect_size: Vec2) -> Option<NormalizedPoint> {
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return None;
    }
    let uv = (client - rect_origin) / rect_size;
    let p = NormalizedPoint::new(uv.x, uv.y);
    p.is_finite().then(|| p.clamp_to_disc())
}

/// CSS percentages placing the controller marker at `p` within the surface.
#[inline]
pub fn marker_percent(p: NormalizedPoint) -> (f32, f32) {
    (p.x * 100.0, p.y * 100.0)
}

// ---------------- Keyboard ----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    SelectPreset(PresetId),
    TogglePlay,
    ToggleAutopilot,
}

#[inline]
pub fn key_command(key: &str) -> Option<KeyCommand> {
    match key {
        " " => Some(KeyCommand::TogglePlay),
        "a" | "A" => Some(KeyCommand::ToggleAutopilot),
        _ => {
            let mut chars = key.chars();
            let digit = chars.next()?.to_digit(10)?;
            if chars.next().is_some() {
                return None;
            }
            PresetId::new(digit as u8).map(KeyCommand::SelectPreset)
        }
    }
}
