//! Control-surface geometry shared by the mapper, the autopilot and pointer input.
//!
//! Positions travel through the system in normalized coordinates: both axes in
//! `[0, 1]`, `(0.5, 0.5)` at the center and the boundary circle at radius 0.5.
//! The mapper converts them to surface pixels, where the proximity constants
//! are expressed.

use crate::constants::{
    ANCHOR_RADIUS_RATIO, INNER_RADIUS_RATIO, NORMALIZED_BOUNDARY_RADIUS, NORMALIZED_CENTER,
    OUTER_RADIUS_RATIO, SURFACE_SIZE_PX,
};
use glam::Vec2;

/// A controller position in normalized surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedPoint {
    pub x: f32,
    pub y: f32,
}

impl NormalizedPoint {
    pub const CENTER: Self = Self {
        x: NORMALIZED_CENTER,
        y: NORMALIZED_CENTER,
    };

    /// Top of the boundary circle; maps to complete silence.
    pub const BOUNDARY_TOP: Self = Self {
        x: NORMALIZED_CENTER,
        y: NORMALIZED_CENTER - NORMALIZED_BOUNDARY_RADIUS,
    };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from the center along `angle` (radians, screen orientation).
    pub fn from_polar(angle: f32, radius: f32) -> Self {
        Self {
            x: NORMALIZED_CENTER + angle.cos() * radius,
            y: NORMALIZED_CENTER + angle.sin() * radius,
        }
    }

    /// Signed offset from the center.
    #[inline]
    pub fn offset(self) -> Vec2 {
        Vec2::new(self.x - NORMALIZED_CENTER, self.y - NORMALIZED_CENTER)
    }

    #[inline]
    pub fn radius(self) -> f32 {
        self.offset().length()
    }

    #[inline]
    pub fn angle(self) -> f32 {
        let o = self.offset();
        o.y.atan2(o.x)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Project a point outside the boundary disc radially back onto the
    /// boundary, keeping its angle. Points inside are returned unchanged.
    pub fn clamp_to_disc(self) -> Self {
        if self.radius() > NORMALIZED_BOUNDARY_RADIUS {
            Self::from_polar(self.angle(), NORMALIZED_BOUNDARY_RADIUS)
        } else {
            self
        }
    }

    /// Move a fraction `t` of the way toward `target`.
    #[inline]
    pub fn approach(self, target: Self, t: f32) -> Self {
        Self {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
        }
    }
}

impl Default for NormalizedPoint {
    fn default() -> Self {
        Self::BOUNDARY_TOP
    }
}

/// Pixel dimensions of the circular control surface.
///
/// - `size_px`: side of the square surface
/// - `outer_radius_px`: boundary circle; the mix is silent at or beyond it
/// - `anchor_radius_px`: circle the nine anchors sit on
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceGeometry {
    pub size_px: f32,
    pub outer_radius_px: f32,
    pub anchor_radius_px: f32,
}

impl SurfaceGeometry {
    pub fn center_px(&self) -> Vec2 {
        Vec2::splat(self.size_px / 2.0)
    }

    /// Convert a normalized point to surface pixels. The normalized boundary
    /// radius lands exactly on `outer_radius_px`.
    pub fn to_surface(&self, p: NormalizedPoint) -> Vec2 {
        let scale = self.outer_radius_px / NORMALIZED_BOUNDARY_RADIUS;
        self.center_px() + p.offset() * scale
    }
}

impl Default for SurfaceGeometry {
    fn default() -> Self {
        let inner = SURFACE_SIZE_PX * INNER_RADIUS_RATIO;
        Self {
            size_px: SURFACE_SIZE_PX,
            outer_radius_px: SURFACE_SIZE_PX * OUTER_RADIUS_RATIO,
            anchor_radius_px: inner * ANCHOR_RADIUS_RATIO,
        }
    }
}
