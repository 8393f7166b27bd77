//! Position to per-track volume mapping.
//!
//! The controller's distance to each of the nine anchors is turned into an
//! inverse-cube weighted share of a loudness budget. The budget shrinks
//! linearly from the center to zero at the boundary circle, and a solo blend
//! takes over inside a small radius around each anchor.

use crate::constants::{
    ANCHOR_SPACING_DEG, NORMALIZED_BOUNDARY_RADIUS, PROXIMITY_EPSILON_PX, PROXIMITY_EXPONENT,
    SOLO_SUPPRESSION, SOLO_THRESHOLD_PX, SOLO_VOLUME, TRACK_COUNT, VOLUME_CEILING,
};
use crate::geometry::{NormalizedPoint, SurfaceGeometry};
use glam::Vec2;

/// One volume per track, in percent. Mapper output never exceeds 80.
pub type TrackVolumes = [u8; TRACK_COUNT];

pub const SILENCE: TrackVolumes = [0; TRACK_COUNT];

/// The nine fixed anchor points, in surface pixels, indexed by track ordinal.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorSet {
    geometry: SurfaceGeometry,
    points: [Vec2; TRACK_COUNT],
}

impl AnchorSet {
    /// Lay the anchors out at equal angular spacing starting from the top.
    pub fn new(geometry: SurfaceGeometry) -> Self {
        let center = geometry.center_px();
        let points = std::array::from_fn(|i| {
            let angle = (i as f32 * ANCHOR_SPACING_DEG - 90.0).to_radians();
            center + Vec2::new(angle.cos(), angle.sin()) * geometry.anchor_radius_px
        });
        Self { geometry, points }
    }

    pub fn geometry(&self) -> &SurfaceGeometry {
        &self.geometry
    }

    pub fn points(&self) -> &[Vec2; TRACK_COUNT] {
        &self.points
    }

    /// Normalized position of anchor `index`, for placing the controller on it.
    pub fn normalized(&self, index: usize) -> NormalizedPoint {
        let scale = NORMALIZED_BOUNDARY_RADIUS / self.geometry.outer_radius_px;
        let offset = (self.points[index] - self.geometry.center_px()) * scale;
        NormalizedPoint::new(0.5 + offset.x, 0.5 + offset.y)
    }
}

impl Default for AnchorSet {
    fn default() -> Self {
        Self::new(SurfaceGeometry::default())
    }
}

/// Map a controller position to nine volumes in `[0, 80]`.
///
/// Silent at or beyond the boundary circle; continuous everywhere inside it.
/// When two anchors are equally nearest, the lower index takes the solo blend.
pub fn map_volumes(p: NormalizedPoint, anchors: &AnchorSet) -> TrackVolumes {
    debug_assert!(p.is_finite(), "controller position must be finite: {p:?}");

    let r = p.radius();
    if r >= NORMALIZED_BOUNDARY_RADIUS {
        return SILENCE;
    }

    let controller = anchors.geometry.to_surface(p);
    let distances: [f32; TRACK_COUNT] =
        std::array::from_fn(|i| controller.distance(anchors.points[i]));

    let weights: [f32; TRACK_COUNT] = std::array::from_fn(|i| {
        1.0 / (distances[i] + PROXIMITY_EPSILON_PX).powi(PROXIMITY_EXPONENT)
    });
    let weight_sum: f32 = weights.iter().sum();

    let edge_proximity = 1.0 - r / NORMALIZED_BOUNDARY_RADIUS;
    let budget = VOLUME_CEILING * edge_proximity;
    let mut raw: [f32; TRACK_COUNT] = std::array::from_fn(|i| budget * weights[i] / weight_sum);

    // strict `<` keeps the first (lowest index) anchor on ties
    let (nearest, d_min) = distances
        .iter()
        .copied()
        .enumerate()
        .fold((0usize, f32::MAX), |best, (i, d)| if d < best.1 { (i, d) } else { best });

    if d_min < SOLO_THRESHOLD_PX {
        let blend = 1.0 - d_min / SOLO_THRESHOLD_PX;
        for (i, v) in raw.iter_mut().enumerate() {
            if i == nearest {
                *v = *v * (1.0 - blend) + SOLO_VOLUME * blend;
            } else {
                *v *= 1.0 - SOLO_SUPPRESSION * blend;
            }
        }
    }

    raw.map(|v| v.clamp(0.0, VOLUME_CEILING).round() as u8)
}
