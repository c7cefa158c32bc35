use std::f64::consts::{FRAC_PI_2, TAU};

use serde::Serialize;

use crate::config::AnimationConfig;
use crate::foundation::core::{Affine, Point, Vec2};

/// Fixed ring geometry for one regeneration.
///
/// Slot angles and centers never change while the animation runs; only the visual assigned to
/// each slot rotates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RingLayout {
    /// Square container edge in pixels.
    pub container_size: u32,
    /// Number of slots on the ring.
    pub element_count: u32,
    /// Largest element footprint, outline included.
    pub max_element_size: f64,
    /// Distance from the container center to every slot center.
    pub radius: f64,
    /// Global rotation offset in radians.
    pub rotation: f64,
    /// Whether elements turn to face outward.
    pub orient_outward: bool,
}

impl RingLayout {
    /// Derive the ring geometry from a sanitized config.
    pub fn from_config(cfg: &AnimationConfig) -> Self {
        let max_element_size = max_element_size(cfg);
        let orient_outward = cfg
            .image
            .as_ref()
            .is_some_and(|img| img.orientation == crate::config::OrientationMode::Center);
        Self {
            container_size: cfg.container_size,
            element_count: cfg.element_count,
            max_element_size,
            radius: orbit_radius(
                f64::from(cfg.container_size),
                max_element_size,
                cfg.margin_percent,
            ),
            rotation: cfg.rotation_radians(),
            orient_outward,
        }
    }

    /// Container center.
    pub fn center(&self) -> Point {
        let half = f64::from(self.container_size) / 2.0;
        Point::new(half, half)
    }

    /// Angle of slot `index`.
    pub fn slot_angle(&self, index: u32) -> f64 {
        slot_angle(index, self.element_count, self.rotation)
    }

    /// Center of slot `index` in container pixels.
    pub fn slot_center(&self, index: u32) -> Point {
        let angle = self.slot_angle(index);
        self.center() + Vec2::new(self.radius * angle.cos(), self.radius * angle.sin())
    }

    /// Per-element rotation for slot `index`: outward-facing or none.
    pub fn element_rotation(&self, index: u32) -> f64 {
        if self.orient_outward {
            self.slot_angle(index) + FRAC_PI_2
        } else {
            0.0
        }
    }

    /// Transform placing a unit centered at the origin on slot `index`.
    pub fn slot_transform(&self, index: u32) -> Affine {
        Affine::translate(self.slot_center(index).to_vec2())
            * Affine::rotate(self.element_rotation(index))
    }
}

/// Largest element footprint: the bigger endpoint size plus the outline on both sides.
pub fn max_element_size(cfg: &AnimationConfig) -> f64 {
    let base = cfg.start.size.max(cfg.end.size);
    match cfg.active_outline() {
        Some(outline) => base + 2.0 * outline.width,
        None => base,
    }
}

/// Ring radius for a container, element footprint and margin percentage. Never negative.
pub fn orbit_radius(container: f64, max_element_size: f64, margin_percent: f64) -> f64 {
    let diameter = container - max_element_size - container * margin_percent / 100.0;
    let radius = diameter / 2.0;
    if radius.is_finite() { radius.max(0.0) } else { 0.0 }
}

/// Angle of slot `index` out of `count`, starting at the top and offset by `rotation`.
///
/// A zero `count` is degenerate and yields a single fixed angle of 0.
pub fn slot_angle(index: u32, count: u32, rotation: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    -(f64::from(index) / f64::from(count)) * TAU - FRAC_PI_2 + rotation
}

#[cfg(test)]
#[path = "../../tests/unit/engine/layout.rs"]
mod tests;
