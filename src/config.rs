//! Animation parameter snapshot.
//!
//! An [`AnimationConfig`] is rebuilt wholesale whenever any parameter changes; the engine never
//! observes a partially edited config. Numeric fields are clamped once at the boundary through
//! [`AnimationConfig::sanitized`], after which the engine assumes valid input.

pub(crate) mod color;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgb8;
use crate::foundation::error::{SpinError, SpinResult};

/// Upper bound on the number of ring elements accepted at the boundary.
pub const MAX_ELEMENTS: u32 = 720;
/// Upper bound on the square container edge, in pixels.
pub const MAX_CONTAINER_SIZE: u32 = 4096;
/// Lower bound on the per-step duration, in milliseconds.
pub const MIN_STEP_MS: f64 = 1.0;

/// One gradient endpoint.
///
/// For plain circles `color`/`alpha` are the fill; for image elements they are the tint color
/// and tint strength. `opacity` scales the whole element layer in both cases.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualDescriptor {
    /// Fill or tint color.
    pub color: Rgb8,
    /// Fill alpha or tint alpha in `[0, 1]`.
    pub alpha: f64,
    /// Element layer opacity in `[0, 1]`.
    pub opacity: f64,
    /// Element diameter (circles) or larger image dimension, in pixels.
    pub size: f64,
}

impl Default for VisualDescriptor {
    fn default() -> Self {
        Self {
            color: Rgb8::WHITE,
            alpha: 1.0,
            opacity: 1.0,
            size: 50.0,
        }
    }
}

impl VisualDescriptor {
    /// Convenience constructor for an opaque descriptor.
    pub fn solid(color: Rgb8, size: f64) -> Self {
        Self {
            color,
            alpha: 1.0,
            opacity: 1.0,
            size,
        }
    }

    fn sanitized(self) -> Self {
        Self {
            color: self.color,
            alpha: clamp_unit(self.alpha),
            opacity: clamp_unit(self.opacity),
            size: finite_or(self.size, 0.0).clamp(0.0, f64::from(MAX_CONTAINER_SIZE) * 2.0),
        }
    }
}

/// How a source image is recolored per element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Alpha-blend the tint over the original pixel colors.
    #[default]
    Original,
    /// Replace every visible pixel with the flat tint color.
    Silhouette,
}

/// How image elements are oriented around the ring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationMode {
    /// Every element keeps the source image's upright orientation.
    #[default]
    Fixed,
    /// Every element is rotated so its local "up" points away from the ring center.
    Center,
}

/// Image-backed element settings. Without this layer the ring is drawn as plain circles.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageLayer {
    /// Path of the source raster. `None` selects the built-in default raster.
    pub path: Option<PathBuf>,
    /// Recoloring mode.
    pub color_mode: ColorMode,
    /// Orientation mode.
    pub orientation: OrientationMode,
}

/// Optional fixed-color outline drawn under image elements.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineSpec {
    /// Whether the outline layer is produced at all.
    pub enabled: bool,
    /// Outline color.
    pub color: Rgb8,
    /// Outline width in pixels, measured at the largest element size.
    pub width: f64,
}

impl Default for OutlineSpec {
    fn default() -> Self {
        Self {
            enabled: false,
            color: Rgb8::BLACK,
            width: 2.0,
        }
    }
}

/// Immutable per-regeneration parameter snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Number of ring elements (`>= 1`).
    pub element_count: u32,
    /// Number of elements spanned by the gradient head (`1..=element_count`).
    pub head_count: u32,
    /// Square container edge in pixels.
    pub container_size: u32,
    /// Margin as a percentage of the container, `0..=100`.
    pub margin_percent: f64,
    /// Global ring rotation in degrees, wrapped into `[0, 360)`.
    pub rotation_degrees: f64,
    /// Duration of one rotation step in milliseconds.
    pub step_duration_ms: f64,
    /// Full loop duration in milliseconds. When set, it overrides `step_duration_ms`.
    pub loop_duration_ms: Option<f64>,
    /// Gradient start visual (element 0).
    pub start: VisualDescriptor,
    /// Gradient end visual (element `head_count - 1` and the flat tail).
    pub end: VisualDescriptor,
    /// Image-backed element settings.
    pub image: Option<ImageLayer>,
    /// Outline settings.
    pub outline: Option<OutlineSpec>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            element_count: 8,
            head_count: 8,
            container_size: 300,
            margin_percent: 0.0,
            rotation_degrees: 0.0,
            step_duration_ms: 400.0,
            loop_duration_ms: None,
            start: VisualDescriptor::solid(Rgb8::new(50, 50, 50), 50.0),
            end: VisualDescriptor::solid(Rgb8::new(200, 200, 200), 50.0),
            image: None,
            outline: None,
        }
    }
}

impl AnimationConfig {
    /// Parse a JSON config and clamp it into the valid range.
    pub fn from_json_str(s: &str) -> SpinResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| SpinError::serde(e.to_string()))?;
        Ok(cfg.sanitized())
    }

    /// Read a JSON config file and clamp it into the valid range.
    pub fn from_path(path: &Path) -> SpinResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> SpinResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SpinError::serde(e.to_string()))
    }

    /// Clamp every numeric field into its documented range.
    ///
    /// This is the only place invalid numbers are handled; downstream code assumes the result.
    pub fn sanitized(mut self) -> Self {
        self.element_count = self.element_count.clamp(1, MAX_ELEMENTS);
        self.head_count = self.head_count.clamp(1, self.element_count);
        self.container_size = self.container_size.clamp(1, MAX_CONTAINER_SIZE);
        self.margin_percent = finite_or(self.margin_percent, 0.0).clamp(0.0, 100.0);
        self.rotation_degrees = finite_or(self.rotation_degrees, 0.0).rem_euclid(360.0);
        self.step_duration_ms = finite_or(self.step_duration_ms, MIN_STEP_MS).max(MIN_STEP_MS);
        self.loop_duration_ms = self
            .loop_duration_ms
            .filter(|v| v.is_finite())
            .map(|v| v.max(MIN_STEP_MS));
        self.start = self.start.sanitized();
        self.end = self.end.sanitized();
        if let Some(outline) = self.outline.as_mut() {
            outline.width = finite_or(outline.width, 0.0).clamp(0.0, f64::from(MAX_CONTAINER_SIZE));
        }
        self
    }

    /// Outline settings when the outline is switched on.
    pub fn active_outline(&self) -> Option<&OutlineSpec> {
        self.outline.as_ref().filter(|o| o.enabled)
    }

    /// Full loop time in milliseconds.
    pub fn loop_time_ms(&self) -> f64 {
        self.loop_duration_ms
            .unwrap_or(self.step_duration_ms * f64::from(self.element_count.max(1)))
    }

    /// Delay between two consecutive steps, in milliseconds.
    pub fn step_interval_ms(&self) -> f64 {
        let loop_time = self.loop_time_ms();
        if self.element_count > 1 {
            loop_time / f64::from(self.element_count)
        } else {
            loop_time
        }
    }

    /// Global rotation in radians.
    pub fn rotation_radians(&self) -> f64 {
        self.rotation_degrees.to_radians()
    }
}

fn clamp_unit(x: f64) -> f64 {
    finite_or(x, 1.0).clamp(0.0, 1.0)
}

fn finite_or(x: f64, fallback: f64) -> f64 {
    if x.is_finite() { x } else { fallback }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
