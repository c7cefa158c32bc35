use std::collections::HashMap;

use crate::assets::outline::dilate_silhouette;
use crate::assets::tint::{TintKey, apply_tint};
use crate::assets::{Raster, SourceImage};
use crate::config::{AnimationConfig, ColorMode, VisualDescriptor};
use crate::engine::ElementState;

/// Largest outline radius, as a multiple of the source's larger dimension.
///
/// Bounds the outline raster to three times the source extent per axis.
pub const MAX_OUTLINE_SCALE: f64 = 1.0;

/// Per-regeneration image rasters: one tinted raster per distinct tint, plus the outline.
#[derive(Clone, Debug)]
pub struct SpriteSet {
    source: SourceImage,
    color_mode: ColorMode,
    tints: HashMap<TintKey, Raster>,
    outline: Option<Raster>,
}

impl SpriteSet {
    /// Build every raster the element states can ask for.
    ///
    /// Elements sharing a [`TintKey`] share one raster. The outline depends only on the source
    /// silhouette and the outline settings, never on tint or size.
    pub fn prepare(cfg: &AnimationConfig, states: &[ElementState], source: &SourceImage) -> Self {
        let color_mode = cfg
            .image
            .as_ref()
            .map(|img| img.color_mode)
            .unwrap_or_default();

        let mut tints = HashMap::new();
        for state in states {
            tints
                .entry(TintKey::of(&state.visual))
                .or_insert_with_key(|key| apply_tint(&source.raster, *key, color_mode));
        }

        let outline = cfg.active_outline().and_then(|o| {
            let reference = cfg.start.size.max(cfg.end.size);
            if reference <= 0.0 {
                return None;
            }
            // Width is given in screen pixels at the largest element size.
            let max_dim = f64::from(source.raster.max_dim());
            let requested = o.width * max_dim / reference;
            let radius = requested.min(max_dim * MAX_OUTLINE_SCALE);
            if radius < requested {
                tracing::debug!(requested, radius, "outline radius clamped");
            }
            Some(dilate_silhouette(&source.raster, radius, o.color))
        });

        tracing::debug!(
            elements = states.len(),
            tints = tints.len(),
            outline = outline.is_some(),
            "prepared sprites"
        );

        Self {
            source: source.clone(),
            color_mode,
            tints,
            outline,
        }
    }

    /// Tinted raster for an element visual.
    pub fn tinted(&self, visual: &VisualDescriptor) -> Option<&Raster> {
        self.tints.get(&TintKey::of(visual))
    }

    /// Tinted rasters keyed by tint.
    pub fn tints(&self) -> &HashMap<TintKey, Raster> {
        &self.tints
    }

    /// Outline raster, when an outline is enabled.
    pub fn outline(&self) -> Option<&Raster> {
        self.outline.as_ref()
    }

    /// Source image the sprites were derived from.
    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    /// Recoloring mode in effect.
    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// Uniform scale mapping the larger source dimension onto `size` pixels.
    pub fn scale_for(&self, size: f64) -> f64 {
        let max_dim = self.source.raster.max_dim();
        if max_dim == 0 {
            return 0.0;
        }
        size / f64::from(max_dim)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/sprites.rs"]
mod tests;
