//! Gradient/layout engine.
//!
//! Everything here is a pure function of an [`AnimationConfig`] (and, for sprites, a decoded
//! source image). Results are recomputed from scratch on every regeneration.

pub(crate) mod gradient;
pub(crate) mod layout;
pub(crate) mod rotation;
pub(crate) mod sprites;

use serde::Serialize;

use crate::assets::SourceImage;
use crate::assets::decode::{default_image, load_image_or_default};
use crate::config::{AnimationConfig, VisualDescriptor};
use crate::engine::layout::{RingLayout, slot_angle};
use crate::engine::sprites::SpriteSet;

/// One ring element: its interpolated visual and its fixed slot angle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ElementState {
    /// Element index, `0..element_count`.
    pub index: u32,
    /// Fixed slot angle in radians.
    pub angle: f64,
    /// Interpolated visual.
    pub visual: VisualDescriptor,
}

/// Compute the ordered element states for a sanitized config.
#[tracing::instrument(skip(cfg), fields(elements = cfg.element_count, head = cfg.head_count))]
pub fn compute_element_states(cfg: &AnimationConfig) -> Vec<ElementState> {
    let rotation = cfg.rotation_radians();
    (0..cfg.element_count)
        .map(|index| ElementState {
            index,
            angle: slot_angle(index, cfg.element_count, rotation),
            visual: gradient::visual_at(cfg, index),
        })
        .collect()
}

/// Everything one regeneration derives from a config: layout, states and sprites.
#[derive(Clone, Debug)]
pub struct Scene {
    config: AnimationConfig,
    layout: RingLayout,
    states: Vec<ElementState>,
    sprites: Option<SpriteSet>,
}

impl Scene {
    /// Derive a scene from `cfg`, using `source` for image elements.
    ///
    /// With an image layer and no source, the built-in default raster is used. The config is
    /// sanitized first, so any snapshot from the boundary is accepted.
    pub fn prepare(cfg: AnimationConfig, source: Option<&SourceImage>) -> Self {
        let config = cfg.sanitized();
        let layout = RingLayout::from_config(&config);
        let states = compute_element_states(&config);
        let sprites = config.image.as_ref().map(|_| match source {
            Some(src) => SpriteSet::prepare(&config, &states, src),
            None => SpriteSet::prepare(&config, &states, &default_image()),
        });
        Self {
            config,
            layout,
            states,
            sprites,
        }
    }

    /// Derive a scene, loading the image layer's source from disk (with fallback).
    pub fn load(cfg: AnimationConfig) -> Self {
        let source = cfg
            .image
            .as_ref()
            .map(|img| load_image_or_default(img.path.as_deref()));
        Self::prepare(cfg, source.as_ref())
    }

    /// Sanitized config the scene was built from.
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Fixed ring geometry.
    pub fn layout(&self) -> &RingLayout {
        &self.layout
    }

    /// Element states in index order.
    pub fn states(&self) -> &[ElementState] {
        &self.states
    }

    /// Image sprites, when the scene draws images instead of circles.
    pub fn sprites(&self) -> Option<&SpriteSet> {
        self.sprites.as_ref()
    }

    /// Number of distinct steps before the animation repeats.
    pub fn step_count(&self) -> usize {
        self.states.len().max(1)
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine/states.rs"]
mod tests;
