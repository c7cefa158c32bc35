use crate::config::{AnimationConfig, VisualDescriptor};
use crate::foundation::core::Rgb8;
use crate::foundation::math::{lerp, lerp_channel};

/// Number of leading elements that interpolate between `start` and `end`.
pub fn gradient_length(element_count: u32, head_count: u32) -> u32 {
    element_count.min(head_count)
}

/// Interpolation ratio of element `index` within a gradient of `len` elements.
///
/// A gradient of length 0 or 1 always yields ratio 0.
pub fn gradient_ratio(index: u32, len: u32) -> f64 {
    if len <= 1 {
        return 0.0;
    }
    f64::from(index) / f64::from(len - 1)
}

/// Interpolate every numeric field of two descriptors independently.
///
/// Color channels are rounded to the nearest integer; alpha, opacity and size stay real.
pub fn interpolate(start: &VisualDescriptor, end: &VisualDescriptor, t: f64) -> VisualDescriptor {
    VisualDescriptor {
        color: Rgb8::new(
            lerp_channel(start.color.r, end.color.r, t),
            lerp_channel(start.color.g, end.color.g, t),
            lerp_channel(start.color.b, end.color.b, t),
        ),
        alpha: lerp(start.alpha, end.alpha, t),
        opacity: lerp(start.opacity, end.opacity, t),
        size: lerp(start.size, end.size, t),
    }
}

/// Visual of element `index`: interpolated inside the head, the exact end visual in the tail.
pub fn visual_at(cfg: &AnimationConfig, index: u32) -> VisualDescriptor {
    let len = gradient_length(cfg.element_count, cfg.head_count);
    if index >= len {
        return cfg.end;
    }
    interpolate(&cfg.start, &cfg.end, gradient_ratio(index, len))
}

#[cfg(test)]
#[path = "../../tests/unit/engine/gradient.rs"]
mod tests;
