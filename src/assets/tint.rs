use crate::assets::Raster;
use crate::config::{ColorMode, VisualDescriptor};
use crate::foundation::core::{Rgb8, unit_to_u8};
use crate::foundation::math::mul_div255_u16;

/// Structural cache key for a tinted raster: exact RGB plus alpha rounded to two decimals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TintKey {
    /// Tint color.
    pub color: Rgb8,
    /// Tint alpha in hundredths, `0..=100`.
    pub alpha_centi: u8,
}

impl TintKey {
    /// Key of the tint carried by `visual`.
    pub fn of(visual: &VisualDescriptor) -> Self {
        let centi = if visual.alpha.is_finite() {
            (visual.alpha.clamp(0.0, 1.0) * 100.0).round() as u8
        } else {
            0
        };
        Self {
            color: visual.color,
            alpha_centi: centi,
        }
    }

    /// Quantized tint alpha in `[0, 1]`.
    pub fn alpha(self) -> f64 {
        f64::from(self.alpha_centi) / 100.0
    }
}

/// Recolor `src` for one tint key.
pub fn apply_tint(src: &Raster, key: TintKey, mode: ColorMode) -> Raster {
    let mut out = src.rgba8.as_ref().clone();
    match mode {
        ColorMode::Silhouette => silhouette_in_place(&mut out, key.color),
        ColorMode::Original => blend_tint_in_place(&mut out, key.color, key.alpha()),
    }
    Raster {
        width: src.width,
        height: src.height,
        rgba8: std::sync::Arc::new(out),
    }
}

/// Replace the color of every pixel with nonzero alpha by `tint`, keeping its alpha.
pub fn silhouette_in_place(rgba: &mut [u8], tint: Rgb8) {
    for px in rgba.chunks_exact_mut(4) {
        if px[3] == 0 {
            continue;
        }
        px[0] = tint.r;
        px[1] = tint.g;
        px[2] = tint.b;
    }
}

/// `out = tint * alpha + original * (1 - alpha)` for every pixel with nonzero alpha.
///
/// Fully transparent pixels are left untouched.
pub fn blend_tint_in_place(rgba: &mut [u8], tint: Rgb8, alpha: f64) {
    let ta = u16::from(unit_to_u8(alpha));
    if ta == 0 {
        return;
    }
    let ia = 255 - ta;
    let tint = [tint.r, tint.g, tint.b];
    for px in rgba.chunks_exact_mut(4) {
        if px[3] == 0 {
            continue;
        }
        for (c, &t) in px[..3].iter_mut().zip(&tint) {
            let v = mul_div255_u16(u16::from(t), ta) + mul_div255_u16(u16::from(*c), ia);
            *c = v.min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/tint.rs"]
mod tests;
