use std::sync::Arc;

use crate::assets::Raster;
use crate::foundation::core::Rgb8;

/// Fixed-color dilation of `src`'s alpha silhouette.
///
/// Output is padded by `ceil(radius)` pixels on every side so the source stays centered. A pixel
/// is painted (fully opaque, `color`) when an opaque source pixel lies within `radius` of it,
/// measured center to center.
///
/// Runs a separable squared Euclidean distance transform over the padded grid, so the cost is
/// linear in the output area regardless of radius. Callers bound `radius`.
pub fn dilate_silhouette(src: &Raster, radius: f64, color: Rgb8) -> Raster {
    let radius = if radius.is_finite() { radius.max(0.0) } else { 0.0 };
    let pad = radius.ceil() as usize;
    let (sw, sh) = (src.width as usize, src.height as usize);
    let (ow, oh) = (sw + 2 * pad, sh + 2 * pad);

    let mut dist = vec![FAR; ow * oh];
    for sy in 0..sh {
        for sx in 0..sw {
            if src.alpha_at(sx as u32, sy as u32) != 0 {
                dist[(sy + pad) * ow + sx + pad] = 0.0;
            }
        }
    }

    let mut scratch = Edt1d::with_capacity(ow.max(oh));
    let mut line = vec![0.0; ow.max(oh)];

    for x in 0..ow {
        for y in 0..oh {
            line[y] = dist[y * ow + x];
        }
        scratch.run(&mut line[..oh]);
        for y in 0..oh {
            dist[y * ow + x] = line[y];
        }
    }
    for row in dist.chunks_exact_mut(ow) {
        scratch.run(row);
    }

    let r2 = radius * radius;
    let mut rgba = vec![0u8; dist.len() * 4];
    for (px, &d2) in rgba.chunks_exact_mut(4).zip(&dist) {
        if d2 <= r2 {
            px.copy_from_slice(&[color.r, color.g, color.b, 255]);
        }
    }

    Raster {
        width: ow as u32,
        height: oh as u32,
        rgba8: Arc::new(rgba),
    }
}

const FAR: f64 = 1e20;

/// Lower envelope of parabolas for one row or column, reused across lines.
struct Edt1d {
    src: Vec<f64>,
    v: Vec<usize>,
    z: Vec<f64>,
}

impl Edt1d {
    fn with_capacity(n: usize) -> Self {
        Self {
            src: Vec::with_capacity(n),
            v: vec![0; n],
            z: vec![0.0; n + 1],
        }
    }

    /// Replace `f` with its squared distance transform in place.
    fn run(&mut self, f: &mut [f64]) {
        let n = f.len();
        if n == 0 {
            return;
        }
        self.src.clear();
        self.src.extend_from_slice(f);
        let src = &self.src;
        let (v, z) = (&mut self.v, &mut self.z);

        let mut k = 0usize;
        v[0] = 0;
        z[0] = f64::NEG_INFINITY;
        z[1] = f64::INFINITY;
        for q in 1..n {
            let qf = q as f64;
            let intersect = |p: usize| {
                let pf = p as f64;
                ((src[q] + qf * qf) - (src[p] + pf * pf)) / (2.0 * (qf - pf))
            };
            // z[0] is -inf, so this stops at k == 0.
            let mut s = intersect(v[k]);
            while s <= z[k] {
                k -= 1;
                s = intersect(v[k]);
            }
            k += 1;
            v[k] = q;
            z[k] = s;
            z[k + 1] = f64::INFINITY;
        }

        let mut k = 0usize;
        for (q, out) in f.iter_mut().enumerate() {
            let qf = q as f64;
            while z[k + 1] < qf {
                k += 1;
            }
            let d = qf - v[k] as f64;
            *out = d * d + src[v[k]];
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/outline.rs"]
mod tests;
