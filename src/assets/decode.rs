use std::path::Path;

use anyhow::Context;

use crate::assets::{Raster, SourceImage};
use crate::foundation::error::{SpinError, SpinResult};

/// Display name of the built-in fallback raster.
pub const DEFAULT_IMAGE_NAME: &str = "default";
const DEFAULT_IMAGE_EDGE: u32 = 64;

/// Decode encoded image bytes into straight RGBA8.
pub fn decode_image(bytes: &[u8], name: impl Into<String>) -> SpinResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| SpinError::asset(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(SpinError::asset("decoded image has zero size"));
    }

    Ok(SourceImage {
        name: name.into(),
        raster: Raster::from_rgba8(width, height, rgba.into_raw())?,
    })
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> SpinResult<SourceImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    decode_image(&bytes, name)
}

/// Load `path`, or fall back to the built-in raster when it is absent or unreadable.
///
/// A broken upload never fails regeneration; it is logged and replaced.
pub fn load_image_or_default(path: Option<&Path>) -> SourceImage {
    let Some(path) = path else {
        return default_image();
    };
    match load_image(path) {
        Ok(img) => {
            tracing::debug!(
                name = %img.name,
                width = img.raster.width,
                height = img.raster.height,
                "loaded source image"
            );
            img
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "falling back to default image");
            default_image()
        }
    }
}

/// Built-in white arrowhead pointing up, so outward orientation stays visible.
pub fn default_image() -> SourceImage {
    let edge = DEFAULT_IMAGE_EDGE;
    let mut rgba = vec![0u8; (edge * edge * 4) as usize];

    let apex = (f64::from(edge) / 2.0, 4.0);
    let left = (4.0, f64::from(edge) - 4.0);
    let right = (f64::from(edge) - 4.0, f64::from(edge) - 4.0);
    let notch = (f64::from(edge) / 2.0, f64::from(edge) * 0.7);

    for y in 0..edge {
        for x in 0..edge {
            let p = (f64::from(x) + 0.5, f64::from(y) + 0.5);
            let inside = in_triangle(p, apex, left, notch) || in_triangle(p, apex, notch, right);
            if inside {
                let idx = ((y * edge + x) * 4) as usize;
                rgba[idx..idx + 4].copy_from_slice(&[255, 255, 255, 255]);
            }
        }
    }

    SourceImage {
        name: DEFAULT_IMAGE_NAME.to_owned(),
        raster: Raster {
            width: edge,
            height: edge,
            rgba8: std::sync::Arc::new(rgba),
        },
    }
}

fn in_triangle(p: (f64, f64), a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> bool {
    fn cross(o: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
        (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
    }
    let d1 = cross(p, a, b);
    let d2 = cross(p, b, c);
    let d3 = cross(p, c, a);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
