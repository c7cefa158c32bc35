use std::sync::Arc;

pub(crate) mod decode;
pub(crate) mod outline;
pub(crate) mod tint;

/// Straight-alpha RGBA8 raster, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Straight (non-premultiplied) RGBA8 bytes.
    pub rgba8: Arc<Vec<u8>>,
}

impl Raster {
    /// Wrap raw straight RGBA8 bytes, checking the length against the dimensions.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> crate::SpinResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| crate::SpinError::validation("raster size overflow"))?;
        if rgba8.len() != expected {
            return Err(crate::SpinError::validation(format!(
                "raster byte length {} does not match {width}x{height}x4",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    /// The larger of width and height.
    pub fn max_dim(&self) -> u32 {
        self.width.max(self.height)
    }

    /// Alpha of pixel `(x, y)`.
    pub(crate) fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.rgba8[((y as usize) * (self.width as usize) + (x as usize)) * 4 + 3]
    }
}

/// A decoded source image plus the file name shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    /// Display name (file name, or `"default"` for the built-in raster).
    pub name: String,
    /// Decoded pixels.
    pub raster: Raster,
}
