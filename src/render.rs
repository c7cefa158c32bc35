//! Compositor and frame emitter.

pub(crate) mod cpu;
pub(crate) mod pipeline;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{SpinError, SpinResult};
use crate::foundation::math::Fnv1a64;

/// A rendered frame as RGBA8 pixels.
///
/// Frames produced by the rasterizer are **premultiplied alpha**; the flag makes this explicit at
/// API boundaries. Encoders convert to straight alpha with [`FrameRGBA::to_straight_rgba8`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixels.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            let p = Rgba8Premul {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            };
            out.extend_from_slice(&p.to_straight_rgba());
        }
        out
    }

    /// Raw pixel at `(x, y)` in the frame's own alpha convention.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Ordered frames plus a parallel list of per-frame delays.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationSequence {
    frames: Vec<FrameRGBA>,
    delays_ms: Vec<f64>,
}

impl AnimationSequence {
    /// Pair frames with delays, checking lengths and frame dimensions.
    pub fn new(frames: Vec<FrameRGBA>, delays_ms: Vec<f64>) -> SpinResult<Self> {
        if frames.is_empty() {
            return Err(SpinError::validation("animation sequence needs at least one frame"));
        }
        if frames.len() != delays_ms.len() {
            return Err(SpinError::validation(format!(
                "frame count {} does not match delay count {}",
                frames.len(),
                delays_ms.len()
            )));
        }
        let (w, h) = (frames[0].width, frames[0].height);
        if frames.iter().any(|f| f.width != w || f.height != h) {
            return Err(SpinError::validation(
                "all frames in a sequence must share one size",
            ));
        }
        Ok(Self { frames, delays_ms })
    }

    /// Frames in playback order.
    pub fn frames(&self) -> &[FrameRGBA] {
        &self.frames
    }

    /// Per-frame delays in milliseconds, parallel to [`Self::frames`].
    pub fn delays_ms(&self) -> &[f64] {
        &self.delays_ms
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false` for a constructed sequence; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Common frame width and height.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.frames[0].width, self.frames[0].height)
    }

    /// Sum of all delays.
    pub fn total_duration_ms(&self) -> f64 {
        self.delays_ms.iter().sum()
    }

    /// Stable 64-bit digest of every pixel and delay.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        for (frame, delay) in self.frames.iter().zip(&self.delays_ms) {
            h.write_u32(frame.width);
            h.write_u32(frame.height);
            h.write_bytes(&frame.data);
            h.write_bytes(&delay.to_bits().to_le_bytes());
        }
        h.finish()
    }
}

#[cfg(test)]
#[path = "../tests/unit/render/sequence.rs"]
mod tests;
