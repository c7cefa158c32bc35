use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::encode::write_sequence;
use crate::foundation::error::{SpinError, SpinResult};
use crate::render::{AnimationSequence, FrameRGBA};

/// Streaming APNG encoder over any writer. Loops forever.
pub struct ApngSink<W: Write> {
    out: Option<W>,
    writer: Option<png::Writer<W>>,
    cfg: Option<SinkConfig>,
    next_idx: u32,
}

impl<W: Write> ApngSink<W> {
    /// Encode into `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            writer: None,
            cfg: None,
            next_idx: 0,
        }
    }
}

impl<W: Write> FrameSink for ApngSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> SpinResult<()> {
        cfg.validate()?;
        let out = self
            .out
            .take()
            .ok_or_else(|| SpinError::encode("apng sink already started"))?;

        let mut encoder = png::Encoder::new(out, cfg.width, cfg.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .set_animated(cfg.frame_count, 0)
            .map_err(|e| SpinError::encode(format!("apng setup failed: {e}")))?;
        let writer = encoder
            .write_header()
            .map_err(|e| SpinError::encode(format!("apng header failed: {e}")))?;

        self.writer = Some(writer);
        self.cfg = Some(cfg);
        self.next_idx = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: u32, frame: &FrameRGBA, delay_ms: f64) -> SpinResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| SpinError::encode("apng sink not started"))?;
        if idx != self.next_idx {
            return Err(SpinError::encode(format!(
                "apng frames must arrive in order: expected {}, got {idx}",
                self.next_idx
            )));
        }
        cfg.check_frame(idx, frame)?;
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| SpinError::encode("apng sink not started"))?;

        let (num, den) = frame_delay(delay_ms);
        writer
            .set_frame_delay(num, den)
            .map_err(|e| SpinError::encode(format!("apng frame {idx} delay: {e}")))?;
        writer
            .set_blend_op(png::BlendOp::Source)
            .map_err(|e| SpinError::encode(format!("apng frame {idx} blend: {e}")))?;
        writer
            .write_image_data(&frame.to_straight_rgba8())
            .map_err(|e| SpinError::encode(format!("apng frame {idx} data: {e}")))?;

        self.next_idx += 1;
        Ok(())
    }

    fn end(&mut self) -> SpinResult<()> {
        let cfg = self
            .cfg
            .take()
            .ok_or_else(|| SpinError::encode("apng sink not started"))?;
        if self.next_idx != cfg.frame_count {
            return Err(SpinError::encode(format!(
                "apng expected {} frames, got {}",
                cfg.frame_count, self.next_idx
            )));
        }
        let writer = self
            .writer
            .take()
            .ok_or_else(|| SpinError::encode("apng sink not started"))?;
        writer
            .finish()
            .map_err(|e| SpinError::encode(format!("apng finish failed: {e}")))
    }
}

/// Encode a whole sequence into APNG bytes.
#[tracing::instrument(skip_all, fields(frames = seq.len()))]
pub fn encode_apng(seq: &AnimationSequence) -> SpinResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut sink = ApngSink::new(&mut bytes);
    write_sequence(seq, &mut sink)?;
    drop(sink);
    tracing::debug!(bytes = bytes.len(), "encoded apng");
    Ok(bytes)
}

/// Encode a sequence straight to an APNG file, creating parent directories.
pub fn write_apng_file(seq: &AnimationSequence, path: &Path) -> SpinResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("create apng file '{}'", path.display()))?;
    let mut sink = ApngSink::new(BufWriter::new(file));
    write_sequence(seq, &mut sink)
}

/// Frame delay as a `num / den` second fraction.
///
/// Millisecond precision while it fits in `u16`, centiseconds beyond.
pub(crate) fn frame_delay(delay_ms: f64) -> (u16, u16) {
    let ms = if delay_ms.is_finite() { delay_ms.max(0.0).round() } else { 0.0 };
    if ms <= f64::from(u16::MAX) {
        (ms as u16, 1000)
    } else {
        let cs = (ms / 10.0).round().min(f64::from(u16::MAX));
        (cs as u16, 100)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/apng.rs"]
mod tests;
