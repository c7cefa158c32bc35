use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{SpinError, SpinResult};
use crate::render::FrameRGBA;

/// File name for frame `index` of a packaging run: `<stem>_<timestamp>_<index>.png`.
pub fn frame_file_name(stem: &str, timestamp: u64, index: u32) -> String {
    format!("{stem}_{timestamp}_{index}.png")
}

/// Writes every frame as its own PNG file in a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    out_dir: PathBuf,
    stem: String,
    timestamp: u64,
    cfg: Option<SinkConfig>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Write into `out_dir`; file names share `stem` and `timestamp`.
    pub fn new(out_dir: impl Into<PathBuf>, stem: impl Into<String>, timestamp: u64) -> Self {
        Self {
            out_dir: out_dir.into(),
            stem: stem.into(),
            timestamp,
            cfg: None,
            written: Vec::new(),
        }
    }

    /// Paths written so far, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> SpinResult<()> {
        cfg.validate()?;
        if self.stem.is_empty() {
            return Err(SpinError::validation("png sequence stem must not be empty"));
        }
        std::fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("create frame directory '{}'", self.out_dir.display()))?;
        self.cfg = Some(cfg);
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: u32, frame: &FrameRGBA, _delay_ms: f64) -> SpinResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| SpinError::encode("png sequence sink not started"))?;
        cfg.check_frame(idx, frame)?;
        let path = self
            .out_dir
            .join(frame_file_name(&self.stem, self.timestamp, idx));
        write_png(&path, frame)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> SpinResult<()> {
        let cfg = self
            .cfg
            .take()
            .ok_or_else(|| SpinError::encode("png sequence sink not started"))?;
        tracing::debug!(
            frames = self.written.len(),
            expected = cfg.frame_count,
            dir = %self.out_dir.display(),
            "wrote png frames"
        );
        Ok(())
    }
}

/// Save one frame as a straight-alpha PNG.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> SpinResult<()> {
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| SpinError::encode(format!("write '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png_frames.rs"]
mod tests;
