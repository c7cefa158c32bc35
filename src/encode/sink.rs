use crate::foundation::error::{SpinError, SpinResult};
use crate::render::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Number of frames that will be pushed.
    pub frame_count: u32,
}

impl SinkConfig {
    pub(crate) fn validate(&self) -> SpinResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SpinError::validation("sink width/height must be non-zero"));
        }
        if self.frame_count == 0 {
            return Err(SpinError::validation("sink frame_count must be non-zero"));
        }
        Ok(())
    }

    pub(crate) fn check_frame(&self, idx: u32, frame: &FrameRGBA) -> SpinResult<()> {
        if idx >= self.frame_count {
            return Err(SpinError::encode(format!(
                "frame index {idx} out of range for {} frames",
                self.frame_count
            )));
        }
        if frame.width != self.width || frame.height != self.height {
            return Err(SpinError::encode(format!(
                "frame {idx} is {}x{}, sink expects {}x{}",
                frame.width, frame.height, self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Sink contract for consuming emitted frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices starting at 0.
pub trait FrameSink {
    /// Prepare for `cfg.frame_count` frames.
    fn begin(&mut self, cfg: SinkConfig) -> SpinResult<()>;
    /// Consume frame `idx`, shown for `delay_ms`.
    fn push_frame(&mut self, idx: u32, frame: &FrameRGBA, delay_ms: f64) -> SpinResult<()>;
    /// Flush and finish.
    fn end(&mut self) -> SpinResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    /// Frames with their delays, in push order.
    pub frames: Vec<(u32, FrameRGBA, f64)>,
    finished: bool,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Config received by the last `begin`.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Whether `end` ran after the last `begin`.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SpinResult<()> {
        cfg.validate()?;
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u32, frame: &FrameRGBA, delay_ms: f64) -> SpinResult<()> {
        self.frames.push((idx, frame.clone(), delay_ms));
        Ok(())
    }

    fn end(&mut self) -> SpinResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
