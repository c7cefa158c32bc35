//! Encoding sinks.
//!
//! Sinks consume emitted frames in step order. [`write_sequence`] drives any sink over a whole
//! [`AnimationSequence`].

pub(crate) mod apng;
pub(crate) mod png_frames;
pub(crate) mod sink;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::SpinResult;
use crate::render::AnimationSequence;

/// Feed every frame of `seq` through `sink`, bracketed by `begin`/`end`.
pub fn write_sequence(seq: &AnimationSequence, sink: &mut dyn FrameSink) -> SpinResult<()> {
    let (width, height) = seq.dimensions();
    sink.begin(SinkConfig {
        width,
        height,
        frame_count: seq.len() as u32,
    })?;
    for (idx, (frame, &delay)) in seq.frames().iter().zip(seq.delays_ms()).enumerate() {
        sink.push_frame(idx as u32, frame, delay)?;
    }
    sink.end()
}
