//! spinring generates ring-of-N loading spinner animations.
//!
//! A ring of elements (circles, or tinted copies of a source image) sits on fixed slots around a
//! circle. Element visuals are interpolated from a start to an end descriptor and the sequence of
//! visuals rotates one slot per step. The same step function feeds:
//!
//! - a live driver ([`AnimationSession`]) pushing slot updates to a [`SlotView`]
//! - an emitter ([`emit_frames`]) rasterizing one frame per step with `vello_cpu`
//! - encoders ([`encode_apng`], [`PngSequenceSink`]) packaging the frames
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub mod config;
pub mod encode;
pub mod engine;
pub mod live;
pub mod render;

pub use crate::foundation::core::{Affine, Point, Rgb8, Rgba8Premul, Vec2};
pub use crate::foundation::error::{SpinError, SpinResult};

pub use crate::assets::decode::{
    DEFAULT_IMAGE_NAME, decode_image, default_image, load_image, load_image_or_default,
};
pub use crate::assets::tint::TintKey;
pub use crate::assets::{Raster, SourceImage};
pub use crate::config::{
    AnimationConfig, ColorMode, ImageLayer, OrientationMode, OutlineSpec, VisualDescriptor,
};
pub use crate::encode::apng::{ApngSink, encode_apng, write_apng_file};
pub use crate::encode::png_frames::{PngSequenceSink, frame_file_name, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::encode::write_sequence;
pub use crate::engine::layout::RingLayout;
pub use crate::engine::rotation::{RotatingSequence, SlotState, step_slots};
pub use crate::engine::sprites::SpriteSet;
pub use crate::engine::{ElementState, Scene, compute_element_states};
pub use crate::live::debounce::Debouncer;
pub use crate::live::session::{AnimationSession, SlotView};
pub use crate::live::timer::{LiveTimer, TimerState};
pub use crate::render::cpu::{CpuRasterizer, RenderSettings};
pub use crate::render::pipeline::{
    RenderStats, RenderThreading, emit_frames, emit_frames_with_stats, render_step,
};
pub use crate::render::{AnimationSequence, FrameRGBA};
