use std::collections::HashMap;

use rayon::prelude::*;

use crate::engine::Scene;
use crate::engine::rotation::{RotatingSequence, SlotState, step_slots};
use crate::foundation::error::{SpinError, SpinResult};
use crate::foundation::math::Fnv1a64;
use crate::render::cpu::{CpuRasterizer, RenderSettings};
use crate::render::{AnimationSequence, FrameRGBA};

/// How frames of one emission are scheduled.
#[derive(Clone, Debug)]
pub struct RenderThreading {
    /// Render steps on a rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Worker count; `None` lets rayon decide.
    pub threads: Option<usize>,
    /// Render steps whose slot contents are identical only once.
    pub static_frame_elision: bool,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            static_frame_elision: true,
        }
    }
}

/// Counters for one emission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames in the emitted sequence.
    pub frames_total: u64,
    /// Frames actually rasterized.
    pub frames_rendered: u64,
    /// Frames reused from an identical earlier step.
    pub frames_elided: u64,
}

/// Rasterize a single step of `scene`.
pub fn render_step(scene: &Scene, step: u64, settings: &RenderSettings) -> SpinResult<FrameRGBA> {
    let slots = step_slots(scene.states(), scene.layout(), step);
    CpuRasterizer::new(settings.clone()).rasterize(scene, &slots)
}

/// Emit one full revolution: frame `k` shows step `k`, each held for the step interval.
pub fn emit_frames(
    scene: &Scene,
    settings: &RenderSettings,
    threading: &RenderThreading,
) -> SpinResult<AnimationSequence> {
    emit_frames_with_stats(scene, settings, threading).map(|(seq, _)| seq)
}

/// Same as [`emit_frames`], also reporting how many frames were rasterized.
#[tracing::instrument(skip_all, fields(steps = scene.step_count(), parallel = threading.parallel))]
pub fn emit_frames_with_stats(
    scene: &Scene,
    settings: &RenderSettings,
    threading: &RenderThreading,
) -> SpinResult<(AnimationSequence, RenderStats)> {
    let steps = scene.step_count();
    let plans = plan_steps(scene, steps);

    let mut frame_to_unique = Vec::with_capacity(steps);
    let mut unique: Vec<usize> = Vec::new();
    if threading.static_frame_elision {
        let mut seen = HashMap::<u64, usize>::new();
        for (idx, slots) in plans.iter().enumerate() {
            let slot = *seen.entry(slots_fingerprint(slots)).or_insert_with(|| {
                unique.push(idx);
                unique.len() - 1
            });
            frame_to_unique.push(slot);
        }
    } else {
        for idx in 0..plans.len() {
            frame_to_unique.push(idx);
            unique.push(idx);
        }
    }

    let rendered = if threading.parallel && unique.len() > 1 {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| {
            unique
                .par_iter()
                .map_init(
                    || CpuRasterizer::new(settings.clone()),
                    |raster, &idx| raster.rasterize(scene, &plans[idx]),
                )
                .collect::<Vec<_>>()
        })
    } else {
        let mut raster = CpuRasterizer::new(settings.clone());
        unique
            .iter()
            .map(|&idx| raster.rasterize(scene, &plans[idx]))
            .collect::<Vec<_>>()
    };

    let mut unique_frames = Vec::with_capacity(rendered.len());
    for frame in rendered {
        unique_frames.push(frame?);
    }

    let frames = frame_to_unique
        .iter()
        .map(|&u| unique_frames[u].clone())
        .collect::<Vec<_>>();
    let delays = vec![scene.config().step_interval_ms(); frames.len()];

    let total = frames.len() as u64;
    let rendered_count = unique_frames.len() as u64;
    tracing::debug!(total, rendered = rendered_count, "emitted frames");

    let seq = AnimationSequence::new(frames, delays)?;
    Ok((
        seq,
        RenderStats {
            frames_total: total,
            frames_rendered: rendered_count,
            frames_elided: total.saturating_sub(rendered_count),
        },
    ))
}

/// Slot states for every step, produced by rotating one working copy.
fn plan_steps(scene: &Scene, steps: usize) -> Vec<Vec<SlotState>> {
    let mut seq = RotatingSequence::new(scene.states());
    let mut out = Vec::with_capacity(steps);
    for _ in 0..steps {
        out.push(seq.slots(scene.layout()));
        seq.rotate();
    }
    out
}

fn slots_fingerprint(slots: &[SlotState]) -> u64 {
    let mut h = Fnv1a64::new_default();
    for s in slots {
        let v = &s.visual;
        h.write_bytes(&[v.color.r, v.color.g, v.color.b]);
        for x in [v.alpha, v.opacity, v.size] {
            h.write_bytes(&x.to_bits().to_le_bytes());
        }
    }
    h.finish()
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> SpinResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SpinError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SpinError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
