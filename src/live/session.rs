use std::time::Instant;

use crate::config::AnimationConfig;
use crate::engine::Scene;
use crate::engine::rotation::{RotatingSequence, SlotState};
use crate::foundation::error::{SpinError, SpinResult};
use crate::live::timer::LiveTimer;
use crate::render::AnimationSequence;
use crate::render::cpu::RenderSettings;
use crate::render::pipeline::{RenderThreading, emit_frames};

/// Receiver of slot updates from the live driver.
pub trait SlotView {
    /// Called once per step before its slots.
    fn begin_step(&mut self, _step: u64) {}
    /// Show `slot.visual` at `slot`'s fixed placement.
    fn apply_slot(&mut self, slot: &SlotState);
    /// Called once per step after its slots.
    fn end_step(&mut self) {}
}

/// Caller-owned live animation: scene, rotating working copy and timer.
pub struct AnimationSession {
    scene: Scene,
    sequence: RotatingSequence,
    timer: LiveTimer,
    pending: Option<AnimationConfig>,
    settings: RenderSettings,
    threading: RenderThreading,
}

impl AnimationSession {
    /// Build a session from `cfg`, loading its image layer from disk.
    pub fn new(cfg: AnimationConfig, now: Instant) -> Self {
        Self::with_scene(Scene::load(cfg), now)
    }

    /// Build a session around an already prepared scene.
    pub fn with_scene(scene: Scene, now: Instant) -> Self {
        let period = LiveTimer::period_from_ms(scene.config().step_interval_ms());
        Self {
            sequence: RotatingSequence::new(scene.states()),
            timer: LiveTimer::new(period, now),
            scene,
            pending: None,
            settings: RenderSettings::default(),
            threading: RenderThreading::default(),
        }
    }

    /// Use these settings and threading for exports.
    pub fn with_render_options(mut self, settings: RenderSettings, threading: RenderThreading) -> Self {
        self.settings = settings;
        self.threading = threading;
        self
    }

    /// Current scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Number of rotations applied since the last regeneration.
    pub fn step(&self) -> u64 {
        self.sequence.step()
    }

    /// Live timer.
    pub fn timer(&self) -> &LiveTimer {
        &self.timer
    }

    /// Whether a config change is waiting for the next regeneration.
    pub fn has_pending_change(&self) -> bool {
        self.pending.is_some()
    }

    /// Slots for the current step.
    pub fn current_slots(&self) -> Vec<SlotState> {
        self.sequence.slots(self.scene.layout())
    }

    /// Push the current step to `view` without advancing.
    pub fn present(&self, view: &mut dyn SlotView) {
        view.begin_step(self.sequence.step());
        for slot in self.current_slots() {
            view.apply_slot(&slot);
        }
        view.end_step();
    }

    /// Rotate one step, then push every slot to `view`.
    pub fn tick(&mut self, view: &mut dyn SlotView) {
        self.sequence.rotate();
        self.present(view);
    }

    /// Regenerate if a change is pending, then tick if the timer is due.
    ///
    /// Returns `true` when `view` was updated.
    pub fn poll(&mut self, now: Instant, view: &mut dyn SlotView) -> bool {
        let regenerated = self.apply_pending(now);
        if regenerated {
            self.present(view);
        }
        if self.timer.poll(now) {
            self.tick(view);
            return true;
        }
        regenerated
    }

    /// Offer a new config; returns `true` if it differs and a regeneration was scheduled.
    pub fn set_config(&mut self, cfg: AnimationConfig) -> bool {
        let cfg = cfg.sanitized();
        let current = self.pending.as_ref().unwrap_or(self.scene.config());
        if *current == cfg {
            return false;
        }
        self.pending = Some(cfg);
        true
    }

    /// Run a scheduled regeneration now. Returns `true` if one ran.
    #[tracing::instrument(skip_all)]
    pub fn apply_pending(&mut self, now: Instant) -> bool {
        let Some(cfg) = self.pending.take() else {
            return false;
        };
        self.scene = Scene::load(cfg);
        self.sequence = RotatingSequence::new(self.scene.states());
        let period = LiveTimer::period_from_ms(self.scene.config().step_interval_ms());
        self.timer.set_period(period, now);
        tracing::debug!(
            elements = self.scene.states().len(),
            period_ms = period.as_secs_f64() * 1000.0,
            "regenerated scene"
        );
        true
    }

    /// Stop live ticking.
    pub fn pause(&mut self) {
        self.timer.suspend();
    }

    /// Resume live ticking.
    pub fn resume(&mut self, now: Instant) {
        self.timer.resume(now);
    }

    /// Emit every frame of the current scene without touching the live sequence.
    pub fn emit(&self) -> SpinResult<AnimationSequence> {
        emit_frames(&self.scene, &self.settings, &self.threading)
    }

    /// Export the current scene.
    ///
    /// The timer is suspended for the whole export and restored on every exit path. `encode`
    /// receives an owned sequence on a worker thread; a panic there becomes an encode error.
    pub fn export<R, F>(&mut self, encode: F) -> SpinResult<R>
    where
        R: Send,
        F: FnOnce(AnimationSequence) -> SpinResult<R> + Send,
    {
        let _guard = SuspendGuard::new(&mut self.timer);
        let seq = emit_frames(&self.scene, &self.settings, &self.threading)?;

        let res = std::thread::scope(|scope| {
            scope
                .spawn(move || encode(seq))
                .join()
                .map_err(|_| SpinError::encode("encoder thread panicked"))
        })
        .and_then(|r| r);

        if let Err(e) = &res {
            tracing::warn!(error = %e, "export failed");
        }
        res
    }
}

/// Suspends a timer for its lifetime, restoring the previous running state on drop.
struct SuspendGuard<'a> {
    timer: &'a mut LiveTimer,
    was_running: bool,
}

impl<'a> SuspendGuard<'a> {
    fn new(timer: &'a mut LiveTimer) -> Self {
        let was_running = timer.is_running();
        timer.suspend();
        Self { timer, was_running }
    }
}

impl Drop for SuspendGuard<'_> {
    fn drop(&mut self) {
        if self.was_running {
            self.timer.resume(Instant::now());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/live/session.rs"]
mod tests;
