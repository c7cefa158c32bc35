use std::collections::VecDeque;

use serde::Serialize;

use crate::config::VisualDescriptor;
use crate::engine::ElementState;
use crate::engine::layout::RingLayout;
use crate::foundation::core::Point;

/// Working copy of the element visuals, rotated one position per animation step.
///
/// Slot `j` shows `items[j]`. One step moves the front item to the back, so after `k` steps slot
/// `j` shows the visual of element `(j + k) mod n`.
#[derive(Clone, Debug, PartialEq)]
pub struct RotatingSequence {
    items: VecDeque<VisualDescriptor>,
    step: u64,
}

impl RotatingSequence {
    /// Start a working copy at step 0.
    pub fn new(states: &[ElementState]) -> Self {
        Self {
            items: states.iter().map(|s| s.visual).collect(),
            step: 0,
        }
    }

    /// Start a working copy already advanced by `step` rotations.
    pub fn at_step(states: &[ElementState], step: u64) -> Self {
        let mut seq = Self::new(states);
        let n = seq.items.len() as u64;
        if n > 0 {
            seq.items.rotate_left((step % n) as usize);
        }
        seq.step = step;
        seq
    }

    /// Advance one step.
    pub fn rotate(&mut self) {
        if let Some(front) = self.items.pop_front() {
            self.items.push_back(front);
        }
        self.step += 1;
    }

    /// Total rotations applied since step 0.
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Return `true` when there are no slots.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Visual currently assigned to `slot`.
    pub fn visual(&self, slot: usize) -> Option<&VisualDescriptor> {
        self.items.get(slot)
    }

    /// Visuals in slot order.
    pub fn visuals(&self) -> impl Iterator<Item = &VisualDescriptor> {
        self.items.iter()
    }

    /// Resolve every slot to its placement and the visual currently rotated into it.
    ///
    /// This is the single step function both the live driver and the rasterizer consume.
    pub fn slots(&self, layout: &RingLayout) -> Vec<SlotState> {
        self.items
            .iter()
            .enumerate()
            .map(|(slot, visual)| {
                let idx = slot as u32;
                SlotState {
                    slot,
                    angle: layout.slot_angle(idx),
                    center: layout.slot_center(idx),
                    rotation: layout.element_rotation(idx),
                    visual: *visual,
                }
            })
            .collect()
    }
}

/// One slot resolved for a given step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SlotState {
    /// Fixed slot index; also the draw order.
    pub slot: usize,
    /// Fixed slot angle in radians.
    pub angle: f64,
    /// Fixed slot center in container pixels.
    pub center: Point,
    /// Per-element rotation in radians.
    pub rotation: f64,
    /// Visual rotated into this slot.
    pub visual: VisualDescriptor,
}

/// Slots for `step` computed from scratch.
pub fn step_slots(states: &[ElementState], layout: &RingLayout, step: u64) -> Vec<SlotState> {
    RotatingSequence::at_step(states, step).slots(layout)
}

#[cfg(test)]
#[path = "../../tests/unit/engine/rotation.rs"]
mod tests;
