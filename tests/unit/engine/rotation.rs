use super::*;
use crate::config::AnimationConfig;
use crate::engine::compute_element_states;
use crate::foundation::core::Rgb8;

fn states(n: u32) -> Vec<ElementState> {
    let cfg = AnimationConfig {
        element_count: n,
        head_count: n,
        start: VisualDescriptor::solid(Rgb8::WHITE, 40.0),
        end: VisualDescriptor::solid(Rgb8::BLACK, 10.0),
        ..AnimationConfig::default()
    };
    compute_element_states(&cfg)
}

#[test]
fn rotate_moves_front_to_back() {
    let st = states(4);
    let mut seq = RotatingSequence::new(&st);
    seq.rotate();
    assert_eq!(seq.visual(0), Some(&st[1].visual));
    assert_eq!(seq.visual(3), Some(&st[0].visual));
    assert_eq!(seq.step(), 1);
}

#[test]
fn n_rotations_restore_original_order() {
    for n in [1u32, 2, 5, 8] {
        let st = states(n);
        let original = RotatingSequence::new(&st);
        let mut seq = original.clone();
        for _ in 0..n {
            seq.rotate();
        }
        let a: Vec<_> = seq.visuals().copied().collect();
        let b: Vec<_> = original.visuals().copied().collect();
        assert_eq!(a, b);
    }
}

#[test]
fn at_step_matches_repeated_rotation() {
    let st = states(6);
    let mut seq = RotatingSequence::new(&st);
    for k in 0..15u64 {
        let direct = RotatingSequence::at_step(&st, k);
        assert_eq!(direct, seq);
        seq.rotate();
    }
}

#[test]
fn slot_j_at_step_k_shows_element_j_plus_k() {
    let st = states(5);
    let cfg = AnimationConfig {
        element_count: 5,
        ..AnimationConfig::default()
    };
    let layout = RingLayout::from_config(&cfg);
    for k in 0..5u64 {
        let slots = step_slots(&st, &layout, k);
        for (j, slot) in slots.iter().enumerate() {
            assert_eq!(slot.slot, j);
            assert_eq!(slot.visual, st[(j + k as usize) % 5].visual);
            assert_eq!(slot.center, layout.slot_center(j as u32));
        }
    }
}

#[test]
fn empty_sequence_rotates_without_panicking() {
    let mut seq = RotatingSequence::new(&[]);
    seq.rotate();
    assert!(seq.is_empty());
    assert_eq!(seq.len(), 0);
}
