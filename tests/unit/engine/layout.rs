use std::f64::consts::{FRAC_PI_2, PI};

use super::*;
use crate::config::{ImageLayer, OutlineSpec, VisualDescriptor};

fn cfg_with(size: f64, margin: f64) -> AnimationConfig {
    AnimationConfig {
        container_size: 300,
        margin_percent: margin,
        start: VisualDescriptor {
            size,
            ..VisualDescriptor::default()
        },
        end: VisualDescriptor {
            size: size / 2.0,
            ..VisualDescriptor::default()
        },
        ..AnimationConfig::default()
    }
}

#[test]
fn radius_uses_largest_size_and_margin() {
    let layout = RingLayout::from_config(&cfg_with(50.0, 0.0));
    assert_eq!(layout.max_element_size, 50.0);
    assert_eq!(layout.radius, 125.0);

    let layout = RingLayout::from_config(&cfg_with(50.0, 10.0));
    assert_eq!(layout.radius, 110.0);
}

#[test]
fn outline_widens_footprint_only_when_enabled() {
    let mut cfg = cfg_with(50.0, 0.0);
    cfg.outline = Some(OutlineSpec {
        enabled: true,
        width: 5.0,
        ..OutlineSpec::default()
    });
    assert_eq!(max_element_size(&cfg), 60.0);

    cfg.outline = Some(OutlineSpec {
        enabled: false,
        width: 5.0,
        ..OutlineSpec::default()
    });
    assert_eq!(max_element_size(&cfg), 50.0);
}

#[test]
fn radius_is_never_negative() {
    for margin in [0.0, 25.0, 50.0, 99.0, 100.0] {
        for size in [0.0, 10.0, 300.0, 10_000.0] {
            let r = orbit_radius(300.0, size, margin);
            assert!(r >= 0.0, "margin {margin} size {size} gave {r}");
            assert!(!r.is_nan());
        }
    }
    assert_eq!(orbit_radius(100.0, 50.0, 100.0), 0.0);
}

#[test]
fn first_slot_sits_at_top() {
    let layout = RingLayout::from_config(&cfg_with(50.0, 0.0));
    assert!((layout.slot_angle(0) + FRAC_PI_2).abs() < 1e-12);
    let p = layout.slot_center(0);
    assert!((p.x - 150.0).abs() < 1e-9);
    assert!((p.y - 25.0).abs() < 1e-9);
}

#[test]
fn slots_step_by_equal_negative_angles() {
    let angles: Vec<f64> = (0..4).map(|i| slot_angle(i, 4, 0.0)).collect();
    for pair in angles.windows(2) {
        assert!((pair[0] - pair[1] - FRAC_PI_2).abs() < 1e-12);
    }
}

#[test]
fn global_rotation_offsets_every_slot() {
    assert!((slot_angle(0, 8, PI) - (PI - FRAC_PI_2)).abs() < 1e-12);
    assert!((slot_angle(2, 8, PI) - (slot_angle(2, 8, 0.0) + PI)).abs() < 1e-12);
}

#[test]
fn zero_count_is_a_single_fixed_angle() {
    assert_eq!(slot_angle(0, 0, 1.0), 0.0);
    assert_eq!(slot_angle(5, 0, 1.0), 0.0);
}

#[test]
fn outward_rotation_only_for_centered_images() {
    let mut cfg = cfg_with(50.0, 0.0);
    let layout = RingLayout::from_config(&cfg);
    assert_eq!(layout.element_rotation(3), 0.0);

    cfg.image = Some(ImageLayer {
        orientation: crate::config::OrientationMode::Center,
        ..ImageLayer::default()
    });
    let layout = RingLayout::from_config(&cfg);
    assert!((layout.element_rotation(0)).abs() < 1e-12);
    let expected = layout.slot_angle(3) + FRAC_PI_2;
    assert!((layout.element_rotation(3) - expected).abs() < 1e-12);
}

#[test]
fn slot_transform_maps_origin_to_center() {
    let layout = RingLayout::from_config(&cfg_with(50.0, 0.0));
    let p = layout.slot_transform(2) * crate::foundation::core::Point::ORIGIN;
    let c = layout.slot_center(2);
    assert!((p.x - c.x).abs() < 1e-9);
    assert!((p.y - c.y).abs() < 1e-9);
}
