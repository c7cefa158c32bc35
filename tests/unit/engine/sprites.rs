use super::*;
use crate::config::{ImageLayer, OutlineSpec};
use crate::engine::compute_element_states;
use crate::foundation::core::Rgb8;

fn square_source() -> SourceImage {
    // 4x2 opaque block with a transparent column on the right.
    let mut rgba = Vec::new();
    for _y in 0..2 {
        for x in 0..4 {
            if x < 3 {
                rgba.extend_from_slice(&[80, 80, 80, 255]);
            } else {
                rgba.extend_from_slice(&[0, 0, 0, 0]);
            }
        }
    }
    SourceImage {
        name: "block".to_owned(),
        raster: Raster::from_rgba8(4, 2, rgba).unwrap(),
    }
}

fn image_cfg(elements: u32, head: u32) -> AnimationConfig {
    AnimationConfig {
        element_count: elements,
        head_count: head,
        start: VisualDescriptor::solid(Rgb8::new(255, 0, 0), 40.0),
        end: VisualDescriptor::solid(Rgb8::new(0, 0, 255), 20.0),
        image: Some(ImageLayer {
            color_mode: ColorMode::Silhouette,
            ..ImageLayer::default()
        }),
        ..AnimationConfig::default()
    }
}

#[test]
fn one_raster_per_distinct_tint() {
    let cfg = image_cfg(12, 3);
    let states = compute_element_states(&cfg);
    let sprites = SpriteSet::prepare(&cfg, &states, &square_source());
    // Head of 3 gives start, middle, end; the tail reuses end.
    assert_eq!(sprites.tints().len(), 3);
    for s in &states {
        assert!(sprites.tinted(&s.visual).is_some());
    }
}

#[test]
fn silhouette_sprite_uses_tint_color() {
    let cfg = image_cfg(2, 2);
    let states = compute_element_states(&cfg);
    let sprites = SpriteSet::prepare(&cfg, &states, &square_source());
    let head = sprites.tinted(&states[0].visual).unwrap();
    assert_eq!(&head.rgba8[0..4], &[255, 0, 0, 255]);
    assert_eq!(&head.rgba8[12..16], &[0, 0, 0, 0]);
    assert_eq!(sprites.color_mode(), ColorMode::Silhouette);
}

#[test]
fn outline_is_scaled_into_source_pixels() {
    let mut cfg = image_cfg(2, 2);
    cfg.outline = Some(OutlineSpec {
        enabled: true,
        color: Rgb8::WHITE,
        width: 20.0,
    });
    let states = compute_element_states(&cfg);
    let sprites = SpriteSet::prepare(&cfg, &states, &square_source());
    // 20 px at size 40 over a 4 px wide source is 2 source pixels.
    let outline = sprites.outline().unwrap();
    assert_eq!((outline.width, outline.height), (8, 6));
}

#[test]
fn outline_radius_is_bounded_for_tiny_elements() {
    let mut cfg = AnimationConfig {
        start: VisualDescriptor::solid(Rgb8::BLACK, 0.05),
        end: VisualDescriptor::solid(Rgb8::WHITE, 0.05),
        image: Some(ImageLayer::default()),
        outline: Some(OutlineSpec {
            enabled: true,
            color: Rgb8::BLACK,
            width: 4096.0,
        }),
        ..AnimationConfig::default()
    };
    cfg = cfg.sanitized();
    assert_eq!(cfg.start.size, 0.05);
    assert_eq!(cfg.outline.as_ref().map(|o| o.width), Some(4096.0));

    let source = crate::assets::decode::default_image();
    let states = compute_element_states(&cfg);
    let sprites = SpriteSet::prepare(&cfg, &states, &source);

    let max_dim = source.raster.max_dim();
    let outline = sprites.outline().unwrap();
    assert_eq!(outline.width, source.raster.width + 2 * max_dim);
    assert_eq!(outline.height, source.raster.height + 2 * max_dim);
    assert!(outline.rgba8.chunks_exact(4).any(|px| px[3] == 255));
}

#[test]
fn disabling_outline_keeps_tints_identical() {
    let mut cfg = image_cfg(6, 6);
    cfg.outline = Some(OutlineSpec {
        enabled: true,
        ..OutlineSpec::default()
    });
    let states = compute_element_states(&cfg);
    let with = SpriteSet::prepare(&cfg, &states, &square_source());
    assert!(with.outline().is_some());

    cfg.outline = Some(OutlineSpec {
        enabled: false,
        ..OutlineSpec::default()
    });
    let without = SpriteSet::prepare(&cfg, &states, &square_source());
    assert!(without.outline().is_none());
    assert_eq!(with.tints(), without.tints());
}

#[test]
fn scale_maps_larger_dimension_to_size() {
    let cfg = image_cfg(1, 1);
    let states = compute_element_states(&cfg);
    let sprites = SpriteSet::prepare(&cfg, &states, &square_source());
    assert_eq!(sprites.scale_for(40.0), 10.0);
    assert_eq!(sprites.source().name, "block");
}
