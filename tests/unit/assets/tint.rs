use super::*;

fn raster(px: &[[u8; 4]]) -> Raster {
    Raster::from_rgba8(px.len() as u32, 1, px.concat()).unwrap()
}

fn visual(color: Rgb8, alpha: f64) -> VisualDescriptor {
    VisualDescriptor {
        color,
        alpha,
        ..VisualDescriptor::default()
    }
}

#[test]
fn key_quantizes_alpha_to_two_decimals() {
    let a = TintKey::of(&visual(Rgb8::new(1, 2, 3), 0.504));
    let b = TintKey::of(&visual(Rgb8::new(1, 2, 3), 0.496));
    assert_eq!(a, b);
    assert_eq!(a.alpha_centi, 50);

    let c = TintKey::of(&visual(Rgb8::new(1, 2, 4), 0.5));
    assert_ne!(a, c);
}

#[test]
fn silhouette_replaces_color_keeps_alpha() {
    let src = raster(&[[10, 20, 30, 255], [10, 20, 30, 100], [10, 20, 30, 0]]);
    let key = TintKey {
        color: Rgb8::new(200, 0, 0),
        alpha_centi: 30,
    };
    let out = apply_tint(&src, key, ColorMode::Silhouette);
    assert_eq!(
        out.rgba8.as_slice(),
        &[200, 0, 0, 255, 200, 0, 0, 100, 10, 20, 30, 0]
    );
}

#[test]
fn original_mode_blends_tint_over_visible_pixels() {
    let src = raster(&[[0, 0, 0, 255], [100, 100, 100, 0]]);
    let key = TintKey {
        color: Rgb8::new(255, 255, 255),
        alpha_centi: 100,
    };
    let out = apply_tint(&src, key, ColorMode::Original);
    assert_eq!(&out.rgba8[0..4], &[255, 255, 255, 255]);
    // Transparent pixel untouched.
    assert_eq!(&out.rgba8[4..8], &[100, 100, 100, 0]);
}

#[test]
fn original_mode_half_alpha_mixes_evenly() {
    let src = raster(&[[0, 100, 200, 255]]);
    let key = TintKey {
        color: Rgb8::new(200, 100, 0),
        alpha_centi: 50,
    };
    let out = apply_tint(&src, key, ColorMode::Original);
    for (got, want) in out.rgba8[..3].iter().zip([100u8, 100, 100]) {
        assert!((i16::from(*got) - i16::from(want)).abs() <= 1);
    }
    assert_eq!(out.rgba8[3], 255);
}

#[test]
fn zero_tint_alpha_is_identity() {
    let src = raster(&[[12, 34, 56, 200]]);
    let key = TintKey {
        color: Rgb8::new(255, 0, 0),
        alpha_centi: 0,
    };
    assert_eq!(apply_tint(&src, key, ColorMode::Original), src);
}
