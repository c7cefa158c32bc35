use super::*;

#[test]
fn rgb_hex_formatting_is_lowercase_and_padded() {
    assert_eq!(Rgb8::new(255, 0, 10).to_hex(), "#ff000a");
    assert_eq!(Rgb8::BLACK.to_hex(), "#000000");
}

#[test]
fn unit_to_u8_clamps_and_rounds() {
    assert_eq!(unit_to_u8(-1.0), 0);
    assert_eq!(unit_to_u8(0.5), 128);
    assert_eq!(unit_to_u8(2.0), 255);
    assert_eq!(unit_to_u8(f64::NAN), 0);
}

#[test]
fn premul_roundtrip_is_exact_for_opaque_and_transparent() {
    let p = Rgba8Premul::from_straight_rgba(10, 20, 30, 255);
    assert_eq!(p.to_straight_rgba(), [10, 20, 30, 255]);

    let t = Rgba8Premul::from_straight_rgba(10, 20, 30, 0);
    assert_eq!(t, Rgba8Premul::transparent());
    assert_eq!(t.to_straight_rgba(), [0, 0, 0, 0]);
}

#[test]
fn premul_roundtrip_half_alpha_is_close() {
    let p = Rgba8Premul::from_straight_rgba(200, 100, 50, 128);
    let [r, g, b, a] = p.to_straight_rgba();
    assert_eq!(a, 128);
    assert!((i16::from(r) - 200).abs() <= 1);
    assert!((i16::from(g) - 100).abs() <= 1);
    assert!((i16::from(b) - 50).abs() <= 1);
}
