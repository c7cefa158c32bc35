use super::*;

fn solid(w: u32, h: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: px.repeat((w * h) as usize),
        premultiplied: true,
    }
}

#[test]
fn rejects_mismatched_delays() {
    let err = AnimationSequence::new(vec![solid(2, 2, [0; 4])], vec![10.0, 10.0]).unwrap_err();
    assert!(err.to_string().contains("does not match"));
}

#[test]
fn rejects_empty_and_mixed_sizes() {
    assert!(AnimationSequence::new(Vec::new(), Vec::new()).is_err());
    let frames = vec![solid(2, 2, [0; 4]), solid(3, 2, [0; 4])];
    assert!(AnimationSequence::new(frames, vec![1.0, 1.0]).is_err());
}

#[test]
fn straight_conversion_unpremultiplies() {
    let f = solid(1, 1, [64, 32, 0, 128]);
    assert_eq!(f.to_straight_rgba8(), vec![128, 64, 0, 128]);

    let straight = FrameRGBA {
        premultiplied: false,
        ..f.clone()
    };
    assert_eq!(straight.to_straight_rgba8(), f.data);
}

#[test]
fn pixel_reads_row_major() {
    let mut f = solid(2, 2, [0; 4]);
    f.data[12..16].copy_from_slice(&[1, 2, 3, 4]);
    assert_eq!(f.pixel(1, 1), Some([1, 2, 3, 4]));
    assert_eq!(f.pixel(2, 0), None);
}

#[test]
fn fingerprint_tracks_pixels_and_delays() {
    let a = AnimationSequence::new(vec![solid(2, 2, [9; 4])], vec![100.0]).unwrap();
    let b = AnimationSequence::new(vec![solid(2, 2, [9; 4])], vec![100.0]).unwrap();
    let c = AnimationSequence::new(vec![solid(2, 2, [9; 4])], vec![101.0]).unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), c.fingerprint());
    assert_eq!(a.dimensions(), (2, 2));
    assert_eq!(a.total_duration_ms(), 100.0);
}
