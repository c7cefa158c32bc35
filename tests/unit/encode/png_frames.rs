use super::*;
use crate::encode::write_sequence;
use crate::render::AnimationSequence;

fn frame(px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 2,
        data: px.repeat(4),
        premultiplied: true,
    }
}

#[test]
fn file_names_carry_stem_timestamp_and_index() {
    assert_eq!(frame_file_name("spinner", 1700, 3), "spinner_1700_3.png");
}

#[test]
fn writes_one_png_per_frame() {
    let dir = std::env::temp_dir().join(format!("spinring-frames-{}", std::process::id()));
    let seq = AnimationSequence::new(
        vec![frame([10, 20, 30, 255]), frame([0, 0, 0, 0])],
        vec![100.0, 100.0],
    )
    .unwrap();

    let mut sink = PngSequenceSink::new(&dir, "spin", 42);
    write_sequence(&seq, &mut sink).unwrap();
    assert_eq!(sink.written().len(), 2);
    assert_eq!(sink.written()[1], dir.join("spin_42_1.png"));

    let decoded = image::open(&sink.written()[0]).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 2));
    assert_eq!(decoded.get_pixel(0, 0).0, [10, 20, 30, 255]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn empty_stem_is_rejected() {
    let mut sink = PngSequenceSink::new(std::env::temp_dir(), "", 0);
    let err = sink
        .begin(SinkConfig {
            width: 1,
            height: 1,
            frame_count: 1,
        })
        .unwrap_err();
    assert!(err.to_string().starts_with("validation error:"));
}
