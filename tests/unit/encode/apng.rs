use std::io::Cursor;

use super::*;

fn solid(px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: 3,
        height: 2,
        data: px.repeat(6),
        premultiplied: true,
    }
}

fn sequence() -> AnimationSequence {
    AnimationSequence::new(
        vec![solid([255, 0, 0, 255]), solid([0, 128, 0, 128]), solid([0; 4])],
        vec![400.0, 400.0, 400.0],
    )
    .unwrap()
}

#[test]
fn encodes_an_animated_png() {
    let bytes = encode_apng(&sequence()).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let decoder = png::Decoder::new(Cursor::new(bytes));
    let mut reader = decoder.read_info().unwrap();
    let actl = reader.info().animation_control.unwrap();
    assert_eq!(actl.num_frames, 3);
    assert_eq!(actl.num_plays, 0);

    let mut buf = vec![0; reader.output_buffer_size()];
    let mut firsts = Vec::new();
    for _ in 0..3 {
        reader.next_frame(&mut buf).unwrap();
        let fctl = reader.info().frame_control.unwrap();
        assert_eq!((fctl.delay_num, fctl.delay_den), (400, 1000));
        firsts.push([buf[0], buf[1], buf[2], buf[3]]);
    }
    // Frames are stored with straight alpha.
    assert_eq!(firsts[0], [255, 0, 0, 255]);
    assert_eq!(firsts[1], [0, 255, 0, 128]);
    assert_eq!(firsts[2][3], 0);
}

#[test]
fn sink_rejects_out_of_order_frames() {
    let mut bytes = Vec::new();
    let mut sink = ApngSink::new(&mut bytes);
    sink.begin(SinkConfig {
        width: 3,
        height: 2,
        frame_count: 2,
    })
    .unwrap();
    let err = sink.push_frame(1, &solid([0; 4]), 10.0).unwrap_err();
    assert!(err.to_string().contains("in order"));
}

#[test]
fn end_requires_every_frame() {
    let mut bytes = Vec::new();
    let mut sink = ApngSink::new(&mut bytes);
    sink.begin(SinkConfig {
        width: 3,
        height: 2,
        frame_count: 2,
    })
    .unwrap();
    sink.push_frame(0, &solid([0; 4]), 10.0).unwrap();
    assert!(sink.end().is_err());
}

#[test]
fn delay_fraction_switches_units_when_large() {
    assert_eq!(frame_delay(400.0), (400, 1000));
    assert_eq!(frame_delay(333.4), (333, 1000));
    assert_eq!(frame_delay(100_000.0), (10_000, 100));
    assert_eq!(frame_delay(f64::NAN), (0, 1000));
}

#[test]
fn writes_file_and_creates_parent() {
    let dir = std::env::temp_dir().join(format!("spinring-apng-{}", std::process::id()));
    let path = dir.join("nested").join("anim.png");
    write_apng_file(&sequence(), &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes, encode_apng(&sequence()).unwrap());
    let _ = std::fs::remove_dir_all(&dir);
}
