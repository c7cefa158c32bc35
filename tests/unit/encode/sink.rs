use super::*;
use crate::encode::write_sequence;
use crate::render::AnimationSequence;

fn frame(w: u32, h: u32) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: vec![0; (w * h * 4) as usize],
        premultiplied: true,
    }
}

#[test]
fn in_memory_sink_receives_every_frame_in_order() {
    let seq = AnimationSequence::new(vec![frame(2, 2); 3], vec![10.0, 10.0, 10.0]).unwrap();
    let mut sink = InMemorySink::new();
    write_sequence(&seq, &mut sink).unwrap();

    assert_eq!(
        sink.config(),
        Some(SinkConfig {
            width: 2,
            height: 2,
            frame_count: 3
        })
    );
    let indices: Vec<u32> = sink.frames.iter().map(|(i, _, _)| *i).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert!(sink.is_finished());
}

#[test]
fn config_rejects_zero_sizes() {
    let cfg = SinkConfig {
        width: 0,
        height: 4,
        frame_count: 1,
    };
    assert!(cfg.validate().is_err());
    let cfg = SinkConfig {
        width: 4,
        height: 4,
        frame_count: 0,
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn check_frame_rejects_wrong_size_and_index() {
    let cfg = SinkConfig {
        width: 2,
        height: 2,
        frame_count: 1,
    };
    assert!(cfg.check_frame(0, &frame(2, 2)).is_ok());
    assert!(cfg.check_frame(1, &frame(2, 2)).is_err());
    let err = cfg.check_frame(0, &frame(3, 2)).unwrap_err();
    assert!(err.to_string().starts_with("encode error:"));
}
