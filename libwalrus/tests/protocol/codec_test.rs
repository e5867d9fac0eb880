#[path = "../common/mod.rs"]
mod common;

use libwalrus::protocol::{FixedFrameCodec, FrameCodec, LineCodec, Pm3Frame, op};
use proptest::prelude::*;

#[test]
fn line_codec_drains_stream_in_order() {
    let codec = LineCodec::default();
    let stream: Vec<u8> = common::fixtures::IDENTIFY_LINES
        .iter()
        .flat_map(|line| format!("{}\r\n", line).into_bytes())
        .collect();

    let mut buf = stream.as_slice();
    let mut lines = Vec::new();
    while let Some((line, used)) = codec.decode(buf).unwrap() {
        lines.push(line);
        buf = &buf[used..];
    }
    assert!(buf.is_empty());
    assert_eq!(lines, common::fixtures::IDENTIFY_LINES);
}

#[test]
fn custom_delimiter() {
    let codec = LineCodec::new("\n");
    let (line, used) = codec.decode(b"100:OK\nrest").unwrap().unwrap();
    assert_eq!(line, "100:OK");
    assert_eq!(used, 7);
    assert_eq!(codec.encode(&"UID=01".to_string()).unwrap(), b"UID=01\n");
}

#[test]
fn fixed_codec_decodes_back_to_back_frames() {
    let codec = FixedFrameCodec;
    let mut stream = common::fixtures::anticollision_ack().encode();
    stream.extend(Pm3Frame::new(op::VERSION).encode());

    let (first, used) = codec.decode(&stream).unwrap().unwrap();
    assert_eq!(first.op(), op::ACK);
    let (second, rest) = codec.decode(&stream[used..]).unwrap().unwrap();
    assert_eq!(second.op(), op::VERSION);
    assert_eq!(used + rest, stream.len());
}

proptest! {
    #[test]
    fn fixed_codec_waits_for_complete_frame(len in 0usize..FixedFrameCodec::FRAME_LEN) {
        let bytes = vec![0xA5u8; len];
        prop_assert!(FixedFrameCodec.decode(&bytes).unwrap().is_none());
    }

    #[test]
    fn line_codec_never_panics(buf in prop::collection::vec(any::<u8>(), 0..512)) {
        let codec = LineCodec::default();
        let _ = codec.decode(&buf);
    }
}
