#[path = "../common/mod.rs"]
mod common;

use std::time::{Duration, Instant};

use libwalrus::protocol::{Pm3Frame, op};
use libwalrus::transport::{MockTransport, SerialSettings, Transport};

#[test]
fn mock_transport_send_and_receive() {
    let mut m = MockTransport::new();
    m.push_response(vec![0x01]);
    m.send(&[0xAA]).unwrap();
    assert_eq!(m.sent(), vec![vec![0xAA]]);
    assert_eq!(m.receive(1000).unwrap(), vec![0x01]);
}

#[test]
fn clones_share_script_and_log() {
    let handle = MockTransport::new();
    let mut boxed: Box<dyn Transport> = Box::new(handle.clone());
    handle.push_line("100:OK");

    boxed.send(b"IDENTIFY\r\n").unwrap();
    assert_eq!(handle.sent_lines(), vec!["IDENTIFY".to_string()]);
    assert_eq!(boxed.receive(10).unwrap(), b"100:OK\r\n");
    assert_eq!(handle.pending_responses(), 0);
}

#[test]
fn silence_waits_out_the_window() {
    let mut m = MockTransport::new();
    let start = Instant::now();
    assert!(m.receive(20).unwrap().is_empty());
    assert!(start.elapsed() >= Duration::from_millis(20));
}

#[test]
fn delayed_response_arrives_after_polls() {
    let mut m = MockTransport::new();
    m.push_delayed(Duration::from_millis(30), vec![0x42]);

    let mut polls = 0;
    let chunk = loop {
        polls += 1;
        let chunk = m.receive(10).unwrap();
        if !chunk.is_empty() {
            break chunk;
        }
    };
    assert_eq!(chunk, vec![0x42]);
    assert!(polls >= 3);
}

#[test]
fn responder_answers_sent_frames() {
    let mut m = MockTransport::new();
    m.set_responder(|bytes| match Pm3Frame::decode(bytes) {
        Ok(frame) if frame.op() == op::VERSION => vec![Pm3Frame::new(op::ACK).encode()],
        _ => Vec::new(),
    });

    m.send(&Pm3Frame::new(op::VERSION).encode()).unwrap();
    let reply = Pm3Frame::decode(&m.receive(10).unwrap()).unwrap();
    assert_eq!(reply.op(), op::ACK);
    assert_eq!(m.sent_frames()[0].op(), op::VERSION);
}

#[test]
fn serial_defaults_are_8n1() {
    let settings = SerialSettings::default();
    assert_eq!(settings.baud_rate, 115_200);
    assert_eq!(settings.summary(), "115200 8N1");
}
