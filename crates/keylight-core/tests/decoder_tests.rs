// Host-side tests for raw message classification.

use keylight_core::*;

#[test]
fn note_on_with_velocity() {
    assert_eq!(
        decode(0x90, 60, 100),
        Some(PerformanceEvent::NoteOn {
            channel: 1,
            note: 60,
            velocity: 100
        })
    );
}

#[test]
fn channel_is_one_based() {
    let ev = decode(0x9F, 60, 1).unwrap();
    assert_eq!(ev.channel(), 16);
    assert_eq!(decode(0x83, 60, 0).unwrap().channel(), 4);
}

#[test]
fn zero_velocity_note_on_is_note_off() {
    assert_eq!(
        decode(0x90, 60, 0),
        Some(PerformanceEvent::NoteOff { channel: 1, note: 60 })
    );
}

#[test]
fn note_off_ignores_release_velocity() {
    assert_eq!(
        decode(0x80, 72, 64),
        Some(PerformanceEvent::NoteOff { channel: 1, note: 72 })
    );
}

#[test]
fn sustain_threshold_is_64() {
    assert_eq!(
        decode(0xB0, 64, 64),
        Some(PerformanceEvent::Sustain {
            channel: 1,
            down: true
        })
    );
    assert_eq!(
        decode(0xB0, 64, 127),
        Some(PerformanceEvent::Sustain {
            channel: 1,
            down: true
        })
    );
    assert_eq!(
        decode(0xB0, 64, 63),
        Some(PerformanceEvent::Sustain {
            channel: 1,
            down: false
        })
    );
    assert_eq!(
        decode(0xB0, 64, 0),
        Some(PerformanceEvent::Sustain {
            channel: 1,
            down: false
        })
    );
}

#[test]
fn other_controllers_are_ignored() {
    assert_eq!(decode(0xB0, 1, 127), None); // mod wheel
    assert_eq!(decode(0xB0, 66, 127), None); // sostenuto
    assert_eq!(decode(0xB0, 123, 0), None); // all notes off
}

#[test]
fn other_message_types_are_ignored() {
    assert_eq!(decode(0xE0, 0, 64), None); // pitch bend
    assert_eq!(decode(0xC0, 5, 0), None); // program change
    assert_eq!(decode(0xA0, 60, 10), None); // poly aftertouch
    assert_eq!(decode(0xF8, 0, 0), None); // clock
}

#[test]
fn short_packets_are_ignored() {
    assert_eq!(decode_message(&[]), None);
    assert_eq!(decode_message(&[0x90, 60]), None);
    assert_eq!(decode_message(&[0xF8]), None);
    assert!(decode_message(&[0x90, 60, 1]).is_some());
}
