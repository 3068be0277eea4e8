//! Classification of raw 3-byte channel messages.

pub const NOTE_OFF: u8 = 0x80;
pub const NOTE_ON: u8 = 0x90;
pub const CONTROL_CHANGE: u8 = 0xB0;
/// Damper pedal controller number.
pub const SUSTAIN_CC: u8 = 64;
/// Controller values at or above this mean "pedal down".
pub const SUSTAIN_THRESHOLD: u8 = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PerformanceEvent {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8 },
    Sustain { channel: u8, down: bool },
}

impl PerformanceEvent {
    /// 1-based MIDI channel the event arrived on.
    pub fn channel(&self) -> u8 {
        match *self {
            Self::NoteOn { channel, .. }
            | Self::NoteOff { channel, .. }
            | Self::Sustain { channel, .. } => channel,
        }
    }
}

/// Decodes one channel message. Anything that is not a note on/off or the
/// sustain controller yields `None`.
pub fn decode(status: u8, data1: u8, data2: u8) -> Option<PerformanceEvent> {
    let msg_type = status & 0xF0;
    let channel = (status & 0x0F) + 1;
    match msg_type {
        NOTE_ON if data2 > 0 => Some(PerformanceEvent::NoteOn {
            channel,
            note: data1,
            velocity: data2,
        }),
        // zero-velocity note-on is a note-off
        NOTE_ON | NOTE_OFF => Some(PerformanceEvent::NoteOff {
            channel,
            note: data1,
        }),
        CONTROL_CHANGE if data1 == SUSTAIN_CC => Some(PerformanceEvent::Sustain {
            channel,
            down: data2 >= SUSTAIN_THRESHOLD,
        }),
        _ => None,
    }
}

/// Byte-slice entry point used by device callbacks; short packets are ignored.
pub fn decode_message(data: &[u8]) -> Option<PerformanceEvent> {
    match *data {
        [status, data1, data2, ..] => decode(status, data1, data2),
        _ => None,
    }
}
