//! Macro decoder for the fixed 256-byte macro buffers.
//!
//! Buffer layout:
//!   - bytes 0..8: header, ignored
//!   - bytes 8..: event records `[opcode, arg, extra]`, read in order
//!
//! Opcodes:
//!   - `0x81` mouse button down, `0x01` mouse button up
//!   - `0x84` key down, `0x04` key up (arg = HID usage ID)
//!   - `0x06` delay (arg = ticks)
//!   - `0x00` padding, consumed one byte at a time
//!
//! A buffer whose first record is all zero holds no macro.

use crate::codes;
use serde::Serialize;
use tracing::{debug, trace};

/// Size of one macro buffer.
pub const MACRO_LEN: usize = 256;

/// Offset of the first event record.
pub const EVENTS_OFFSET: usize = 8;

/// Length of one event record.
pub const RECORD_LEN: usize = 3;

/// Prefix of the diagnostic line for unrecognized records.
pub const UNKNOWN_EVENT_PREFIX: &str = "unknown, please report as bug:";

/// Event opcode bytes.
pub mod opcodes {
    pub const MOUSE_DOWN: u8 = 0x81;
    pub const MOUSE_UP: u8 = 0x01;
    pub const KEY_DOWN: u8 = 0x84;
    pub const KEY_UP: u8 = 0x04;
    pub const DELAY: u8 = 0x06;
    pub const PADDING: u8 = 0x00;
}

/// Mouse button argument bytes, used when
/// [`DecodeOptions::resolve_mouse_buttons`] is set.
const MOUSE_BUTTONS: &[(u8, &str)] = &[
    (0x01, "mouse_left"),
    (0x02, "mouse_right"),
    (0x04, "mouse_middle"),
];

/// Decoder options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Resolve mouse button records from their argument byte.
    ///
    /// Off by default: mouse button records then always decode to
    /// [`MacroEvent::Unknown`]. The vendor tool's decoder never resolves a
    /// 0x81 record either, but it prints `up\tmouse_left` for every 0x01
    /// record whatever the argument byte. Both directions are reported as
    /// unknown here so down and up stay symmetric.
    pub resolve_mouse_buttons: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Opcode {
    MouseDown,
    MouseUp,
    KeyDown,
    KeyUp,
    Delay,
    Padding,
    Other,
}

impl Opcode {
    fn from_byte(b: u8) -> Self {
        match b {
            opcodes::MOUSE_DOWN => Self::MouseDown,
            opcodes::MOUSE_UP => Self::MouseUp,
            opcodes::KEY_DOWN => Self::KeyDown,
            opcodes::KEY_UP => Self::KeyUp,
            opcodes::DELAY => Self::Delay,
            opcodes::PADDING => Self::Padding,
            _ => Self::Other,
        }
    }
}

/// One decoded macro event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MacroEvent {
    /// Key or mouse button pressed.
    Down { target: &'static str },
    /// Key or mouse button released.
    Up { target: &'static str },
    /// Pause before the next event.
    Delay { ticks: u8 },
    /// Record that matched no known code.
    Unknown { raw: [u8; 3] },
}

impl std::fmt::Display for MacroEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Down { target } => write!(f, "down\t{target}"),
            Self::Up { target } => write!(f, "up\t{target}"),
            Self::Delay { ticks } => write!(f, "delay\t{ticks}"),
            Self::Unknown { raw } => write!(
                f,
                "{} {:x} {:x} {:x}",
                UNKNOWN_EVENT_PREFIX, raw[0], raw[1], raw[2]
            ),
        }
    }
}

/// Whether the buffer holds no macro (first record all zero).
pub fn is_unset(buffer: &[u8]) -> bool {
    buffer
        .get(EVENTS_OFFSET..EVENTS_OFFSET + RECORD_LEN)
        .map_or(true, |first| first.iter().all(|&b| b == 0))
}

/// Decode a macro buffer with default options.
pub fn decode_macro(buffer: &[u8; MACRO_LEN]) -> Vec<MacroEvent> {
    decode_macro_with(buffer, DecodeOptions::default())
}

/// Decode a macro buffer.
pub fn decode_macro_with(buffer: &[u8; MACRO_LEN], options: DecodeOptions) -> Vec<MacroEvent> {
    decode_events(buffer, options)
}

/// Decode events from a buffer of any length.
///
/// Stops at the first record that would run past the end of `bytes` and
/// returns the events decoded so far.
pub fn decode_events(bytes: &[u8], options: DecodeOptions) -> Vec<MacroEvent> {
    let mut events = Vec::new();
    if is_unset(bytes) {
        trace!("macro buffer is unset");
        return events;
    }

    let mut offset = EVENTS_OFFSET;
    while offset < bytes.len() {
        let opcode = Opcode::from_byte(bytes[offset]);
        if opcode == Opcode::Padding {
            offset += 1;
            continue;
        }

        let Some(&[b0, b1, b2]) = bytes.get(offset..offset + RECORD_LEN) else {
            debug!(offset, len = bytes.len(), "macro record truncated");
            break;
        };
        let raw = [b0, b1, b2];
        trace!(
            offset,
            opcode = ?opcode,
            raw_hex = format_args!("{:02X?}", raw),
            "decoding macro record"
        );

        let event = decode_record(opcode, raw, options).unwrap_or_else(|| {
            debug!(
                offset,
                raw_hex = format_args!("{:02X?}", raw),
                "unrecognized macro record"
            );
            MacroEvent::Unknown { raw }
        });
        events.push(event);
        offset += RECORD_LEN;
    }

    events
}

fn decode_record(opcode: Opcode, raw: [u8; 3], options: DecodeOptions) -> Option<MacroEvent> {
    let arg = raw[1];
    match opcode {
        Opcode::MouseDown if options.resolve_mouse_buttons => {
            mouse_button(arg).map(|target| MacroEvent::Down { target })
        }
        Opcode::MouseUp if options.resolve_mouse_buttons => {
            mouse_button(arg).map(|target| MacroEvent::Up { target })
        }
        Opcode::MouseDown | Opcode::MouseUp => None,
        Opcode::KeyDown => codes::key_name(arg).map(|target| MacroEvent::Down { target }),
        Opcode::KeyUp => codes::key_name(arg).map(|target| MacroEvent::Up { target }),
        Opcode::Delay => Some(MacroEvent::Delay { ticks: arg }),
        Opcode::Padding | Opcode::Other => None,
    }
}

fn mouse_button(arg: u8) -> Option<&'static str> {
    MOUSE_BUTTONS
        .iter()
        .find(|(code, _)| *code == arg)
        .map(|(_, name)| *name)
}

/// Render events as text, one line per event.
pub fn events_to_text(events: &[MacroEvent]) -> String {
    events.iter().map(|event| format!("{event}\n")).collect()
}
