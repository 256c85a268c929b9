//! Button mapping decoder for the 4-byte per-button records.
//!
//! Record layout `[b1, b2, b3, b4]`, sub-format selected by `b1`:
//!   - `0x99` fire: `b2` = button or key, `b3` = repeat count, `b4` = delay
//!   - `0x90` plain key: `b3` = HID usage ID
//!   - `0x8f` modifiers + key: `b2` = modifier mask, `b3` = HID usage ID
//!   - anything else: `(b1, b2, b3)` is a special-function signature
//!
//! Every record decodes to exactly one [`Mapping`]. Records that match no
//! known code become [`Mapping::Unknown`] and keep their raw bytes.

use crate::codes;
use serde::Serialize;
use tracing::{debug, trace};

/// Prefix of the diagnostic line for unrecognized mapping records.
pub const UNKNOWN_MAPPING_PREFIX: &str = "unknown, please report as bug: (dec)";

/// Record sub-format bytes.
pub mod formats {
    /// Rapid-fire of a mouse button or key.
    pub const FIRE: u8 = 0x99;
    /// Single keyboard key.
    pub const KEY: u8 = 0x90;
    /// Keyboard modifiers plus a key.
    pub const MODIFIED_KEY: u8 = 0x8f;
}

/// Fire sub-codes for mouse buttons, checked before the key table.
const FIRE_MOUSE_BUTTONS: &[(u8, &str)] = &[
    (0x81, "mouse_left"),
    (0x82, "mouse_right"),
    (0x84, "mouse_middle"),
];

/// Sub-format selected by the first record byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Fire,
    Key,
    ModifiedKey,
    Special,
}

impl Format {
    fn from_byte(b1: u8) -> Self {
        match b1 {
            formats::FIRE => Self::Fire,
            formats::KEY => Self::Key,
            formats::MODIFIED_KEY => Self::ModifiedKey,
            _ => Self::Special,
        }
    }
}

/// Decoded action of one button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mapping {
    /// Repeated clicks of `target`. `target` is `None` when the sub-code has
    /// no name.
    Fire {
        target: Option<&'static str>,
        repeat: u8,
        delay: u8,
    },
    /// Single keyboard key.
    Key { key: &'static str },
    /// Keyboard key with modifiers held, modifiers in table order.
    ModifiedKey {
        modifiers: Vec<&'static str>,
        key: &'static str,
    },
    /// Mouse button or special function from the composite table.
    Special { name: &'static str },
    /// Record that matched no known code.
    Unknown { raw: [u8; 4] },
}

impl Mapping {
    /// Decode a raw record. Never fails.
    pub fn decode(raw: [u8; 4]) -> Self {
        let [b1, b2, b3, b4] = raw;
        let format = Format::from_byte(b1);
        trace!(
            format = ?format,
            raw_hex = format_args!("{:02X?}", raw),
            "decoding button mapping"
        );

        let decoded = match format {
            Format::Fire => Some(Self::Fire {
                target: fire_target(b2),
                repeat: b3,
                delay: b4,
            }),
            Format::Key => codes::key_name(b3).map(|key| Self::Key { key }),
            Format::ModifiedKey => codes::key_name(b3).map(|key| Self::ModifiedKey {
                modifiers: codes::modifier_names(b2).collect(),
                key,
            }),
            Format::Special => {
                codes::special_function_name([b1, b2, b3]).map(|name| Self::Special { name })
            }
        };

        decoded.unwrap_or_else(|| {
            debug!(
                raw_hex = format_args!("{:02X?}", raw),
                "unrecognized button mapping"
            );
            Self::Unknown { raw }
        })
    }

    /// Whether the record matched no known code.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown { .. })
    }
}

fn fire_target(b2: u8) -> Option<&'static str> {
    FIRE_MOUSE_BUTTONS
        .iter()
        .find(|(code, _)| *code == b2)
        .map(|(_, name)| *name)
        .or_else(|| codes::key_name(b2))
}

impl std::fmt::Display for Mapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fire {
                target,
                repeat,
                delay,
            } => write!(f, "fire:{}:{}:{}", target.unwrap_or(""), repeat, delay),
            Self::Key { key } => f.write_str(key),
            Self::ModifiedKey { modifiers, key } => {
                for modifier in modifiers {
                    f.write_str(modifier)?;
                }
                f.write_str(key)
            }
            Self::Special { name } => f.write_str(name),
            Self::Unknown { raw } => write!(
                f,
                "{} {} {} {} {}",
                UNKNOWN_MAPPING_PREFIX, raw[0], raw[1], raw[2], raw[3]
            ),
        }
    }
}

/// Decode a raw record straight to its display string.
pub fn decode_mapping(raw: [u8; 4]) -> String {
    Mapping::decode(raw).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{KEYBOARD_KEYS, SPECIAL_FUNCTIONS};

    #[test]
    fn fire_with_mouse_button() {
        assert_eq!(decode_mapping([0x99, 0x81, 3, 10]), "fire:mouse_left:3:10");
        assert_eq!(decode_mapping([0x99, 0x82, 1, 0]), "fire:mouse_right:1:0");
        assert_eq!(decode_mapping([0x99, 0x84, 255, 255]), "fire:mouse_middle:255:255");
    }

    #[test]
    fn fire_with_keyboard_key() {
        // 0x04 = a
        assert_eq!(decode_mapping([0x99, 0x04, 2, 50]), "fire:a:2:50");
    }

    #[test]
    fn fire_with_unnamed_target_leaves_slot_empty() {
        let mapping = Mapping::decode([0x99, 0x00, 4, 20]);
        assert_eq!(
            mapping,
            Mapping::Fire {
                target: None,
                repeat: 4,
                delay: 20
            }
        );
        assert_eq!(mapping.to_string(), "fire::4:20");
    }

    #[test]
    fn every_keyboard_key_decodes_as_plain_key() {
        for (name, code) in KEYBOARD_KEYS {
            assert_eq!(decode_mapping([0x90, 0x00, *code, 0x00]), *name);
        }
    }

    #[test]
    fn plain_key_ignores_b2_and_b4() {
        assert_eq!(decode_mapping([0x90, 0x55, 0x2c, 0xaa]), "space");
    }

    #[test]
    fn plain_key_with_unknown_code_is_unknown() {
        let mapping = Mapping::decode([0x90, 0x00, 0x00, 0x00]);
        assert!(mapping.is_unknown());
        assert_eq!(
            mapping.to_string(),
            "unknown, please report as bug: (dec) 144 0 0 0"
        );
    }

    #[test]
    fn modified_key_concatenates_in_table_order() {
        // ctrl_l | shift_l, key c
        assert_eq!(decode_mapping([0x8f, 0x03, 0x06, 0x00]), "ctrl_l+shift_l+c");
        // alt_r | ctrl_l, listed ctrl_l first
        assert_eq!(decode_mapping([0x8f, 0x41, 0x3a, 0x00]), "ctrl_l+alt_r+f1");
    }

    #[test]
    fn modified_key_without_modifiers_is_just_the_key() {
        assert_eq!(decode_mapping([0x8f, 0x00, 0x29, 0x00]), "esc");
    }

    #[test]
    fn modified_key_with_unknown_key_drops_modifier_text() {
        let text = decode_mapping([0x8f, 0x01, 0x00, 0x07]);
        assert_eq!(text, "unknown, please report as bug: (dec) 143 1 0 7");
        assert!(!text.contains("ctrl_l+"));
    }

    #[test]
    fn every_special_function_decodes_regardless_of_b4() {
        for (name, sig) in SPECIAL_FUNCTIONS {
            for b4 in [0x00, 0x01, 0x7f, 0xff] {
                assert_eq!(decode_mapping([sig[0], sig[1], sig[2], b4]), *name);
            }
        }
    }

    #[test]
    fn unmatched_triple_is_unknown_with_decimal_bytes() {
        let text = decode_mapping([0x12, 0x34, 0x56, 0x78]);
        assert_eq!(text, "unknown, please report as bug: (dec) 18 52 86 120");
    }

    #[test]
    fn unknown_keeps_raw_bytes() {
        let raw = [0xfe, 0x01, 0x02, 0x03];
        assert_eq!(Mapping::decode(raw), Mapping::Unknown { raw });
    }

    #[test]
    fn decoding_is_idempotent() {
        for raw in [[0x99, 0x81, 3, 10], [0x8f, 0x05, 0x04, 0], [0x12, 0, 0, 0]] {
            assert_eq!(Mapping::decode(raw), Mapping::decode(raw));
            assert_eq!(decode_mapping(raw), decode_mapping(raw));
        }
    }

    #[test]
    fn mapping_serializes_with_kind_tag() {
        let json = serde_json::to_value(Mapping::decode([0x90, 0x00, 0x04, 0x00])).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "key", "key": "a" }));
    }
}
