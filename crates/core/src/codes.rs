//! Static code tables: keyboard keys, modifiers, special functions, and
//! button slot names.
//!
//! All tables are searched linearly and the first entry in definition order
//! wins. Keyboard key codes are USB HID usage IDs (keyboard page 0x07).
//! Media entries in [`SPECIAL_FUNCTIONS`] carry a consumer-page usage ID in
//! bytes 1..=2 (big-endian).

/// Number of button slots per profile.
pub const BUTTON_COUNT: usize = 8;

/// Canonical names of the physical button slots, indexed by slot.
///
/// Empty names mark slots that exist in device memory but have no button.
pub const BUTTON_NAMES: [&str; BUTTON_COUNT] = [
    "button_left",
    "button_right",
    "button_middle",
    "button_fire",
    "button_dpi_up",
    "button_dpi_down",
    "",
    "",
];

/// Keyboard modifiers: name and bit in the modifier mask.
///
/// Names carry their own `+` separator so that a decoded combination reads
/// `ctrl_l+shift_l+a`.
pub const KEYBOARD_MODIFIERS: &[(&str, u8)] = &[
    ("ctrl_l+", 0x01),
    ("shift_l+", 0x02),
    ("alt_l+", 0x04),
    ("super_l+", 0x08),
    ("ctrl_r+", 0x10),
    ("shift_r+", 0x20),
    ("alt_r+", 0x40),
    ("super_r+", 0x80),
];

/// Keyboard keys: name and HID usage ID.
pub const KEYBOARD_KEYS: &[(&str, u8)] = &[
    ("a", 0x04),
    ("b", 0x05),
    ("c", 0x06),
    ("d", 0x07),
    ("e", 0x08),
    ("f", 0x09),
    ("g", 0x0a),
    ("h", 0x0b),
    ("i", 0x0c),
    ("j", 0x0d),
    ("k", 0x0e),
    ("l", 0x0f),
    ("m", 0x10),
    ("n", 0x11),
    ("o", 0x12),
    ("p", 0x13),
    ("q", 0x14),
    ("r", 0x15),
    ("s", 0x16),
    ("t", 0x17),
    ("u", 0x18),
    ("v", 0x19),
    ("w", 0x1a),
    ("x", 0x1b),
    ("y", 0x1c),
    ("z", 0x1d),
    ("1", 0x1e),
    ("2", 0x1f),
    ("3", 0x20),
    ("4", 0x21),
    ("5", 0x22),
    ("6", 0x23),
    ("7", 0x24),
    ("8", 0x25),
    ("9", 0x26),
    ("0", 0x27),
    ("enter", 0x28),
    ("esc", 0x29),
    ("backspace", 0x2a),
    ("tab", 0x2b),
    ("space", 0x2c),
    ("minus", 0x2d),
    ("equal", 0x2e),
    ("bracket_l", 0x2f),
    ("bracket_r", 0x30),
    ("backslash", 0x31),
    ("hash", 0x32),
    ("semicolon", 0x33),
    ("apostrophe", 0x34),
    ("grave", 0x35),
    ("comma", 0x36),
    ("period", 0x37),
    ("slash", 0x38),
    ("caps_lock", 0x39),
    ("f1", 0x3a),
    ("f2", 0x3b),
    ("f3", 0x3c),
    ("f4", 0x3d),
    ("f5", 0x3e),
    ("f6", 0x3f),
    ("f7", 0x40),
    ("f8", 0x41),
    ("f9", 0x42),
    ("f10", 0x43),
    ("f11", 0x44),
    ("f12", 0x45),
    ("print", 0x46),
    ("scroll_lock", 0x47),
    ("pause", 0x48),
    ("insert", 0x49),
    ("home", 0x4a),
    ("page_up", 0x4b),
    ("delete", 0x4c),
    ("end", 0x4d),
    ("page_down", 0x4e),
    ("right", 0x4f),
    ("left", 0x50),
    ("down", 0x51),
    ("up", 0x52),
    ("num_lock", 0x53),
    ("kp_slash", 0x54),
    ("kp_asterisk", 0x55),
    ("kp_minus", 0x56),
    ("kp_plus", 0x57),
    ("kp_enter", 0x58),
    ("kp_1", 0x59),
    ("kp_2", 0x5a),
    ("kp_3", 0x5b),
    ("kp_4", 0x5c),
    ("kp_5", 0x5d),
    ("kp_6", 0x5e),
    ("kp_7", 0x5f),
    ("kp_8", 0x60),
    ("kp_9", 0x61),
    ("kp_0", 0x62),
    ("kp_period", 0x63),
    ("backslash_iso", 0x64),
    ("menu", 0x65),
    ("f13", 0x68),
    ("f14", 0x69),
    ("f15", 0x6a),
    ("f16", 0x6b),
    ("f17", 0x6c),
    ("f18", 0x6d),
    ("f19", 0x6e),
    ("f20", 0x6f),
    ("f21", 0x70),
    ("f22", 0x71),
    ("f23", 0x72),
    ("f24", 0x73),
    ("ctrl_l", 0xe0),
    ("shift_l", 0xe1),
    ("alt_l", 0xe2),
    ("super_l", 0xe3),
    ("ctrl_r", 0xe4),
    ("shift_r", 0xe5),
    ("alt_r", 0xe6),
    ("super_r", 0xe7),
];

/// Composite special-function codes: name and full 3-byte signature.
///
/// No signature starts with a byte that the mapping decoder dispatches on
/// before reaching this table (0x99, 0x90, 0x8f).
pub const SPECIAL_FUNCTIONS: &[(&str, [u8; 3])] = &[
    ("left", [0x81, 0x00, 0x00]),
    ("right", [0x82, 0x00, 0x00]),
    ("middle", [0x84, 0x00, 0x00]),
    ("backward", [0x88, 0x00, 0x00]),
    ("forward", [0x85, 0x00, 0x00]),
    ("dpi+", [0x8a, 0x00, 0x00]),
    ("dpi-", [0x89, 0x00, 0x00]),
    ("dpi-cycle", [0x87, 0x00, 0x00]),
    ("scroll_up", [0x8b, 0x00, 0x00]),
    ("scroll_down", [0x8c, 0x00, 0x00]),
    ("profile_switch", [0x8d, 0x00, 0x00]),
    ("report_rate+", [0x97, 0x00, 0x00]),
    ("report_rate-", [0x98, 0x00, 0x00]),
    ("media_play", [0x8e, 0x00, 0xcd]),
    ("media_stop", [0x8e, 0x00, 0xb7]),
    ("media_next", [0x8e, 0x00, 0xb5]),
    ("media_previous", [0x8e, 0x00, 0xb6]),
    ("media_volume_up", [0x8e, 0x00, 0xe9]),
    ("media_volume_down", [0x8e, 0x00, 0xea]),
    ("media_mute", [0x8e, 0x00, 0xe2]),
    ("media_email", [0x8e, 0x01, 0x8a]),
    ("media_calculator", [0x8e, 0x01, 0x92]),
    ("media_computer", [0x8e, 0x01, 0x94]),
    ("media_search", [0x8e, 0x02, 0x21]),
    ("media_home", [0x8e, 0x02, 0x23]),
    ("media_browser_back", [0x8e, 0x02, 0x24]),
    ("media_browser_forward", [0x8e, 0x02, 0x25]),
    ("media_browser_refresh", [0x8e, 0x02, 0x27]),
    ("none", [0x00, 0x00, 0x00]),
];

/// Look up a keyboard key name by HID usage ID.
pub fn key_name(code: u8) -> Option<&'static str> {
    KEYBOARD_KEYS
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(name, _)| *name)
}

/// Look up a keyboard key's HID usage ID by name.
pub fn key_code(name: &str) -> Option<u8> {
    KEYBOARD_KEYS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, code)| *code)
}

/// Names of every modifier whose bit is set in `mask`, in table order.
pub fn modifier_names(mask: u8) -> impl Iterator<Item = &'static str> {
    KEYBOARD_MODIFIERS
        .iter()
        .filter(move |(_, bit)| bit & mask != 0)
        .map(|(name, _)| *name)
}

/// Look up a special function by its full 3-byte signature.
pub fn special_function_name(signature: [u8; 3]) -> Option<&'static str> {
    SPECIAL_FUNCTIONS
        .iter()
        .find(|(_, sig)| *sig == signature)
        .map(|(name, _)| *name)
}

/// Canonical name of a button slot, `None` for unused or nonexistent slots.
pub fn button_name(index: usize) -> Option<&'static str> {
    BUTTON_NAMES
        .get(index)
        .copied()
        .filter(|name| !name.is_empty())
}

/// Slot index of a button by canonical name.
pub fn button_index(name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }
    BUTTON_NAMES.iter().position(|n| *n == name)
}
