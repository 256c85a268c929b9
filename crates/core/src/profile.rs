//! In-memory profile store and its bounds-checked accessors.
//!
//! The store holds the raw settings read from the mouse. Scalar settings are
//! returned as stored; button mappings and macros are also available
//! decoded through [`mapping`](crate::mapping) and [`macros`](crate::macros).
//!
//! Stores are built from a [`StoreSnapshot`], a JSON-friendly description of
//! the same data that is validated on conversion.

use crate::bounds::{self, LEVEL_COUNT, MACRO_COUNT};
use crate::codes::BUTTON_COUNT;
use crate::error::{Error, Result};
use crate::macros::{self, DecodeOptions, MacroEvent, MACRO_LEN};
use crate::mapping::Mapping;
use crate::settings::{LightMode, ProfileId, ReportRate, PROFILE_COUNT};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Raw 4-byte button mapping record.
pub type MappingRecord = [u8; 4];

/// Raw settings of all profiles and macros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStore {
    current_profile: ProfileId,
    scroll_speeds: [u8; PROFILE_COUNT],
    light_modes: [LightMode; PROFILE_COUNT],
    colors: [[u8; 3]; PROFILE_COUNT],
    brightness_levels: [u8; PROFILE_COUNT],
    speed_levels: [u8; PROFILE_COUNT],
    dpi_enabled: [[bool; LEVEL_COUNT]; PROFILE_COUNT],
    dpi_levels: [[[u8; 2]; LEVEL_COUNT]; PROFILE_COUNT],
    report_rates: [ReportRate; PROFILE_COUNT],
    // Indexed by macro number; slot 0 is never addressed.
    macro_repeat: [u8; MACRO_COUNT + 1],
    keymap: [[MappingRecord; BUTTON_COUNT]; PROFILE_COUNT],
    // Indexed by macro number - 1.
    macros: [[u8; MACRO_LEN]; MACRO_COUNT],
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self {
            current_profile: ProfileId::Profile1,
            scroll_speeds: [0; PROFILE_COUNT],
            light_modes: [LightMode::Off; PROFILE_COUNT],
            colors: [[0; 3]; PROFILE_COUNT],
            brightness_levels: [0; PROFILE_COUNT],
            speed_levels: [0; PROFILE_COUNT],
            dpi_enabled: [[false; LEVEL_COUNT]; PROFILE_COUNT],
            dpi_levels: [[[0; 2]; LEVEL_COUNT]; PROFILE_COUNT],
            report_rates: [ReportRate::Hz1000; PROFILE_COUNT],
            macro_repeat: [0; MACRO_COUNT + 1],
            keymap: [[[0; 4]; BUTTON_COUNT]; PROFILE_COUNT],
            macros: [[0; MACRO_LEN]; MACRO_COUNT],
        }
    }
}

impl ProfileStore {
    /// Parse and validate a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: StoreSnapshot = serde_json::from_str(json)?;
        Self::try_from(snapshot)
    }

    /// Serialize the store as a JSON snapshot.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_snapshot())?)
    }

    /// Export the store as a snapshot.
    pub fn to_snapshot(&self) -> StoreSnapshot {
        let profiles = ProfileId::ALL
            .iter()
            .map(|p| {
                let i = p.index();
                ProfileSnapshot {
                    scroll_speed: self.scroll_speeds[i],
                    light_mode: self.light_modes[i].as_byte(),
                    color: self.colors[i],
                    brightness: self.brightness_levels[i],
                    speed: self.speed_levels[i],
                    report_rate: self.report_rates[i].as_byte(),
                    dpi_enabled: self.dpi_enabled[i].to_vec(),
                    dpi_levels: self.dpi_levels[i].to_vec(),
                    keymap: self.keymap[i].to_vec(),
                }
            })
            .collect();

        let macros = (bounds::MACRO_MIN..=bounds::MACRO_MAX)
            .map(|n| MacroSnapshot {
                repeat: self.macro_repeat[n],
                data: self.macros[n - 1].to_vec(),
            })
            .collect();

        StoreSnapshot {
            current_profile: self.current_profile,
            profiles,
            macros,
        }
    }

    /// Active profile.
    pub fn current_profile(&self) -> ProfileId {
        self.current_profile
    }

    pub fn scroll_speed(&self, profile: ProfileId) -> u8 {
        self.scroll_speeds[profile.index()]
    }

    pub fn light_mode(&self, profile: ProfileId) -> LightMode {
        self.light_modes[profile.index()]
    }

    /// LED color as `[r, g, b]`.
    pub fn color(&self, profile: ProfileId) -> [u8; 3] {
        self.colors[profile.index()]
    }

    pub fn brightness(&self, profile: ProfileId) -> u8 {
        self.brightness_levels[profile.index()]
    }

    pub fn speed(&self, profile: ProfileId) -> u8 {
        self.speed_levels[profile.index()]
    }

    pub fn report_rate(&self, profile: ProfileId) -> ReportRate {
        self.report_rates[profile.index()]
    }

    /// Whether a DPI level is enabled. Out-of-range levels are never enabled.
    pub fn dpi_enabled(&self, profile: ProfileId, level: usize) -> bool {
        match bounds::validate_level(level) {
            Ok(level) => self.dpi_enabled[profile.index()][level],
            Err(_) => false,
        }
    }

    /// Raw `(x, y)` DPI bytes of a level.
    pub fn dpi(&self, profile: ProfileId, level: usize) -> Result<(u8, u8)> {
        let level = bounds::validate_level(level)?;
        let [x, y] = self.dpi_levels[profile.index()][level];
        Ok((x, y))
    }

    /// Repeat count of a macro (1-based).
    pub fn macro_repeat(&self, number: usize) -> Result<u8> {
        let number = bounds::validate_macro_number(number)?;
        Ok(self.macro_repeat[number])
    }

    /// Raw mapping record of a button.
    pub fn key_mapping_raw(&self, profile: ProfileId, key: usize) -> Result<MappingRecord> {
        bounds::validate_button(key)?;
        Ok(self.keymap[profile.index()][key])
    }

    /// Decoded mapping of a button.
    pub fn key_mapping(&self, profile: ProfileId, key: usize) -> Result<Mapping> {
        let raw = self.key_mapping_raw(profile, key)?;
        Ok(Mapping::decode(raw))
    }

    /// Raw buffer of a macro (1-based).
    pub fn macro_raw(&self, number: usize) -> Result<&[u8; MACRO_LEN]> {
        let number = bounds::validate_macro_number(number)?;
        Ok(&self.macros[number - 1])
    }

    /// Decoded events of a macro (1-based), empty if the macro is unset.
    pub fn macro_events(&self, number: usize) -> Result<Vec<MacroEvent>> {
        self.macro_events_with(number, DecodeOptions::default())
    }

    /// Decoded events of a macro with explicit decoder options.
    pub fn macro_events_with(
        &self,
        number: usize,
        options: DecodeOptions,
    ) -> Result<Vec<MacroEvent>> {
        let buffer = self.macro_raw(number)?;
        let events = macros::decode_macro_with(buffer, options);
        debug!(macro_number = number, events = events.len(), "decoded macro");
        Ok(events)
    }

    /// Decoded macro as text, one line per event.
    pub fn macro_text(&self, number: usize) -> Result<String> {
        Ok(macros::events_to_text(&self.macro_events(number)?))
    }
}

/// JSON description of a [`ProfileStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub current_profile: ProfileId,
    /// One entry per profile, in slot order.
    pub profiles: Vec<ProfileSnapshot>,
    /// One entry per macro, macro 1 first.
    pub macros: Vec<MacroSnapshot>,
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        ProfileStore::default().to_snapshot()
    }
}

/// Settings of one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub scroll_speed: u8,
    /// Stored light mode byte.
    pub light_mode: u8,
    pub color: [u8; 3],
    pub brightness: u8,
    pub speed: u8,
    /// Stored report rate byte (report interval in milliseconds).
    pub report_rate: u8,
    /// One flag per DPI level.
    pub dpi_enabled: Vec<bool>,
    /// One `[x, y]` pair per DPI level.
    pub dpi_levels: Vec<[u8; 2]>,
    /// One raw record per button slot.
    pub keymap: Vec<MappingRecord>,
}

/// One macro slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSnapshot {
    pub repeat: u8,
    /// Full raw buffer.
    pub data: Vec<u8>,
}

impl TryFrom<StoreSnapshot> for ProfileStore {
    type Error = Error;

    fn try_from(snapshot: StoreSnapshot) -> Result<Self> {
        let mut store = ProfileStore {
            current_profile: snapshot.current_profile,
            ..Default::default()
        };

        let profiles: [ProfileSnapshot; PROFILE_COUNT] = exact("profiles", snapshot.profiles)?;
        for (i, profile) in profiles.into_iter().enumerate() {
            store.scroll_speeds[i] = profile.scroll_speed;
            store.light_modes[i] = LightMode::from_byte(profile.light_mode)
                .ok_or_else(|| invalid_byte("light_mode", profile.light_mode))?;
            store.colors[i] = profile.color;
            store.brightness_levels[i] = profile.brightness;
            store.speed_levels[i] = profile.speed;
            store.report_rates[i] = ReportRate::from_byte(profile.report_rate)
                .ok_or_else(|| invalid_byte("report_rate", profile.report_rate))?;
            store.dpi_enabled[i] = exact("dpi_enabled", profile.dpi_enabled)?;
            store.dpi_levels[i] = exact("dpi_levels", profile.dpi_levels)?;
            store.keymap[i] = exact("keymap", profile.keymap)?;
        }

        let macros: [MacroSnapshot; MACRO_COUNT] = exact("macros", snapshot.macros)?;
        for (i, slot) in macros.into_iter().enumerate() {
            store.macro_repeat[i + 1] = slot.repeat;
            store.macros[i] = exact("macro data", slot.data)?;
        }

        Ok(store)
    }
}

fn invalid_byte(field: &str, value: u8) -> Error {
    warn!(field, value, "snapshot rejected");
    Error::Snapshot(format!("{field}: unknown value 0x{value:02x}"))
}

/// Convert a snapshot list into a fixed-size array, rejecting wrong lengths.
fn exact<T, const N: usize>(field: &str, items: Vec<T>) -> Result<[T; N]> {
    items.try_into().map_err(|items: Vec<T>| {
        warn!(field, expected = N, found = items.len(), "snapshot rejected");
        Error::Snapshot(format!(
            "{field}: expected {N} entries, found {}",
            items.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> ProfileStore {
        let mut snapshot = StoreSnapshot::default();
        snapshot.current_profile = ProfileId::Profile2;
        let p = &mut snapshot.profiles[1];
        p.scroll_speed = 3;
        p.light_mode = LightMode::Breathing.as_byte();
        p.color = [0xff, 0x80, 0x00];
        p.brightness = 2;
        p.speed = 4;
        p.report_rate = ReportRate::Hz500.as_byte();
        p.dpi_enabled = vec![true, true, false, true, false];
        p.dpi_levels = vec![[0x04, 0x04], [0x09, 0x09], [0x12, 0x12], [0x1c, 0x1c], [0x3f, 0x3f]];
        p.keymap[0] = [0x81, 0x00, 0x00, 0x00];
        p.keymap[3] = [0x99, 0x81, 3, 10];
        p.keymap[4] = [0x8f, 0x01, 0x06, 0x00];

        snapshot.macros[0].repeat = 2;
        snapshot.macros[0].data[8..11].copy_from_slice(&[0x06, 7, 0x00]);
        snapshot.macros[14].repeat = 9;

        ProfileStore::try_from(snapshot).unwrap()
    }

    #[test]
    fn scalar_accessors_return_stored_values() {
        let store = sample_store();
        let p = ProfileId::Profile2;
        assert_eq!(store.current_profile(), p);
        assert_eq!(store.scroll_speed(p), 3);
        assert_eq!(store.light_mode(p), LightMode::Breathing);
        assert_eq!(store.color(p), [0xff, 0x80, 0x00]);
        assert_eq!(store.brightness(p), 2);
        assert_eq!(store.speed(p), 4);
        assert_eq!(store.report_rate(p), ReportRate::Hz500);
        assert_eq!(store.report_rate(ProfileId::Profile1), ReportRate::Hz1000);
    }

    #[test]
    fn dpi_in_range_returns_pair() {
        let store = sample_store();
        assert_eq!(store.dpi(ProfileId::Profile2, 0).unwrap(), (0x04, 0x04));
        assert_eq!(store.dpi(ProfileId::Profile2, 4).unwrap(), (0x3f, 0x3f));
    }

    #[test]
    fn dpi_out_of_range_fails_for_every_profile() {
        let store = sample_store();
        for profile in ProfileId::ALL {
            assert!(matches!(
                store.dpi(*profile, bounds::LEVEL_MAX + 1),
                Err(Error::OutOfRange { field: "level", .. })
            ));
        }
    }

    #[test]
    fn dpi_enabled_is_false_out_of_range() {
        let store = sample_store();
        assert!(store.dpi_enabled(ProfileId::Profile2, 0));
        assert!(!store.dpi_enabled(ProfileId::Profile2, 2));
        assert!(!store.dpi_enabled(ProfileId::Profile2, 99));
    }

    #[test]
    fn macro_repeat_is_indexed_by_number() {
        let store = sample_store();
        assert_eq!(store.macro_repeat(1).unwrap(), 2);
        assert_eq!(store.macro_repeat(15).unwrap(), 9);
        assert!(store.macro_repeat(0).is_err());
        assert!(store.macro_repeat(16).is_err());
    }

    #[test]
    fn key_mapping_decodes_record() {
        let store = sample_store();
        let p = ProfileId::Profile2;
        assert_eq!(store.key_mapping(p, 0).unwrap().to_string(), "left");
        assert_eq!(
            store.key_mapping(p, 3).unwrap().to_string(),
            "fire:mouse_left:3:10"
        );
        assert_eq!(store.key_mapping(p, 4).unwrap().to_string(), "ctrl_l+c");
        assert_eq!(store.key_mapping_raw(p, 3).unwrap(), [0x99, 0x81, 3, 10]);
    }

    #[test]
    fn key_mapping_rejects_unnamed_slot() {
        let store = sample_store();
        assert!(matches!(
            store.key_mapping(ProfileId::Profile1, 6),
            Err(Error::InvalidButton(6))
        ));
        assert!(store.key_mapping_raw(ProfileId::Profile1, 42).is_err());
    }

    #[test]
    fn macro_accessors() {
        let store = sample_store();
        assert_eq!(store.macro_raw(1).unwrap()[8], 0x06);
        assert_eq!(
            store.macro_events(1).unwrap(),
            vec![MacroEvent::Delay { ticks: 7 }]
        );
        assert_eq!(store.macro_text(1).unwrap(), "delay\t7\n");
        assert!(store.macro_events(2).unwrap().is_empty());
        assert!(store.macro_raw(0).is_err());
        assert!(store.macro_events(16).is_err());
    }

    #[test]
    fn snapshot_json_roundtrip() {
        let store = sample_store();
        let json = store.to_json().unwrap();
        let restored = ProfileStore::from_json(&json).unwrap();
        assert_eq!(restored, store);
    }

    #[test]
    fn snapshot_with_wrong_profile_count_is_rejected() {
        let mut snapshot = StoreSnapshot::default();
        snapshot.profiles.pop();
        let err = ProfileStore::try_from(snapshot).unwrap_err();
        assert_eq!(
            err.to_string(),
            "snapshot error: profiles: expected 5 entries, found 4"
        );
    }

    #[test]
    fn snapshot_with_short_macro_is_rejected() {
        let mut snapshot = StoreSnapshot::default();
        snapshot.macros[3].data.truncate(200);
        assert!(matches!(
            ProfileStore::try_from(snapshot),
            Err(Error::Snapshot(_))
        ));
    }

    #[test]
    fn snapshot_with_unknown_report_rate_is_rejected() {
        let mut snapshot = StoreSnapshot::default();
        snapshot.profiles[0].report_rate = 0x03;
        let err = ProfileStore::try_from(snapshot).unwrap_err();
        assert_eq!(
            err.to_string(),
            "snapshot error: report_rate: unknown value 0x03"
        );
    }

    #[test]
    fn snapshot_with_unknown_light_mode_is_rejected() {
        let mut snapshot = StoreSnapshot::default();
        snapshot.profiles[4].light_mode = 0x20;
        assert!(matches!(
            ProfileStore::try_from(snapshot),
            Err(Error::Snapshot(_))
        ));
    }

    #[test]
    fn snapshot_stores_raw_setting_bytes() {
        let snapshot = sample_store().to_snapshot();
        assert_eq!(snapshot.profiles[1].report_rate, 0x02);
        assert_eq!(snapshot.profiles[1].light_mode, 0x02);
        assert_eq!(snapshot.profiles[0].report_rate, 0x01);
    }

    #[test]
    fn snapshot_with_malformed_json_is_rejected() {
        let mut value = serde_json::to_value(StoreSnapshot::default()).unwrap();
        value["profiles"][0]["report_rate"] = serde_json::json!("Hz1000");
        let err = ProfileStore::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
