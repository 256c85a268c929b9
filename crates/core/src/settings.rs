//! Setting value types stored per profile: profile slots, report rate,
//! and light mode.

use serde::{Deserialize, Serialize};

/// Number of onboard profiles.
pub const PROFILE_COUNT: usize = 5;

/// One of the device's onboard profile slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileId {
    Profile1,
    Profile2,
    Profile3,
    Profile4,
    Profile5,
}

impl ProfileId {
    /// All profiles in slot order.
    pub const ALL: &'static [ProfileId] = &[
        ProfileId::Profile1,
        ProfileId::Profile2,
        ProfileId::Profile3,
        ProfileId::Profile4,
        ProfileId::Profile5,
    ];

    /// Profile for a 0-based slot index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// 0-based slot index.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// 1-based number as printed on the device.
    pub fn number(&self) -> usize {
        self.index() + 1
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "profile {}", self.number())
    }
}

/// USB report rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ReportRate {
    Hz125 = 125,
    Hz250 = 250,
    Hz500 = 500,
    Hz1000 = 1000,
}

impl ReportRate {
    /// All supported rates.
    pub const ALL: &'static [ReportRate] = &[
        ReportRate::Hz125,
        ReportRate::Hz250,
        ReportRate::Hz500,
        ReportRate::Hz1000,
    ];

    /// Decode the stored byte, which is the report interval in milliseconds.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x08 => Some(Self::Hz125),
            0x04 => Some(Self::Hz250),
            0x02 => Some(Self::Hz500),
            0x01 => Some(Self::Hz1000),
            _ => None,
        }
    }

    /// Stored byte for this rate.
    pub fn as_byte(&self) -> u8 {
        match self {
            Self::Hz125 => 0x08,
            Self::Hz250 => 0x04,
            Self::Hz500 => 0x02,
            Self::Hz1000 => 0x01,
        }
    }

    /// Get the Hz value.
    pub fn as_hz(&self) -> u16 {
        *self as u16
    }
}

impl std::fmt::Display for ReportRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Hz", self.as_hz())
    }
}

/// LED light mode.
///
/// The stored byte is the variant's position in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightMode {
    Off,
    Static,
    Breathing,
    Rainbow,
    Wave,
    Alternating,
    Reactive,
    Flashing,
}

impl LightMode {
    /// All modes in stored byte order.
    pub const ALL: &'static [LightMode] = &[
        LightMode::Off,
        LightMode::Static,
        LightMode::Breathing,
        LightMode::Rainbow,
        LightMode::Wave,
        LightMode::Alternating,
        LightMode::Reactive,
        LightMode::Flashing,
    ];

    /// Decode the stored byte.
    pub fn from_byte(b: u8) -> Option<Self> {
        Self::ALL.get(b as usize).copied()
    }

    /// Stored byte for this mode.
    pub fn as_byte(&self) -> u8 {
        *self as u8
    }

    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Static => "static",
            Self::Breathing => "breathing",
            Self::Rainbow => "rainbow",
            Self::Wave => "wave",
            Self::Alternating => "alternating",
            Self::Reactive => "reactive",
            Self::Flashing => "flashing",
        }
    }
}

impl std::fmt::Display for LightMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
