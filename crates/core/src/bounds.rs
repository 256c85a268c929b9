//! Bounds layer: validates every selector against the device layout before
//! any table is indexed.
//!
//! # M715 layout
//!
//! ## DPI levels
//! - **Range**: 0 – 4 per profile
//! - Each level stores an enable flag and an (x, y) pair of raw DPI bytes.
//!
//! ## Macros
//! - **Range**: 1 – 15, numbered as in the vendor software
//! - Buffers are stored at `n - 1`; repeat counts are stored at `n`.
//!
//! ## Buttons
//! - Slots 0 – 7; a slot is addressable only if it has a name in
//!   [`BUTTON_NAMES`](crate::codes::BUTTON_NAMES).
//!
//! ## Profiles
//! - Numbers 1 – 5 (slots 0 – 4), typed as [`ProfileId`] once validated.

use crate::codes;
use crate::error::{Error, Result};
use crate::settings::{ProfileId, PROFILE_COUNT};

/// Lowest DPI level.
pub const LEVEL_MIN: usize = 0;
/// Highest DPI level.
pub const LEVEL_MAX: usize = 4;
/// Number of DPI levels per profile.
pub const LEVEL_COUNT: usize = LEVEL_MAX - LEVEL_MIN + 1;

/// Lowest macro number.
pub const MACRO_MIN: usize = 1;
/// Highest macro number.
pub const MACRO_MAX: usize = 15;
/// Number of macro slots.
pub const MACRO_COUNT: usize = MACRO_MAX - MACRO_MIN + 1;

/// Validate a DPI level.
pub fn validate_level(level: usize) -> Result<usize> {
    if !(LEVEL_MIN..=LEVEL_MAX).contains(&level) {
        return Err(Error::OutOfRange {
            field: "level",
            value: level as u64,
            min: LEVEL_MIN as u64,
            max: LEVEL_MAX as u64,
        });
    }
    Ok(level)
}

/// Validate a 1-based macro number.
pub fn validate_macro_number(number: usize) -> Result<usize> {
    if !(MACRO_MIN..=MACRO_MAX).contains(&number) {
        return Err(Error::OutOfRange {
            field: "macro_number",
            value: number as u64,
            min: MACRO_MIN as u64,
            max: MACRO_MAX as u64,
        });
    }
    Ok(number)
}

/// Validate a button slot and return its canonical name.
pub fn validate_button(key: usize) -> Result<&'static str> {
    codes::button_name(key).ok_or(Error::InvalidButton(key))
}

/// Validate a 1-based profile number, as printed on the device.
pub fn validate_profile_number(number: usize) -> Result<ProfileId> {
    number
        .checked_sub(1)
        .and_then(ProfileId::from_index)
        .ok_or(Error::OutOfRange {
            field: "profile",
            value: number as u64,
            min: 1,
            max: PROFILE_COUNT as u64,
        })
}
