//! m715-core: decoding of Redragon M715 onboard profile data.
//!
//! This crate turns the raw configuration blocks read from the mouse into
//! readable records: button mappings, macro event sequences, and the
//! per-profile settings around them. Reading the blocks from the device is
//! left to the caller.

pub mod bounds;
pub mod codes;
pub mod error;
pub mod macros;
pub mod mapping;
pub mod profile;
pub mod settings;

pub use error::{Error, Result};
pub use macros::{decode_macro, DecodeOptions, MacroEvent};
pub use mapping::{decode_mapping, Mapping};
pub use profile::{ProfileStore, StoreSnapshot};
pub use settings::{LightMode, ProfileId, ReportRate};
