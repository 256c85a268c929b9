//! m715 CLI: command-line decoder for M715 profile data.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use m715_core::bounds::{self, LEVEL_MAX, LEVEL_MIN, MACRO_MAX, MACRO_MIN};
use m715_core::codes::{self, BUTTON_COUNT};
use m715_core::macros::{self, DecodeOptions, MACRO_LEN};
use m715_core::{Mapping, ProfileStore};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "m715",
    version,
    about = "Decode Redragon M715 button mappings and macros"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one 4-byte button mapping record.
    DecodeMapping {
        /// Record bytes: decimal, 0x-prefixed hex, or a key name such as `a`.
        ///
        /// Numbers win over key names, so `1` is the byte 1, not the key.
        #[arg(num_args = 4, value_parser = parse_byte)]
        bytes: Vec<u8>,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Decode a raw 256-byte macro buffer from a file.
    DecodeMacro {
        /// File holding the raw buffer.
        file: PathBuf,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
        /// Resolve mouse button records instead of reporting them as unknown.
        #[arg(long)]
        resolve_mouse_buttons: bool,
    },
    /// Show the settings and button mappings of a profile in a store snapshot.
    Show {
        /// Store snapshot (JSON).
        snapshot: PathBuf,
        /// Profile number (1-5); defaults to the active profile.
        #[arg(long)]
        profile: Option<usize>,
        /// Show only this button's mapping, by canonical name (see `list-codes`).
        #[arg(long, value_parser = parse_button)]
        button: Option<usize>,
    },
    /// Show one macro from a store snapshot.
    ShowMacro {
        /// Store snapshot (JSON).
        snapshot: PathBuf,
        /// Macro number (1-15).
        number: usize,
        /// Resolve mouse button records instead of reporting them as unknown.
        #[arg(long)]
        resolve_mouse_buttons: bool,
    },
    /// List the code tables.
    ListCodes,
}

fn parse_byte(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    parsed
        .or_else(|e| codes::key_code(s).ok_or(e))
        .map_err(|e| format!("invalid byte '{s}': {e}"))
}

fn parse_button(s: &str) -> Result<usize, String> {
    codes::button_index(s).ok_or_else(|| {
        let names: Vec<&str> = codes::BUTTON_NAMES
            .iter()
            .copied()
            .filter(|name| !name.is_empty())
            .collect();
        format!("unknown button '{s}', expected one of: {}", names.join(", "))
    })
}

fn load_store(path: &Path) -> Result<ProfileStore> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read snapshot {}", path.display()))?;
    let store = ProfileStore::from_json(&json)
        .with_context(|| format!("load snapshot {}", path.display()))?;
    debug!(path = %path.display(), "snapshot loaded");
    Ok(store)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::DecodeMapping { bytes, json } => {
            let raw: [u8; 4] = bytes
                .try_into()
                .map_err(|_| anyhow::anyhow!("expected exactly 4 bytes"))?;
            let mapping = Mapping::decode(raw);
            if json {
                println!("{}", serde_json::to_string_pretty(&mapping)?);
            } else {
                println!("{mapping}");
            }
        }
        Commands::DecodeMacro {
            file,
            json,
            resolve_mouse_buttons,
        } => {
            let data =
                std::fs::read(&file).with_context(|| format!("read {}", file.display()))?;
            let buffer: [u8; MACRO_LEN] = data.try_into().map_err(|data: Vec<u8>| {
                anyhow::anyhow!(
                    "macro buffer must be {MACRO_LEN} bytes, {} has {}",
                    file.display(),
                    data.len()
                )
            })?;
            let events = macros::decode_macro_with(
                &buffer,
                DecodeOptions {
                    resolve_mouse_buttons,
                },
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&events)?);
            } else if events.is_empty() {
                println!("Macro is not set.");
            } else {
                print!("{}", macros::events_to_text(&events));
            }
        }
        Commands::Show {
            snapshot,
            profile,
            button,
        } => {
            let store = load_store(&snapshot)?;
            let profile = match profile {
                Some(number) => bounds::validate_profile_number(number)?,
                None => store.current_profile(),
            };

            if let Some(key) = button {
                let name = bounds::validate_button(key)?;
                println!("{name}: {}", store.key_mapping(profile, key)?);
                return Ok(());
            }

            let active = if profile == store.current_profile() {
                " (active)"
            } else {
                ""
            };
            println!("Profile {}{active}", profile.number());
            println!("  Report rate: {}", store.report_rate(profile));
            println!("  Scroll speed: {}", store.scroll_speed(profile));
            let [r, g, b] = store.color(profile);
            println!(
                "  Light: {} color #{r:02x}{g:02x}{b:02x} brightness {} speed {}",
                store.light_mode(profile),
                store.brightness(profile),
                store.speed(profile)
            );
            for level in LEVEL_MIN..=LEVEL_MAX {
                let (x, y) = store.dpi(profile, level)?;
                let state = if store.dpi_enabled(profile, level) {
                    "enabled"
                } else {
                    "disabled"
                };
                println!("  DPI level {level}: 0x{x:02x} 0x{y:02x} ({state})");
            }
            for key in 0..BUTTON_COUNT {
                let Some(name) = codes::button_name(key) else {
                    continue;
                };
                println!("  {name}: {}", store.key_mapping(profile, key)?);
            }
            for number in MACRO_MIN..=MACRO_MAX {
                let events = store.macro_events(number)?;
                if !events.is_empty() {
                    println!(
                        "  Macro {number}: {} events, repeat {}",
                        events.len(),
                        store.macro_repeat(number)?
                    );
                }
            }
        }
        Commands::ShowMacro {
            snapshot,
            number,
            resolve_mouse_buttons,
        } => {
            let store = load_store(&snapshot)?;
            let events = store.macro_events_with(
                number,
                DecodeOptions {
                    resolve_mouse_buttons,
                },
            )?;
            println!("Macro {number} (repeat {})", store.macro_repeat(number)?);
            if events.is_empty() {
                println!("Macro is not set.");
            } else {
                print!("{}", macros::events_to_text(&events));
            }
        }
        Commands::ListCodes => {
            println!("Buttons:");
            for (index, name) in codes::BUTTON_NAMES.iter().enumerate() {
                if !name.is_empty() {
                    println!("  {index}: {name}");
                }
            }
            println!("Modifiers:");
            for (name, bit) in codes::KEYBOARD_MODIFIERS {
                println!("  {name} 0x{bit:02x}");
            }
            println!("Keys:");
            for (name, code) in codes::KEYBOARD_KEYS {
                println!("  {name} 0x{code:02x}");
            }
            println!("Special functions:");
            for (name, [b1, b2, b3]) in codes::SPECIAL_FUNCTIONS {
                println!("  {name} 0x{b1:02x} 0x{b2:02x} 0x{b3:02x}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_byte_accepts_decimal_and_hex() {
        assert_eq!(parse_byte("153"), Ok(153));
        assert_eq!(parse_byte("0x99"), Ok(0x99));
        assert_eq!(parse_byte("0X8F"), Ok(0x8f));
        assert!(parse_byte("256").is_err());
        assert!(parse_byte("0xzz").is_err());
    }

    #[test]
    fn decode_mapping_takes_four_bytes() {
        let cli = Cli::try_parse_from(["m715", "decode-mapping", "0x99", "0x81", "3", "10"]).unwrap();
        match cli.command {
            Commands::DecodeMapping { bytes, json } => {
                assert_eq!(bytes, vec![0x99, 0x81, 3, 10]);
                assert!(!json);
            }
            _ => panic!("wrong subcommand"),
        }
        assert!(Cli::try_parse_from(["m715", "decode-mapping", "1", "2", "3"]).is_err());
    }

    #[test]
    fn parse_byte_accepts_key_names() {
        assert_eq!(parse_byte("a"), Ok(0x04));
        assert_eq!(parse_byte("enter"), Ok(0x28));
        assert_eq!(parse_byte("1"), Ok(1));
        assert!(parse_byte("no_such_key").is_err());

        let cli = Cli::try_parse_from(["m715", "decode-mapping", "0x90", "0", "a", "0"]).unwrap();
        match cli.command {
            Commands::DecodeMapping { bytes, .. } => assert_eq!(bytes, vec![0x90, 0, 0x04, 0]),
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn show_button_takes_canonical_name() {
        let cli = Cli::try_parse_from([
            "m715",
            "show",
            "store.json",
            "--profile",
            "2",
            "--button",
            "button_dpi_up",
        ])
        .unwrap();
        match cli.command {
            Commands::Show {
                profile, button, ..
            } => {
                assert_eq!(profile, Some(2));
                assert_eq!(button, Some(4));
            }
            _ => panic!("wrong subcommand"),
        }

        let err = parse_button("button_side").unwrap_err();
        assert!(err.contains("button_left"));
        assert!(parse_button("").is_err());
        assert!(Cli::try_parse_from(["m715", "show", "store.json", "--button", "nope"]).is_err());
    }

    #[test]
    fn show_profile_number_is_checked_by_core() {
        assert_eq!(
            bounds::validate_profile_number(2).unwrap(),
            m715_core::ProfileId::Profile2
        );
        let err = anyhow::Error::from(bounds::validate_profile_number(0).unwrap_err());
        assert_eq!(
            err.to_string(),
            "value out of range: profile = 0 (allowed 1..=5)"
        );
    }
}
