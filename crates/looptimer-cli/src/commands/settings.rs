use clap::Subcommand;
use looptimer_core::settings::{SOUND_PRESETS, THEME_MODES};
use looptimer_core::{SoundPreset, ThemeMode};
use serde_json::json;

use super::{open_store, print_json, CmdResult};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show or set the sound preset
    Sound {
        /// One of: default, soft, retro, minimal
        preset: Option<String>,
    },
    /// Show or set the theme mode
    Theme {
        /// One of: system, light, dark
        mode: Option<String>,
    },
}

pub fn run(action: SettingsAction) -> CmdResult {
    let mut store = open_store()?;

    match action {
        SettingsAction::Sound { preset: None } => {
            print_json(&json!({
                "current": store.sound_preset(),
                "available": SOUND_PRESETS,
            }))?;
        }
        SettingsAction::Sound { preset: Some(value) } => {
            let preset: SoundPreset = value.parse()?;
            store.set_sound_preset(preset);
            println!("{preset}");
        }
        SettingsAction::Theme { mode: None } => {
            print_json(&json!({
                "current": store.theme_mode(),
                "available": THEME_MODES,
            }))?;
        }
        SettingsAction::Theme { mode: Some(value) } => {
            let mode: ThemeMode = value.parse()?;
            store.set_theme_mode(mode);
            println!("{mode}");
        }
    }

    store.flush()?;
    Ok(())
}
