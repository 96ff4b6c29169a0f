//! Display and audio preferences stored alongside workouts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundPreset {
    #[default]
    Default,
    Soft,
    Retro,
    Minimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

/// Catalog entry for pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresetInfo<T> {
    pub id: T,
    pub label: &'static str,
    pub description: &'static str,
}

pub const SOUND_PRESETS: [PresetInfo<SoundPreset>; 4] = [
    PresetInfo {
        id: SoundPreset::Default,
        label: "Default",
        description: "Clear, balanced tones",
    },
    PresetInfo {
        id: SoundPreset::Soft,
        label: "Soft",
        description: "Gentle, quieter sounds",
    },
    PresetInfo {
        id: SoundPreset::Retro,
        label: "Retro",
        description: "Classic 8-bit style",
    },
    PresetInfo {
        id: SoundPreset::Minimal,
        label: "Minimal",
        description: "Subtle, brief beeps",
    },
];

pub const THEME_MODES: [PresetInfo<ThemeMode>; 3] = [
    PresetInfo {
        id: ThemeMode::Light,
        label: "Light",
        description: "Always light mode",
    },
    PresetInfo {
        id: ThemeMode::Dark,
        label: "Dark",
        description: "Always dark mode",
    },
    PresetInfo {
        id: ThemeMode::System,
        label: "Auto",
        description: "Match your device settings",
    },
];

impl SoundPreset {
    pub fn as_str(self) -> &'static str {
        match self {
            SoundPreset::Default => "default",
            SoundPreset::Soft => "soft",
            SoundPreset::Retro => "retro",
            SoundPreset::Minimal => "minimal",
        }
    }
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::System => "system",
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl fmt::Display for SoundPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoundPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SOUND_PRESETS
            .iter()
            .map(|p| p.id)
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown sound preset: {s}"))
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        THEME_MODES
            .iter()
            .map(|p| p.id)
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown theme mode: {s}"))
    }
}
