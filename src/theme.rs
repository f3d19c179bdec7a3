//! Board theme system.
//!
//! YAML-based theming for everything the draw backend is handed colors for:
//! bonus squares, tile faces, pending/recent highlights, the placement
//! arrow, tray slots and mini-windows.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/crosstile/themes/{id}.yaml`
//! 2. Embedded: built-in themes compiled into the binary

use std::path::Path;

use serde::Deserialize;

use crate::host::Bonus;

pub const CLASSIC_YAML: &str = include_str!("../themes/classic.yaml");

/// A built-in theme entry.
pub struct BuiltinTheme {
    pub id: &'static str,
    pub yaml: &'static str,
}

pub const BUILTIN_THEMES: &[BuiltinTheme] = &[BuiltinTheme {
    id: "classic",
    yaml: CLASSIC_YAML,
}];

/// An opaque RGB color handed to the draw backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` hex string.
    pub fn from_hex(hex: &str) -> Result<Self, String> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("invalid hex color: #{}", hex));
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("invalid hex color: {}", e))
        };
        Ok(Self {
            r: parse(0..2)?,
            g: parse(2..4)?,
            b: parse(4..6)?,
        })
    }

    pub fn to_argb_u32(self) -> u32 {
        0xFF00_0000 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Colors for the board grid.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardColors {
    pub empty: Color,
    pub double_letter: Color,
    pub triple_letter: Color,
    pub double_word: Color,
    pub triple_word: Color,
    pub tile: Color,
    pub tile_text: Color,
    pub pending_tile: Color,
    pub recent_tile: Color,
    pub arrow: Color,
    pub hint_border: Color,
}

/// Colors for the tray strip.
#[derive(Debug, Clone, Deserialize)]
pub struct TrayColors {
    pub slot: Color,
    pub slot_selected: Color,
    pub tile_text: Color,
    pub face_down: Color,
}

/// A complete theme.
#[derive(Debug, Clone, Deserialize)]
pub struct Theme {
    pub name: String,
    pub board: BoardColors,
    pub tray: TrayColors,
}

impl Theme {
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("failed to parse theme: {}", e))
    }

    pub fn from_builtin(id: &str) -> Result<Self, String> {
        BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("unknown builtin theme: {}", id))
            .and_then(|t| Self::from_yaml(t.yaml))
    }

    /// Background for an empty cell. When bonus colors are disabled every
    /// empty cell uses the plain background.
    pub fn bonus_color(&self, bonus: Bonus, show_colors: bool) -> Color {
        if !show_colors {
            return self.board.empty;
        }
        match bonus {
            Bonus::None => self.board.empty,
            Bonus::DoubleLetter => self.board.double_letter,
            Bonus::TripleLetter => self.board.triple_letter,
            Bonus::DoubleWord => self.board.double_word,
            Bonus::TripleWord => self.board.triple_word,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_yaml(CLASSIC_YAML).expect("embedded classic theme must parse")
    }
}

/// Load a theme from a YAML file.
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user -> builtin.
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(themes_dir) = crate::config_paths::themes_dir() {
        let user_path = themes_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::info!("loading builtin theme: {}", id);
    Theme::from_builtin(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Color::from_hex("#FF8000").unwrap(), Color::rgb(255, 128, 0));
        assert_eq!(Color::from_hex("000000").unwrap(), Color::rgb(0, 0, 0));
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_argb_packing() {
        assert_eq!(Color::rgb(0x12, 0x34, 0x56).to_argb_u32(), 0xFF12_3456);
    }

    #[test]
    fn test_builtin_classic_parses() {
        let theme = Theme::from_builtin("classic").unwrap();
        assert_eq!(theme.name, "Classic");
        assert!(Theme::from_builtin("nope").is_err());
    }

    #[test]
    fn test_bonus_colors_respect_show_colors() {
        let theme = Theme::default();
        assert_eq!(
            theme.bonus_color(Bonus::TripleWord, false),
            theme.board.empty
        );
        assert_ne!(
            theme.bonus_color(Bonus::TripleWord, true),
            theme.board.empty
        );
    }
}
