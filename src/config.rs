//! View configuration persistence.
//!
//! Stores capability switches and cosmetic preferences in
//! `~/.config/crosstile/config.yaml`. Capabilities are resolved once at
//! `BoardView` construction; components check the booleans at runtime, so
//! every code path exists in every build.

use serde::{Deserialize, Serialize};

/// View configuration that persists across sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Selected theme id (e.g., "classic").
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Pointer (mouse/touch) input handling.
    #[serde(default = "default_true")]
    pub pointer: bool,

    /// Keyboard navigation: focus cycling and board/tray cursors.
    #[serde(default)]
    pub keyboard_nav: bool,

    /// Hint-region selection for the move-search engine.
    #[serde(default = "default_true")]
    pub hint_region: bool,

    /// Color bonus squares (vs. a uniform board background).
    #[serde(default = "default_true")]
    pub show_colors: bool,

    /// Show tile point values on board cells.
    #[serde(default)]
    pub show_cell_values: bool,
}

fn default_theme() -> String {
    "classic".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            pointer: true,
            keyboard_nav: false,
            hint_region: true,
            show_colors: true,
            show_cell_values: false,
        }
    }
}

impl ViewConfig {
    /// Load config from disk, or return defaults if not found.
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("no config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!("config file not found at {}, using defaults", path.display());
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk, creating the config directory if needed.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(&path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("saved config to {}", path.display());
        Ok(())
    }
}
