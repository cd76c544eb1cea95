//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/ame/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Editing keystrokes coalesced into one undo snapshot
    #[serde(default = "default_undo_interval")]
    pub undo_interval: usize,

    /// How long search/replace flashes take to fade, in milliseconds
    #[serde(default = "default_highlight_fade_ms")]
    pub highlight_fade_ms: u64,

    /// Spaces inserted by Tab in documents indented with spaces
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Oldest undo snapshots are dropped beyond this many (0 = unbounded)
    #[serde(default = "default_max_undo_snapshots")]
    pub max_undo_snapshots: usize,

    /// Fraction of the remaining distance scrolled per frame
    #[serde(default = "default_scroll_smoothing")]
    pub scroll_smoothing: f32,
}

fn default_undo_interval() -> usize {
    8
}

fn default_highlight_fade_ms() -> u64 {
    1000
}

fn default_tab_width() -> usize {
    4
}

fn default_max_undo_snapshots() -> usize {
    256
}

fn default_scroll_smoothing() -> f32 {
    0.25
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            undo_interval: default_undo_interval(),
            highlight_fade_ms: default_highlight_fade_ms(),
            tab_width: default_tab_width(),
            max_undo_snapshots: default_max_undo_snapshots(),
            scroll_smoothing: default_scroll_smoothing(),
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: EditorConfig = serde_yaml::from_str("tab_width: 2\n").unwrap();
        assert_eq!(config.tab_width, 2);
        assert_eq!(config.undo_interval, 8);
        assert_eq!(config.highlight_fade_ms, 1000);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = EditorConfig {
            undo_interval: 3,
            ..EditorConfig::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(EditorConfig::load_from(&path), config);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "undo_interval: [not a number").unwrap();
        assert_eq!(EditorConfig::load_from(&path), EditorConfig::default());
    }
}
