//! Where ame keeps its per-user files
//!
//! One directory holds everything the editor reads or writes outside the
//! documents themselves:
//!
//! - `config.yaml`: editor settings (tab width, undo depth, fade timing)
//! - `keymap.yaml`: key bindings merged over the built-in defaults
//! - `logs/`: daily-rotated `ame.log.YYYY-MM-DD` files
//!
//! The directory is `$XDG_CONFIG_HOME/ame` or `~/.config/ame` on Unix and
//! macOS, and `%APPDATA%\ame` on Windows. None of the files need to exist.

use std::{env, fs, path::PathBuf};

const APP_DIR: &str = "ame";
const CONFIG_FILE: &str = "config.yaml";
const KEYMAP_FILE: &str = "keymap.yaml";
const LOGS_DIR: &str = "logs";

/// The per-user directory, or `None` when no home can be found
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var_os("APPDATA").map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|base| base.join(APP_DIR))
    }
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// User key bindings; absent means defaults only
pub fn keymap_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(KEYMAP_FILE))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(LOGS_DIR))
}

/// Create the log directory (and the config directory above it) if needed
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    fs::create_dir_all(&logs)
        .map_err(|e| format!("Failed to create directory {}: {}", logs.display(), e))?;
    Ok(logs)
}
