//! Command-line argument parsing for the editor
//!
//! Supports:
//! - Opening up to two files (the second goes to the right panel)
//! - Jump to line
//! - Replaying a keystroke script headlessly
//! - Saving and printing at exit

use clap::Parser;
use std::path::PathBuf;

/// A small text editor core, driven by keystroke scripts
#[derive(Parser, Debug)]
#[command(name = "ame", version, about = "A small text editor")]
pub struct CliArgs {
    /// Files to open
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Go to line N in the first file
    #[arg(long, value_name = "N")]
    pub line: Option<usize>,

    /// Replay a YAML keystroke script
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Save every modified document that has a file name before exiting
    #[arg(long)]
    pub save: bool,

    /// Print the active document to stdout before exiting
    #[arg(long)]
    pub print: bool,
}

/// The startup mode determines what to open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupMode {
    /// Start with the scratch buffer
    Empty,
    /// Open a single file
    SingleFile(PathBuf),
    /// Open two files side by side
    Split { left: PathBuf, right: PathBuf },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub mode: StartupMode,
    /// 1-based line to jump to in the first file
    pub initial_line: Option<usize>,
    pub script: Option<PathBuf>,
    pub save_on_exit: bool,
    pub print_on_exit: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let mut paths = self.paths.into_iter();
        let mode = match (paths.next(), paths.next(), paths.next()) {
            (None, _, _) => StartupMode::Empty,
            (Some(path), None, _) => StartupMode::SingleFile(path),
            (Some(left), Some(right), None) => StartupMode::Split { left, right },
            (Some(_), Some(_), Some(_)) => {
                return Err("At most two files can be opened".to_string())
            }
        };

        if let Some(path) = mode.file_paths().into_iter().find(|p| p.is_dir()) {
            return Err(format!("{} is a directory", path.display()));
        }

        Ok(StartupConfig {
            mode,
            initial_line: self.line,
            script: self.script,
            save_on_exit: self.save,
            print_on_exit: self.print,
        })
    }
}

impl StartupMode {
    /// File paths to open, left panel first
    pub fn file_paths(&self) -> Vec<PathBuf> {
        match self {
            StartupMode::Empty => vec![],
            StartupMode::SingleFile(path) => vec![path.clone()],
            StartupMode::Split { left, right } => vec![left.clone(), right.clone()],
        }
    }
}
