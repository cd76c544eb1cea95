//! Utility modules

pub mod file_validation;
pub mod text;

pub use file_validation::{is_likely_binary, validate_file_for_loading, LoadError, MAX_FILE_SIZE};
pub use text::{
    buffer_name_for_path, find_ignore_case, is_break_char, is_punctuation, split_lines,
    IndentStyle,
};
