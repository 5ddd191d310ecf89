//! Platform-specific directory utilities

use std::path::PathBuf;

/// Get the platform-specific data directory
///
/// Follows platform conventions:
/// - macOS: `~/Library/Application Support/readself`
/// - Linux: `~/.local/share/readself` (or `$XDG_DATA_HOME/readself`)
/// - Windows: `%APPDATA%\readself`
/// - Fallback: `./readself_data`
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "readself")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./readself_data"))
}
