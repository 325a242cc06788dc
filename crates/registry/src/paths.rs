use std::path::PathBuf;

/// Default data directory holding all matrix directories
/// (`~/.local/share/hivemind` on Linux, platform equivalent elsewhere).
///
/// Falls back to `.hivemind` in the current directory when no home
/// directory can be resolved.
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "hivemind")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".hivemind"))
}
