use std::{fs, path::Path};

use {
    chrono::{DateTime, Local},
    tracing::debug,
};

use crate::error::Result;

/// Changelog file name inside a matrix directory.
pub const CHANGELOG_FILE: &str = "changelog.md";

const HEADER: &str = "# Changelog";

/// Append a changelog entry for the given matrix directory.
///
/// Entries are inserted directly below the header so the newest change
/// reads first. The file is created with a header when missing.
pub fn append(matrix_dir: &Path, message: &str) -> Result<()> {
    append_at(matrix_dir, message, Local::now())
}

fn append_at(matrix_dir: &Path, message: &str, at: DateTime<Local>) -> Result<()> {
    let entry = format!("\n## {}\n- {message}\n", at.format("%Y-%m-%d %H:%M"));
    let path = matrix_dir.join(CHANGELOG_FILE);

    let content = if path.is_file() {
        let existing = fs::read_to_string(&path)?;
        match existing.split_once('\n') {
            Some((header, rest)) => format!("{header}\n{entry}{rest}"),
            None => format!("{existing}\n{entry}"),
        }
    } else {
        format!("{HEADER}\n{entry}")
    };

    fs::create_dir_all(matrix_dir)?;
    fs::write(&path, content)?;
    debug!(path = %path.display(), "appended changelog entry");
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, chrono::TimeZone};

    fn at(hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 14, hour, 30, 0).unwrap()
    }

    #[test]
    fn test_creates_file_with_header() {
        let dir = tempfile::tempdir().unwrap();
        append_at(dir.path(), "Matrix 'acme' created", at(9)).unwrap();

        let content = fs::read_to_string(dir.path().join(CHANGELOG_FILE)).unwrap();
        assert!(content.starts_with("# Changelog\n"));
        assert!(content.contains("## 2025-03-14 09:30"));
        assert!(content.contains("- Matrix 'acme' created"));
    }

    #[test]
    fn test_newest_entry_first() {
        let dir = tempfile::tempdir().unwrap();
        append_at(dir.path(), "first", at(9)).unwrap();
        append_at(dir.path(), "second", at(10)).unwrap();

        let content = fs::read_to_string(dir.path().join(CHANGELOG_FILE)).unwrap();
        let first_pos = content.find("- first").unwrap();
        let second_pos = content.find("- second").unwrap();
        assert!(second_pos < first_pos, "newest entry should come first");
        assert!(content.starts_with("# Changelog\n"));
    }

    #[test]
    fn test_survives_headerless_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CHANGELOG_FILE), "stray line").unwrap();
        append_at(dir.path(), "entry", at(11)).unwrap();

        let content = fs::read_to_string(dir.path().join(CHANGELOG_FILE)).unwrap();
        assert!(content.contains("stray line"));
        assert!(content.contains("- entry"));
    }
}
