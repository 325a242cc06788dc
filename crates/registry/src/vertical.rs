use std::{
    fmt, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::error::Result;

/// Path of the document backing a vertical.
pub fn file_path(matrix_dir: &Path, vertical: &str) -> PathBuf {
    matrix_dir.join(format!("{vertical}.md"))
}

/// Seed an empty document titled after the vertical. An existing file
/// is left untouched; its content belongs to the assistant.
pub fn ensure_file(matrix_dir: &Path, vertical: &str) -> Result<PathBuf> {
    let path = file_path(matrix_dir, vertical);
    if !path.is_file() {
        fs::create_dir_all(matrix_dir)?;
        fs::write(&path, format!("# {}\n", title(vertical)))?;
    }
    Ok(path)
}

/// Read the document for a vertical, if it exists on disk.
pub fn read(matrix_dir: &Path, vertical: &str) -> Result<Option<String>> {
    match fs::read_to_string(file_path(matrix_dir, vertical)) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Delete the document for a vertical. Returns whether a file was
/// actually deleted.
pub fn remove_file(matrix_dir: &Path, vertical: &str) -> Result<bool> {
    match fs::remove_file(file_path(matrix_dir, vertical)) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

// ── Content summary ──────────────────────────────────────────────────────────

/// Rough content summary for a vertical document, as shown by `status`
/// and `list-verticals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Summary {
    /// Count of non-blank, non-heading lines.
    Lines(usize),
    /// File exists but holds nothing beyond headings.
    Empty,
    /// No document on disk.
    Missing,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lines(n) => write!(f, "{n} lines"),
            Self::Empty => write!(f, "empty"),
            Self::Missing => write!(f, "no file"),
        }
    }
}

pub fn summarize(matrix_dir: &Path, vertical: &str) -> Result<Summary> {
    let Some(content) = read(matrix_dir, vertical)? else {
        return Ok(Summary::Missing);
    };
    let lines = content
        .lines()
        .filter(|l| {
            let trimmed = l.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .count();
    Ok(if lines == 0 {
        Summary::Empty
    } else {
        Summary::Lines(lines)
    })
}

/// Human title derived from a hyphenated vertical name:
/// `env-vars` becomes `Env Vars`.
fn title(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_hyphenated_name() {
        assert_eq!(title("env-vars"), "Env Vars");
        assert_eq!(title("branding"), "Branding");
        assert_eq!(title("api_error_codes"), "Api Error Codes");
    }

    #[test]
    fn test_ensure_file_seeds_title_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = ensure_file(dir.path(), "env-vars").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Env Vars\n");

        // A second call must not clobber assistant-authored content.
        fs::write(&path, "# Env Vars\n\nAPI_KEY is shared\n").unwrap();
        ensure_file(dir.path(), "env-vars").unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("API_KEY"));
    }

    #[test]
    fn test_summarize_counts_content_lines() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(summarize(dir.path(), "branding").unwrap(), Summary::Missing);

        ensure_file(dir.path(), "branding").unwrap();
        assert_eq!(summarize(dir.path(), "branding").unwrap(), Summary::Empty);

        fs::write(
            file_path(dir.path(), "branding"),
            "# Branding\n\nLogo is blue.\n## Fonts\nInter everywhere.\n",
        )
        .unwrap();
        assert_eq!(
            summarize(dir.path(), "branding").unwrap(),
            Summary::Lines(2)
        );
    }

    #[test]
    fn test_summary_display() {
        assert_eq!(Summary::Lines(3).to_string(), "3 lines");
        assert_eq!(Summary::Empty.to_string(), "empty");
        assert_eq!(Summary::Missing.to_string(), "no file");
    }

    #[test]
    fn test_remove_file() {
        let dir = tempfile::tempdir().unwrap();
        ensure_file(dir.path(), "branding").unwrap();
        assert!(remove_file(dir.path(), "branding").unwrap());
        assert!(!remove_file(dir.path(), "branding").unwrap());
    }

    #[test]
    fn test_read_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read(dir.path(), "ghost").unwrap().is_none());
    }
}
