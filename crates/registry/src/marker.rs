use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    tracing::{debug, warn},
};

use crate::error::Result;

/// Marker file name written into a registered project's root.
pub const MARKER_FILE: &str = ".hivemind.json";

/// Links a project directory back to its registered identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMarker {
    pub matrix: String,
    pub project: String,
    pub registered_at: DateTime<Utc>,
}

impl ProjectMarker {
    pub fn new(matrix: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            matrix: matrix.into(),
            project: project.into(),
            registered_at: Utc::now(),
        }
    }
}

/// Write the marker into a project directory, creating it if needed.
/// Returns the marker path.
pub fn write_marker(project_dir: &Path, marker: &ProjectMarker) -> Result<PathBuf> {
    fs::create_dir_all(project_dir)?;
    let path = project_dir.join(MARKER_FILE);
    fs::write(&path, serde_json::to_string_pretty(marker)?)?;
    debug!(path = %path.display(), matrix = %marker.matrix, "wrote project marker");
    Ok(path)
}

/// Read the marker in a project directory, if one exists. A malformed
/// marker is reported and treated as absent rather than failing the
/// caller.
pub fn read_marker(project_dir: &Path) -> Result<Option<ProjectMarker>> {
    let path = project_dir.join(MARKER_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let data = fs::read_to_string(&path)?;
    match serde_json::from_str(&data) {
        Ok(marker) => Ok(Some(marker)),
        Err(e) => {
            warn!(path = %path.display(), %e, "ignoring malformed marker");
            Ok(None)
        },
    }
}

/// Remove the marker from a project directory. Returns whether a file
/// was actually deleted.
pub fn remove_marker(project_dir: &Path) -> Result<bool> {
    let path = project_dir.join(MARKER_FILE);
    match fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Find the nearest marker, walking upward from `start` to the
/// filesystem root the way context files are discovered. Returns the
/// marker and the directory holding it.
pub fn detect(start: &Path) -> Result<Option<(ProjectMarker, PathBuf)>> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if let Some(marker) = read_marker(dir)? {
            debug!(dir = %dir.display(), matrix = %marker.matrix, "detected project");
            return Ok(Some((marker, dir.to_path_buf())));
        }
        current = dir.parent();
    }
    Ok(None)
}
