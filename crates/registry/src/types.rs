use std::{collections::BTreeMap, path::PathBuf};

use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

use crate::error::{Error, Result};

// ── Matrix manifest ──────────────────────────────────────────────────────────

/// Manifest for a single matrix, persisted as `manifest.json` in the
/// matrix directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixManifest {
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Registered projects keyed by name. The map key enforces name
    /// uniqueness within a matrix.
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectEntry>,
    #[serde(default)]
    pub verticals: Vec<String>,
}

impl MatrixManifest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at: Utc::now(),
            projects: BTreeMap::new(),
            verticals: Vec::new(),
        }
    }

    /// Register or re-register a project. An existing entry for the
    /// same name is replaced, so moving a project just needs a fresh
    /// `register` with the new path.
    pub fn register_project(&mut self, name: impl Into<String>, path: PathBuf) {
        self.projects.insert(name.into(), ProjectEntry {
            path,
            registered_at: Utc::now(),
        });
    }

    /// Remove a project, returning its entry if it was registered.
    pub fn unregister_project(&mut self, name: &str) -> Option<ProjectEntry> {
        self.projects.remove(name)
    }

    /// Record a vertical. Returns `false` if it was already present.
    pub fn add_vertical(&mut self, name: &str) -> bool {
        if self.has_vertical(name) {
            return false;
        }
        self.verticals.push(name.to_string());
        true
    }

    /// Drop a vertical. Returns `false` if it was not present.
    pub fn remove_vertical(&mut self, name: &str) -> bool {
        let before = self.verticals.len();
        self.verticals.retain(|v| v != name);
        self.verticals.len() != before
    }

    pub fn has_vertical(&self, name: &str) -> bool {
        self.verticals.iter().any(|v| v == name)
    }
}

/// A project registered as a member of a matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub path: PathBuf,
    pub registered_at: DateTime<Utc>,
}

// ── Name validation ──────────────────────────────────────────────────────────

/// Matrix and vertical names become directory and file names, so they
/// are restricted to alphanumerics plus `-`, `_` and `.`, and must not
/// start with a dot.
pub fn validate_name(name: &str) -> Result<()> {
    let ok = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if ok {
        Ok(())
    } else {
        Err(Error::invalid_name(name))
    }
}
