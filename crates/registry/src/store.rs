use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use {
    async_trait::async_trait,
    tracing::{debug, warn},
};

use crate::{
    error::{Error, Result},
    types::MatrixManifest,
};

/// Manifest file name inside a matrix directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Trait for persisting matrices. Implementations can be
/// directory-per-matrix on the filesystem, in-memory for tests, etc.
#[async_trait]
pub trait MatrixStore: Send + Sync {
    /// All known matrices, sorted by name.
    async fn list(&self) -> Result<Vec<MatrixManifest>>;
    async fn load(&self, name: &str) -> Result<Option<MatrixManifest>>;
    async fn save(&self, manifest: &MatrixManifest) -> Result<()>;
    /// Directory owned by the given matrix. May not exist yet.
    fn matrix_dir(&self, name: &str) -> PathBuf;

    /// Load a manifest that is expected to exist.
    async fn load_required(&self, name: &str) -> Result<MatrixManifest> {
        self.load(name)
            .await?
            .ok_or_else(|| Error::matrix_not_found(name))
    }
}

// ── Filesystem implementation ────────────────────────────────────────────────

/// Stores one directory per matrix under a base data directory.
pub struct FsMatrixStore {
    base: PathBuf,
}

impl FsMatrixStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    fn read_manifest(path: &Path) -> Result<MatrixManifest> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

#[async_trait]
impl MatrixStore for FsMatrixStore {
    async fn list(&self) -> Result<Vec<MatrixManifest>> {
        let entries = match fs::read_dir(&self.base) {
            Ok(e) => e,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut matrices = Vec::new();
        for entry in entries.flatten() {
            let manifest_path = entry.path().join(MANIFEST_FILE);
            if !manifest_path.is_file() {
                continue;
            }
            match Self::read_manifest(&manifest_path) {
                Ok(m) => matrices.push(m),
                Err(e) => {
                    warn!(path = %manifest_path.display(), %e, "skipping unreadable manifest");
                },
            }
        }
        matrices.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matrices)
    }

    async fn load(&self, name: &str) -> Result<Option<MatrixManifest>> {
        let path = self.matrix_dir(name).join(MANIFEST_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        Self::read_manifest(&path).map(Some)
    }

    async fn save(&self, manifest: &MatrixManifest) -> Result<()> {
        let dir = self.matrix_dir(&manifest.name);
        fs::create_dir_all(&dir)?;
        let data = serde_json::to_string_pretty(manifest)?;
        fs::write(dir.join(MANIFEST_FILE), data)?;
        debug!(matrix = %manifest.name, "saved manifest");
        Ok(())
    }

    fn matrix_dir(&self, name: &str) -> PathBuf {
        self.base.join(name)
    }
}
