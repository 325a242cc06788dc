//! Matrix registry for hivemind.
//!
//! A matrix is a named group of sibling projects sharing context. Each
//! matrix owns a directory under the data dir holding a JSON manifest,
//! an append-only changelog, and one markdown document per vertical of
//! shared knowledge. Registered projects link back to their matrix
//! through a `.hivemind.json` marker in the project root.
//!
//! Vertical documents are opaque to this crate: their content is
//! written by the assistant driving the CLI, never generated here.

pub mod changelog;
pub mod error;
pub mod marker;
pub mod paths;
pub mod store;
pub mod types;
pub mod vertical;

pub use {
    error::{Error, Result},
    marker::ProjectMarker,
    store::{FsMatrixStore, MatrixStore},
    types::{MatrixManifest, ProjectEntry},
};
