//! Deploy-time configuration overlay
//!
//! This module owns the transactional part of the build: applying transient
//! configuration overrides to the managed files and restoring their
//! pristine state afterwards. Exactly three files are managed as one unit
//! (the configuration file plus the optional `_headers` and `_redirects`
//! side-rule files), moving through the lifecycle:
//!
//! pristine → backed-up → mutated → restored
//!
//! The backup directory under the build directory is the only shared
//! mutable resource: written once per build by [`apply_overlay`] (via
//! [`backup_overlay`]) and read once by [`restore_overlay`]. A backup
//! slot's presence means the live file existed before mutation; its absence
//! means it did not. That existence-as-metadata encoding is what makes
//! restore correct without a separate manifest.

mod apply;
mod backup;
mod command;
mod restore;

pub use apply::apply_overlay;
pub use backup::backup_overlay;
pub use command::{apply_mutations, MutationCommand};
pub use restore::restore_overlay;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::ConfigError;
use crate::fsutil;

/// Overlay errors
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for overlay operations
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Environment for one overlay cycle, supplied by the build orchestrator.
///
/// The same record must be passed to [`apply_overlay`] and
/// [`restore_overlay`] within one build.
#[derive(Debug, Clone)]
pub struct OverlayEnv {
    /// Root of the build working directory; the backup directory lives
    /// under it.
    pub build_dir: PathBuf,

    /// The primary configuration file.
    pub config_path: PathBuf,

    /// The `_headers` side-rule file, when the project uses one.
    pub headers_path: Option<PathBuf>,

    /// The `_redirects` side-rule file, when the project uses one.
    pub redirects_path: Option<PathBuf>,

    /// Active deploy context (e.g. `production`).
    pub context: String,

    /// Branch being deployed, when known.
    pub branch: Option<String>,
}

/// A managed file's state at a snapshot point: present (with its content at
/// the carried path) or absent. Computed once per role per operation and
/// then consumed, rather than re-derived from scattered filesystem probes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Pristine {
    Present(PathBuf),
    Absent,
}

impl Pristine {
    pub(crate) async fn probe(path: &Path) -> Self {
        if fsutil::path_exists(path).await {
            Self::Present(path.to_owned())
        } else {
            Self::Absent
        }
    }
}

/// Backup directory for one build.
pub(crate) fn backup_dir(build_dir: &Path) -> PathBuf {
    build_dir.join(".netlify").join("deploy")
}

/// Backup slot names, fixed per role.
pub(crate) const CONFIG_BACKUP: &str = "netlify.toml";
pub(crate) const HEADERS_BACKUP: &str = "_headers";
pub(crate) const REDIRECTS_BACKUP: &str = "_redirects";
