//! Deploy Overlay - transient configuration overrides with guaranteed restore
//!
//! This crate implements the deploy-time configuration overlay used by the
//! build pipeline: it applies a set of transient configuration overrides to
//! a project's on-disk configuration file, merges them with any existing
//! file content, and restores the original file state once the deploy
//! operation completes, even if intermediate steps fail.
//!
//! Exactly three sibling files are managed as one unit: the primary
//! configuration file plus the optional `_headers` and `_redirects`
//! side-rule files.

pub mod config;
pub mod overlay;

mod fsutil;

pub use config::{ConfigError, Document};
pub use overlay::{
    apply_overlay, backup_overlay, restore_overlay, MutationCommand, OverlayEnv, OverlayError,
    OverlayResult,
};
