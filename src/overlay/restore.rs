//! The restorer: return the managed files to their pristine state

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use super::{backup_dir, MutationCommand, OverlayEnv, OverlayResult, Pristine};
use super::{CONFIG_BACKUP, HEADERS_BACKUP, REDIRECTS_BACKUP};
use crate::fsutil;

/// Restore the three managed files to their state before [`apply_overlay`]
/// last ran for this build.
///
/// Mirrors the applier's no-op guard: with no commands nothing was
/// overlaid, so nothing is restored. Each role has exactly two pristine
/// states and one restore action each: a present backup slot is copied over
/// the live path, an absent slot means the live path is deleted. The backup
/// directory is left in place; the next build's backup purges it.
///
/// Safe to call after a failed [`apply_overlay`]: if the failure happened
/// before backup, all slots are absent and restore merely deletes whatever
/// may have been partially written.
///
/// [`apply_overlay`]: super::apply_overlay
pub async fn restore_overlay(commands: &[MutationCommand], env: &OverlayEnv) -> OverlayResult<()> {
    if commands.is_empty() {
        return Ok(());
    }

    let dir = backup_dir(&env.build_dir);
    debug!(dir = %dir.display(), "restoring pristine configuration");

    tokio::try_join!(
        restore_role(dir.join(CONFIG_BACKUP), Some(env.config_path.as_path())),
        restore_role(dir.join(HEADERS_BACKUP), env.headers_path.as_deref()),
        restore_role(dir.join(REDIRECTS_BACKUP), env.redirects_path.as_deref()),
    )?;
    Ok(())
}

async fn restore_role(slot: PathBuf, live: Option<&Path>) -> io::Result<()> {
    let Some(live) = live else {
        return Ok(());
    };
    match Pristine::probe(&slot).await {
        Pristine::Present(slot) => {
            fs::copy(&slot, live).await?;
            Ok(())
        }
        Pristine::Absent => fsutil::remove_if_exists(live).await,
    }
}
