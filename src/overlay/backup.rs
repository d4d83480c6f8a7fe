//! The backup manager: capture pristine state before any mutation

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use super::{backup_dir, OverlayEnv, OverlayResult, Pristine};
use super::{CONFIG_BACKUP, HEADERS_BACKUP, REDIRECTS_BACKUP};
use crate::fsutil;

/// Capture the pristine state of the three managed files.
///
/// After this returns, the backup directory's three role slots exactly
/// mirror the existence and content of the live files: a present slot holds
/// a pristine copy, an absent slot records that the live file did not
/// exist. Stale slots from a previous run are purged first, so the mirror
/// holds regardless of what the directory contained before.
pub async fn backup_overlay(env: &OverlayEnv) -> OverlayResult<()> {
    let dir = backup_dir(&env.build_dir);
    fs::create_dir_all(&dir).await?;
    debug!(dir = %dir.display(), "backing up pristine configuration");

    tokio::try_join!(
        backup_role(Some(env.config_path.as_path()), dir.join(CONFIG_BACKUP)),
        backup_role(env.headers_path.as_deref(), dir.join(HEADERS_BACKUP)),
        backup_role(env.redirects_path.as_deref(), dir.join(REDIRECTS_BACKUP)),
    )?;
    Ok(())
}

async fn backup_role(live: Option<&Path>, slot: PathBuf) -> io::Result<()> {
    // Purge first so a stale slot never leaks into the next restore
    fsutil::remove_if_exists(&slot).await?;

    let Some(live) = live else {
        return Ok(());
    };
    match Pristine::probe(live).await {
        Pristine::Present(live) => {
            fs::copy(&live, &slot).await?;
            Ok(())
        }
        Pristine::Absent => Ok(()),
    }
}
