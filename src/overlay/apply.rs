//! The mutation applier: build, merge, back up, persist

use std::io;
use std::path::Path;

use tokio::fs;
use tracing::debug;

use super::{apply_mutations, backup_overlay, MutationCommand, OverlayEnv, OverlayResult};
use crate::config::{
    add_headers, add_redirects, ensure_config_priority, merge_configs, parse_optional_config,
    serialize_toml, simplify_config, Document,
};
use crate::fsutil;

/// Apply deploy-time overrides to the managed files.
///
/// No-op when `commands` is empty. Otherwise the merged document is fully
/// computed first, the pristine files are backed up, and only then is
/// anything written: one write to the configuration file, plus deletion of
/// the side-rule files whose content is now folded into it (leaving them
/// would double-apply their rules on the next parse).
///
/// Failures propagate uncaught, with no retries. Backup strictly precedes
/// every destructive step, so a failure leaves either nothing mutated or a
/// state fully recoverable by [`restore_overlay`]; the orchestrator must
/// still call the restorer at teardown either way.
///
/// [`restore_overlay`]: super::restore_overlay
pub async fn apply_overlay(commands: &[MutationCommand], env: &OverlayEnv) -> OverlayResult<()> {
    if commands.is_empty() {
        return Ok(());
    }

    let overrides = apply_mutations(Document::new(), commands);
    let overrides = ensure_config_priority(overrides, &env.context, env.branch.as_deref());
    let existing = parse_optional_config(Some(&env.config_path)).await?;
    let merged = merge_configs(existing, overrides);
    let merged = add_headers(merged, env.headers_path.as_deref()).await?;
    let merged = add_redirects(merged, env.redirects_path.as_deref()).await?;
    let simplified = simplify_config(merged);

    backup_overlay(env).await?;

    let serialized = serialize_toml(&simplified)?;
    debug!(config = %env.config_path.display(), "persisting overlaid configuration");
    tokio::try_join!(
        write_config(&env.config_path, &serialized),
        fsutil::remove_optional(env.headers_path.as_deref()),
        fsutil::remove_optional(env.redirects_path.as_deref()),
    )?;
    Ok(())
}

async fn write_config(path: &Path, serialized: &str) -> io::Result<()> {
    fs::write(path, serialized).await
}
