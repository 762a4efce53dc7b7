//! Crash-safe file writes: temp file, sync_all, rename.

use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Writes `bytes` to `path` so readers see either the old file or the whole new one.
///
/// The temp file sits next to the target (`<stem>.tmp`) so the rename stays on one
/// filesystem. The parent directory must exist.
pub async fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let temp_path = path.with_extension("tmp");
    let mut f = fs::File::create(&temp_path).await?;
    f.write_all(bytes).await?;
    f.sync_all().await?;
    drop(f);
    fs::rename(&temp_path, path).await
}
