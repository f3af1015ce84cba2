use std::path::{Path, PathBuf};

use async_compression::Level;
use async_compression::tokio::write::GzipEncoder;
use log::{debug, warn};
use rand::distributions::{Alphanumeric, DistString};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_tar::Builder;

/// Gzip level used for every archive, trades upload size against CPU time
pub const COMPRESSION_LEVEL: i32 = 6;

/// A Storybook archive on local disk, removed when dropped.
///
/// The path is reserved as soon as the artifact exists so that a partially written archive is
/// cleaned up as well.
#[derive(Debug)]
pub struct ArchiveArtifact {
    path: PathBuf,
}

impl ArchiveArtifact {
    /// Reserve a fresh archive path inside `temp_dir`, nothing is written yet
    pub fn new_in(temp_dir: &Path) -> Self {
        let file_name = format!(
            "vizdiff-storybook.{}.tar.gz",
            Alphanumeric.sample_string(&mut rand::thread_rng(), 16)
        );
        Self {
            path: temp_dir.join(file_name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn size(&self) -> std::io::Result<u64> {
        Ok(tokio::fs::metadata(&self.path).await?.len())
    }
}

impl Drop for ArchiveArtifact {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed archive {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove archive {}: {e}", self.path.display()),
        }
    }
}

/// Write `source_dir` as a gzip-compressed tarball at `destination`
pub async fn create_archive(source_dir: &Path, destination: &Path) -> std::io::Result<()> {
    let time_start = std::time::Instant::now();
    let file = File::create(destination).await?;

    let encoder = GzipEncoder::with_quality(file, Level::Precise(COMPRESSION_LEVEL));
    let mut tar = Builder::new(encoder);
    tar.append_dir_all(".", source_dir).await?;
    let mut gzip_encoder = tar.into_inner().await?;
    gzip_encoder.shutdown().await?;
    gzip_encoder.into_inner().sync_all().await?;

    debug!(
        "Created archive of {} in {:.2?}",
        source_dir.display(),
        time_start.elapsed()
    );
    Ok(())
}
