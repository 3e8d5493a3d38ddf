//! Free-space preflight for export destinations

use crate::export::ExportFailure;
use std::io;
use std::path::Path;
use tracing::warn;

/// Minimum free bytes required before writing artifacts (512 KiB)
pub const DEFAULT_MIN_FREE_BYTES: u64 = 512 * 1024;

/// Reports free capacity of a directory
pub trait SpaceProbe: Send + Sync {
    fn available_space(&self, dir: &Path) -> io::Result<u64>;
}

/// Probe backed by the filesystem statistics of the directory
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSpaceProbe;

impl SpaceProbe for FsSpaceProbe {
    fn available_space(&self, dir: &Path) -> io::Result<u64> {
        fs2::available_space(dir)
    }
}

/// Checks the destination has room before any export starts.
///
/// Advisory only: another process can still fill the disk between the
/// check and the write.
pub struct ResourceGuard {
    probe: Box<dyn SpaceProbe>,
    min_free_bytes: u64,
}

impl ResourceGuard {
    pub fn new(probe: impl SpaceProbe + 'static, min_free_bytes: u64) -> Self {
        Self {
            probe: Box::new(probe),
            min_free_bytes,
        }
    }

    pub fn min_free_bytes(&self) -> u64 {
        self.min_free_bytes
    }

    /// Free bytes in `dir`, or the reason the export must not start
    pub fn check(&self, dir: &Path) -> Result<u64, ExportFailure> {
        let available = self.probe.available_space(dir).map_err(|e| {
            warn!("Export destination {:?} is unreachable: {}", dir, e);
            ExportFailure::DestinationUnavailable {
                path: dir.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        if available < self.min_free_bytes {
            warn!(
                "Not enough free space in {:?}: {} bytes free, {} required",
                dir, available, self.min_free_bytes
            );
            return Err(ExportFailure::InsufficientSpace {
                available,
                required: self.min_free_bytes,
            });
        }

        Ok(available)
    }

    pub fn has_sufficient_space(&self, dir: &Path) -> bool {
        self.check(dir).is_ok()
    }
}

impl Default for ResourceGuard {
    fn default() -> Self {
        Self::new(FsSpaceProbe, DEFAULT_MIN_FREE_BYTES)
    }
}

/// Probe returning a fixed answer, for tests
#[cfg(test)]
pub struct FixedSpaceProbe(pub Option<u64>);

#[cfg(test)]
impl SpaceProbe for FixedSpaceProbe {
    fn available_space(&self, _dir: &Path) -> io::Result<u64> {
        self.0
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such volume"))
    }
}
