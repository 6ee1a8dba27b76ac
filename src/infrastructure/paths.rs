//! Platform path resolution.
//!
//! Nothing in this crate persists state; the data directory exists only to
//! hold the trace log written by the observability layer.

use std::path::PathBuf;

/// Returns the per-user data directory for this crate.
///
/// Resolves to the platform-local data directory (for example
/// `~/.local/share/navsurface` on Linux), falling back to the system temp
/// directory when no user directory is available.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("navsurface")
}
