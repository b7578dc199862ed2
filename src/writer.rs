//! Final artifact write.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::StubError;

/// Write finished stub text to `path`, replacing any existing content.
///
/// The write is a single shot: last writer wins, no locking, no merge
/// semantics. On failure the error carries the destination path; cleanup of
/// a partially written artifact is the caller's decision.
pub fn write_stub_file(path: &Path, contents: &str) -> Result<(), StubError> {
    fs::write(path, contents).map_err(|source| StubError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("wrote stub file: {}", path.display());
    Ok(())
}
