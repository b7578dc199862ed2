//! Error types for stub generation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::render::RenderError;

/// Unified error type for stub generation and writing.
///
/// Every failure is a hard stop for the current file; there is no
/// recoverable class of error in this component. A driver processing many
/// files is responsible for isolating one file's failure from the others.
#[derive(Debug, Error)]
pub enum StubError {
    /// The expression renderer rejected a subtree.
    #[error("stub generation failed: {0}")]
    Render(#[from] RenderError),

    /// The final write to the destination path failed.
    #[error("failed to write stub file {}: {source}", .path.display())]
    Io {
        /// Destination path of the attempted write.
        path: PathBuf,
        /// Underlying filesystem error.
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_errors_bridge_into_stub_errors() {
        let err: StubError = RenderError::new("walrus operator").into();
        assert_eq!(
            err.to_string(),
            "stub generation failed: cannot render expression: walrus operator"
        );
    }
}
