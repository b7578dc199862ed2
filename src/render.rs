//! The expression-rendering seam between the emitter and the parser.

use thiserror::Error;

use crate::nodes::Expression;

/// Failure reported by an expression renderer.
///
/// The emitter does not catch this or substitute a fallback; a renderer
/// failure aborts stub generation for the whole file.
#[derive(Debug, Clone, Error)]
#[error("cannot render expression: {message}")]
pub struct RenderError {
    /// Description of the unsupported or malformed subtree.
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Renders opaque expression subtrees into canonical text.
///
/// Implementations must be total over every expression the upstream parser
/// can produce. The emitter uses this for annotations, return types, base
/// class arguments, decorator targets, and decorator/call argument values.
pub trait RenderExpression {
    fn render(&self, expr: &Expression<'_>) -> Result<String, RenderError>;
}

/// Renders an expression as the verbatim source slice captured by the
/// parser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceRenderer;

impl RenderExpression for SourceRenderer {
    fn render(&self, expr: &Expression<'_>) -> Result<String, RenderError> {
        Ok(expr.source().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_renderer_is_verbatim() {
        let expr = Expression::new("Dict[str, int]");
        assert_eq!(
            SourceRenderer.render(&expr).expect("render error"),
            "Dict[str, int]"
        );
    }
}
