//! Formatting preferences inherited from the originating source file.

use serde::{Deserialize, Serialize};

/// Line-terminator and indentation conventions for one emission run.
///
/// Stub output follows the style of the file it was generated from rather
/// than a fixed internal standard. Use [`FormatStyle::detect`] to infer the
/// conventions from source text; the `Default` value is LF with four-space
/// indents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatStyle {
    /// Line terminator sequence (`"\n"` or `"\r\n"`).
    pub newline: String,
    /// One unit of indentation (a run of spaces or a tab).
    pub indent: String,
}

impl Default for FormatStyle {
    fn default() -> Self {
        Self {
            newline: "\n".to_string(),
            indent: "    ".to_string(),
        }
    }
}

impl FormatStyle {
    /// Infer conventions from source text.
    ///
    /// The terminator comes from the first line break; the indentation unit
    /// from the leading whitespace run of the first indented line. Sources
    /// with no line break or no indented line fall back to the defaults.
    pub fn detect(source: &str) -> Self {
        let newline = match source.find('\n') {
            Some(i) if i > 0 && source.as_bytes()[i - 1] == b'\r' => "\r\n",
            _ => "\n",
        };
        let indent = source
            .lines()
            .find_map(|line| {
                let trimmed = line.trim_start_matches([' ', '\t']);
                if trimmed.is_empty() || trimmed.len() == line.len() {
                    None
                } else {
                    Some(&line[..line.len() - trimmed.len()])
                }
            })
            .unwrap_or("    ");
        Self {
            newline: newline.to_string(),
            indent: indent.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_lf_and_spaces() {
        let style = FormatStyle::detect("def f():\n  return 1\n");
        assert_eq!(style.newline, "\n");
        assert_eq!(style.indent, "  ");
    }

    #[test]
    fn detects_crlf_and_tabs() {
        let style = FormatStyle::detect("class A:\r\n\tx = 1\r\n");
        assert_eq!(style.newline, "\r\n");
        assert_eq!(style.indent, "\t");
    }

    #[test]
    fn whitespace_only_lines_are_not_indent_evidence() {
        let style = FormatStyle::detect("x = 1\n   \ny = 2\n    z = 3\n");
        assert_eq!(style.indent, "    ");
    }

    #[test]
    fn falls_back_to_defaults() {
        assert_eq!(FormatStyle::detect("x = 1"), FormatStyle::default());
        assert_eq!(FormatStyle::detect(""), FormatStyle::default());
    }
}
