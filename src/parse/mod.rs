//! Go front-end: tree-sitter-go parsing lowered into a small declaration AST.

pub mod ast;
pub mod literal;
pub mod lower;
pub mod source;

use std::fmt;

use crate::error::ExtractError;

pub use ast::{Decl, Expr, GoFile, LitKind, UnaryOp, ValueSpec};
pub use source::SourceFile;

/// A parse failure at a byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub offset: usize,
    pub message: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.offset)
    }
}

impl std::error::Error for SyntaxError {}

const BOM: &str = "\u{feff}";

fn parse_text(text: &str) -> Result<GoFile, SyntaxError> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| SyntaxError {
            offset: 0,
            message: format!("cannot load Go grammar: {e}"),
        })?;
    let tree = parser.parse(text, None).ok_or_else(|| SyntaxError {
        offset: 0,
        message: "parser produced no tree".to_string(),
    })?;

    let root = tree.root_node();
    if let Some(node) = lower::first_error(root) {
        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            let snippet: String = text
                .get(node.byte_range())
                .unwrap_or_default()
                .chars()
                .take(20)
                .collect();
            format!("syntax error near `{}`", snippet.trim())
        };
        return Err(SyntaxError {
            offset: node.start_byte(),
            message,
        });
    }
    lower::Lowerer::new(text).lower_file(root)
}

/// Parse a Go source file into its top-level declarations.
///
/// A leading byte order mark is ignored. Syntax errors are reported as
/// `SourceUnreadable` with a `line:col` prefix.
pub fn parse_source(source: &SourceFile) -> Result<GoFile, ExtractError> {
    let text = source.as_str();
    let (body, shift) = match text.strip_prefix(BOM) {
        Some(rest) => (rest, BOM.len()),
        None => (text, 0),
    };
    parse_text(body).map_err(|err| {
        let (line, col) = source.offset_to_line_col(err.offset + shift);
        ExtractError::SourceUnreadable {
            path: source.path.clone(),
            reason: format!("{line}:{col}: {}", err.message),
        }
    })
}
