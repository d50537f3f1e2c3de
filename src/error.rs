//! Fatal extraction errors.
//!
//! Anything below the outermost table literal degrades to a default instead
//! of producing one of these.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The source file could not be read or is not valid Go.
    #[error("cannot read {}: {reason}", path.display())]
    SourceUnreadable { path: PathBuf, reason: String },

    /// No top-level `var` binds the well-known name.
    #[error("{0} not found")]
    NotFound(String),

    /// The well-known binding is not initialized with a composite literal.
    #[error("{0} is not a composite literal")]
    MalformedTable(String),
}
