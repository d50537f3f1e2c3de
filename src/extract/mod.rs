//! Table builders over a parsed Go file.

pub mod functions;
pub mod globals;
pub mod resolver;

use tracing::debug;

use crate::descriptor::{FunctionTable, GlobalVariableTable};
use crate::error::ExtractError;
use crate::parse::{Expr, GoFile, SourceFile, parse_source};

pub use functions::build_function_table;
pub use globals::build_global_table;
pub use resolver::resolve_type;

pub const DEFAULT_GLOBALS_BINDING: &str = "BuiltinGlobalVariableTypes";
pub const DEFAULT_FUNCTIONS_BINDING: &str = "BuiltinFuncSignatures";

/// Names of the package-level variables holding the two tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    pub globals: String,
    pub functions: String,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            globals: DEFAULT_GLOBALS_BINDING.to_string(),
            functions: DEFAULT_FUNCTIONS_BINDING.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub globals: GlobalVariableTable,
    pub functions: FunctionTable,
}

/// Parse `source` once and build both tables.
pub fn extract(source: &SourceFile, bindings: &Bindings) -> Result<Extraction, ExtractError> {
    let file = parse_source(source)?;
    debug!(
        path = source.path_str(),
        package = %file.package,
        decls = file.decls.len(),
        "parsed source"
    );
    let globals = build_global_table(&file, &bindings.globals)?;
    let functions = build_function_table(&file, &bindings.functions)?;
    Ok(Extraction { globals, functions })
}

/// The elements of the map literal bound to `binding`.
///
/// The first `var` spec that names `binding` with an initializer wins.
pub(crate) fn find_table<'a>(file: &'a GoFile, binding: &str) -> Result<&'a [Expr], ExtractError> {
    let value = file
        .var_specs()
        .find_map(|spec| spec.value_of(binding))
        .ok_or_else(|| ExtractError::NotFound(binding.to_string()))?;
    match value {
        Expr::CompositeLit { elts, .. } => {
            debug!(binding, entries = elts.len(), "found table");
            Ok(elts)
        }
        _ => Err(ExtractError::MalformedTable(binding.to_string())),
    }
}
