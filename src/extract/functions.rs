use tracing::debug;

use super::find_table;
use super::resolver::resolve_type;
use crate::descriptor::{FunctionSignature, FunctionTable, TypeDescriptor};
use crate::error::ExtractError;
use crate::parse::{Expr, GoFile, UnaryOp};

/// Build the function signature table from the map literal bound to `binding`.
///
/// Each entry maps a lowercase function key to its overloads, in the order
/// they are declared.
pub fn build_function_table(file: &GoFile, binding: &str) -> Result<FunctionTable, ExtractError> {
    let mut table = FunctionTable::new();
    for elt in find_table(file, binding)? {
        let Expr::KeyValue { key, value } = elt else {
            continue;
        };
        let (Some(name), Some(overloads)) = (key.as_string(), value.composite_elts()) else {
            debug!(binding, "skipping malformed function entry");
            continue;
        };
        let sigs = overloads.iter().filter_map(signature).collect();
        table.insert(name, sigs);
    }
    Ok(table)
}

/// Read one `{Name: ..., Ret: ..., Params: ..., VariableLengthParams: ...}`
/// element, optionally written as `&FuncSignature{...}`.
fn signature(expr: &Expr) -> Option<FunctionSignature> {
    let lit = match expr {
        Expr::Unary {
            op: UnaryOp::Addr,
            x,
        } => x.as_ref(),
        other => other,
    };
    let fields = lit.composite_elts()?;

    let mut sig = FunctionSignature {
        name: String::new(),
        ret: TypeDescriptor::Any,
        params: Vec::new(),
        varargs: false,
    };
    for field in fields {
        let Expr::KeyValue { key, value } = field else {
            continue;
        };
        let Expr::Ident(field_name) = key.as_ref() else {
            continue;
        };
        match field_name.as_str() {
            "Name" => sig.name = value.as_string().unwrap_or_default(),
            "Ret" => sig.ret = resolve_type(value),
            "Params" => {
                sig.params = value
                    .composite_elts()
                    .map(|elts| elts.iter().map(resolve_type).collect())
                    .unwrap_or_default();
            }
            "VariableLengthParams" => sig.varargs = value.as_bool().unwrap_or(false),
            _ => {}
        }
    }
    Some(sig)
}
