use std::path::PathBuf;

use crate::descriptor::TypeDescriptor;
use crate::parse::{Expr, GoFile, SourceFile, parse_source};

/// Parse a complete Go file, panicking on syntax errors.
pub fn parse(src: &str) -> GoFile {
    let source = SourceFile::from_string(PathBuf::from("test.go"), src.to_string());
    parse_source(&source).unwrap_or_else(|e| panic!("fixture does not parse: {e}"))
}

/// Parse a single expression by binding it to a package-level var.
pub fn expr(src: &str) -> Expr {
    let file = parse(&format!("package p\n\nvar x = {src}\n"));
    let spec = file.var_specs().next().expect("fixture has a var spec");
    spec.values[0].clone()
}

/// A descriptor written as the JSON the extractor emits.
pub fn descriptor(json: &str) -> TypeDescriptor {
    serde_json::from_str(json).unwrap_or_else(|e| panic!("bad descriptor json {json}: {e}"))
}

/// Wrap `body` in a Go file declaring the global variable table.
pub fn globals_file(body: &str) -> String {
    format!(
        "package actionlint\n\nvar BuiltinGlobalVariableTypes = map[string]ExprType{{\n{body}\n}}\n"
    )
}

/// Wrap `body` in a Go file declaring the function signature table.
pub fn functions_file(body: &str) -> String {
    format!(
        "package actionlint\n\nvar BuiltinFuncSignatures = map[string][]*FuncSignature{{\n{body}\n}}\n"
    )
}
