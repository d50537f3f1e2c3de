use tracing::debug;

use super::find_table;
use super::resolver::resolve_type;
use crate::descriptor::GlobalVariableTable;
use crate::error::ExtractError;
use crate::parse::{Expr, GoFile};

/// Build the global variable table from the map literal bound to `binding`.
pub fn build_global_table(
    file: &GoFile,
    binding: &str,
) -> Result<GlobalVariableTable, ExtractError> {
    let mut table = GlobalVariableTable::new();
    for elt in find_table(file, binding)? {
        let Expr::KeyValue { key, value } = elt else {
            debug!(binding, "skipping element without key");
            continue;
        };
        let Some(name) = key.as_string() else {
            debug!(binding, "skipping entry with non-string key");
            continue;
        };
        table.insert(name, resolve_type(value));
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::TypeDescriptor;
    use crate::testutil::{descriptor, globals_file, parse};

    const BINDING: &str = "BuiltinGlobalVariableTypes";

    fn build(body: &str) -> GlobalVariableTable {
        build_global_table(&parse(&globals_file(body)), BINDING).unwrap()
    }

    #[test]
    fn github_context_is_strict_object() {
        let table = build(
            "\t\"github\": NewStrictObjectType(map[string]ExprType{\n\t\t\"event_name\": StringType{},\n\t}),",
        );
        assert_eq!(
            table["github"],
            descriptor(
                r#"{"kind":"object","strict":true,"props":{"event_name":{"kind":"string"}}}"#
            )
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn keys_are_sorted_in_output() {
        let table = build("\t\"steps\": AnyType{},\n\t\"env\": AnyType{},\n\t\"job\": AnyType{},");
        let keys: Vec<&str> = table.keys().map(String::as_str).collect();
        assert_eq!(keys, ["env", "job", "steps"]);
    }

    #[test]
    fn escaped_and_raw_keys_are_decoded() {
        let table = build("\t\"a\\tb\": NullType{},\n\t`raw\\n`: BoolType{},");
        assert_eq!(table.get("a\tb"), Some(&TypeDescriptor::Null));
        assert_eq!(table.get("raw\\n"), Some(&TypeDescriptor::Bool));
    }

    #[test]
    fn skips_entries_without_string_keys() {
        let table = build(
            "\tname: StringType{},\n\t42: StringType{},\n\tStringType{},\n\t\"ok\": NumberType{},",
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table["ok"], TypeDescriptor::Number);
    }

    #[test]
    fn duplicate_key_keeps_last() {
        let table = build("\t\"x\": StringType{},\n\t\"x\": NumberType{},");
        assert_eq!(table["x"], TypeDescriptor::Number);
    }

    #[test]
    fn unrecognized_value_degrades_to_any() {
        let table = build("\t\"matrix\": someHelper(),");
        assert_eq!(table["matrix"], TypeDescriptor::Any);
    }

    #[test]
    fn empty_table() {
        assert!(build("").is_empty());
    }

    #[test]
    fn missing_binding() {
        let file = parse("package actionlint\n\nvar Other = map[string]ExprType{}\n");
        let err = build_global_table(&file, BINDING).unwrap_err();
        assert_eq!(err.to_string(), "BuiltinGlobalVariableTypes not found");
    }

    #[test]
    fn binding_is_not_a_literal() {
        let file = parse("package actionlint\n\nvar BuiltinGlobalVariableTypes = buildGlobals()\n");
        assert!(matches!(
            build_global_table(&file, BINDING),
            Err(ExtractError::MalformedTable(b)) if b == BINDING
        ));
    }

    #[test]
    fn declared_without_value_is_not_found() {
        let file = parse("package actionlint\n\nvar BuiltinGlobalVariableTypes map[string]ExprType\n");
        assert!(matches!(
            build_global_table(&file, BINDING),
            Err(ExtractError::NotFound(_))
        ));
    }
}
