//! Serializable descriptors for the expression language's built-in types.
//!
//! The JSON shape is what the downstream checker loads:
//! `{kind, strict?, props?, mapped?, elem?, deref?}` for types and
//! `{name, ret, params, varargs?}` for function signatures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A normalized type expression. Always a finite tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeDescriptor {
    String,
    Number,
    Bool,
    Null,
    Any,
    Object(ObjectType),
    Array(ArrayType),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    /// Properties outside `props` (and `mapped`) are rejected.
    pub strict: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, TypeDescriptor>,
    /// Value type for arbitrary keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapped: Option<Box<TypeDescriptor>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayType {
    pub elem: Box<TypeDescriptor>,
    /// Element access yields a dereferenced value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deref: Option<bool>,
}

impl TypeDescriptor {
    pub fn object(strict: bool, props: BTreeMap<String, TypeDescriptor>) -> Self {
        TypeDescriptor::Object(ObjectType {
            strict,
            props,
            mapped: None,
        })
    }

    pub fn empty_object(strict: bool) -> Self {
        Self::object(strict, BTreeMap::new())
    }

    pub fn mapped_object(strict: bool, mapped: TypeDescriptor) -> Self {
        TypeDescriptor::Object(ObjectType {
            strict,
            props: BTreeMap::new(),
            mapped: Some(Box::new(mapped)),
        })
    }

    pub fn array(elem: TypeDescriptor, deref: Option<bool>) -> Self {
        TypeDescriptor::Array(ArrayType {
            elem: Box::new(elem),
            deref,
        })
    }

    /// The `kind` discriminant as it appears in JSON.
    pub fn kind(&self) -> &'static str {
        match self {
            TypeDescriptor::String => "string",
            TypeDescriptor::Number => "number",
            TypeDescriptor::Bool => "bool",
            TypeDescriptor::Null => "null",
            TypeDescriptor::Any => "any",
            TypeDescriptor::Object(_) => "object",
            TypeDescriptor::Array(_) => "array",
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let children = match self {
            TypeDescriptor::Object(obj) => obj
                .props
                .values()
                .chain(obj.mapped.as_deref())
                .map(TypeDescriptor::depth)
                .max()
                .unwrap_or(0),
            TypeDescriptor::Array(arr) => arr.elem.depth(),
            _ => 0,
        };
        children + 1
    }
}

/// One overload of a built-in function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub name: String,
    pub ret: TypeDescriptor,
    pub params: Vec<TypeDescriptor>,
    /// The last parameter may repeat zero or more times.
    #[serde(default, skip_serializing_if = "is_false")]
    pub varargs: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Global variable name to its type.
pub type GlobalVariableTable = BTreeMap<String, TypeDescriptor>;

/// Function key to its overloads, in declaration order.
pub type FunctionTable = BTreeMap<String, Vec<FunctionSignature>>;
