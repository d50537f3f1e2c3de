//! Turns a Go type expression into a `TypeDescriptor`.
//!
//! The recognized grammar is small and closed:
//!
//! - `StringType{}`, `NumberType{}`, `BoolType{}`, `AnyType{}`, `NullType{}`
//!   (also bare or package-qualified)
//! - `NewObjectType(map[string]ExprType{...})` and the other object
//!   constructors in [`ObjectConstructor`]
//! - `ArrayType{Elem: ..., Deref: ...}`, usually behind `&`
//!
//! Every other shape resolves to `any`, so resolution never fails.

use std::collections::BTreeMap;

use tracing::trace;

use crate::descriptor::TypeDescriptor;
use crate::parse::Expr;

const ARRAY_TYPE: &str = "ArrayType";
const ELEM_FIELD: &str = "Elem";
const DEREF_FIELD: &str = "Deref";

/// Map a primitive type marker name to its descriptor.
pub fn primitive(name: &str) -> Option<TypeDescriptor> {
    match name {
        "StringType" => Some(TypeDescriptor::String),
        "NumberType" => Some(TypeDescriptor::Number),
        "BoolType" => Some(TypeDescriptor::Bool),
        "AnyType" => Some(TypeDescriptor::Any),
        "NullType" => Some(TypeDescriptor::Null),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectShape {
    /// One `map[string]ExprType{...}` argument listing the properties.
    Props,
    /// No arguments.
    Empty,
    /// One type argument shared by every key.
    Mapped,
}

/// The object constructor functions, strictness x shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectConstructor {
    Loose,
    Strict,
    EmptyLoose,
    EmptyStrict,
    MapLoose,
    MapStrict,
}

impl ObjectConstructor {
    pub const ALL: [ObjectConstructor; 6] = [
        ObjectConstructor::Loose,
        ObjectConstructor::Strict,
        ObjectConstructor::EmptyLoose,
        ObjectConstructor::EmptyStrict,
        ObjectConstructor::MapLoose,
        ObjectConstructor::MapStrict,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ctor| ctor.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            ObjectConstructor::Loose => "NewObjectType",
            ObjectConstructor::Strict => "NewStrictObjectType",
            ObjectConstructor::EmptyLoose => "NewEmptyObjectType",
            ObjectConstructor::EmptyStrict => "NewEmptyStrictObjectType",
            ObjectConstructor::MapLoose => "NewMapObjectType",
            ObjectConstructor::MapStrict => "NewStrictMapObjectType",
        }
    }

    pub fn is_strict(self) -> bool {
        matches!(
            self,
            ObjectConstructor::Strict
                | ObjectConstructor::EmptyStrict
                | ObjectConstructor::MapStrict
        )
    }

    fn shape(self) -> ObjectShape {
        match self {
            ObjectConstructor::Loose | ObjectConstructor::Strict => ObjectShape::Props,
            ObjectConstructor::EmptyLoose | ObjectConstructor::EmptyStrict => ObjectShape::Empty,
            ObjectConstructor::MapLoose | ObjectConstructor::MapStrict => ObjectShape::Mapped,
        }
    }

    /// Build the object for a call with `args`. Wrong arity yields the
    /// empty object of the same strictness.
    fn build(self, args: &[Expr]) -> TypeDescriptor {
        let strict = self.is_strict();
        match (self.shape(), args) {
            (ObjectShape::Props, [Expr::CompositeLit { elts, .. }]) => {
                TypeDescriptor::object(strict, resolve_props(elts))
            }
            (ObjectShape::Mapped, [arg]) => {
                TypeDescriptor::mapped_object(strict, resolve_type(arg))
            }
            (ObjectShape::Empty, _) => TypeDescriptor::empty_object(strict),
            (shape, _) => {
                trace!(
                    constructor = self.name(),
                    ?shape,
                    arity = args.len(),
                    "unexpected constructor arguments"
                );
                TypeDescriptor::empty_object(strict)
            }
        }
    }
}

/// Resolve a type expression. Total: unrecognized shapes become `any`.
pub fn resolve_type(expr: &Expr) -> TypeDescriptor {
    match expr {
        Expr::CompositeLit { ty, elts } => match ty.as_deref().and_then(Expr::type_name) {
            Some(ARRAY_TYPE) => resolve_array(elts),
            Some(name) => primitive(name).unwrap_or_else(|| {
                trace!(ty = name, "unknown composite literal type");
                TypeDescriptor::Any
            }),
            None => TypeDescriptor::Any,
        },
        Expr::Call { fun, args, .. } => fun
            .type_name()
            .and_then(ObjectConstructor::from_name)
            .map_or(TypeDescriptor::Any, |ctor| ctor.build(args)),
        Expr::Unary { x, .. } => resolve_type(x),
        Expr::Ident(_) | Expr::Selector { .. } => expr
            .type_name()
            .and_then(primitive)
            .unwrap_or(TypeDescriptor::Any),
        _ => TypeDescriptor::Any,
    }
}

/// Properties from the `"name": type` elements of a map literal.
pub fn resolve_props(elts: &[Expr]) -> BTreeMap<String, TypeDescriptor> {
    let mut props = BTreeMap::new();
    for elt in elts {
        let Expr::KeyValue { key, value } = elt else {
            continue;
        };
        let Some(name) = key.as_string() else {
            continue;
        };
        props.insert(name, resolve_type(value));
    }
    props
}

fn resolve_array(elts: &[Expr]) -> TypeDescriptor {
    let mut elem = None;
    let mut deref = None;
    for elt in elts {
        let Expr::KeyValue { key, value } = elt else {
            continue;
        };
        match key.as_ref() {
            Expr::Ident(field) if field == ELEM_FIELD => elem = Some(resolve_type(value)),
            Expr::Ident(field) if field == DEREF_FIELD => {
                if let Some(b) = value.as_bool() {
                    deref = Some(b);
                }
            }
            _ => {}
        }
    }

    // Positional form: ArrayType{StringType{}, ...}
    if elem.is_none() {
        elem = elts
            .iter()
            .find(|elt| !matches!(elt, Expr::KeyValue { .. }))
            .map(resolve_type);
    }

    TypeDescriptor::array(elem.unwrap_or(TypeDescriptor::Any), deref)
}
