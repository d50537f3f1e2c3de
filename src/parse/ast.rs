//! Syntax tree for Go top-level declarations.
//!
//! Only `var` declarations are materialized; everything else is recorded by
//! its syntax node kind and skipped. Types are expressions, as in `go/ast`.

use super::literal::unquote;

#[derive(Debug, Clone, PartialEq)]
pub struct GoFile {
    pub package: String,
    pub decls: Vec<Decl>,
}

impl GoFile {
    /// All `var` specs in source order.
    pub fn var_specs(&self) -> impl Iterator<Item = &ValueSpec> {
        self.decls
            .iter()
            .filter_map(|decl| match decl {
                Decl::Var(specs) => Some(specs),
                Decl::Skipped(_) => None,
            })
            .flatten()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    /// `var x = ...` or a parenthesized group of specs.
    Var(Vec<ValueSpec>),
    /// An `import`, `const`, `type`, `func` or method declaration, by node kind.
    Skipped(&'static str),
}

/// `a, b T = x, y`
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub names: Vec<String>,
    pub ty: Option<Expr>,
    pub values: Vec<Expr>,
}

impl ValueSpec {
    /// The initializer bound to `name`, if the spec declares it with one.
    pub fn value_of(&self, name: &str) -> Option<&Expr> {
        let idx = self.names.iter().position(|n| n == name)?;
        self.values.get(idx)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Number,
    Char,
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Addr,  // &
    Neg,   // -
    Plus,  // +
    Not,   // !
    Xor,   // ^
    Recv,  // <-
    Tilde, // ~
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(String),
    BasicLit {
        kind: LitKind,
        raw: String,
    },
    /// `T{...}`, or `{...}` with the type elided inside another literal.
    CompositeLit {
        ty: Option<Box<Expr>>,
        elts: Vec<Expr>,
    },
    /// `key: value` inside a composite literal.
    KeyValue {
        key: Box<Expr>,
        value: Box<Expr>,
    },
    Selector {
        x: Box<Expr>,
        sel: String,
    },
    Call {
        fun: Box<Expr>,
        args: Vec<Expr>,
        ellipsis: bool,
    },
    Index {
        x: Box<Expr>,
        indices: Vec<Expr>,
    },
    Slice {
        x: Box<Expr>,
        parts: Vec<Option<Expr>>,
    },
    /// `x.(T)`; `ty` is `None` for `x.(type)`.
    TypeAssert {
        x: Box<Expr>,
        ty: Option<Box<Expr>>,
    },
    Unary {
        op: UnaryOp,
        x: Box<Expr>,
    },
    /// `*x`, either a dereference or a pointer type.
    Star(Box<Expr>),
    Binary {
        op: &'static str,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Paren(Box<Expr>),
    /// `...` as an array length.
    Ellipsis,
    /// A function literal; the body is not kept.
    FuncLit,
    /// `[]T` when `len` is `None`, `[N]T` or `[...]T` otherwise.
    ArrayType {
        len: Option<Box<Expr>>,
        elem: Box<Expr>,
    },
    MapType {
        key: Box<Expr>,
        value: Box<Expr>,
    },
    ChanType(Box<Expr>),
    FuncType,
    StructType,
    InterfaceType,
    /// Any other syntax, by node kind.
    Other(&'static str),
}

impl Expr {
    /// The name a type or callee refers to: `Foo` or the `Foo` of `pkg.Foo`.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Expr::Ident(name) => Some(name),
            Expr::Selector { sel, .. } => Some(sel),
            _ => None,
        }
    }

    /// `true` or `false` written as a bare identifier.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Expr::Ident(name) if name == "true" => Some(true),
            Expr::Ident(name) if name == "false" => Some(false),
            _ => None,
        }
    }

    /// The decoded value of a string literal.
    pub fn as_string(&self) -> Option<String> {
        match self {
            Expr::BasicLit {
                kind: LitKind::String,
                raw,
            } => unquote(raw),
            _ => None,
        }
    }

    /// The elements of a composite literal, typed or not.
    pub fn composite_elts(&self) -> Option<&[Expr]> {
        match self {
            Expr::CompositeLit { elts, .. } => Some(elts),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Expr {
        Expr::Ident(name.to_string())
    }

    #[test]
    fn type_name_of_ident_and_selector() {
        assert_eq!(ident("StringType").type_name(), Some("StringType"));
        let sel = Expr::Selector {
            x: Box::new(ident("actionlint")),
            sel: "NumberType".to_string(),
        };
        assert_eq!(sel.type_name(), Some("NumberType"));
        assert_eq!(Expr::FuncLit.type_name(), None);
    }

    #[test]
    fn bool_identifiers() {
        assert_eq!(ident("true").as_bool(), Some(true));
        assert_eq!(ident("false").as_bool(), Some(false));
        assert_eq!(ident("True").as_bool(), None);
    }

    #[test]
    fn string_literal_value() {
        let lit = Expr::BasicLit {
            kind: LitKind::String,
            raw: "\"github\"".to_string(),
        };
        assert_eq!(lit.as_string().as_deref(), Some("github"));
        let num = Expr::BasicLit {
            kind: LitKind::Number,
            raw: "1".to_string(),
        };
        assert_eq!(num.as_string(), None);
    }

    #[test]
    fn value_of_respects_positions() {
        let spec = ValueSpec {
            names: vec!["a".into(), "b".into()],
            ty: None,
            values: vec![ident("x")],
        };
        assert_eq!(spec.value_of("a"), Some(&ident("x")));
        assert_eq!(spec.value_of("b"), None);
        assert_eq!(spec.value_of("c"), None);
    }
}
