//! Lowering of tree-sitter-go syntax nodes into the declaration AST.
//!
//! Only what the table builders read is kept structurally: `var` specs and
//! the expressions they are initialized with. Node kinds without a
//! counterpart become `Expr::Other`.

use tree_sitter::Node;

use super::SyntaxError;
use super::ast::{Decl, Expr, GoFile, LitKind, UnaryOp, ValueSpec};

/// Deepest expression tree the lowering will build.
pub const MAX_NESTING: usize = 1024;

const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROWTH: usize = 1024 * 1024;

pub struct Lowerer<'a> {
    src: &'a str,
    depth: usize,
}

/// Named children, with comments left out.
fn children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let nodes = node
        .named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect();
    nodes
}

fn field_nodes<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let nodes = node.children_by_field_name(field, &mut cursor).collect();
    nodes
}

fn unary_op(token: &str) -> Option<UnaryOp> {
    match token {
        "&" => Some(UnaryOp::Addr),
        "-" => Some(UnaryOp::Neg),
        "+" => Some(UnaryOp::Plus),
        "!" => Some(UnaryOp::Not),
        "^" => Some(UnaryOp::Xor),
        "<-" => Some(UnaryOp::Recv),
        "~" => Some(UnaryOp::Tilde),
        _ => None,
    }
}

impl<'a> Lowerer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, depth: 0 }
    }

    fn text(&self, node: Node<'_>) -> &'a str {
        self.src.get(node.byte_range()).unwrap_or_default()
    }

    fn error(&self, node: Node<'_>, message: impl Into<String>) -> SyntaxError {
        SyntaxError {
            offset: node.start_byte(),
            message: message.into(),
        }
    }

    pub fn lower_file(&mut self, root: Node<'_>) -> Result<GoFile, SyntaxError> {
        let mut package = None;
        let mut decls = Vec::new();
        for node in children(root) {
            match node.kind() {
                "package_clause" => {
                    package = children(node).first().map(|name| self.text(*name).to_string());
                }
                "var_declaration" => decls.push(Decl::Var(self.lower_var_declaration(node)?)),
                kind => decls.push(Decl::Skipped(kind)),
            }
        }
        let Some(package) = package else {
            return Err(self.error(root, "expected package clause"));
        };
        Ok(GoFile { package, decls })
    }

    fn lower_var_declaration(&mut self, node: Node<'_>) -> Result<Vec<ValueSpec>, SyntaxError> {
        let mut specs = Vec::new();
        for child in children(node) {
            match child.kind() {
                "var_spec" => specs.push(self.lower_value_spec(child)?),
                "var_spec_list" => {
                    for spec in children(child) {
                        specs.push(self.lower_value_spec(spec)?);
                    }
                }
                _ => {}
            }
        }
        Ok(specs)
    }

    fn lower_value_spec(&mut self, node: Node<'_>) -> Result<ValueSpec, SyntaxError> {
        let names = field_nodes(node, "name")
            .into_iter()
            .map(|name| self.text(name).to_string())
            .collect();
        let ty = node
            .child_by_field_name("type")
            .map(|ty| self.lower_expr(ty))
            .transpose()?;
        let mut values = Vec::new();
        for value in field_nodes(node, "value") {
            if value.kind() == "expression_list" {
                for expr in children(value) {
                    values.push(self.lower_expr(expr)?);
                }
            } else {
                values.push(self.lower_expr(value)?);
            }
        }
        Ok(ValueSpec { names, ty, values })
    }

    fn boxed(&mut self, node: Node<'_>) -> Result<Box<Expr>, SyntaxError> {
        self.lower_expr(node).map(Box::new)
    }

    /// Lower the node in `field`, or `Other` when the field is absent.
    fn field(&mut self, node: Node<'_>, field: &str) -> Result<Box<Expr>, SyntaxError> {
        match node.child_by_field_name(field) {
            Some(child) => self.boxed(child),
            None => Ok(Box::new(Expr::Other(node.kind()))),
        }
    }

    fn optional_field(
        &mut self,
        node: Node<'_>,
        field: &str,
    ) -> Result<Option<Box<Expr>>, SyntaxError> {
        node.child_by_field_name(field)
            .map(|child| self.boxed(child))
            .transpose()
    }

    pub fn lower_expr(&mut self, node: Node<'_>) -> Result<Expr, SyntaxError> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(node, "expression nested too deeply"));
        }
        self.depth += 1;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || {
            self.lower_expr_inner(node)
        });
        self.depth -= 1;
        result
    }

    fn lower_expr_inner(&mut self, node: Node<'_>) -> Result<Expr, SyntaxError> {
        let expr = match node.kind() {
            "identifier" | "field_identifier" | "type_identifier" | "package_identifier"
            | "true" | "false" | "nil" | "iota" => Expr::Ident(self.text(node).to_string()),
            "int_literal" | "float_literal" | "imaginary_literal" => Expr::BasicLit {
                kind: LitKind::Number,
                raw: self.text(node).to_string(),
            },
            "rune_literal" => Expr::BasicLit {
                kind: LitKind::Char,
                raw: self.text(node).to_string(),
            },
            "interpreted_string_literal" | "raw_string_literal" => Expr::BasicLit {
                kind: LitKind::String,
                raw: self.text(node).to_string(),
            },
            "composite_literal" => Expr::CompositeLit {
                ty: self.optional_field(node, "type")?,
                elts: match node.child_by_field_name("body") {
                    Some(body) => self.lower_elements(body)?,
                    None => Vec::new(),
                },
            },
            "literal_value" => Expr::CompositeLit {
                ty: None,
                elts: self.lower_elements(node)?,
            },
            "literal_element" | "element" => match children(node).first() {
                Some(inner) => self.lower_expr_inner(*inner)?,
                None => Expr::Other(node.kind()),
            },
            "keyed_element" => {
                let parts = children(node);
                match (parts.first(), parts.last()) {
                    (Some(key), Some(value)) if parts.len() == 2 => Expr::KeyValue {
                        key: self.boxed(*key)?,
                        value: self.boxed(*value)?,
                    },
                    _ => Expr::Other(node.kind()),
                }
            }
            "selector_expression" => Expr::Selector {
                x: self.field(node, "operand")?,
                sel: node
                    .child_by_field_name("field")
                    .map(|sel| self.text(sel).to_string())
                    .unwrap_or_default(),
            },
            "qualified_type" => Expr::Selector {
                x: self.field(node, "package")?,
                sel: node
                    .child_by_field_name("name")
                    .map(|name| self.text(name).to_string())
                    .unwrap_or_default(),
            },
            "call_expression" => {
                let fun = self.field(node, "function")?;
                let (args, ellipsis) = match node.child_by_field_name("arguments") {
                    Some(list) => self.lower_arguments(list)?,
                    None => (Vec::new(), false),
                };
                Expr::Call {
                    fun,
                    args,
                    ellipsis,
                }
            }
            "type_conversion_expression" => Expr::Call {
                fun: self.field(node, "type")?,
                args: vec![*self.field(node, "operand")?],
                ellipsis: false,
            },
            "index_expression" => Expr::Index {
                x: self.field(node, "operand")?,
                indices: vec![*self.field(node, "index")?],
            },
            "generic_type" => {
                let x = self.field(node, "type")?;
                let mut indices = Vec::new();
                if let Some(args) = node.child_by_field_name("type_arguments") {
                    for arg in children(args) {
                        indices.push(self.lower_expr(arg)?);
                    }
                }
                Expr::Index { x, indices }
            }
            "slice_expression" => {
                let x = self.field(node, "operand")?;
                let mut parts = Vec::new();
                for name in ["start", "end", "capacity"] {
                    parts.push(self.optional_field(node, name)?.map(|part| *part));
                }
                Expr::Slice { x, parts }
            }
            "type_assertion_expression" => Expr::TypeAssert {
                x: self.field(node, "operand")?,
                ty: self.optional_field(node, "type")?,
            },
            "unary_expression" => {
                let op = node
                    .child_by_field_name("operator")
                    .map_or("", |op| op.kind());
                let x = self.field(node, "operand")?;
                match (op, unary_op(op)) {
                    ("*", _) => Expr::Star(x),
                    (_, Some(op)) => Expr::Unary { op, x },
                    (_, None) => Expr::Other(node.kind()),
                }
            }
            "binary_expression" => Expr::Binary {
                op: node
                    .child_by_field_name("operator")
                    .map_or("", |op| op.kind()),
                lhs: self.field(node, "left")?,
                rhs: self.field(node, "right")?,
            },
            "parenthesized_expression" | "parenthesized_type" => match children(node).first() {
                Some(inner) => Expr::Paren(self.boxed(*inner)?),
                None => Expr::Other(node.kind()),
            },
            "pointer_type" => match children(node).first() {
                Some(inner) => Expr::Star(self.boxed(*inner)?),
                None => Expr::Other(node.kind()),
            },
            "func_literal" => Expr::FuncLit,
            "slice_type" => Expr::ArrayType {
                len: None,
                elem: self.field(node, "element")?,
            },
            "array_type" => Expr::ArrayType {
                len: Some(self.field(node, "length")?),
                elem: self.field(node, "element")?,
            },
            "implicit_length_array_type" => Expr::ArrayType {
                len: Some(Box::new(Expr::Ellipsis)),
                elem: self.field(node, "element")?,
            },
            "map_type" => Expr::MapType {
                key: self.field(node, "key")?,
                value: self.field(node, "value")?,
            },
            "channel_type" => Expr::ChanType(self.field(node, "value")?),
            "function_type" => Expr::FuncType,
            "struct_type" => Expr::StructType,
            "interface_type" => Expr::InterfaceType,
            kind => Expr::Other(kind),
        };
        Ok(expr)
    }

    fn lower_elements(&mut self, body: Node<'_>) -> Result<Vec<Expr>, SyntaxError> {
        let mut elts = Vec::new();
        for elt in children(body) {
            elts.push(self.lower_expr(elt)?);
        }
        Ok(elts)
    }

    /// Call arguments, and whether the last one was spread with `...`.
    fn lower_arguments(&mut self, list: Node<'_>) -> Result<(Vec<Expr>, bool), SyntaxError> {
        let mut args = Vec::new();
        let mut ellipsis = false;
        for arg in children(list) {
            if arg.kind() == "variadic_argument" {
                ellipsis = true;
                if let Some(inner) = children(arg).first() {
                    args.push(self.lower_expr(*inner)?);
                }
            } else {
                args.push(self.lower_expr(arg)?);
            }
        }
        Ok((args, ellipsis))
    }
}

/// The first error or missing node, in source order.
pub fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}
