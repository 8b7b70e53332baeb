//! Rust expression frontend
//!
//! Parses Rust expression syntax with `syn` and lowers it into a boxed
//! expression tree, so that trees can be written as source text:
//!
//! ```
//! use sapling::frontend::parse_expr;
//!
//! let tree = parse_expr("_1 + 2").unwrap();
//! assert_eq!(
//!     sapling::print(&tree),
//!     "expr<+>\n    placeholder<1>\n    term<i64>[=2]\n"
//! );
//! ```
//!
//! Literals become terminals, `_1`, `_2`, ... become placeholders and any
//! other path becomes a [`Name`] terminal. A negated integer literal whose
//! magnitude only fits once negative (`-128i8`) becomes a single negative
//! terminal; every other negation stays a `-` node.

use std::fmt;

use syn::spanned::Spanned;

use crate::error::{FrontendError, Result};
use crate::expr::{BoxedExpr, Expr, Expression, Placeholder, Terminal};
use crate::kind::ExprKind;
use crate::term;

/// A named entity (variable, function, path) appearing as a terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(pub String);

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a Rust expression and lower it into a tree.
pub fn parse_expr(source: &str) -> Result<BoxedExpr> {
    let expr: syn::Expr = syn::parse_str(source)?;
    lower(&expr)
}

/// Lower a parsed Rust expression into a tree.
pub fn lower(expr: &syn::Expr) -> Result<BoxedExpr> {
    log::trace!("lowering {}", expr_kind_name(expr));

    match expr {
        syn::Expr::Lit(lit) => lower_lit(&lit.lit),
        syn::Expr::Path(path) => lower_path(path),

        syn::Expr::Unary(unary) => {
            let kind = match unary.op {
                syn::UnOp::Neg(_) => return lower_neg(&unary.expr),
                syn::UnOp::Not(_) => ExprKind::LogicalNot,
                syn::UnOp::Deref(_) => ExprKind::Dereference,
                _ => return Err(unsupported("unknown unary operator", expr)),
            };
            Ok(boxed(Expr::unary(kind, lower(&unary.expr)?)))
        }

        syn::Expr::Reference(reference) => Ok(boxed(Expr::unary(
            ExprKind::AddressOf,
            lower(&reference.expr)?,
        ))),

        syn::Expr::Binary(binary) => {
            let kind = binary_kind(&binary.op)
                .ok_or_else(|| unsupported("unknown binary operator", expr))?;
            Ok(boxed(Expr::binary(
                kind,
                lower(&binary.left)?,
                lower(&binary.right)?,
            )))
        }

        syn::Expr::Assign(assign) => Ok(boxed(Expr::binary(
            ExprKind::Assign,
            lower(&assign.left)?,
            lower(&assign.right)?,
        ))),

        syn::Expr::Index(index) => Ok(boxed(Expr::binary(
            ExprKind::Subscript,
            lower(&index.expr)?,
            lower(&index.index)?,
        ))),

        syn::Expr::Call(call) => {
            let args = call.args.iter().map(lower).collect::<Result<Vec<_>>>()?;
            Ok(boxed(Expr::call(lower(&call.func)?, args)))
        }

        syn::Expr::MethodCall(call) => {
            if call.turbofish.is_some() {
                return Err(unsupported("method call with turbofish", expr));
            }
            let callee = boxed(Terminal::new(Name(call.method.to_string())));
            let mut args = vec![lower(&call.receiver)?];
            for arg in &call.args {
                args.push(lower(arg)?);
            }
            Ok(boxed(Expr::call(callee, args)))
        }

        syn::Expr::Tuple(tuple) => {
            let mut elems = tuple.elems.iter().map(lower);
            match elems.next() {
                None => Ok(boxed(term!(()))),
                Some(first) => elems.try_fold(first?, |acc, next| {
                    Ok(boxed(Expr::binary(ExprKind::Comma, acc, next?)))
                }),
            }
        }

        // Parenthesized and grouped expressions - just unwrap
        syn::Expr::Paren(paren) => lower(&paren.expr),
        syn::Expr::Group(group) => lower(&group.expr),

        _ => Err(unsupported(expr_kind_name(expr), expr)),
    }
}

fn lower_neg(operand: &syn::Expr) -> Result<BoxedExpr> {
    match lower(operand) {
        Ok(operand) => Ok(boxed(Expr::unary(ExprKind::Negate, operand))),
        Err(err @ FrontendError::InvalidLiteral { .. }) => match operand {
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Int(lit),
                ..
            }) => lower_negative_int(lit).ok_or(err),
            _ => Err(err),
        },
        Err(err) => Err(err),
    }
}

fn boxed(expr: impl Expression + 'static) -> BoxedExpr {
    Box::new(expr)
}

/// Map a binary operator to its tag.
fn binary_kind(op: &syn::BinOp) -> Option<ExprKind> {
    let kind = match op {
        syn::BinOp::Add(_) => ExprKind::Plus,
        syn::BinOp::Sub(_) => ExprKind::Minus,
        syn::BinOp::Mul(_) => ExprKind::Multiplies,
        syn::BinOp::Div(_) => ExprKind::Divides,
        syn::BinOp::Rem(_) => ExprKind::Modulus,
        syn::BinOp::And(_) => ExprKind::LogicalAnd,
        syn::BinOp::Or(_) => ExprKind::LogicalOr,
        syn::BinOp::BitXor(_) => ExprKind::BitwiseXor,
        syn::BinOp::BitAnd(_) => ExprKind::BitwiseAnd,
        syn::BinOp::BitOr(_) => ExprKind::BitwiseOr,
        syn::BinOp::Shl(_) => ExprKind::ShiftLeft,
        syn::BinOp::Shr(_) => ExprKind::ShiftRight,
        syn::BinOp::Eq(_) => ExprKind::EqualTo,
        syn::BinOp::Lt(_) => ExprKind::Less,
        syn::BinOp::Le(_) => ExprKind::LessEqual,
        syn::BinOp::Ne(_) => ExprKind::NotEqualTo,
        syn::BinOp::Ge(_) => ExprKind::GreaterEqual,
        syn::BinOp::Gt(_) => ExprKind::Greater,
        syn::BinOp::AddAssign(_) => ExprKind::PlusAssign,
        syn::BinOp::SubAssign(_) => ExprKind::MinusAssign,
        syn::BinOp::MulAssign(_) => ExprKind::MultipliesAssign,
        syn::BinOp::DivAssign(_) => ExprKind::DividesAssign,
        syn::BinOp::RemAssign(_) => ExprKind::ModulusAssign,
        syn::BinOp::BitXorAssign(_) => ExprKind::BitwiseXorAssign,
        syn::BinOp::BitAndAssign(_) => ExprKind::BitwiseAndAssign,
        syn::BinOp::BitOrAssign(_) => ExprKind::BitwiseOrAssign,
        syn::BinOp::ShlAssign(_) => ExprKind::ShiftLeftAssign,
        syn::BinOp::ShrAssign(_) => ExprKind::ShiftRightAssign,
        _ => return None,
    };
    Some(kind)
}

// ═══════════════════════════════════════════════════════════════════════
// Paths and placeholders
// ═══════════════════════════════════════════════════════════════════════

fn lower_path(expr: &syn::ExprPath) -> Result<BoxedExpr> {
    if expr.qself.is_some() {
        return Err(FrontendError::Unsupported {
            kind: "qualified self path".to_string(),
            span: Some(path_span(&expr.path)),
        });
    }

    if let Some(index) = placeholder_index(&expr.path) {
        return Ok(boxed(Placeholder::new(index)));
    }

    Ok(boxed(Terminal::new(Name(path_to_string(&expr.path)))))
}

/// `_1`, `_2`, ... name placeholders.
fn placeholder_index(path: &syn::Path) -> Option<usize> {
    let ident = path.get_ident()?.to_string();
    let digits = ident.strip_prefix('_')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Convert a syn::Path to its `::`-separated text.
pub fn path_to_string(path: &syn::Path) -> String {
    let segments = path
        .segments
        .iter()
        .map(|s| s.ident.to_string())
        .collect::<Vec<_>>()
        .join("::");
    if path.leading_colon.is_some() {
        format!("::{}", segments)
    } else {
        segments
    }
}

fn path_span(path: &syn::Path) -> proc_macro2::Span {
    path.segments
        .first()
        .map(|s| s.ident.span())
        .unwrap_or_else(proc_macro2::Span::call_site)
}

// ═══════════════════════════════════════════════════════════════════════
// Literals
// ═══════════════════════════════════════════════════════════════════════

macro_rules! parse_terminal {
    ($lit:expr, $ty:ty) => {
        $lit.base10_parse::<$ty>()
            .map(|value| boxed(Terminal::new(value)))
            .map_err(|e| invalid_literal($lit.to_string(), e, $lit.span()))
    };
}

fn lower_lit(lit: &syn::Lit) -> Result<BoxedExpr> {
    match lit {
        syn::Lit::Str(s) => Ok(boxed(Terminal::new(s.value()))),

        // Vec<u8> has no textual rendering
        syn::Lit::ByteStr(bs) => Ok(boxed(term!(bs.value()))),

        syn::Lit::Byte(b) => Ok(boxed(Terminal::new(b.value()))),
        syn::Lit::Char(c) => Ok(boxed(Terminal::new(c.value()))),
        syn::Lit::Bool(b) => Ok(boxed(Terminal::new(b.value))),
        syn::Lit::Int(i) => lower_int(i),
        syn::Lit::Float(f) => lower_float(f),

        syn::Lit::CStr(_) => Err(FrontendError::Unsupported {
            kind: "C string literal".to_string(),
            span: Some(lit.span()),
        }),

        _ => Err(FrontendError::Unsupported {
            kind: "unknown literal".to_string(),
            span: Some(lit.span()),
        }),
    }
}

/// Integer literals take their suffix type, or `i64` without one.
fn lower_int(lit: &syn::LitInt) -> Result<BoxedExpr> {
    match lit.suffix() {
        "i8" => parse_terminal!(lit, i8),
        "i16" => parse_terminal!(lit, i16),
        "i32" => parse_terminal!(lit, i32),
        "i64" | "" => parse_terminal!(lit, i64),
        "i128" => parse_terminal!(lit, i128),
        "isize" => parse_terminal!(lit, isize),
        "u8" => parse_terminal!(lit, u8),
        "u16" => parse_terminal!(lit, u16),
        "u32" => parse_terminal!(lit, u32),
        "u64" => parse_terminal!(lit, u64),
        "u128" => parse_terminal!(lit, u128),
        "usize" => parse_terminal!(lit, usize),
        // `1f32` lexes as an integer literal
        "f32" => parse_terminal!(lit, f32),
        "f64" => parse_terminal!(lit, f64),
        other => Err(FrontendError::Unsupported {
            kind: format!("integer with suffix `{}`", other),
            span: Some(lit.span()),
        }),
    }
}

macro_rules! parse_negative {
    ($digits:expr, $ty:ty) => {
        $digits.parse::<$ty>().ok().map(|value| boxed(Terminal::new(value)))
    };
}

/// Parse `-<lit>` as one signed value, for magnitudes like `128i8` that
/// only fit once negated. Unsigned and float suffixes never fold.
fn lower_negative_int(lit: &syn::LitInt) -> Option<BoxedExpr> {
    let digits = format!("-{}", lit.base10_digits());
    match lit.suffix() {
        "i8" => parse_negative!(digits, i8),
        "i16" => parse_negative!(digits, i16),
        "i32" => parse_negative!(digits, i32),
        "i64" | "" => parse_negative!(digits, i64),
        "i128" => parse_negative!(digits, i128),
        "isize" => parse_negative!(digits, isize),
        _ => None,
    }
}

/// Float literals take their suffix type, or `f64` without one.
fn lower_float(lit: &syn::LitFloat) -> Result<BoxedExpr> {
    match lit.suffix() {
        "f32" => parse_terminal!(lit, f32),
        "f64" | "" => parse_terminal!(lit, f64),
        other => Err(FrontendError::Unsupported {
            kind: format!("float with suffix `{}`", other),
            span: Some(lit.span()),
        }),
    }
}

fn invalid_literal(
    literal: String,
    error: syn::Error,
    span: proc_macro2::Span,
) -> FrontendError {
    FrontendError::InvalidLiteral {
        literal,
        message: error.to_string(),
        span: Some(span),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Diagnostics
// ═══════════════════════════════════════════════════════════════════════

fn unsupported(kind: &str, expr: &syn::Expr) -> FrontendError {
    FrontendError::Unsupported {
        kind: kind.to_string(),
        span: Some(expr_span(expr)),
    }
}

fn expr_span(expr: &syn::Expr) -> proc_macro2::Span {
    expr.span()
}

/// Name of an expression construct, for traces and `Unsupported` errors.
fn expr_kind_name(expr: &syn::Expr) -> &'static str {
    match expr {
        // Lowered
        syn::Expr::Lit(_) => "literal",
        syn::Expr::Path(_) => "path",
        syn::Expr::Unary(_) => "unary operation",
        syn::Expr::Reference(_) => "reference",
        syn::Expr::Binary(_) => "binary operation",
        syn::Expr::Assign(_) => "assignment",
        syn::Expr::Index(_) => "index",
        syn::Expr::Call(_) => "function call",
        syn::Expr::MethodCall(_) => "method call",
        syn::Expr::Tuple(_) => "tuple",
        syn::Expr::Paren(_) | syn::Expr::Group(_) => "parenthesized",

        // Rejected
        syn::Expr::Array(_) | syn::Expr::Repeat(_) => "array",
        syn::Expr::Block(_) | syn::Expr::Unsafe(_) => "block",
        syn::Expr::Cast(_) => "cast",
        syn::Expr::Closure(_) => "closure",
        syn::Expr::Field(_) => "field access",
        syn::Expr::If(_) | syn::Expr::Match(_) => "conditional",
        syn::Expr::Loop(_) | syn::Expr::While(_) | syn::Expr::ForLoop(_) => "loop",
        syn::Expr::Macro(_) => "macro invocation",
        syn::Expr::Range(_) => "range",
        syn::Expr::Struct(_) => "struct literal",
        syn::Expr::Try(_) => "try",
        _ => "expression",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(src: &str) -> ExprKind {
        parse_expr(src).unwrap().kind()
    }

    #[test]
    fn test_placeholder_index() {
        let path: syn::Path = syn::parse_quote!(_12);
        assert_eq!(placeholder_index(&path), Some(12));

        let path: syn::Path = syn::parse_quote!(_x);
        assert_eq!(placeholder_index(&path), None);

        let path: syn::Path = syn::parse_quote!(a::_1);
        assert_eq!(placeholder_index(&path), None);
    }

    #[test]
    fn test_path_to_string() {
        let path: syn::Path = syn::parse_quote!(std::f64::consts::PI);
        assert_eq!(path_to_string(&path), "std::f64::consts::PI");

        let path: syn::Path = syn::parse_quote!(::core::mem);
        assert_eq!(path_to_string(&path), "::core::mem");
    }

    #[test]
    fn test_binary_kinds() {
        assert_eq!(kind_of("a + b"), ExprKind::Plus);
        assert_eq!(kind_of("a << b"), ExprKind::ShiftLeft);
        assert_eq!(kind_of("a && b"), ExprKind::LogicalAnd);
        assert_eq!(kind_of("a != b"), ExprKind::NotEqualTo);
        assert_eq!(kind_of("a ^= b"), ExprKind::BitwiseXorAssign);
        assert_eq!(kind_of("a >>= b"), ExprKind::ShiftRightAssign);
    }

    #[test]
    fn test_unary_kinds() {
        assert_eq!(kind_of("-a"), ExprKind::Negate);
        assert_eq!(kind_of("!a"), ExprKind::LogicalNot);
        assert_eq!(kind_of("*a"), ExprKind::Dereference);
        assert_eq!(kind_of("&a"), ExprKind::AddressOf);
        assert_eq!(kind_of("&mut a"), ExprKind::AddressOf);
    }

    #[test]
    fn test_other_kinds() {
        assert_eq!(kind_of("a = b"), ExprKind::Assign);
        assert_eq!(kind_of("a[0]"), ExprKind::Subscript);
        assert_eq!(kind_of("f()"), ExprKind::Call);
        assert_eq!(kind_of("a.len()"), ExprKind::Call);
        assert_eq!(kind_of("(a, b)"), ExprKind::Comma);
        assert_eq!(kind_of("((a))"), ExprKind::Terminal);
        assert_eq!(kind_of("_3"), ExprKind::Placeholder);
    }

    #[test]
    fn test_unsupported_expression() {
        let err = parse_expr("if a { b } else { c }").unwrap_err();
        assert!(matches!(err, FrontendError::Unsupported { ref kind, .. } if kind == "conditional"));
        assert!(err.span().is_some());
    }

    #[test]
    fn test_unsupported_suffix() {
        let err = parse_expr("1u7").unwrap_err();
        assert!(matches!(err, FrontendError::Unsupported { .. }));
    }

    #[test]
    fn test_literal_out_of_range() {
        let err = parse_expr("300u8").unwrap_err();
        assert!(matches!(
            err,
            FrontendError::InvalidLiteral { ref literal, .. } if literal == "300u8"
        ));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_expr("a +").unwrap_err();
        assert!(matches!(err, FrontendError::Parse(_)));
        assert!(err.to_string().starts_with("Parse error: "));
    }
}
