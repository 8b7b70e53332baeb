//! # Sapling
//!
//! A diagnostic pretty-printer for expression trees.
//!
//! Sapling renders a tree of operator, terminal and placeholder nodes as an
//! indented block of text, one line per node, showing each operator's symbol,
//! each terminal's static type and value, and each placeholder's index.
//!
//! ```
//! use sapling::{print, Expr, ExprKind, Terminal};
//!
//! let tree = Expr::binary(ExprKind::Plus, Terminal::new(3i32), Terminal::new(4i32));
//! assert_eq!(print(&tree), "expr<+>\n    term<i32>[=3]\n    term<i32>[=4]\n");
//! ```
//!
//! ## Architecture
//!
//! - **Symbol table** ([`kind`]): operator tags and their display symbols
//! - **Value renderer** ([`value`]): `Display` when available, a sentinel otherwise
//! - **Type renderer** ([`types`]): type names with qualifier annotations
//! - **Printer** ([`printer`]): the recursive tree walk
//! - **Frontend** ([`frontend`]): builds trees from Rust expression syntax
//!
//! Printing never fails on its own; only the output sink can.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod expr;
pub mod frontend;
pub mod kind;
pub mod printer;
pub mod types;
pub mod value;

// Re-export main types
pub use error::{FrontendError, Result};
pub use expr::{
    BoxedExpr, Children, Expr, Expression, Leaf, Node, Placeholder, PlaceholderIndex, Terminal,
};
pub use kind::{symbol_for, Arity, ExprKind, UNKNOWN_OPERATOR};
pub use printer::{
    print, print_at, print_with, write_tree, write_tree_io, PrintOptions, Printed,
    DEFAULT_INDENT,
};
pub use types::{render_type, Qualifiers, Reference, TypeDesc, TypeNames};
pub use value::UNPRINTABLE_VALUE;

/// Sapling version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
