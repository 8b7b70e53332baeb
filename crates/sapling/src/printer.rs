//! Indented tree printing
//!
//! Every node takes exactly one line, prefixed by one indent unit per level of
//! nesting:
//!
//! ```text
//! expr<+>
//!     term<i32>[=3]
//!     placeholder<1>
//! ```

use std::borrow::Cow;
use std::fmt;
use std::io;

use crate::expr::{Expression, Leaf, LeafValue, Node};
use crate::kind::symbol_for;
use crate::types::TypeNames;

/// Indent unit used when none is configured.
pub const DEFAULT_INDENT: &str = "    ";

/// Line emitted in place of a subtree cut off by [`PrintOptions::max_depth`].
pub const ELIDED: &str = "...";

static DEFAULT_OPTIONS: PrintOptions = PrintOptions {
    indent_unit: Cow::Borrowed(DEFAULT_INDENT),
    type_names: TypeNames::Qualified,
    max_depth: None,
};

/// Configuration for printing a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    /// String repeated once per nesting level
    pub indent_unit: Cow<'static, str>,

    /// How terminal types are spelled
    pub type_names: TypeNames,

    /// Deepest level printed; deeper nodes collapse to an elision line
    pub max_depth: Option<usize>,
}

impl Default for PrintOptions {
    fn default() -> Self {
        DEFAULT_OPTIONS.clone()
    }
}

impl PrintOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom indent unit.
    pub fn with_indent(mut self, indent_unit: impl Into<Cow<'static, str>>) -> Self {
        self.indent_unit = indent_unit.into();
        self
    }

    /// Choose how terminal types are spelled.
    pub fn with_type_names(mut self, type_names: TypeNames) -> Self {
        self.type_names = type_names;
        self
    }

    /// Stop descending below `max_depth`.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// A tree ready to be formatted.
///
/// The `Display` impl walks the tree on every call, so formatting the same
/// `Printed` twice yields the same text.
pub struct Printed<'a> {
    node: &'a dyn Expression,
    options: &'a PrintOptions,
    depth: usize,
}

impl<'a> Printed<'a> {
    /// Print with default options.
    pub fn new(node: &'a dyn Expression) -> Self {
        Self::with_options(node, &DEFAULT_OPTIONS)
    }

    /// Print with the given options.
    pub fn with_options(node: &'a dyn Expression, options: &'a PrintOptions) -> Self {
        Self {
            node,
            options,
            depth: 0,
        }
    }

    /// Start at the given nesting depth instead of zero.
    pub fn at_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}

impl fmt::Display for Printed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        print_node(f, self.node, self.depth, self.options)
    }
}

impl fmt::Debug for Printed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Printed")
            .field("kind", &self.node.kind())
            .field("depth", &self.depth)
            .field("options", self.options)
            .finish()
    }
}

/// Writes a leaf's type with fresh formatting flags.
struct TypeOf<'a>(&'a dyn Leaf, TypeNames);

impl fmt::Display for TypeOf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_type(f, self.1)
    }
}

fn print_node(
    f: &mut fmt::Formatter<'_>,
    node: &dyn Expression,
    depth: usize,
    options: &PrintOptions,
) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(&options.indent_unit)?;
    }

    if let Some(max_depth) = options.max_depth {
        if depth > max_depth {
            log::debug!(
                "eliding {} subtree below depth limit {}",
                node.kind(),
                max_depth
            );
            return writeln!(f, "{}", ELIDED);
        }
    }

    match node.node() {
        Node::Terminal(leaf) => writeln!(
            f,
            "term<{}>[={}]",
            TypeOf(leaf, options.type_names),
            LeafValue(leaf)
        ),
        Node::Placeholder(index) => writeln!(f, "placeholder<{}>", index),
        Node::Operator { kind, children } => {
            writeln!(f, "expr<{}>", symbol_for(kind))?;
            children.try_for_each(&mut |child| print_node(f, child, depth + 1, options))
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Entry points
// ═══════════════════════════════════════════════════════════════════════

/// Render a tree with four-space indentation.
pub fn print(node: &dyn Expression) -> String {
    Printed::new(node).to_string()
}

/// Render a tree starting at `depth`, indenting with `indent_unit`.
pub fn print_at(node: &dyn Expression, depth: usize, indent_unit: &str) -> String {
    let options = PrintOptions::new().with_indent(indent_unit.to_string());
    Printed::with_options(node, &options)
        .at_depth(depth)
        .to_string()
}

/// Render a tree with the given options.
pub fn print_with(node: &dyn Expression, options: &PrintOptions) -> String {
    Printed::with_options(node, options).to_string()
}

/// Write a tree into a text sink.
pub fn write_tree<W: fmt::Write + ?Sized>(
    out: &mut W,
    node: &dyn Expression,
    options: &PrintOptions,
) -> fmt::Result {
    write!(out, "{}", Printed::with_options(node, options))
}

/// Write a tree into a byte sink.
///
/// Errors from the sink are returned as-is.
pub fn write_tree_io<W: io::Write + ?Sized>(
    out: &mut W,
    node: &dyn Expression,
    options: &PrintOptions,
) -> io::Result<()> {
    write!(out, "{}", Printed::with_options(node, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Expr, Placeholder, Terminal};
    use crate::kind::ExprKind;

    #[test]
    fn test_terminal_line() {
        assert_eq!(print(&Terminal::new(5i32)), "term<i32>[=5]\n");
    }

    #[test]
    fn test_placeholder_line() {
        assert_eq!(print(&Placeholder::new(2usize)), "placeholder<2>\n");
        assert_eq!(print(&Placeholder::new(-7i64)), "placeholder<-7>\n");
    }

    #[test]
    fn test_operator_children_indented() {
        let tree = Expr::binary(ExprKind::Plus, Terminal::new(3i32), Terminal::new(4i32));
        assert_eq!(
            print(&tree),
            "expr<+>\n    term<i32>[=3]\n    term<i32>[=4]\n"
        );
    }

    #[test]
    fn test_print_at_prefixes_root() {
        let tree = Expr::unary(ExprKind::Negate, Placeholder::new(1usize));
        assert_eq!(print_at(&tree, 2, "-"), "--expr<->\n---placeholder<1>\n");
        assert_eq!(print_at(&tree, 0, ""), "expr<->\nplaceholder<1>\n");
    }

    #[test]
    fn test_unknown_kind_header() {
        let tree = Expr::new(ExprKind::Unknown(99), (Terminal::new(1i32),));
        assert_eq!(
            print(&tree),
            "expr<** ERROR: UNKNOWN OPERATOR! **>\n    term<i32>[=1]\n"
        );
    }

    #[test]
    fn test_max_depth_elides_deeper_nodes() {
        let tree = Expr::unary(
            ExprKind::Negate,
            Expr::unary(ExprKind::Negate, Terminal::new(1i32)),
        );
        let options = PrintOptions::new().with_max_depth(1);
        assert_eq!(
            print_with(&tree, &options),
            "expr<->\n    expr<->\n        ...\n"
        );

        let options = PrintOptions::new().with_max_depth(0);
        assert_eq!(print_with(&tree, &options), "expr<->\n    ...\n");
    }

    #[test]
    fn test_short_type_names() {
        let options = PrintOptions::new().with_type_names(TypeNames::Short);
        let leaf = Terminal::new(String::from("hi"));
        assert_eq!(print_with(&leaf, &options), "term<String>[=hi]\n");
        assert_eq!(print(&leaf), "term<alloc::string::String>[=hi]\n");
    }

    #[test]
    fn test_outer_format_flags_do_not_leak_into_values() {
        let leaf = Terminal::new(7i32);
        assert_eq!(format!("{:>20}", Printed::new(&leaf)), "term<i32>[=7]\n");
    }

    #[test]
    fn test_write_tree_appends() {
        let mut out = String::from("before\n");
        write_tree(&mut out, &Terminal::new(true), &PrintOptions::default()).unwrap();
        assert_eq!(out, "before\nterm<bool>[=true]\n");
    }

    #[test]
    fn test_write_tree_io() {
        let mut out = Vec::new();
        write_tree_io(&mut out, &Placeholder::new(3u8), &PrintOptions::default()).unwrap();
        assert_eq!(out, b"placeholder<3>\n");
    }

    #[test]
    fn test_default_options() {
        let options = PrintOptions::default();
        assert_eq!(options.indent_unit, DEFAULT_INDENT);
        assert_eq!(options.type_names, TypeNames::Qualified);
        assert_eq!(options.max_depth, None);
        assert_eq!(options, PrintOptions::new());
    }
}
