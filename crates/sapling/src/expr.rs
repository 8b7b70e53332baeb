//! Expression tree nodes
//!
//! Trees are built from three node types: [`Terminal`] leaves holding a typed
//! value, [`Placeholder`] leaves holding an index, and [`Expr`] operator nodes
//! holding a fixed list of children. Children of an operator may each have a
//! different static type (a tuple), or share one (a `Vec` or array, usually of
//! [`BoxedExpr`]).

use std::fmt;

use crate::kind::ExprKind;
use crate::printer::Printed;
use crate::types::{TypeDesc, TypeNames};
use crate::value::{display_value, unprintable_value, ValueRenderer};

/// A type-erased, owned expression.
pub type BoxedExpr = Box<dyn Expression>;

/// Borrowed view of a single node, as seen by the printer.
pub enum Node<'a> {
    /// A leaf with a value and a static type
    Terminal(&'a dyn Leaf),
    /// A leaf with a positional index, widened to `i128`
    Placeholder(i128),
    /// An operator with its children in order
    Operator {
        /// The operator tag
        kind: ExprKind,
        /// The children, left to right
        children: &'a dyn Children,
    },
}

/// Any node of an expression tree.
pub trait Expression {
    /// Borrow this node's printable view.
    fn node(&self) -> Node<'_>;

    /// The node's tag.
    fn kind(&self) -> ExprKind {
        match self.node() {
            Node::Terminal(_) => ExprKind::Terminal,
            Node::Placeholder(_) => ExprKind::Placeholder,
            Node::Operator { kind, .. } => kind,
        }
    }
}

impl<E: Expression + ?Sized> Expression for Box<E> {
    fn node(&self) -> Node<'_> {
        (**self).node()
    }
}

impl<E: Expression + ?Sized> Expression for &E {
    fn node(&self) -> Node<'_> {
        (**self).node()
    }
}

/// The value-carrying side of a terminal.
pub trait Leaf {
    /// The terminal's static type.
    fn type_desc(&self) -> &TypeDesc;

    /// Write the stored value (or the sentinel).
    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Write the static type in the given naming style.
    fn fmt_type(&self, f: &mut fmt::Formatter<'_>, names: TypeNames) -> fmt::Result {
        self.type_desc().write(f, names)
    }
}

/// An ordered list of child expressions.
pub trait Children {
    /// Number of children.
    fn len(&self) -> usize;

    /// Check if there are no children.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit each child in order, stopping at the first error.
    fn try_for_each(
        &self,
        f: &mut dyn FnMut(&dyn Expression) -> fmt::Result,
    ) -> fmt::Result;
}

macro_rules! impl_children_for_tuple {
    ($len:expr; $($name:ident),*) => {
        impl<$($name: Expression),*> Children for ($($name,)*) {
            fn len(&self) -> usize {
                $len
            }

            #[allow(non_snake_case, unused_variables)]
            fn try_for_each(
                &self,
                f: &mut dyn FnMut(&dyn Expression) -> fmt::Result,
            ) -> fmt::Result {
                let ($($name,)*) = self;
                $( f($name)?; )*
                Ok(())
            }
        }
    };
}

impl_children_for_tuple!(0;);
impl_children_for_tuple!(1; A);
impl_children_for_tuple!(2; A, B);
impl_children_for_tuple!(3; A, B, C);
impl_children_for_tuple!(4; A, B, C, D);
impl_children_for_tuple!(5; A, B, C, D, E);
impl_children_for_tuple!(6; A, B, C, D, E, F);
impl_children_for_tuple!(7; A, B, C, D, E, F, G);
impl_children_for_tuple!(8; A, B, C, D, E, F, G, H);

impl<E: Expression> Children for Vec<E> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn try_for_each(
        &self,
        f: &mut dyn FnMut(&dyn Expression) -> fmt::Result,
    ) -> fmt::Result {
        self.iter().try_for_each(|child| f(child))
    }
}

impl<E: Expression, const N: usize> Children for [E; N] {
    fn len(&self) -> usize {
        N
    }

    fn try_for_each(
        &self,
        f: &mut dyn FnMut(&dyn Expression) -> fmt::Result,
    ) -> fmt::Result {
        self.iter().try_for_each(|child| f(child))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Terminal
// ═══════════════════════════════════════════════════════════════════════

/// A leaf holding one value of static type `T`.
pub struct Terminal<T> {
    value: T,
    render: ValueRenderer<T>,
    ty: TypeDesc,
}

impl<T: fmt::Display> Terminal<T> {
    /// Wrap a value that renders through its `Display` impl.
    pub fn new(value: T) -> Self {
        Self::with_renderer(value, display_value::<T>)
    }
}

impl<T> Terminal<T> {
    /// Wrap a value that has no textual rendering.
    pub fn opaque(value: T) -> Self {
        Self::with_renderer(value, unprintable_value::<T>)
    }

    /// Wrap a value with an explicit renderer.
    ///
    /// Usually reached through [`term!`](crate::term), which picks the
    /// renderer from the value's type.
    pub fn with_renderer(value: T, render: ValueRenderer<T>) -> Self {
        Self {
            value,
            render,
            ty: TypeDesc::of::<T>(),
        }
    }

    /// Override the static type description.
    pub fn with_type(mut self, ty: TypeDesc) -> Self {
        self.ty = ty;
        self
    }

    /// The stored value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Unwrap the stored value.
    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T> Leaf for Terminal<T> {
    fn type_desc(&self) -> &TypeDesc {
        &self.ty
    }

    fn fmt_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.render)(&self.value, f)
    }
}

impl<T> Expression for Terminal<T> {
    fn node(&self) -> Node<'_> {
        Node::Terminal(self)
    }
}

impl<T> fmt::Debug for Terminal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Terminal")
            .field("type", &self.ty.to_string())
            .field("value", &format_args!("{}", LeafValue(self)))
            .finish()
    }
}

/// Writes a leaf's value with fresh formatting flags.
pub(crate) struct LeafValue<'a>(pub(crate) &'a dyn Leaf);

impl fmt::Display for LeafValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_value(f)
    }
}

/// Build a [`Terminal`], rendering its value through `Display` when the
/// value's type has it and as the unprintable sentinel otherwise.
///
/// ```
/// use sapling::term;
///
/// struct Opaque;
///
/// assert_eq!(term!(5i32).to_string(), "term<i32>[=5]\n");
/// assert!(term!(Opaque).to_string().ends_with("[=<<unprintable-value>>]\n"));
/// ```
#[macro_export]
macro_rules! term {
    ($value:expr) => {{
        let value = $value;
        let render = $crate::value_renderer!(value);
        $crate::expr::Terminal::with_renderer(value, render)
    }};
}

// ═══════════════════════════════════════════════════════════════════════
// Placeholder
// ═══════════════════════════════════════════════════════════════════════

/// Integer types usable as placeholder indices.
pub trait PlaceholderIndex: Copy {
    /// Widen to the widest signed integral type.
    ///
    /// This is an `as i128` cast: `u128` values above `i128::MAX` wrap
    /// around to negative indices (`u128::MAX` becomes `-1`).
    fn widen(self) -> i128;
}

macro_rules! impl_placeholder_index {
    ($($ty:ty),*) => {
        $(
            impl PlaceholderIndex for $ty {
                fn widen(self) -> i128 {
                    self as i128
                }
            }
        )*
    };
}

impl_placeholder_index!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// A leaf holding a positional index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placeholder<I = usize> {
    index: I,
}

impl<I: PlaceholderIndex> Placeholder<I> {
    /// Create a placeholder for the given index.
    pub fn new(index: I) -> Self {
        Self { index }
    }

    /// The stored index.
    pub fn index(&self) -> I {
        self.index
    }
}

impl<I: PlaceholderIndex> Expression for Placeholder<I> {
    fn node(&self) -> Node<'_> {
        Node::Placeholder(self.index.widen())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Operator nodes
// ═══════════════════════════════════════════════════════════════════════

/// An operator node with children `C`.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr<C> {
    kind: ExprKind,
    children: C,
}

impl<C: Children> Expr<C> {
    /// Create an operator node.
    ///
    /// The children are taken as given; arity is not checked in release
    /// builds.
    pub fn new(kind: ExprKind, children: C) -> Self {
        debug_assert!(
            kind.arity().map_or(true, |arity| arity.accepts(children.len())),
            "{} node built with {} children",
            kind,
            children.len()
        );
        Self { kind, children }
    }

    /// The children.
    pub fn children(&self) -> &C {
        &self.children
    }
}

impl<A: Expression> Expr<(A,)> {
    /// Create a unary operator node.
    pub fn unary(kind: ExprKind, operand: A) -> Self {
        Self::new(kind, (operand,))
    }
}

impl<L: Expression, R: Expression> Expr<(L, R)> {
    /// Create a binary operator node.
    pub fn binary(kind: ExprKind, left: L, right: R) -> Self {
        Self::new(kind, (left, right))
    }
}

impl Expr<Vec<BoxedExpr>> {
    /// Create a call node: the callee is the first child, followed by the
    /// arguments.
    pub fn call(callee: BoxedExpr, args: impl IntoIterator<Item = BoxedExpr>) -> Self {
        let mut children = vec![callee];
        children.extend(args);
        Self::new(ExprKind::Call, children)
    }
}

impl<C: Children> Expression for Expr<C> {
    fn node(&self) -> Node<'_> {
        Node::Operator {
            kind: self.kind,
            children: &self.children,
        }
    }

    fn kind(&self) -> ExprKind {
        self.kind
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Display integration
// ═══════════════════════════════════════════════════════════════════════

impl<T> fmt::Display for Terminal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Printed::new(self), f)
    }
}

impl<I: PlaceholderIndex> fmt::Display for Placeholder<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Printed::new(self), f)
    }
}

impl<C: Children> fmt::Display for Expr<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Printed::new(self), f)
    }
}

impl fmt::Debug for dyn Expression + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expression({})", self.kind())
    }
}
