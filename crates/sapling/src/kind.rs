//! Expression kinds and the operator symbol table

use std::fmt;

/// Marker printed in place of an operator symbol for any tag outside the
/// closed operator set.
pub const UNKNOWN_OPERATOR: &str = "** ERROR: UNKNOWN OPERATOR! **";

/// The tag carried by every expression node.
///
/// `Terminal` and `Placeholder` are leaves; every other named variant is an
/// operator with its own symbol and arity. Tags decoded from a raw code that
/// falls outside the known set land in [`ExprKind::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprKind {
    // ═══════════════════════════════════════════════════════════════════
    // Leaves
    // ═══════════════════════════════════════════════════════════════════
    /// A leaf holding a single typed value
    Terminal,
    /// A leaf holding a positional index
    Placeholder,

    // ═══════════════════════════════════════════════════════════════════
    // Unary
    // ═══════════════════════════════════════════════════════════════════
    /// `+x`
    UnaryPlus,
    /// `-x`
    Negate,
    /// `*x`
    Dereference,
    /// `~x`
    Complement,
    /// `&x`
    AddressOf,
    /// `!x`
    LogicalNot,
    /// `++x`
    PreInc,
    /// `--x`
    PreDec,
    /// `x++`
    PostInc,
    /// `x--`
    PostDec,

    // ═══════════════════════════════════════════════════════════════════
    // Binary
    // ═══════════════════════════════════════════════════════════════════
    /// `a << b`
    ShiftLeft,
    /// `a >> b`
    ShiftRight,
    /// `a * b`
    Multiplies,
    /// `a / b`
    Divides,
    /// `a % b`
    Modulus,
    /// `a + b`
    Plus,
    /// `a - b`
    Minus,
    /// `a < b`
    Less,
    /// `a > b`
    Greater,
    /// `a <= b`
    LessEqual,
    /// `a >= b`
    GreaterEqual,
    /// `a == b`
    EqualTo,
    /// `a != b`
    NotEqualTo,
    /// `a || b`
    LogicalOr,
    /// `a && b`
    LogicalAnd,
    /// `a & b`
    BitwiseAnd,
    /// `a | b`
    BitwiseOr,
    /// `a ^ b`
    BitwiseXor,
    /// `a, b`
    Comma,
    /// `a->*b`
    MemPtr,

    // ═══════════════════════════════════════════════════════════════════
    // Assignment
    // ═══════════════════════════════════════════════════════════════════
    /// `a = b`
    Assign,
    /// `a <<= b`
    ShiftLeftAssign,
    /// `a >>= b`
    ShiftRightAssign,
    /// `a *= b`
    MultipliesAssign,
    /// `a /= b`
    DividesAssign,
    /// `a %= b`
    ModulusAssign,
    /// `a += b`
    PlusAssign,
    /// `a -= b`
    MinusAssign,
    /// `a &= b`
    BitwiseAndAssign,
    /// `a |= b`
    BitwiseOrAssign,
    /// `a ^= b`
    BitwiseXorAssign,

    // ═══════════════════════════════════════════════════════════════════
    // Subscript and call
    // ═══════════════════════════════════════════════════════════════════
    /// `a[b]`
    Subscript,
    /// `f(args...)`
    Call,

    /// A raw tag code with no known meaning.
    ///
    /// Only codes from [`ExprKind::FIRST_UNKNOWN_CODE`] upward are meaningful
    /// here. `Unknown(n)` for a smaller `n` still prints as unknown, but its
    /// [`code`](ExprKind::code) decodes back to the known kind `n`.
    Unknown(u8),
}

/// Number of children an operator kind carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many children
    Fixed(usize),
    /// Any number of children (callee plus arguments)
    Variadic,
}

impl Arity {
    /// Check whether `count` children satisfy this arity.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Fixed(n) => n == count,
            Arity::Variadic => count >= 1,
        }
    }
}

/// Every known kind, in code order.
const KINDS: [ExprKind; 44] = [
    ExprKind::Terminal,
    ExprKind::Placeholder,
    ExprKind::UnaryPlus,
    ExprKind::Negate,
    ExprKind::Dereference,
    ExprKind::Complement,
    ExprKind::AddressOf,
    ExprKind::LogicalNot,
    ExprKind::PreInc,
    ExprKind::PreDec,
    ExprKind::PostInc,
    ExprKind::PostDec,
    ExprKind::ShiftLeft,
    ExprKind::ShiftRight,
    ExprKind::Multiplies,
    ExprKind::Divides,
    ExprKind::Modulus,
    ExprKind::Plus,
    ExprKind::Minus,
    ExprKind::Less,
    ExprKind::Greater,
    ExprKind::LessEqual,
    ExprKind::GreaterEqual,
    ExprKind::EqualTo,
    ExprKind::NotEqualTo,
    ExprKind::LogicalOr,
    ExprKind::LogicalAnd,
    ExprKind::BitwiseAnd,
    ExprKind::BitwiseOr,
    ExprKind::BitwiseXor,
    ExprKind::Comma,
    ExprKind::MemPtr,
    ExprKind::Assign,
    ExprKind::ShiftLeftAssign,
    ExprKind::ShiftRightAssign,
    ExprKind::MultipliesAssign,
    ExprKind::DividesAssign,
    ExprKind::ModulusAssign,
    ExprKind::PlusAssign,
    ExprKind::MinusAssign,
    ExprKind::BitwiseAndAssign,
    ExprKind::BitwiseOrAssign,
    ExprKind::BitwiseXorAssign,
    ExprKind::Subscript,
];

impl ExprKind {
    /// Lowest code that [`ExprKind::from_code`] decodes to `Unknown`.
    pub const FIRST_UNKNOWN_CODE: u8 = KINDS.len() as u8 + 1;

    /// Every known kind (leaves first, `Call` last).
    pub fn all() -> impl Iterator<Item = ExprKind> {
        KINDS.into_iter().chain(std::iter::once(ExprKind::Call))
    }

    /// Decode a raw tag code.
    ///
    /// Codes past the end of the known set decode to [`ExprKind::Unknown`].
    pub fn from_code(code: u8) -> Self {
        match KINDS.get(code as usize) {
            Some(kind) => *kind,
            None if code as usize == KINDS.len() => ExprKind::Call,
            None => ExprKind::Unknown(code),
        }
    }

    /// The raw tag code for this kind.
    ///
    /// `from_code(kind.code()) == kind` for every known kind and for
    /// `Unknown(n)` with `n >= FIRST_UNKNOWN_CODE`.
    pub fn code(self) -> u8 {
        match self {
            ExprKind::Call => KINDS.len() as u8,
            ExprKind::Unknown(code) => code,
            known => KINDS
                .iter()
                .position(|k| *k == known)
                .map_or(u8::MAX, |i| i as u8),
        }
    }

    /// Check if this kind is an operator (neither a leaf nor unknown).
    pub fn is_operator(self) -> bool {
        !matches!(
            self,
            ExprKind::Terminal | ExprKind::Placeholder | ExprKind::Unknown(_)
        )
    }

    /// How many children a node of this kind carries.
    ///
    /// Returns `None` for leaves and unknown tags.
    pub fn arity(self) -> Option<Arity> {
        use ExprKind::*;
        match self {
            Terminal | Placeholder | Unknown(_) => None,
            UnaryPlus | Negate | Dereference | Complement | AddressOf | LogicalNot | PreInc
            | PreDec | PostInc | PostDec => Some(Arity::Fixed(1)),
            Call => Some(Arity::Variadic),
            _ => Some(Arity::Fixed(2)),
        }
    }

    /// The snake_case tag name, e.g. `"shift_left_assign"`.
    pub fn name(self) -> &'static str {
        use ExprKind::*;
        match self {
            Terminal => "terminal",
            Placeholder => "placeholder",
            UnaryPlus => "unary_plus",
            Negate => "negate",
            Dereference => "dereference",
            Complement => "complement",
            AddressOf => "address_of",
            LogicalNot => "logical_not",
            PreInc => "pre_inc",
            PreDec => "pre_dec",
            PostInc => "post_inc",
            PostDec => "post_dec",
            ShiftLeft => "shift_left",
            ShiftRight => "shift_right",
            Multiplies => "multiplies",
            Divides => "divides",
            Modulus => "modulus",
            Plus => "plus",
            Minus => "minus",
            Less => "less",
            Greater => "greater",
            LessEqual => "less_equal",
            GreaterEqual => "greater_equal",
            EqualTo => "equal_to",
            NotEqualTo => "not_equal_to",
            LogicalOr => "logical_or",
            LogicalAnd => "logical_and",
            BitwiseAnd => "bitwise_and",
            BitwiseOr => "bitwise_or",
            BitwiseXor => "bitwise_xor",
            Comma => "comma",
            MemPtr => "mem_ptr",
            Assign => "assign",
            ShiftLeftAssign => "shift_left_assign",
            ShiftRightAssign => "shift_right_assign",
            MultipliesAssign => "multiplies_assign",
            DividesAssign => "divides_assign",
            ModulusAssign => "modulus_assign",
            PlusAssign => "plus_assign",
            MinusAssign => "minus_assign",
            BitwiseAndAssign => "bitwise_and_assign",
            BitwiseOrAssign => "bitwise_or_assign",
            BitwiseXorAssign => "bitwise_xor_assign",
            Subscript => "subscript",
            Call => "call",
            Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprKind::Unknown(code) => write!(f, "unknown({})", code),
            other => f.write_str(other.name()),
        }
    }
}

/// Look up the display symbol for an operator kind.
///
/// Total over every [`ExprKind`]: leaves and unknown tags get
/// [`UNKNOWN_OPERATOR`] instead of a symbol.
pub fn symbol_for(kind: ExprKind) -> &'static str {
    use ExprKind::*;
    match kind {
        UnaryPlus => "+",
        Negate => "-",
        Dereference => "*",
        Complement => "~",
        AddressOf => "&",
        LogicalNot => "!",
        PreInc => "++",
        PreDec => "--",
        PostInc => "++(int)",
        PostDec => "--(int)",

        ShiftLeft => "<<",
        ShiftRight => ">>",
        Multiplies => "*",
        Divides => "/",
        Modulus => "%",
        Plus => "+",
        Minus => "-",
        Less => "<",
        Greater => ">",
        LessEqual => "<=",
        GreaterEqual => ">=",
        EqualTo => "==",
        NotEqualTo => "!=",
        LogicalOr => "||",
        LogicalAnd => "&&",
        BitwiseAnd => "&",
        BitwiseOr => "|",
        BitwiseXor => "^",
        Comma => ",",
        MemPtr => "->*",

        Assign => "=",
        ShiftLeftAssign => "<<=",
        ShiftRightAssign => ">>=",
        MultipliesAssign => "*=",
        DividesAssign => "/=",
        ModulusAssign => "%=",
        PlusAssign => "+=",
        MinusAssign => "-=",
        BitwiseAndAssign => "&=",
        BitwiseOrAssign => "|=",
        BitwiseXorAssign => "^=",

        Subscript => "[]",
        Call => "()",

        // Never asked about by the printer, but the table stays total.
        Terminal | Placeholder | Unknown(_) => UNKNOWN_OPERATOR,
    }
}
