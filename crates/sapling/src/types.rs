//! Static type rendering for terminals

use std::borrow::Cow;
use std::fmt;

/// Reference category of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reference {
    /// Rendered as ` &`
    LValue,
    /// Rendered as ` &&`
    RValue,
}

/// Qualifier annotations appended after a type's name.
///
/// Always rendered in the order ` const`, ` volatile`, then the reference
/// annotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Qualifiers {
    /// Const-qualified
    pub is_const: bool,
    /// Volatile-qualified
    pub is_volatile: bool,
    /// Reference category, if the type is a reference
    pub reference: Option<Reference>,
}

impl Qualifiers {
    /// No qualifiers.
    pub const NONE: Qualifiers = Qualifiers {
        is_const: false,
        is_volatile: false,
        reference: None,
    };

    /// Check if no qualifier applies.
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

impl fmt::Display for Qualifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_const {
            f.write_str(" const")?;
        }
        if self.is_volatile {
            f.write_str(" volatile")?;
        }
        match self.reference {
            Some(Reference::LValue) => f.write_str(" &"),
            Some(Reference::RValue) => f.write_str(" &&"),
            None => Ok(()),
        }
    }
}

/// How type names are spelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeNames {
    /// Full paths as reported by [`std::any::type_name`]
    #[default]
    Qualified,
    /// Module paths stripped from every path segment
    Short,
}

/// A type's base name plus its qualifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDesc {
    /// Base name, without qualifiers
    pub name: Cow<'static, str>,
    /// Qualifiers to append
    pub qualifiers: Qualifiers,
}

impl TypeDesc {
    /// Describe a type by name, with no qualifiers.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            qualifiers: Qualifiers::NONE,
        }
    }

    /// Describe `T` using the compiler's type name.
    ///
    /// An outermost `&U` becomes `U const &` and an outermost `&mut U`
    /// becomes `U &`.
    pub fn of<T: ?Sized>() -> Self {
        let full = std::any::type_name::<T>();
        if let Some(rest) = full.strip_prefix("&mut ") {
            Self::new(rest).with_reference(Reference::LValue)
        } else if let Some(rest) = full.strip_prefix('&') {
            Self::new(rest).with_const().with_reference(Reference::LValue)
        } else {
            Self::new(full)
        }
    }

    /// Mark as const-qualified.
    pub fn with_const(mut self) -> Self {
        self.qualifiers.is_const = true;
        self
    }

    /// Mark as volatile-qualified.
    pub fn with_volatile(mut self) -> Self {
        self.qualifiers.is_volatile = true;
        self
    }

    /// Set the reference category.
    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.qualifiers.reference = Some(reference);
        self
    }

    /// Write the name in the given style, followed by the qualifiers.
    pub fn write(&self, f: &mut impl fmt::Write, names: TypeNames) -> fmt::Result {
        match names {
            TypeNames::Qualified => f.write_str(&self.name)?,
            TypeNames::Short => f.write_str(&short_name(&self.name))?,
        }
        write!(f, "{}", self.qualifiers)
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, TypeNames::Qualified)
    }
}

/// Render `T`'s name and qualifiers.
pub fn render_type<T: ?Sized>() -> String {
    TypeDesc::of::<T>().to_string()
}

/// Strip module paths: `alloc::vec::Vec<alloc::string::String>` becomes
/// `Vec<String>`.
pub fn short_name(name: &str) -> Cow<'_, str> {
    if !name.contains("::") {
        return Cow::Borrowed(name);
    }

    let mut out = String::with_capacity(name.len());
    let mut segment = String::new();
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            if segment.is_empty() {
                // `<T as Trait>::Item` and leading `::` keep their separator
                out.push_str("::");
            }
            segment.clear();
        } else if c.is_alphanumeric() || c == '_' {
            segment.push(c);
        } else {
            out.push_str(&segment);
            segment.clear();
            out.push(c);
        }
    }
    out.push_str(&segment);
    Cow::Owned(out)
}
