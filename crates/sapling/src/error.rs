//! Error types for building trees from source text
//!
//! Printing itself cannot fail except through its output sink, whose errors
//! are returned unchanged.

use thiserror::Error;

/// Errors raised while lowering Rust expression syntax into a tree.
#[derive(Error, Debug)]
pub enum FrontendError {
    /// The source text is not a Rust expression
    #[error("Parse error: {0}")]
    Parse(#[from] syn::Error),

    /// The expression uses syntax with no tree counterpart
    #[error("Unsupported expression: {kind}")]
    Unsupported {
        /// Description of the construct
        kind: String,
        /// Location in the source
        span: Option<proc_macro2::Span>,
    },

    /// A literal does not fit its type
    #[error("Invalid literal `{literal}`: {message}")]
    InvalidLiteral {
        /// The literal's source text
        literal: String,
        /// Why it was rejected
        message: String,
        /// Location in the source
        span: Option<proc_macro2::Span>,
    },
}

impl FrontendError {
    /// Source location of the error, if known.
    pub fn span(&self) -> Option<proc_macro2::Span> {
        match self {
            FrontendError::Parse(e) => Some(e.span()),
            FrontendError::Unsupported { span, .. }
            | FrontendError::InvalidLiteral { span, .. } => *span,
        }
    }
}

/// Result type alias for frontend operations
pub type Result<T> = std::result::Result<T, FrontendError>;
