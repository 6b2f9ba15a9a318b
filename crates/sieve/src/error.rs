//! Error types for the sieve crate.

use std::borrow::Cow;

use thiserror::Error;

/// Boxed error raised by an external collaborator during evaluation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur when building specifications or filtering with them.
///
/// Variants fall in three groups: construction errors (`MissingOperand`,
/// `InvalidRegex`), caller misuse (`MissingSpecification`) and evaluation
/// errors (everything else). An evaluation error is never the same thing as
/// "not satisfied".
#[derive(Debug, Error)]
pub enum SieveError {
    /// A combinator was assembled without one of its required children.
    #[error("{combinator} is missing its {position} operand")]
    MissingOperand {
        combinator: &'static str,
        position: Cow<'static, str>,
    },

    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// `filter` was called without a specification.
    #[error("no specification given to filter")]
    MissingSpecification,

    /// A leaf could not decide satisfaction because a collaborator failed.
    #[error("cannot evaluate '{criterion}': {source}")]
    Evaluation {
        criterion: Cow<'static, str>,
        #[source]
        source: BoxError,
    },

    /// The attribute a leaf compares against is not available on the item.
    #[error("cannot evaluate '{criterion}': attribute is unavailable")]
    Unavailable { criterion: Cow<'static, str> },

    /// The item's attribute and the comparison value have no ordering.
    #[error("cannot evaluate '{criterion}': values are not comparable")]
    Incomparable { criterion: Cow<'static, str> },

    /// Evaluation failed on the item at `index` of a filter traversal.
    #[error("item {index}: {source}")]
    ItemFailed {
        index: usize,
        #[source]
        source: Box<SieveError>,
    },
}

impl SieveError {
    /// Wraps an external failure raised while evaluating `criterion`.
    pub fn evaluation(criterion: impl Into<Cow<'static, str>>, source: impl Into<BoxError>) -> Self {
        Self::Evaluation {
            criterion: criterion.into(),
            source: source.into(),
        }
    }

    pub(crate) fn missing(combinator: &'static str, position: impl Into<Cow<'static, str>>) -> Self {
        Self::MissingOperand {
            combinator,
            position: position.into(),
        }
    }

    /// Returns `true` if this error happened while evaluating an item,
    /// as opposed to while building a specification or calling `filter`.
    pub fn is_evaluation(&self) -> bool {
        matches!(
            self,
            Self::Evaluation { .. }
                | Self::Unavailable { .. }
                | Self::Incomparable { .. }
                | Self::ItemFailed { .. }
        )
    }

    /// Index of the failing item, when the error came out of a traversal.
    pub fn item_index(&self) -> Option<usize> {
        match self {
            Self::ItemFailed { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Result type for sieve operations.
pub type Result<T> = std::result::Result<T, SieveError>;
