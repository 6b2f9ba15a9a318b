//! Structural specifications: AND, OR, NOT and their N-ary forms.
//!
//! Every combinator is itself a [`Specification`], so trees of any depth can
//! be built. Children are evaluated strictly left to right and evaluation
//! stops as soon as the result is known. An error from a child is returned
//! as-is; a child that was not needed is never evaluated.

use std::fmt;

use crate::error::{Result, SieveError};
use crate::spec::{BoxedSpec, Specification};

/// Satisfied when both children are satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct And<A, B> {
    first: A,
    second: B,
}

impl<A, B> And<A, B> {
    /// Creates an AND of `first` and `second`.
    pub fn new(first: A, second: B) -> Self {
        And { first, second }
    }

    /// Returns the first operand.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// Returns the second operand.
    pub fn second(&self) -> &B {
        &self.second
    }
}

impl<T, A, B> Specification<T> for And<A, B>
where
    T: ?Sized,
    A: Specification<T>,
    B: Specification<T>,
{
    fn is_satisfied_by(&self, item: &T) -> Result<bool> {
        Ok(self.first.is_satisfied_by(item)? && self.second.is_satisfied_by(item)?)
    }

    fn describe(&self) -> String {
        format!("({} AND {})", self.first.describe(), self.second.describe())
    }
}

/// Satisfied when at least one child is satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Or<A, B> {
    first: A,
    second: B,
}

impl<A, B> Or<A, B> {
    /// Creates an OR of `first` and `second`.
    pub fn new(first: A, second: B) -> Self {
        Or { first, second }
    }

    /// Returns the first operand.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// Returns the second operand.
    pub fn second(&self) -> &B {
        &self.second
    }
}

impl<T, A, B> Specification<T> for Or<A, B>
where
    T: ?Sized,
    A: Specification<T>,
    B: Specification<T>,
{
    fn is_satisfied_by(&self, item: &T) -> Result<bool> {
        Ok(self.first.is_satisfied_by(item)? || self.second.is_satisfied_by(item)?)
    }

    fn describe(&self) -> String {
        format!("({} OR {})", self.first.describe(), self.second.describe())
    }
}

/// Satisfied when the inner specification is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Not<S> {
    inner: S,
}

impl<S> Not<S> {
    /// Creates the negation of `inner`.
    pub fn new(inner: S) -> Self {
        Not { inner }
    }

    /// Returns the negated specification.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<T, S> Specification<T> for Not<S>
where
    T: ?Sized,
    S: Specification<T>,
{
    fn is_satisfied_by(&self, item: &T) -> Result<bool> {
        Ok(!self.inner.is_satisfied_by(item)?)
    }

    fn describe(&self) -> String {
        format!("NOT {}", self.inner.describe())
    }
}

/// Creates an AND of two specifications.
pub fn and<A, B>(first: A, second: B) -> And<A, B> {
    And::new(first, second)
}

/// Creates an OR of two specifications.
pub fn or<A, B>(first: A, second: B) -> Or<A, B> {
    Or::new(first, second)
}

/// Creates the negation of a specification.
pub fn not<S>(inner: S) -> Not<S> {
    Not::new(inner)
}

/// Creates an AND from operands that may be absent.
///
/// Returns [`SieveError::MissingOperand`] if either is `None`; no combinator
/// is produced in that case.
pub fn try_and<A, B>(first: Option<A>, second: Option<B>) -> Result<And<A, B>> {
    let first = first.ok_or_else(|| SieveError::missing("and", "first"))?;
    let second = second.ok_or_else(|| SieveError::missing("and", "second"))?;
    Ok(And::new(first, second))
}

/// Creates an OR from operands that may be absent.
pub fn try_or<A, B>(first: Option<A>, second: Option<B>) -> Result<Or<A, B>> {
    let first = first.ok_or_else(|| SieveError::missing("or", "first"))?;
    let second = second.ok_or_else(|| SieveError::missing("or", "second"))?;
    Ok(Or::new(first, second))
}

/// Creates a negation from an operand that may be absent.
pub fn try_not<S>(inner: Option<S>) -> Result<Not<S>> {
    inner
        .map(Not::new)
        .ok_or_else(|| SieveError::missing("not", "inner"))
}

// ============================================================================
// N-ary combinators
// ============================================================================

macro_rules! nary {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        pub struct $name<T: ?Sized> {
            specs: Vec<BoxedSpec<T>>,
        }

        impl<T: ?Sized> $name<T> {
            /// Creates the combinator from children in evaluation order.
            pub fn new<I>(specs: I) -> Self
            where
                I: IntoIterator<Item = BoxedSpec<T>>,
            {
                $name {
                    specs: specs.into_iter().collect(),
                }
            }

            /// Appends a child; it is evaluated after the existing ones.
            pub fn push(&mut self, spec: BoxedSpec<T>) {
                self.specs.push(spec);
            }

            /// Builder form of [`push`](Self::push).
            pub fn with<S>(mut self, spec: S) -> Self
            where
                S: Specification<T> + Send + Sync + 'static,
            {
                self.specs.push(Box::new(spec));
                self
            }

            /// Number of children.
            pub fn len(&self) -> usize {
                self.specs.len()
            }

            /// Returns `true` if there are no children.
            pub fn is_empty(&self) -> bool {
                self.specs.is_empty()
            }

            fn render(&self) -> String {
                let parts: Vec<String> = self.specs.iter().map(|s| s.describe()).collect();
                format!("{}[{}]", $label, parts.join(", "))
            }
        }

        impl<T: ?Sized> Default for $name<T> {
            fn default() -> Self {
                $name { specs: Vec::new() }
            }
        }

        impl<T: ?Sized> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.render())
            }
        }
    };
}

nary!(
    /// Satisfied when every child is satisfied.
    ///
    /// Equivalent to folding the children with [`and`] from the left; with no
    /// children it is satisfied by every item.
    AllOf,
    "ALL"
);

nary!(
    /// Satisfied when at least one child is satisfied.
    ///
    /// Equivalent to folding the children with [`or`] from the left; with no
    /// children it is satisfied by no item.
    AnyOf,
    "ANY"
);

nary!(
    /// Satisfied when no child is satisfied.
    ///
    /// Same as `not(any_of(..))`; with no children it is satisfied by every
    /// item.
    NoneOf,
    "NONE"
);

impl<T: ?Sized> Specification<T> for AllOf<T> {
    fn is_satisfied_by(&self, item: &T) -> Result<bool> {
        for spec in &self.specs {
            if !spec.is_satisfied_by(item)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn describe(&self) -> String {
        self.render()
    }
}

impl<T: ?Sized> Specification<T> for AnyOf<T> {
    fn is_satisfied_by(&self, item: &T) -> Result<bool> {
        for spec in &self.specs {
            if spec.is_satisfied_by(item)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn describe(&self) -> String {
        self.render()
    }
}

impl<T: ?Sized> Specification<T> for NoneOf<T> {
    fn is_satisfied_by(&self, item: &T) -> Result<bool> {
        for spec in &self.specs {
            if spec.is_satisfied_by(item)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn describe(&self) -> String {
        self.render()
    }
}

/// Creates an [`AllOf`] from children in evaluation order.
pub fn all_of<T, I>(specs: I) -> AllOf<T>
where
    T: ?Sized,
    I: IntoIterator<Item = BoxedSpec<T>>,
{
    AllOf::new(specs)
}

/// Creates an [`AnyOf`] from children in evaluation order.
pub fn any_of<T, I>(specs: I) -> AnyOf<T>
where
    T: ?Sized,
    I: IntoIterator<Item = BoxedSpec<T>>,
{
    AnyOf::new(specs)
}

/// Creates a [`NoneOf`] from children in evaluation order.
pub fn none_of<T, I>(specs: I) -> NoneOf<T>
where
    T: ?Sized,
    I: IntoIterator<Item = BoxedSpec<T>>,
{
    NoneOf::new(specs)
}

/// Creates an [`AllOf`] from children that may be absent.
///
/// The first `None` is reported by position (`#0`, `#1`, ...).
pub fn try_all_of<T, I>(specs: I) -> Result<AllOf<T>>
where
    T: ?Sized,
    I: IntoIterator<Item = Option<BoxedSpec<T>>>,
{
    Ok(AllOf::new(present("all_of", specs)?))
}

/// Creates an [`AnyOf`] from children that may be absent.
pub fn try_any_of<T, I>(specs: I) -> Result<AnyOf<T>>
where
    T: ?Sized,
    I: IntoIterator<Item = Option<BoxedSpec<T>>>,
{
    Ok(AnyOf::new(present("any_of", specs)?))
}

fn present<T, I>(combinator: &'static str, specs: I) -> Result<Vec<BoxedSpec<T>>>
where
    T: ?Sized,
    I: IntoIterator<Item = Option<BoxedSpec<T>>>,
{
    specs
        .into_iter()
        .enumerate()
        .map(|(i, spec)| spec.ok_or_else(|| SieveError::missing(combinator, format!("#{i}"))))
        .collect()
}
