//! Generic leaf specifications.
//!
//! Domain code usually writes its own leaves by implementing
//! [`Specification`] on a small struct. The constructors here cover the
//! common shapes without a new type per criterion: a closure, or an
//! attribute accessor plus a comparison.
//!
//! Accessors are plain closures over the item; there is no field registry
//! and no lookup by name. The `name` given to each constructor only labels
//! the criterion in [`describe`](Specification::describe) output and errors.

use std::borrow::Cow;
use std::fmt;

use regex::Regex;

use crate::error::{Result, SieveError};
use crate::op::{Op, TextOp};
use crate::spec::Specification;

type Name = Cow<'static, str>;

macro_rules! debug_by_label {
    ($($ty:ident<$($param:ident),+>),+ $(,)?) => {
        $(
            impl<$($param),+> fmt::Debug for $ty<$($param),+> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_tuple(stringify!($ty)).field(&self.label).finish()
                }
            }
        )+
    };
}

// ============================================================================
// Closure leaves
// ============================================================================

/// Leaf backed by an infallible closure. See [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F> {
    label: Name,
    f: F,
}

/// Creates a leaf from a closure returning `bool`.
///
/// ```
/// use sieve::{leaf::from_fn, Specification};
///
/// let even = from_fn("even", |n: &u32| n % 2 == 0);
/// assert!(even.is_satisfied_by(&4).unwrap());
/// assert_eq!(even.describe(), "even");
/// ```
pub fn from_fn<T, F>(name: impl Into<Name>, f: F) -> FromFn<F>
where
    T: ?Sized,
    F: Fn(&T) -> bool,
{
    FromFn {
        label: name.into(),
        f,
    }
}

impl<T: ?Sized, F: Fn(&T) -> bool> Specification<T> for FromFn<F> {
    fn is_satisfied_by(&self, item: &T) -> Result<bool> {
        Ok((self.f)(item))
    }

    fn describe(&self) -> String {
        self.label.to_string()
    }
}

/// Leaf backed by a fallible closure. See [`try_from_fn`].
#[derive(Clone)]
pub struct TryFromFn<F> {
    label: Name,
    f: F,
}

/// Creates a leaf from a closure that may fail to decide.
///
/// Use this when the decision depends on something outside the item that
/// can be unavailable; wrap the failure with [`SieveError::evaluation`].
pub fn try_from_fn<T, F>(name: impl Into<Name>, f: F) -> TryFromFn<F>
where
    T: ?Sized,
    F: Fn(&T) -> Result<bool>,
{
    TryFromFn {
        label: name.into(),
        f,
    }
}

impl<T: ?Sized, F: Fn(&T) -> Result<bool>> Specification<T> for TryFromFn<F> {
    fn is_satisfied_by(&self, item: &T) -> Result<bool> {
        (self.f)(item)
    }

    fn describe(&self) -> String {
        self.label.to_string()
    }
}

// ============================================================================
// Attribute comparisons
// ============================================================================

/// Compares an attribute with a fixed value. See [`field`].
#[derive(Clone)]
pub struct Field<F, V> {
    name: Name,
    label: String,
    accessor: F,
    op: Op,
    value: V,
}

/// Creates a leaf comparing `accessor(item)` with `value` using `op`.
///
/// If the two values have no ordering (e.g. a NaN float) evaluation fails
/// with [`SieveError::Incomparable`].
///
/// ```
/// use sieve::{leaf::field, Op, Specification};
///
/// let heavy = field("weight", |w: &f64| *w, Op::Gt, 10.0);
/// assert!(heavy.is_satisfied_by(&12.5).unwrap());
/// assert!(heavy.is_satisfied_by(&f64::NAN).is_err());
/// ```
pub fn field<T, F, V>(name: impl Into<Name>, accessor: F, op: Op, value: V) -> Field<F, V>
where
    T: ?Sized,
    F: Fn(&T) -> V,
    V: PartialOrd + fmt::Debug,
{
    let name = name.into();
    Field {
        label: format!("{name} {op} {value:?}"),
        name,
        accessor,
        op,
        value,
    }
}

impl<T: ?Sized, F, V> Specification<T> for Field<F, V>
where
    F: Fn(&T) -> V,
    V: PartialOrd,
{
    fn is_satisfied_by(&self, item: &T) -> Result<bool> {
        compare(&self.name, &(self.accessor)(item), self.op, &self.value)
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

/// Compares an optional attribute with a fixed value. See [`field_opt`].
#[derive(Clone)]
pub struct FieldOpt<F, V> {
    name: Name,
    label: String,
    accessor: F,
    op: Op,
    value: V,
}

/// Like [`field`], for attributes an item may not have.
///
/// A `None` attribute cannot be compared, so evaluation fails with
/// [`SieveError::Unavailable`] rather than answering "not satisfied".
pub fn field_opt<T, F, V>(name: impl Into<Name>, accessor: F, op: Op, value: V) -> FieldOpt<F, V>
where
    T: ?Sized,
    F: Fn(&T) -> Option<V>,
    V: PartialOrd + fmt::Debug,
{
    let name = name.into();
    FieldOpt {
        label: format!("{name} {op} {value:?}"),
        name,
        accessor,
        op,
        value,
    }
}

impl<T: ?Sized, F, V> Specification<T> for FieldOpt<F, V>
where
    F: Fn(&T) -> Option<V>,
    V: PartialOrd,
{
    fn is_satisfied_by(&self, item: &T) -> Result<bool> {
        match (self.accessor)(item) {
            Some(actual) => compare(&self.name, &actual, self.op, &self.value),
            None => Err(SieveError::Unavailable {
                criterion: self.name.clone(),
            }),
        }
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

fn compare<V: PartialOrd>(name: &Name, actual: &V, op: Op, value: &V) -> Result<bool> {
    actual
        .partial_cmp(value)
        .map(|ordering| op.eval_ordering(ordering))
        .ok_or_else(|| SieveError::Incomparable {
            criterion: name.clone(),
        })
}

/// Checks attribute membership in a set. See [`one_of`].
#[derive(Clone)]
pub struct OneOf<F, V> {
    label: String,
    accessor: F,
    values: Vec<V>,
}

/// Creates a leaf satisfied when `accessor(item)` equals any of `values`.
///
/// An empty set is satisfied by nothing.
pub fn one_of<T, F, V, I>(name: impl Into<Name>, accessor: F, values: I) -> OneOf<F, V>
where
    T: ?Sized,
    F: Fn(&T) -> V,
    V: PartialEq + fmt::Debug,
    I: IntoIterator<Item = V>,
{
    let name: Name = name.into();
    let values: Vec<V> = values.into_iter().collect();
    OneOf {
        label: format!("{name} in {values:?}"),
        accessor,
        values,
    }
}

impl<T: ?Sized, F, V> Specification<T> for OneOf<F, V>
where
    F: Fn(&T) -> V,
    V: PartialEq,
{
    fn is_satisfied_by(&self, item: &T) -> Result<bool> {
        let actual = (self.accessor)(item);
        Ok(self.values.contains(&actual))
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

// ============================================================================
// Text
// ============================================================================

/// String comparison on a text attribute. See [`text`].
#[derive(Clone)]
pub struct Text<F> {
    label: String,
    accessor: F,
    op: TextOp,
    pattern: String,
}

/// Creates a leaf applying `op` to the text returned by `accessor`.
///
/// ```
/// use sieve::{leaf::text, Specification, TextOp};
///
/// let greeting = text("greeting", |s: &String| s.as_str(), TextOp::StartsWith, "hello");
/// assert!(greeting.is_satisfied_by(&"hello world".to_string()).unwrap());
/// ```
pub fn text<T, F>(name: impl Into<Name>, accessor: F, op: TextOp, pattern: impl Into<String>) -> Text<F>
where
    T: ?Sized,
    F: Fn(&T) -> &str,
{
    let name: Name = name.into();
    let pattern = pattern.into();
    Text {
        label: format!("{name} {op} {pattern:?}"),
        accessor,
        op,
        pattern,
    }
}

impl<T: ?Sized, F> Specification<T> for Text<F>
where
    F: Fn(&T) -> &str,
{
    fn is_satisfied_by(&self, item: &T) -> Result<bool> {
        Ok(self.op.apply((self.accessor)(item), &self.pattern))
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

/// Regular-expression match on a text attribute. See [`matches_regex`].
#[derive(Clone)]
pub struct MatchesRegex<F> {
    label: String,
    accessor: F,
    regex: Regex,
}

/// Creates a leaf satisfied when the text returned by `accessor` matches
/// `pattern`.
///
/// The pattern is compiled here; an invalid one is reported immediately as
/// [`SieveError::InvalidRegex`].
pub fn matches_regex<T, F>(name: impl Into<Name>, accessor: F, pattern: &str) -> Result<MatchesRegex<F>>
where
    T: ?Sized,
    F: Fn(&T) -> &str,
{
    let name: Name = name.into();
    let regex = Regex::new(pattern)?;
    Ok(MatchesRegex {
        label: format!("{name} =~ /{}/", regex.as_str()),
        accessor,
        regex,
    })
}

impl<T: ?Sized, F> Specification<T> for MatchesRegex<F>
where
    F: Fn(&T) -> &str,
{
    fn is_satisfied_by(&self, item: &T) -> Result<bool> {
        Ok(self.regex.is_match((self.accessor)(item)))
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

debug_by_label!(
    FromFn<F>,
    TryFromFn<F>,
    Field<F, V>,
    FieldOpt<F, V>,
    OneOf<F, V>,
    Text<F>,
    MatchesRegex<F>,
);
