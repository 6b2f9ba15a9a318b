//! The [`Specification`] trait.
//!
//! A specification is an immutable, side-effect-free predicate over items of
//! type `T`. Leaves hold whatever state they need to decide; combinators in
//! [`crate::combinators`] wrap other specifications.

use std::rc::Rc;
use std::sync::Arc;

use crate::combinators::{And, Not, Or};
use crate::error::Result;

/// A boxed, thread-shareable specification.
///
/// Used wherever children of different concrete types have to live side by
/// side, e.g. in [`AllOf`](crate::AllOf) or [`Criteria`](crate::Criteria).
pub type BoxedSpec<T> = Box<dyn Specification<T> + Send + Sync>;

/// Trait for selection criteria over items of type `T`.
///
/// `Ok(false)` is the ordinary "not satisfied" answer. `Err(_)` means the
/// specification could not decide at all, and is propagated by every
/// combinator and by the filter engine instead of being read as `false`.
///
/// Implementations must be pure functions of the item and their own state:
/// they take `&self`, may be called any number of times and, for `Sync`
/// types, from several threads at once.
///
/// # Example
///
/// ```
/// use sieve::{filter, Result, Specification};
///
/// struct Even;
///
/// impl Specification<u32> for Even {
///     fn is_satisfied_by(&self, n: &u32) -> Result<bool> {
///         Ok(n % 2 == 0)
///     }
/// }
///
/// struct Above(u32);
///
/// impl Specification<u32> for Above {
///     fn is_satisfied_by(&self, n: &u32) -> Result<bool> {
///         Ok(*n > self.0)
///     }
/// }
///
/// let spec = Even.and(Above(2));
/// let numbers = [1u32, 2, 3, 4, 5, 6];
/// let matched: Vec<&u32> = filter(&numbers, &spec).collect::<Result<_>>().unwrap();
/// assert_eq!(matched, [&4, &6]);
/// ```
pub trait Specification<T: ?Sized> {
    /// Decides whether `item` satisfies this specification.
    fn is_satisfied_by(&self, item: &T) -> Result<bool>;

    /// Human-readable rendering of the criterion, used in logs and errors.
    ///
    /// Defaults to the short type name of the implementor.
    fn describe(&self) -> String {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Combines with `other` so both must be satisfied.
    ///
    /// `other` is only evaluated when `self` is satisfied.
    fn and<S>(self, other: S) -> And<Self, S>
    where
        Self: Sized,
        S: Specification<T>,
    {
        And::new(self, other)
    }

    /// Combines with `other` so at least one must be satisfied.
    ///
    /// `other` is only evaluated when `self` is not satisfied.
    fn or<S>(self, other: S) -> Or<Self, S>
    where
        Self: Sized,
        S: Specification<T>,
    {
        Or::new(self, other)
    }

    /// Negates this specification.
    fn not(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not::new(self)
    }

    /// Boxes this specification so it can sit next to other kinds in a
    /// collection.
    fn boxed(self) -> BoxedSpec<T>
    where
        Self: Sized + Send + Sync + 'static,
    {
        Box::new(self)
    }
}

// Shared leaves: the same instance can appear in several trees by reference
// or behind a smart pointer.

impl<T: ?Sized, S: Specification<T> + ?Sized> Specification<T> for &S {
    fn is_satisfied_by(&self, item: &T) -> Result<bool> {
        (**self).is_satisfied_by(item)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: ?Sized, S: Specification<T> + ?Sized> Specification<T> for Box<S> {
    fn is_satisfied_by(&self, item: &T) -> Result<bool> {
        (**self).is_satisfied_by(item)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: ?Sized, S: Specification<T> + ?Sized> Specification<T> for Arc<S> {
    fn is_satisfied_by(&self, item: &T) -> Result<bool> {
        (**self).is_satisfied_by(item)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: ?Sized, S: Specification<T> + ?Sized> Specification<T> for Rc<S> {
    fn is_satisfied_by(&self, item: &T) -> Result<bool> {
        (**self).is_satisfied_by(item)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// `my_crate::specs::ColorSpec<u8>` -> `ColorSpec`
fn short_type_name(full: &str) -> String {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Positive;

    impl Specification<i64> for Positive {
        fn is_satisfied_by(&self, n: &i64) -> Result<bool> {
            Ok(*n > 0)
        }
    }

    struct Len(usize);

    impl Specification<str> for Len {
        fn is_satisfied_by(&self, s: &str) -> Result<bool> {
            Ok(s.len() == self.0)
        }

        fn describe(&self) -> String {
            format!("len == {}", self.0)
        }
    }

    #[test]
    fn default_describe_uses_short_type_name() {
        assert_eq!(Positive.describe(), "Positive");
    }

    #[test]
    fn short_type_name_strips_paths_and_generics() {
        assert_eq!(short_type_name("a::b::ColorSpec<u8>"), "ColorSpec");
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn works_on_unsized_items() {
        assert!(Len(3).is_satisfied_by("abc").unwrap());
        assert!(!Len(3).is_satisfied_by("abcd").unwrap());
    }

    #[test]
    fn references_and_pointers_delegate() {
        let shared = Arc::new(Positive);
        let by_ref = &Positive;
        let boxed: BoxedSpec<i64> = Positive.boxed();
        let rc = Rc::new(Len(2));

        assert!(shared.is_satisfied_by(&1i64).unwrap());
        assert!(!by_ref.is_satisfied_by(&-1i64).unwrap());
        assert!(boxed.is_satisfied_by(&7i64).unwrap());
        assert!(rc.is_satisfied_by("ok").unwrap());
        assert_eq!(rc.describe(), "len == 2");
        assert_eq!(boxed.describe(), "Positive");
    }

    #[test]
    fn fluent_composition() {
        let spec = Positive.not().or(Positive);
        assert!(spec.is_satisfied_by(&-5i64).unwrap());
        assert!(spec.is_satisfied_by(&5i64).unwrap());
    }
}
