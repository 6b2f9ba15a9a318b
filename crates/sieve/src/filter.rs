//! The filter engine.
//!
//! [`filter`] pairs a source with a specification and returns a lazy
//! [`Filtered`] iterator. Nothing is evaluated until the iterator is pulled;
//! each pull advances the source only as far as the next match. The terminal
//! operations below ([`count`], [`any`], [`find`], ...) are thin consumers of
//! the same traversal.
//!
//! # Failure
//!
//! When a specification cannot decide for some item, the traversal yields
//! `Err(SieveError::ItemFailed { index, .. })` in the position where that item
//! would have been yielded or skipped, and then ends. A failure is therefore
//! never confused with "no more matches".

use std::borrow::Borrow;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use log::debug;

use crate::error::{Result, SieveError};
use crate::spec::Specification;

/// Lazy sequence of the items of a source that satisfy a specification.
///
/// Created by [`filter`] or [`FilterExt::satisfying`]. Yields
/// `Ok(item)` for every match, in source order.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Filtered<'s, I, S: ?Sized, T: ?Sized> {
    iter: I,
    spec: &'s S,
    index: usize,
    done: bool,
    _item: PhantomData<fn(&T)>,
}

impl<I, S: ?Sized, T: ?Sized> Filtered<'_, I, S, T> {
    /// Number of source items consumed so far.
    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl<I, S, T> Iterator for Filtered<'_, I, S, T>
where
    I: Iterator,
    I::Item: Borrow<T>,
    S: Specification<T> + ?Sized,
    T: ?Sized,
{
    type Item = Result<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        for item in self.iter.by_ref() {
            let index = self.index;
            self.index += 1;
            match self.spec.is_satisfied_by(item.borrow()) {
                Ok(true) => return Some(Ok(item)),
                Ok(false) => {}
                Err(source) => {
                    self.done = true;
                    debug!(
                        "event=filter_failed index={} criterion={} error={}",
                        index,
                        self.spec.describe(),
                        source
                    );
                    return Some(Err(failed_at(index, source)));
                }
            }
        }
        self.done = true;
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, self.iter.size_hint().1)
        }
    }
}

impl<I, S, T> FusedIterator for Filtered<'_, I, S, T>
where
    I: Iterator,
    I::Item: Borrow<T>,
    S: Specification<T> + ?Sized,
    T: ?Sized,
{
}

fn failed_at(index: usize, source: SieveError) -> SieveError {
    SieveError::ItemFailed {
        index,
        source: Box::new(source),
    }
}

/// Lazily selects the items of `items` that satisfy `spec`.
///
/// Passing `&collection` yields references into it; passing an owning
/// iterator yields the items themselves. Works with infinite sources as long
/// as the consumer stops pulling.
///
/// ```
/// use sieve::{filter, leaf::from_fn, Result};
///
/// let multiple_of_7 = from_fn("multiple of 7", |n: &u64| n % 7 == 0);
/// let first: Vec<u64> = filter(1u64.., &multiple_of_7)
///     .take(3)
///     .collect::<Result<_>>()
///     .unwrap();
/// assert_eq!(first, [7, 14, 21]);
/// ```
pub fn filter<'s, I, S, T>(items: I, spec: &'s S) -> Filtered<'s, I::IntoIter, S, T>
where
    I: IntoIterator,
    I::Item: Borrow<T>,
    S: Specification<T> + ?Sized,
    T: ?Sized,
{
    Filtered {
        iter: items.into_iter(),
        spec,
        index: 0,
        done: false,
        _item: PhantomData,
    }
}

/// Like [`filter`], for callers holding a specification that may be absent.
///
/// Returns [`SieveError::MissingSpecification`] right away, before the
/// source is touched.
pub fn try_filter<'s, I, S, T>(items: I, spec: Option<&'s S>) -> Result<Filtered<'s, I::IntoIter, S, T>>
where
    I: IntoIterator,
    I::Item: Borrow<T>,
    S: Specification<T> + ?Sized,
    T: ?Sized,
{
    match spec {
        Some(spec) => Ok(filter(items, spec)),
        None => Err(SieveError::MissingSpecification),
    }
}

/// Method form of [`filter`] for any iterator.
pub trait FilterExt: Iterator + Sized {
    /// Lazily keeps the items satisfying `spec`.
    fn satisfying<'s, S, T>(self, spec: &'s S) -> Filtered<'s, Self, S, T>
    where
        Self::Item: Borrow<T>,
        S: Specification<T> + ?Sized,
        T: ?Sized,
    {
        filter(self, spec)
    }
}

impl<I: Iterator> FilterExt for I {}

// ============================================================================
// Terminal operations
// ============================================================================

/// Counts the matching items.
pub fn count<I, S, T>(items: I, spec: &S) -> Result<usize>
where
    I: IntoIterator,
    I::Item: Borrow<T>,
    S: Specification<T> + ?Sized,
    T: ?Sized,
{
    let mut n = 0;
    for item in filter(items, spec) {
        item?;
        n += 1;
    }
    Ok(n)
}

/// Returns `true` if any item matches. Stops at the first match.
pub fn any<I, S, T>(items: I, spec: &S) -> Result<bool>
where
    I: IntoIterator,
    I::Item: Borrow<T>,
    S: Specification<T> + ?Sized,
    T: ?Sized,
{
    Ok(find(items, spec)?.is_some())
}

/// Returns `true` if every item matches. Stops at the first item that does
/// not; an empty source is vacuously `true`.
pub fn all<I, S, T>(items: I, spec: &S) -> Result<bool>
where
    I: IntoIterator,
    I::Item: Borrow<T>,
    S: Specification<T> + ?Sized,
    T: ?Sized,
{
    for (index, item) in items.into_iter().enumerate() {
        let satisfied = spec
            .is_satisfied_by(item.borrow())
            .map_err(|e| failed_at(index, e))?;
        if !satisfied {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Returns the first matching item.
pub fn find<I, S, T>(items: I, spec: &S) -> Result<Option<I::Item>>
where
    I: IntoIterator,
    I::Item: Borrow<T>,
    S: Specification<T> + ?Sized,
    T: ?Sized,
{
    filter(items, spec).next().transpose()
}

/// Returns the source index of the first matching item.
pub fn position<I, S, T>(items: I, spec: &S) -> Result<Option<usize>>
where
    I: IntoIterator,
    I::Item: Borrow<T>,
    S: Specification<T> + ?Sized,
    T: ?Sized,
{
    for (index, item) in items.into_iter().enumerate() {
        let satisfied = spec
            .is_satisfied_by(item.borrow())
            .map_err(|e| failed_at(index, e))?;
        if satisfied {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

/// Collects every matching item.
pub fn collect<I, S, T>(items: I, spec: &S) -> Result<Vec<I::Item>>
where
    I: IntoIterator,
    I::Item: Borrow<T>,
    S: Specification<T> + ?Sized,
    T: ?Sized,
{
    filter(items, spec).collect()
}

/// Clones every matching item out of a slice.
pub fn filter_cloned<T, S>(items: &[T], spec: &S) -> Result<Vec<T>>
where
    T: Clone,
    S: Specification<T> + ?Sized,
{
    filter(items, spec).map(|item| item.cloned()).collect()
}

/// Keeps only the matching items of `items`, in place.
///
/// Every item is evaluated before anything is removed, so on failure the
/// vector is left as it was.
pub fn retain<T, S>(items: &mut Vec<T>, spec: &S) -> Result<()>
where
    S: Specification<T> + ?Sized,
{
    let keep: Vec<bool> = items
        .iter()
        .enumerate()
        .map(|(index, item)| spec.is_satisfied_by(item).map_err(|e| failed_at(index, e)))
        .collect::<Result<_>>()?;
    let mut keep = keep.into_iter();
    items.retain(|_| keep.next().unwrap_or(false));
    Ok(())
}
