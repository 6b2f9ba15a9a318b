//! Criteria groups.
//!
//! [`Criteria`] collects specifications into three clause groups and
//! combines them with fixed logic:
//!
//! ```text
//! match = (every AND clause is satisfied)
//!       ∧ (at least one OR clause is satisfied, OR no OR clauses exist)
//!       ∧ (no NOT clause is satisfied)
//! ```
//!
//! This is the shape a flat list of user-supplied conditions (command-line
//! flags, form fields) naturally takes, without building a nested tree by
//! hand.

use std::fmt;

use log::trace;

use crate::error::Result;
use crate::spec::{BoxedSpec, Specification};

/// Three clause groups combined into one specification.
///
/// Groups are evaluated in the order AND, OR, NOT; clauses within a group
/// left to right. Evaluation stops as soon as the outcome is known.
///
/// # Example
///
/// ```
/// use sieve::{leaf::from_fn, Criteria, Specification};
///
/// let criteria = Criteria::new()
///     .and_clause(from_fn("positive", |n: &i32| *n > 0))
///     .or_clause(from_fn("even", |n: &i32| n % 2 == 0))
///     .or_clause(from_fn("big", |n: &i32| *n > 100))
///     .not_clause(from_fn("forty-two", |n: &i32| *n == 42))
///     .build();
///
/// assert!(criteria.is_satisfied_by(&4).unwrap());
/// assert!(criteria.is_satisfied_by(&101).unwrap());
/// assert!(!criteria.is_satisfied_by(&42).unwrap());
/// assert!(!criteria.is_satisfied_by(&3).unwrap());
/// ```
pub struct Criteria<T: ?Sized> {
    and_clauses: Vec<BoxedSpec<T>>,
    or_clauses: Vec<BoxedSpec<T>>,
    not_clauses: Vec<BoxedSpec<T>>,
}

impl<T: ?Sized> Criteria<T> {
    /// Creates empty criteria.
    ///
    /// Empty criteria are satisfied by every item.
    pub fn new() -> Self {
        Criteria {
            and_clauses: Vec::new(),
            or_clauses: Vec::new(),
            not_clauses: Vec::new(),
        }
    }

    /// Adds an AND clause.
    ///
    /// All AND clauses must be satisfied.
    pub fn and_clause<S>(mut self, spec: S) -> Self
    where
        S: Specification<T> + Send + Sync + 'static,
    {
        self.and_clauses.push(Box::new(spec));
        self
    }

    /// Adds an OR clause.
    ///
    /// At least one OR clause must be satisfied (unless there are none).
    pub fn or_clause<S>(mut self, spec: S) -> Self
    where
        S: Specification<T> + Send + Sync + 'static,
    {
        self.or_clauses.push(Box::new(spec));
        self
    }

    /// Adds a NOT clause.
    ///
    /// No NOT clause may be satisfied.
    pub fn not_clause<S>(mut self, spec: S) -> Self
    where
        S: Specification<T> + Send + Sync + 'static,
    {
        self.not_clauses.push(Box::new(spec));
        self
    }

    /// Adds an already boxed clause to the given group.
    pub fn push(&mut self, group: Group, spec: BoxedSpec<T>) {
        match group {
            Group::And => self.and_clauses.push(spec),
            Group::Or => self.or_clauses.push(spec),
            Group::Not => self.not_clauses.push(spec),
        }
    }

    /// Finalizes the criteria.
    pub fn build(self) -> Self {
        trace!(
            "event=criteria_built and={} or={} not={} criteria={}",
            self.and_clauses.len(),
            self.or_clauses.len(),
            self.not_clauses.len(),
            self.render()
        );
        self
    }

    /// Number of AND clauses.
    pub fn and_len(&self) -> usize {
        self.and_clauses.len()
    }

    /// Number of OR clauses.
    pub fn or_len(&self) -> usize {
        self.or_clauses.len()
    }

    /// Number of NOT clauses.
    pub fn not_len(&self) -> usize {
        self.not_clauses.len()
    }

    /// Returns `true` if there are no clauses (satisfied by everything).
    pub fn is_empty(&self) -> bool {
        self.and_clauses.is_empty() && self.or_clauses.is_empty() && self.not_clauses.is_empty()
    }

    fn render(&self) -> String {
        let group = |label: &str, specs: &[BoxedSpec<T>]| {
            let parts: Vec<String> = specs.iter().map(|s| s.describe()).collect();
            format!("{label}[{}]", parts.join(", "))
        };
        let mut out = Vec::new();
        if !self.and_clauses.is_empty() {
            out.push(group("ALL", &self.and_clauses));
        }
        if !self.or_clauses.is_empty() {
            out.push(group("ANY", &self.or_clauses));
        }
        if !self.not_clauses.is_empty() {
            out.push(group("NONE", &self.not_clauses));
        }
        if out.is_empty() {
            "ALL[]".to_string()
        } else {
            out.join(" AND ")
        }
    }
}

/// Clause group selector for [`Criteria::push`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    And,
    Or,
    Not,
}

impl<T: ?Sized> Default for Criteria<T> {
    fn default() -> Self {
        Criteria::new()
    }
}

impl<T: ?Sized> fmt::Debug for Criteria<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Criteria").field(&self.render()).finish()
    }
}

impl<T: ?Sized> Specification<T> for Criteria<T> {
    fn is_satisfied_by(&self, item: &T) -> Result<bool> {
        // All AND clauses must be satisfied
        for clause in &self.and_clauses {
            if !clause.is_satisfied_by(item)? {
                return Ok(false);
            }
        }

        // At least one OR clause must be satisfied (or none exist)
        if !self.or_clauses.is_empty() {
            let mut any = false;
            for clause in &self.or_clauses {
                if clause.is_satisfied_by(item)? {
                    any = true;
                    break;
                }
            }
            if !any {
                return Ok(false);
            }
        }

        // No NOT clause may be satisfied
        for clause in &self.not_clauses {
            if clause.is_satisfied_by(item)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn describe(&self) -> String {
        self.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SieveError;
    use crate::leaf::{from_fn, text, try_from_fn};
    use crate::op::TextOp;

    #[derive(Debug, Clone, PartialEq)]
    struct Task {
        name: String,
        priority: i64,
        archived: bool,
    }

    fn task(name: &str, priority: i64, archived: bool) -> Task {
        Task {
            name: name.to_string(),
            priority,
            archived,
        }
    }

    fn sample_tasks() -> Vec<Task> {
        vec![
            task("Task A", 1, false),
            task("Task B", 2, false),
            task("Urgent Task", 5, false),
            task("Critical Task", 5, true),
            task("Done Task", 3, true),
        ]
    }

    fn matching<'a>(criteria: &Criteria<Task>, tasks: &'a [Task]) -> Vec<&'a str> {
        tasks
            .iter()
            .filter(|t| criteria.is_satisfied_by(t).unwrap())
            .map(|t| t.name.as_str())
            .collect()
    }

    fn name_contains(pattern: &str) -> impl Specification<Task> + Send + Sync + 'static {
        text("name", |t: &Task| t.name.as_str(), TextOp::Contains, pattern)
    }

    #[test]
    fn empty_criteria_match_all() {
        let tasks = sample_tasks();
        let criteria = Criteria::new().build();
        assert!(criteria.is_empty());
        assert_eq!(matching(&criteria, &tasks).len(), 5);
    }

    #[test]
    fn and_clauses() {
        let tasks = sample_tasks();
        let criteria = Criteria::new()
            .and_clause(from_fn("p5", |t: &Task| t.priority == 5))
            .and_clause(from_fn("active", |t: &Task| !t.archived))
            .build();
        assert_eq!(matching(&criteria, &tasks), ["Urgent Task"]);
    }

    #[test]
    fn or_clauses() {
        let tasks = sample_tasks();
        let criteria = Criteria::new()
            .or_clause(name_contains("Urgent"))
            .or_clause(name_contains("Critical"))
            .build();
        assert_eq!(matching(&criteria, &tasks), ["Urgent Task", "Critical Task"]);
    }

    #[test]
    fn not_clauses() {
        let tasks = sample_tasks();
        let criteria = Criteria::new()
            .not_clause(from_fn("archived", |t: &Task| t.archived))
            .build();
        assert_eq!(matching(&criteria, &tasks), ["Task A", "Task B", "Urgent Task"]);
    }

    #[test]
    fn combined_and_or_not() {
        let tasks = sample_tasks();
        let criteria = Criteria::new()
            .and_clause(from_fn("p>=3", |t: &Task| t.priority >= 3))
            .or_clause(name_contains("Urgent"))
            .or_clause(name_contains("Done"))
            .not_clause(from_fn("archived", |t: &Task| t.archived))
            .build();

        // priority >= 3 AND (name has Urgent OR Done) AND not archived
        assert_eq!(matching(&criteria, &tasks), ["Urgent Task"]);
    }

    #[test]
    fn failing_clause_propagates() {
        let criteria = Criteria::new()
            .or_clause(try_from_fn("remote", |_: &Task| {
                Err(SieveError::evaluation("remote", "timeout"))
            }))
            .build();
        assert!(criteria.is_satisfied_by(&task("x", 1, false)).is_err());
    }

    #[test]
    fn failing_not_clause_is_skipped_when_and_fails_first() {
        let criteria = Criteria::new()
            .and_clause(from_fn("never", |_: &Task| false))
            .not_clause(try_from_fn("remote", |_: &Task| {
                Err(SieveError::evaluation("remote", "timeout"))
            }))
            .build();
        assert!(!criteria.is_satisfied_by(&task("x", 1, false)).unwrap());
    }

    #[test]
    fn push_and_introspection() {
        let mut criteria: Criteria<Task> = Criteria::default();
        criteria.push(Group::And, from_fn("a", |_: &Task| true).boxed());
        criteria.push(Group::Or, from_fn("b", |_: &Task| true).boxed());
        criteria.push(Group::Not, from_fn("c", |_: &Task| false).boxed());

        assert_eq!(criteria.and_len(), 1);
        assert_eq!(criteria.or_len(), 1);
        assert_eq!(criteria.not_len(), 1);
        assert!(!criteria.is_empty());
        assert_eq!(criteria.describe(), "ALL[a] AND ANY[b] AND NONE[c]");
        assert_eq!(Criteria::<Task>::new().describe(), "ALL[]");
    }
}
