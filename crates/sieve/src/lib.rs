//! Sieve - composable specification-based filtering for Rust collections.
//!
//! Selection criteria are values implementing [`Specification`]. They are
//! combined with AND, OR and NOT into trees, and a tree is applied to any
//! iterable with [`filter`], which returns a lazy iterator over the matching
//! items. Adding a new kind of criterion means implementing the trait; the
//! filtering code never changes.
//!
//! - Leaves: your own types, or the closure/attribute helpers in [`leaf`]
//! - Combinators: [`and`], [`or`], [`not`], [`all_of`], [`any_of`], [`none_of`]
//! - Clause groups: [`Criteria`] with fixed AND / OR / NOT semantics
//! - Engine: [`filter`], [`FilterExt::satisfying`] and the terminal
//!   operations [`count`], [`any`], [`all`], [`find`], [`position`],
//!   [`collect`], [`filter_cloned`], [`retain`]
//!
//! # Quick Start
//!
//! ```rust
//! use sieve::{filter, not, Result, Specification};
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Color { Red, Green, Blue }
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Size { Small, Large }
//!
//! struct Product {
//!     name: &'static str,
//!     color: Color,
//!     size: Size,
//! }
//!
//! struct ColorSpec(Color);
//!
//! impl Specification<Product> for ColorSpec {
//!     fn is_satisfied_by(&self, p: &Product) -> Result<bool> {
//!         Ok(p.color == self.0)
//!     }
//! }
//!
//! struct SizeSpec(Size);
//!
//! impl Specification<Product> for SizeSpec {
//!     fn is_satisfied_by(&self, p: &Product) -> Result<bool> {
//!         Ok(p.size == self.0)
//!     }
//! }
//!
//! let products = vec![
//!     Product { name: "Apple", color: Color::Green, size: Size::Small },
//!     Product { name: "Tree", color: Color::Green, size: Size::Large },
//!     Product { name: "House", color: Color::Blue, size: Size::Large },
//! ];
//!
//! let large_blue = ColorSpec(Color::Blue).and(SizeSpec(Size::Large));
//! let names: Vec<&str> = filter(&products, &large_blue)
//!     .map(|p| p.map(|p| p.name))
//!     .collect::<Result<_>>()?;
//! assert_eq!(names, ["House"]);
//!
//! let not_green = not(ColorSpec(Color::Green));
//! assert_eq!(sieve::count(&products, &not_green)?, 1);
//! # Ok::<(), sieve::SieveError>(())
//! ```
//!
//! # Evaluation semantics
//!
//! - Children are evaluated left to right; `and` skips its second operand
//!   when the first is unsatisfied, `or` when the first is satisfied.
//! - `all_of([])` is satisfied by every item, `any_of([])` by none.
//! - A specification that cannot decide returns an error. The filter engine
//!   yields it at the failing item's position and stops; it is never turned
//!   into "not satisfied".
//!
//! # Thread safety
//!
//! Engine types hold no interior mutability. A tree built from `Send + Sync`
//! leaves can be shared behind an `Arc` and used by several traversals at
//! once without locking.

mod combinators;
mod criteria;
mod error;
mod filter;
pub mod leaf;
mod op;
mod spec;

// Re-export public API
pub use combinators::{
    all_of, and, any_of, none_of, not, or, try_all_of, try_and, try_any_of, try_not, try_or,
    AllOf, And, AnyOf, NoneOf, Not, Or,
};
pub use criteria::{Criteria, Group};
pub use error::{BoxError, Result, SieveError};
pub use filter::{
    all, any, collect, count, filter, filter_cloned, find, position, retain, try_filter,
    FilterExt, Filtered,
};
pub use op::{Op, TextOp};
pub use spec::{BoxedSpec, Specification};
