//! A product catalog filtered with `sieve`.
//!
//! [`product`] holds the domain types, [`specs`] the criteria over them,
//! [`inventory`] the built-in catalog and the JSON loader, and [`cli`] the
//! `products` command.

pub mod cli;
pub mod inventory;
pub mod product;
pub mod specs;

pub use product::{CatalogError, Color, Product, Size};
pub use specs::{name_contains, price_at_most, ColorSpec, SizeSpec};
