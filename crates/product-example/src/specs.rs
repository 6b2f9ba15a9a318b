//! Product criteria.
//!
//! `ColorSpec` and `SizeSpec` are hand-written leaves; the name and price
//! criteria are built from the generic leaves in [`sieve::leaf`]. New
//! criteria are added here without touching any filtering code.

use sieve::leaf::{field_opt, text};
use sieve::{Op, Result, Specification, TextOp};

use crate::product::{Color, Product, Size};

/// Satisfied by products of one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSpec {
    color: Color,
}

impl ColorSpec {
    pub fn new(color: Color) -> Self {
        ColorSpec { color }
    }
}

impl Specification<Product> for ColorSpec {
    fn is_satisfied_by(&self, product: &Product) -> Result<bool> {
        Ok(product.color() == self.color)
    }

    fn describe(&self) -> String {
        format!("color == {}", self.color)
    }
}

/// Satisfied by products of one size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSpec {
    size: Size,
}

impl SizeSpec {
    pub fn new(size: Size) -> Self {
        SizeSpec { size }
    }
}

impl Specification<Product> for SizeSpec {
    fn is_satisfied_by(&self, product: &Product) -> Result<bool> {
        Ok(product.size() == self.size)
    }

    fn describe(&self) -> String {
        format!("size == {}", self.size)
    }
}

/// Satisfied by products whose name contains `pattern` (case sensitive).
pub fn name_contains(pattern: &str) -> impl Specification<Product> + Send + Sync + 'static {
    text("name", |p: &Product| p.name(), TextOp::Contains, pattern)
}

/// Satisfied by products priced at or below `cents`.
///
/// Evaluating it on a product without a price is an error.
pub fn price_at_most(cents: u64) -> impl Specification<Product> + Send + Sync + 'static {
    field_opt("price", |p: &Product| p.price_cents(), Op::Lte, cents)
}
