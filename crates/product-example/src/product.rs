//! The product domain: colors, sizes and products.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building or loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A product was given an empty or whitespace-only name.
    #[error("product name must not be blank")]
    BlankName,

    /// The inventory file could not be read.
    #[error("failed to read inventory {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The inventory file is not a valid product list.
    #[error("invalid inventory {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Blue,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    Medium,
    Large,
    Yuge,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
        })
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
            Size::Yuge => "yuge",
        })
    }
}

/// A catalog entry.
///
/// The price is optional: some entries are not for sale, and criteria that
/// depend on it cannot be decided for those.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord")]
pub struct Product {
    name: String,
    color: Color,
    size: Size,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_cents: Option<u64>,
}

impl Product {
    /// Creates a product without a price.
    ///
    /// Returns [`CatalogError::BlankName`] if `name` is empty or whitespace.
    pub fn new(name: impl Into<String>, color: Color, size: Size) -> Result<Self, CatalogError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CatalogError::BlankName);
        }
        Ok(Product {
            name,
            color,
            size,
            price_cents: None,
        })
    }

    /// Sets the price.
    pub fn with_price(mut self, cents: u64) -> Self {
        self.price_cents = Some(cents);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn price_cents(&self) -> Option<u64> {
        self.price_cents
    }
}

/// Wire shape of a product; validated into [`Product`] on deserialization.
#[derive(Deserialize)]
struct ProductRecord {
    name: String,
    color: Color,
    size: Size,
    #[serde(default)]
    price_cents: Option<u64>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = CatalogError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let product = Product::new(record.name, record.color, record.size)?;
        Ok(match record.price_cents {
            Some(cents) => product.with_price(cents),
            None => product,
        })
    }
}
