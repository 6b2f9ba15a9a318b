//! Inventory sources: the built-in catalog and JSON files.

use std::fs;
use std::path::Path;

use log::debug;

use crate::product::{CatalogError, Color, Product, Size};

/// The three-item catalog used by the walkthrough.
pub fn builtin() -> Result<Vec<Product>, CatalogError> {
    [
        ("Apple", Color::Green, Size::Small),
        ("Tree", Color::Green, Size::Large),
        ("House", Color::Blue, Size::Large),
    ]
    .into_iter()
    .map(|(name, color, size)| Product::new(name, color, size))
    .collect()
}

/// Loads a JSON array of products from `path`.
///
/// ```json
/// [{ "name": "Apple", "color": "green", "size": "small", "price_cents": 120 }]
/// ```
pub fn load(path: &Path) -> Result<Vec<Product>, CatalogError> {
    let data = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let products: Vec<Product> =
        serde_json::from_str(&data).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(
        "event=inventory_loaded path={} products={}",
        path.display(),
        products.len()
    );
    Ok(products)
}
