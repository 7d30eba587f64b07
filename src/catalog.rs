//! Catalog
//!
//! A read-only product listing loaded from YAML. It supplies the line item
//! snapshots that get added to containers.

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    items::{LineItem, ProductId},
    products::Product,
};

/// Catalog loading and lookup errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Two products share an id
    #[error("Duplicate product: {0}")]
    DuplicateProduct(ProductId),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

/// Products indexed by id, in listing order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] if two products share an id.
    pub fn with_products(products: impl Into<Vec<Product>>) -> Result<Self, CatalogError> {
        let products = products.into();
        let mut index = FxHashMap::default();

        for (position, product) in products.iter().enumerate() {
            if index.insert(product.product_id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateProduct(product.product_id.clone()));
            }
        }

        Ok(Self { products, index })
    }

    /// Parse a catalog from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or ids repeat.
    pub fn from_yaml(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_norway::from_str(contents)?;

        Self::with_products(file.products)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or ids repeat.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Look up a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] for unknown ids.
    pub fn get(&self, product_id: &ProductId) -> Result<&Product, CatalogError> {
        self.index
            .get(product_id)
            .and_then(|position| self.products.get(*position))
            .ok_or_else(|| CatalogError::ProductNotFound(product_id.clone()))
    }

    /// Snapshot a product into a line item holding `quantity` units.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] for unknown ids.
    pub fn line_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<LineItem, CatalogError> {
        Ok(self.get(product_id)?.to_line_item(quantity))
    }

    /// Iterate over products in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
