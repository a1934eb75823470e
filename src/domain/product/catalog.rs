//! Catalog container and the product lookup seam used by order totals.

use super::Product;
use crate::error::PricingError;
use crate::shared::ProductId;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Anything that can resolve a cart line's product.
pub trait ProductLookup {
    fn product(&self, id: &ProductId) -> Option<&Product>;

    /// Current effective price, or `None` if the product is unknown.
    fn effective_price(&self, id: &ProductId) -> Option<Result<Decimal, PricingError>> {
        self.product(id).map(Product::effective_price)
    }
}

impl ProductLookup for HashMap<ProductId, Product> {
    fn product(&self, id: &ProductId) -> Option<&Product> {
        self.get(id)
    }
}

impl ProductLookup for [Product] {
    fn product(&self, id: &ProductId) -> Option<&Product> {
        self.iter().find(|p| &p.id == id)
    }
}

impl ProductLookup for Vec<Product> {
    fn product(&self, id: &ProductId) -> Option<&Product> {
        self.as_slice().product(id)
    }
}

/// The storefront catalog in display order, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        let mut catalog = Self::default();
        for product in products {
            catalog.upsert(product);
        }
        catalog
    }

    /// Insert a product, replacing any product with the same id in place.
    pub fn upsert(&mut self, product: Product) {
        match self.index.get(&product.id) {
            Some(&pos) => self.products[pos] = product,
            None => {
                self.index.insert(product.id.clone(), self.products.len());
                self.products.push(product);
            }
        }
    }

    pub fn remove(&mut self, id: &ProductId) -> Option<Product> {
        let pos = self.index.remove(id)?;
        let removed = self.products.remove(pos);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).map(|&pos| &self.products[pos])
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductLookup for Catalog {
    fn product(&self, id: &ProductId) -> Option<&Product> {
        self.get(id)
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Catalog::new(iter.into_iter().collect())
    }
}
