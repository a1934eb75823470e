//! Cart domain — product quantities chosen during checkout, and order totals.

pub mod totals;

use crate::shared::ProductId;
use serde::{Deserialize, Serialize};

pub use totals::{line_snapshots, lines_total, order_total};

/// A product reference with a positive quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Product quantities in insertion order.
///
/// A line whose quantity reaches zero is removed; the cart never holds a
/// zero-quantity entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Change a product's quantity by `delta`, saturating at zero.
    ///
    /// Returns the new quantity.
    pub fn adjust(&mut self, product_id: &ProductId, delta: i64) -> u32 {
        let current = i64::from(self.quantity(product_id));
        let next = (current + delta).clamp(0, i64::from(u32::MAX)) as u32;
        self.set(product_id.clone(), next);
        next
    }

    /// Set a product's quantity; zero removes the line.
    pub fn set(&mut self, product_id: ProductId, quantity: u32) {
        let pos = self.lines.iter().position(|l| l.product_id == product_id);
        match (pos, quantity) {
            (Some(i), 0) => {
                self.lines.remove(i);
            }
            (Some(i), q) => self.lines[i].quantity = q,
            (None, 0) => {}
            (None, q) => self.lines.push(CartLine {
                product_id,
                quantity: q,
            }),
        }
    }

    pub fn add(&mut self, product_id: &ProductId) -> u32 {
        self.adjust(product_id, 1)
    }

    pub fn decrement(&mut self, product_id: &ProductId) -> u32 {
        self.adjust(product_id, -1)
    }

    pub fn remove(&mut self, product_id: &ProductId) -> Option<CartLine> {
        let pos = self.lines.iter().position(|l| &l.product_id == product_id)?;
        Some(self.lines.remove(pos))
    }

    pub fn quantity(&self, product_id: &ProductId) -> u32 {
        self.lines
            .iter()
            .find(|l| &l.product_id == product_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

impl FromIterator<(ProductId, u32)> for Cart {
    fn from_iter<I: IntoIterator<Item = (ProductId, u32)>>(iter: I) -> Self {
        let mut cart = Cart::new();
        for (id, qty) in iter {
            let total = cart.quantity(&id).saturating_add(qty);
            cart.set(id, total);
        }
        cart
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ProductId {
        ProductId::from(s)
    }

    #[test]
    fn test_adjust_adds_and_removes_at_zero() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(&id("a")), 1);
        assert_eq!(cart.add(&id("a")), 2);
        assert_eq!(cart.decrement(&id("a")), 1);
        assert_eq!(cart.decrement(&id("a")), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrement_missing_line_is_noop() {
        let mut cart = Cart::new();
        assert_eq!(cart.decrement(&id("a")), 0);
        assert_eq!(cart.adjust(&id("a"), -5), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_never_holds_zero_quantity() {
        let mut cart = Cart::new();
        cart.set(id("a"), 3);
        cart.set(id("b"), 0);
        cart.adjust(&id("a"), -10);
        assert!(cart.lines().iter().all(|l| l.quantity > 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.set(id("b"), 1);
        cart.set(id("a"), 2);
        cart.set(id("b"), 5);
        let ids: Vec<_> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(cart.item_count(), 7);
    }

    #[test]
    fn test_from_iter_merges_duplicates() {
        let cart: Cart = vec![(id("a"), 2), (id("b"), 1), (id("a"), 1), (id("c"), 0)]
            .into_iter()
            .collect();
        assert_eq!(cart.quantity(&id("a")), 3);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut cart: Cart = vec![(id("a"), 2)].into_iter().collect();
        assert_eq!(cart.remove(&id("a")).unwrap().quantity, 2);
        assert!(cart.remove(&id("a")).is_none());
    }
}
