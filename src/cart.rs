//! In-memory shopping cart.
//!
//! Carts live only for the partner's session; they are never written to the
//! persisted state. A cart line is keyed by product and package size, so the
//! same crop in two sizes occupies two lines.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::OrderItem;

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct Cart {
    items: Vec<OrderItem>,
}

impl Cart {
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total packages across all lines, what the header badge shows.
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |sum, i| sum.saturating_add(i.quantity))
    }

    /// Adds `quantity` packages of one product size, merging into the
    /// existing line if there is one. Adding zero changes nothing; a line
    /// caps at `u32::MAX` instead of wrapping.
    pub fn add(&mut self, product_id: Uuid, weight: u32, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self
            .items
            .iter_mut()
            .find(|i| i.product_id == product_id && i.weight == weight)
        {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.items.push(OrderItem {
                product_id,
                weight,
                quantity,
            }),
        }
    }

    /// Takes one package off a line, dropping the line when it hits zero.
    /// Returns false when no such line exists.
    pub fn remove_one(&mut self, product_id: Uuid, weight: u32) -> bool {
        let Some(pos) = self
            .items
            .iter()
            .position(|i| i.product_id == product_id && i.weight == weight)
        else {
            return false;
        };
        if self.items[pos].quantity > 1 {
            self.items[pos].quantity -= 1;
        } else {
            self.items.remove(pos);
        }
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_product_and_size_merge_into_one_line() {
        let id = Uuid::new_v4();
        let mut cart = Cart::default();
        cart.add(id, 50, 1);
        cart.add(id, 50, 1);
        cart.add(id, 100, 1);

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn removal_decrements_and_drops_empty_lines() {
        let id = Uuid::new_v4();
        let mut cart = Cart::default();
        cart.add(id, 50, 2);

        assert!(cart.remove_one(id, 50));
        assert_eq!(cart.items()[0].quantity, 1);

        assert!(cart.remove_one(id, 50));
        assert!(cart.is_empty());

        // Removing from an empty cart is a no-op.
        assert!(!cart.remove_one(id, 50));
        assert!(cart.is_empty());
    }

    #[test]
    fn zero_quantity_add_is_ignored() {
        let mut cart = Cart::default();
        cart.add(Uuid::new_v4(), 50, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn oversized_quantities_cap_instead_of_wrapping() {
        let id = Uuid::new_v4();
        let mut cart = Cart::default();
        cart.add(id, 50, u32::MAX - 1);
        cart.add(id, 50, 5);
        assert_eq!(cart.items()[0].quantity, u32::MAX);

        // The badge total caps too, even across lines.
        cart.add(Uuid::new_v4(), 100, u32::MAX);
        assert_eq!(cart.total_quantity(), u32::MAX);
    }

    #[test]
    fn clear_empties_every_line() {
        let mut cart = Cart::default();
        cart.add(Uuid::new_v4(), 50, 1);
        cart.add(Uuid::new_v4(), 100, 3);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
    }
}
