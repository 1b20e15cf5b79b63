//! Harvest demand aggregation.
//!
//! Before a route day the farm needs one number per crop: how much to cut,
//! and in which package sizes. The summary is recomputed from the order list
//! every time it is asked for; nothing here is cached or stored.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{Microgreen, Order, Unit};

/// Demand for one catalogue product on one delivery date.
#[derive(Debug, Clone)]
pub struct DemandRow {
    pub product_id: Uuid,
    pub name: String,
    pub unit: Unit,
    /// Total packages ordered across all partners and sizes.
    pub total: u32,
    /// Packages per size, keyed by weight.
    pub breakdown: BTreeMap<u32, u32>,
}

/// Sums the orders going out on `date` into one row per catalogue product.
///
/// Every product in the catalogue gets a row, so crops nobody ordered show
/// up with an explicit zero instead of being absent. Order items whose
/// product has since left the catalogue have nowhere to land and are
/// skipped. Totals saturate at `u32::MAX` instead of wrapping.
pub fn aggregate(orders: &[Order], date: NaiveDate, greens: &[Microgreen]) -> Vec<DemandRow> {
    let mut rows: Vec<DemandRow> = greens
        .iter()
        .map(|green| DemandRow {
            product_id: green.id,
            name: green.name.clone(),
            unit: green.unit,
            total: 0,
            breakdown: BTreeMap::new(),
        })
        .collect();

    for order in orders.iter().filter(|o| o.delivery_date == date) {
        for item in &order.items {
            let Some(row) = rows.iter_mut().find(|r| r.product_id == item.product_id) else {
                continue;
            };
            row.total = row.total.saturating_add(item.quantity);
            let sized = row.breakdown.entry(item.weight).or_insert(0);
            *sized = sized.saturating_add(item.quantity);
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::Utc;

    use super::*;
    use crate::models::OrderItem;

    fn green(name: &str) -> Microgreen {
        Microgreen {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            image: String::new(),
            available_weights: BTreeSet::from([50, 100]),
            unit: Unit::Grams,
            available: true,
        }
    }

    fn order(partner: &str, date: NaiveDate, items: Vec<OrderItem>) -> Order {
        Order {
            id: Uuid::new_v4(),
            partner: partner.to_string(),
            items,
            created_at: Utc::now(),
            delivery_date: date,
            delivered: false,
        }
    }

    fn item(product_id: Uuid, weight: u32, quantity: u32) -> OrderItem {
        OrderItem {
            product_id,
            weight,
            quantity,
        }
    }

    #[test]
    fn sums_across_partners_and_sizes() {
        let greens = vec![green("Reďkovka Sango"), green("Slnečnica")];
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        let orders = vec![
            order(
                "Bistro u Jara",
                date,
                vec![item(greens[0].id, 50, 2), item(greens[0].id, 100, 1)],
            ),
            order("Hostinec Pod Hradom", date, vec![item(greens[0].id, 50, 3)]),
        ];

        let rows = aggregate(&orders, date, &greens);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].total, 6);
        assert_eq!(rows[0].breakdown[&50], 5);
        assert_eq!(rows[0].breakdown[&100], 1);
    }

    #[test]
    fn unordered_products_still_get_a_zero_row() {
        let greens = vec![green("Hrach"), green("Slnečnica")];
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        let orders = vec![order("Bistro", date, vec![item(greens[1].id, 100, 4)])];

        let rows = aggregate(&orders, date, &greens);
        assert_eq!(rows[0].name, "Hrach");
        assert_eq!(rows[0].total, 0);
        assert!(rows[0].breakdown.is_empty());
        assert_eq!(rows[1].total, 4);
    }

    #[test]
    fn other_dates_and_vanished_products_contribute_nothing() {
        let greens = vec![green("Hrach")];
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        let other = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
        let orders = vec![
            order("Bistro", other, vec![item(greens[0].id, 50, 9)]),
            order("Bistro", date, vec![item(Uuid::new_v4(), 50, 9)]),
        ];

        let rows = aggregate(&orders, date, &greens);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total, 0);
    }

    #[test]
    fn totals_saturate_instead_of_wrapping() {
        let greens = vec![green("Hrach")];
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        let orders = vec![
            order("Bistro", date, vec![item(greens[0].id, 50, u32::MAX)]),
            order("Hostinec", date, vec![item(greens[0].id, 50, 7)]),
        ];

        let rows = aggregate(&orders, date, &greens);
        assert_eq!(rows[0].total, u32::MAX);
        assert_eq!(rows[0].breakdown[&50], u32::MAX);
    }

    #[test]
    fn rows_follow_catalogue_order() {
        let greens = vec![green("C"), green("A"), green("B")];
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        let rows = aggregate(&[], date, &greens);
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["C", "A", "B"]);
    }
}
