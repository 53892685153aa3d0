//! Pickup order domain types.

use chrono::{DateTime, NaiveDate, Utc};

use curbside_core::{OrderId, OrderItemId, OrderStatus, Price};

/// A pickup order.
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Human-facing reference, e.g. "ORD-001".
    pub reference: String,
    /// Name of the customer picking up.
    pub customer_name: String,
    /// The day the order was placed.
    pub placed_on: NaiveDate,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// When the order row was created.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A line item on an order.
///
/// The product name and price are captured at order time so later catalog
/// edits do not rewrite history.
#[derive(Debug, Clone)]
pub struct OrderItem {
    /// Unique line item ID.
    pub id: OrderItemId,
    /// Owning order.
    pub order_id: OrderId,
    /// Product name at order time.
    pub product_name: String,
    /// Quantity ordered.
    pub quantity: i32,
    /// Unit price at order time.
    pub unit_price: Price,
}

impl OrderItem {
    /// Quantity times unit price.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }
}

/// An order row for list views, with its total pre-aggregated in SQL.
#[derive(Debug, Clone)]
pub struct OrderListEntry {
    /// The order.
    pub order: Order,
    /// Sum of line totals.
    pub total: Price,
}

/// Sum of line totals for a set of items.
#[must_use]
pub fn order_total(items: &[OrderItem]) -> Price {
    items.iter().map(OrderItem::line_total).sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(quantity: i32, cents: i64) -> OrderItem {
        OrderItem {
            id: OrderItemId::new(1),
            order_id: OrderId::new(1),
            product_name: "Organic Banana".to_string(),
            quantity,
            unit_price: Price::from_cents(cents),
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(item(2, 99).line_total().display(), "$1.98");
    }

    #[test]
    fn test_order_total_sums_lines() {
        // 2 x $0.99 + 3 x $1.29 = $5.85
        let items = vec![item(2, 99), item(3, 129)];
        assert_eq!(order_total(&items).display(), "$5.85");
    }

    #[test]
    fn test_order_total_empty() {
        assert_eq!(order_total(&[]).display(), "$0.00");
    }
}
