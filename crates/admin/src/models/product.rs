//! Product domain type.

use chrono::{DateTime, Utc};

use curbside_core::{Price, ProductId};

/// A product available through the pickup service.
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Category name, e.g. "Fruits".
    pub category: String,
    /// Stock keeping unit code.
    pub sku: String,
    /// Whether the product is currently in stock.
    pub in_stock: bool,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}
