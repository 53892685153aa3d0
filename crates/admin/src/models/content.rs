//! Storefront content domain types: category icons and text labels.

use curbside_core::{CategoryIconId, LabelId};

/// An icon image shown for a product category in the shopper app.
#[derive(Debug, Clone)]
pub struct CategoryIcon {
    /// Unique icon ID.
    pub id: CategoryIconId,
    /// Category name, e.g. "Fruits".
    pub name: String,
    /// URL of the icon image.
    pub image_url: String,
}

/// A keyed piece of UI copy, editable without a deploy.
#[derive(Debug, Clone)]
pub struct AppLabel {
    /// Unique label ID.
    pub id: LabelId,
    /// Dotted lookup key, e.g. "homepage.welcome".
    pub key: String,
    /// Text shown to shoppers.
    pub value: String,
    /// What this label is for, shown only in the console.
    pub description: String,
}
