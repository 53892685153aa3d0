//! Product management route handlers (store admin).

use askama::Template;
use axum::{
    Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use curbside_core::{Price, ProductId};

use crate::db::{ProductRepository, RepositoryError, products::ProductFields};
use crate::error::AppError;
use crate::filters;
use crate::middleware::auth::RequireStoreAdmin;
use crate::middleware::{push_flash, take_flash};
use crate::models::{Flash, Product};
use crate::state::AppState;

use super::dashboard::{FlashView, UserView};

/// Product row view for templates.
#[derive(Debug, Clone)]
pub struct ProductRowView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub category: String,
    pub sku: String,
    pub in_stock: bool,
}

impl From<&Product> for ProductRowView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: product.price.display(),
            category: product.category.clone(),
            sku: product.sku.clone(),
            in_stock: product.in_stock,
        }
    }
}

/// Products page template.
#[derive(Template)]
#[template(path = "products/index.html")]
struct ProductsIndexTemplate {
    user: UserView,
    current_path: String,
    flash: FlashView,
    products: Vec<ProductRowView>,
    search: String,
}

/// Search query parameter.
#[derive(Debug, Deserialize, Default)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Product form fields (create and update share the same shape).
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    name: String,
    price: String,
    category: String,
    sku: String,
    /// Checkbox: present when checked.
    in_stock: Option<String>,
}

impl ProductForm {
    fn into_fields(self) -> Result<ProductFields, AppError> {
        let price = parse_price(&self.price)
            .ok_or_else(|| AppError::BadRequest(format!("invalid price: {}", self.price)))?;

        Ok(ProductFields {
            name: self.name.trim().to_string(),
            price,
            category: self.category.trim().to_string(),
            sku: self.sku.trim().to_string(),
            in_stock: self.in_stock.is_some(),
        })
    }
}

/// Parse a user-entered price, tolerating a leading `$`.
///
/// Negative amounts are rejected; a product cannot cost less than nothing.
fn parse_price(input: &str) -> Option<Price> {
    let cleaned = input.trim().trim_start_matches('$');
    cleaned
        .parse::<Decimal>()
        .ok()
        .filter(|amount| !amount.is_sign_negative())
        .map(Price::new)
}

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/products", get(index).post(create))
        .route("/admin/products/{id}", post(update))
        .route("/admin/products/{id}/delete", post(delete))
}

/// Product listing with optional search.
///
/// GET /admin/products
#[instrument(skip(user, state, session))]
async fn index(
    RequireStoreAdmin(user): RequireStoreAdmin,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>, AppError> {
    let repo = ProductRepository::new(state.pool());

    let search = query.q.trim();
    let products = repo
        .list((!search.is_empty()).then_some(search))
        .await?;

    let template = ProductsIndexTemplate {
        user: UserView::from(&user),
        current_path: "/admin/products".to_string(),
        flash: FlashView::from(take_flash(&session).await),
        products: products.iter().map(ProductRowView::from).collect(),
        search: search.to_string(),
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Create a product.
///
/// POST /admin/products
#[instrument(skip(state, session, form))]
async fn create(
    RequireStoreAdmin(_user): RequireStoreAdmin,
    State(state): State<AppState>,
    session: Session,
    axum::Form(form): axum::Form<ProductForm>,
) -> Result<Redirect, AppError> {
    let repo = ProductRepository::new(state.pool());

    let flash = match form.into_fields() {
        Ok(fields) => match repo.create(&fields).await {
            Ok(product) => Flash::success(format!("Added {}", product.name)),
            Err(RepositoryError::Conflict(msg)) => Flash::error(msg),
            Err(e) => return Err(e.into()),
        },
        Err(e) => Flash::error(e.to_string()),
    };

    let _ = push_flash(&session, &flash).await;
    Ok(Redirect::to("/admin/products"))
}

/// Update a product.
///
/// POST /admin/products/{id}
#[instrument(skip(state, session, form))]
async fn update(
    RequireStoreAdmin(_user): RequireStoreAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    axum::Form(form): axum::Form<ProductForm>,
) -> Result<Redirect, AppError> {
    let repo = ProductRepository::new(state.pool());

    let flash = match form.into_fields() {
        Ok(fields) => match repo.update(ProductId::new(id), &fields).await {
            Ok(product) => Flash::success(format!("Updated {}", product.name)),
            Err(RepositoryError::NotFound) => Flash::error("Product not found"),
            Err(RepositoryError::Conflict(msg)) => Flash::error(msg),
            Err(e) => return Err(e.into()),
        },
        Err(e) => Flash::error(e.to_string()),
    };

    let _ = push_flash(&session, &flash).await;
    Ok(Redirect::to("/admin/products"))
}

/// Delete a product.
///
/// POST /admin/products/{id}/delete
#[instrument(skip(state, session))]
async fn delete(
    RequireStoreAdmin(_user): RequireStoreAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    let repo = ProductRepository::new(state.pool());

    let flash = match repo.delete(ProductId::new(id)).await {
        Ok(()) => Flash::success("Product deleted"),
        Err(RepositoryError::NotFound) => Flash::error("Product not found"),
        Err(e) => return Err(e.into()),
    };

    let _ = push_flash(&session, &flash).await;
    Ok(Redirect::to("/admin/products"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_plain() {
        assert_eq!(parse_price("4.99"), Some(Price::from_cents(499)));
    }

    #[test]
    fn test_parse_price_dollar_sign() {
        assert_eq!(parse_price(" $12.50 "), Some(Price::from_cents(1250)));
    }

    #[test]
    fn test_parse_price_rejects_garbage() {
        assert_eq!(parse_price("free"), None);
        assert_eq!(parse_price(""), None);
    }

    #[test]
    fn test_parse_price_rejects_negative() {
        assert_eq!(parse_price("-5"), None);
        assert_eq!(parse_price("-0.01"), None);
        assert_eq!(parse_price("$-2.50"), None);
    }
}
