//! Pickup order route handlers (store admin, read/transition only).

use askama::Template;
use axum::{
    Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use curbside_core::{OrderId, OrderStatus};

use crate::db::{OrderRepository, RepositoryError};
use crate::error::AppError;
use crate::filters;
use crate::middleware::auth::RequireStoreAdmin;
use crate::middleware::{push_flash, take_flash};
use crate::models::{Flash, OrderItem, OrderListEntry, order::order_total};
use crate::state::AppState;

use super::dashboard::{FlashView, UserView};

/// Order row view for listing tables and the pickup queue.
#[derive(Debug, Clone)]
pub struct OrderRowView {
    pub id: i32,
    pub reference: String,
    pub customer_name: String,
    pub placed_on: String,
    pub status: String,
    pub status_value: String,
    pub total: String,
}

impl From<&OrderListEntry> for OrderRowView {
    fn from(entry: &OrderListEntry) -> Self {
        Self {
            id: entry.order.id.as_i32(),
            reference: entry.order.reference.clone(),
            customer_name: entry.order.customer_name.clone(),
            placed_on: entry.order.placed_on.format("%b %-d, %Y").to_string(),
            status: entry.order.status.label().to_string(),
            status_value: entry.order.status.as_str().to_string(),
            total: entry.total.display(),
        }
    }
}

/// Line item view for the order detail page.
#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&OrderItem> for OrderItemView {
    fn from(item: &OrderItem) -> Self {
        Self {
            product_name: item.product_name.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price.display(),
            line_total: item.line_total().display(),
        }
    }
}

/// Status option for the filter dropdown and transition buttons.
#[derive(Debug, Clone)]
pub struct StatusOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

fn status_options(selected: Option<OrderStatus>) -> Vec<StatusOption> {
    OrderStatus::ALL
        .into_iter()
        .map(|s| StatusOption {
            value: s.as_str().to_string(),
            label: s.label().to_string(),
            selected: selected == Some(s),
        })
        .collect()
}

/// Orders page template.
#[derive(Template)]
#[template(path = "orders/index.html")]
struct OrdersIndexTemplate {
    user: UserView,
    current_path: String,
    flash: FlashView,
    orders: Vec<OrderRowView>,
    statuses: Vec<StatusOption>,
    search: String,
}

/// Order detail template.
#[derive(Template)]
#[template(path = "orders/show.html")]
struct OrderShowTemplate {
    user: UserView,
    current_path: String,
    flash: FlashView,
    order: OrderRowView,
    items: Vec<OrderItemView>,
    statuses: Vec<StatusOption>,
}

/// Listing filter parameters.
#[derive(Debug, Deserialize, Default)]
pub struct OrderFilter {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub status: String,
}

/// Status transition form.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    status: String,
}

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/orders", get(index))
        .route("/admin/orders/{id}", get(show))
        .route("/admin/orders/{id}/status", post(update_status))
}

/// Order listing with status and search filters.
///
/// GET /admin/orders
#[instrument(skip(user, state, session))]
async fn index(
    RequireStoreAdmin(user): RequireStoreAdmin,
    State(state): State<AppState>,
    session: Session,
    Query(filter): Query<OrderFilter>,
) -> Result<Html<String>, AppError> {
    let repo = OrderRepository::new(state.pool());

    // An unknown status value filters nothing rather than erroring
    let status = filter.status.parse::<OrderStatus>().ok();
    let search = filter.q.trim();

    let orders = repo
        .list(status, (!search.is_empty()).then_some(search))
        .await?;

    let template = OrdersIndexTemplate {
        user: UserView::from(&user),
        current_path: "/admin/orders".to_string(),
        flash: FlashView::from(take_flash(&session).await),
        orders: orders.iter().map(OrderRowView::from).collect(),
        statuses: status_options(status),
        search: search.to_string(),
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Order detail with line items and the computed total.
///
/// GET /admin/orders/{id}
#[instrument(skip(user, state, session))]
async fn show(
    RequireStoreAdmin(user): RequireStoreAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let repo = OrderRepository::new(state.pool());

    let (order, items) = repo
        .get_with_items(OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    let total = order_total(&items);
    let entry = OrderListEntry { order, total };

    let template = OrderShowTemplate {
        user: UserView::from(&user),
        current_path: "/admin/orders".to_string(),
        flash: FlashView::from(take_flash(&session).await),
        order: OrderRowView::from(&entry),
        items: items.iter().map(OrderItemView::from).collect(),
        statuses: status_options(Some(entry.order.status)),
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Transition an order's status.
///
/// POST /admin/orders/{id}/status
#[instrument(skip(state, session, form))]
async fn update_status(
    RequireStoreAdmin(_user): RequireStoreAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    axum::Form(form): axum::Form<StatusForm>,
) -> Result<Redirect, AppError> {
    let repo = OrderRepository::new(state.pool());

    let flash = match form.status.parse::<OrderStatus>() {
        Ok(status) => match repo.update_status(OrderId::new(id), status).await {
            Ok(order) => Flash::success(format!("{} is now {}", order.reference, status.label())),
            Err(RepositoryError::NotFound) => Flash::error("Order not found"),
            Err(e) => return Err(e.into()),
        },
        Err(e) => Flash::error(e.to_string()),
    };

    let _ = push_flash(&session, &flash).await;
    Ok(Redirect::to(&format!("/admin/orders/{id}")))
}
