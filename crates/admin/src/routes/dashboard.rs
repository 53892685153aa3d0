//! Dashboard route handlers, one per staff role.

use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};
use chrono::Utc;
use tower_sessions::Session;
use tracing::instrument;

use curbside_core::{OrderStatus, Role};

use crate::db::{ContentRepository, EmployeeRepository, LayoutRepository, OrderRepository, ProductRepository};
use crate::filters;
use crate::middleware::auth::{RequireEmployee, RequireStoreAdmin, RequireSysAdmin};
use crate::middleware::take_flash;
use crate::models::{CurrentUser, Flash};
use crate::state::AppState;

use super::orders::OrderRowView;

/// Signed-in user view for templates.
#[derive(Debug, Clone)]
pub struct UserView {
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_sysadmin: bool,
    pub is_store_admin: bool,
}

impl From<&CurrentUser> for UserView {
    fn from(user: &CurrentUser) -> Self {
        Self {
            name: user.full_name(),
            email: user.email.to_string(),
            role: user.role.to_string(),
            is_sysadmin: user.role == Role::SysAdmin,
            is_store_admin: matches!(user.role, Role::SysAdmin | Role::Admin),
        }
    }
}

/// Flash message view for templates. An empty message means no flash.
#[derive(Debug, Clone, Default)]
pub struct FlashView {
    pub css_class: String,
    pub message: String,
}

impl From<Option<Flash>> for FlashView {
    fn from(flash: Option<Flash>) -> Self {
        flash.map_or_else(Self::default, |f| Self {
            css_class: f.level.css_class().to_string(),
            message: f.message,
        })
    }
}

/// Sysadmin dashboard template.
#[derive(Template)]
#[template(path = "dashboard/sysadmin.html")]
struct SysAdminDashboardTemplate {
    user: UserView,
    current_path: String,
    flash: FlashView,
    section_count: usize,
    enabled_section_count: usize,
    icon_count: usize,
    label_count: usize,
}

/// Store admin dashboard template.
#[derive(Template)]
#[template(path = "dashboard/admin.html")]
struct AdminDashboardTemplate {
    user: UserView,
    current_path: String,
    flash: FlashView,
    product_count: usize,
    employee_count: usize,
    pending_today: i64,
    ready_today: i64,
}

/// Employee dashboard template: today's pickup queue.
#[derive(Template)]
#[template(path = "dashboard/employee.html")]
struct EmployeeDashboardTemplate {
    user: UserView,
    current_path: String,
    flash: FlashView,
    queue: Vec<OrderRowView>,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sysadmin", get(sysadmin))
        .route("/admin", get(admin))
        .route("/employee", get(employee))
}

/// Sysadmin dashboard: storefront configuration at a glance.
///
/// GET /sysadmin
#[instrument(skip(user, state, session))]
async fn sysadmin(
    RequireSysAdmin(user): RequireSysAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Html<String> {
    let layout = LayoutRepository::new(state.pool());
    let content = ContentRepository::new(state.pool());

    let sections = layout.list().await.unwrap_or_else(|e| {
        tracing::error!("Failed to fetch layout sections: {e}");
        vec![]
    });
    let icons = content.list_icons().await.unwrap_or_else(|e| {
        tracing::error!("Failed to fetch icons: {e}");
        vec![]
    });
    let labels = content.list_labels().await.unwrap_or_else(|e| {
        tracing::error!("Failed to fetch labels: {e}");
        vec![]
    });

    let template = SysAdminDashboardTemplate {
        user: UserView::from(&user),
        current_path: "/sysadmin".to_string(),
        flash: FlashView::from(take_flash(&session).await),
        section_count: sections.len(),
        enabled_section_count: sections.iter().filter(|s| s.enabled).count(),
        icon_count: icons.len(),
        label_count: labels.len(),
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}

/// Store admin dashboard: catalog and pickup metrics.
///
/// GET /admin
#[instrument(skip(user, state, session))]
async fn admin(
    RequireStoreAdmin(user): RequireStoreAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Html<String> {
    let products = ProductRepository::new(state.pool());
    let orders = OrderRepository::new(state.pool());

    let today = Utc::now().date_naive();

    let product_count = products.list(None).await.map(|p| p.len()).unwrap_or_else(|e| {
        tracing::error!("Failed to fetch products: {e}");
        0
    });
    let pending_today = orders
        .count_by_status_on(today, OrderStatus::Pending)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to count pending orders: {e}");
            0
        });
    let ready_today = orders
        .count_by_status_on(today, OrderStatus::Ready)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to count ready orders: {e}");
            0
        });

    let employee_count = match user.store_id {
        Some(store_id) => EmployeeRepository::new(state.pool())
            .list(store_id, None)
            .await
            .map(|e| e.len())
            .unwrap_or_else(|e| {
                tracing::error!("Failed to fetch employees: {e}");
                0
            }),
        None => 0,
    };

    let template = AdminDashboardTemplate {
        user: UserView::from(&user),
        current_path: "/admin".to_string(),
        flash: FlashView::from(take_flash(&session).await),
        product_count,
        employee_count,
        pending_today,
        ready_today,
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}

/// Employee dashboard: orders still waiting to be picked or handed over.
///
/// GET /employee
#[instrument(skip(user, state, session))]
async fn employee(
    RequireEmployee(user): RequireEmployee,
    State(state): State<AppState>,
    session: Session,
) -> Html<String> {
    let orders = OrderRepository::new(state.pool());

    let mut queue = orders
        .list(Some(OrderStatus::Pending), None)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to fetch pending orders: {e}");
            vec![]
        });
    let ready = orders
        .list(Some(OrderStatus::Ready), None)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to fetch ready orders: {e}");
            vec![]
        });
    queue.extend(ready);

    let template = EmployeeDashboardTemplate {
        user: UserView::from(&user),
        current_path: "/employee".to_string(),
        flash: FlashView::from(take_flash(&session).await),
        queue: queue.iter().map(OrderRowView::from).collect(),
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}
