//! Employee roster route handlers (store admin).
//!
//! All operations are scoped to the signed-in admin's store.

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

use curbside_core::{Email, EmployeeId, EmployeeStatus, StoreId};

use crate::db::{EmployeeRepository, RepositoryError, employees::EmployeeFields};
use crate::error::AppError;
use crate::filters;
use crate::middleware::auth::RequireStoreAdmin;
use crate::middleware::{push_flash, take_flash};
use crate::models::{CurrentUser, Employee, Flash};
use crate::state::AppState;

use super::dashboard::{FlashView, UserView};
use super::products::SearchQuery;

/// Employee row view for templates.
#[derive(Debug, Clone)]
pub struct EmployeeRowView {
    pub id: i32,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub status: String,
    pub is_active: bool,
}

impl From<&Employee> for EmployeeRowView {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.as_i32(),
            name: employee.full_name(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.to_string(),
            phone: employee.phone.clone(),
            position: employee.position.clone(),
            status: employee.status.as_str().to_string(),
            is_active: employee.status == EmployeeStatus::Active,
        }
    }
}

/// Employees page template.
#[derive(Template)]
#[template(path = "employees/index.html")]
struct EmployeesIndexTemplate {
    user: UserView,
    current_path: String,
    flash: FlashView,
    employees: Vec<EmployeeRowView>,
    search: String,
}

/// Employee form fields (create and update share the same shape).
#[derive(Debug, Deserialize)]
pub struct EmployeeForm {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    position: String,
    status: String,
}

impl EmployeeForm {
    fn into_fields(self) -> Result<EmployeeFields, AppError> {
        let email = Email::parse(self.email.trim())
            .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;
        let status = self
            .status
            .parse::<EmployeeStatus>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(EmployeeFields {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email,
            phone: self.phone.trim().to_string(),
            position: self.position.trim().to_string(),
            status,
        })
    }
}

/// The store the signed-in admin manages.
///
/// Sysadmins browsing store screens need a store assignment too; accounts
/// without one can't manage a roster.
fn require_store(user: &CurrentUser) -> Result<StoreId, AppError> {
    user.store_id
        .ok_or_else(|| AppError::Forbidden("no store assigned to this account".to_string()))
}

/// Build the employees router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/employees", get(index).post(create))
        .route("/admin/employees/{id}", post(update))
        .route("/admin/employees/{id}/delete", post(delete))
}

/// Employee roster with optional search.
///
/// GET /admin/employees
#[instrument(skip(user, state, session))]
async fn index(
    RequireStoreAdmin(user): RequireStoreAdmin,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>, AppError> {
    let store_id = require_store(&user)?;
    let repo = EmployeeRepository::new(state.pool());

    let search = query.q.trim();
    let employees = repo
        .list(store_id, (!search.is_empty()).then_some(search))
        .await?;

    let template = EmployeesIndexTemplate {
        user: UserView::from(&user),
        current_path: "/admin/employees".to_string(),
        flash: FlashView::from(take_flash(&session).await),
        employees: employees.iter().map(EmployeeRowView::from).collect(),
        search: search.to_string(),
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Add an employee to the roster.
///
/// POST /admin/employees
#[instrument(skip(user, state, session, form))]
async fn create(
    RequireStoreAdmin(user): RequireStoreAdmin,
    State(state): State<AppState>,
    session: Session,
    axum::Form(form): axum::Form<EmployeeForm>,
) -> Result<Redirect, AppError> {
    let store_id = require_store(&user)?;
    let repo = EmployeeRepository::new(state.pool());

    let flash = match form.into_fields() {
        Ok(fields) => match repo.create(store_id, &fields).await {
            Ok(employee) => Flash::success(format!("Added {}", employee.full_name())),
            Err(RepositoryError::Conflict(msg)) => Flash::error(msg),
            Err(e) => return Err(e.into()),
        },
        Err(e) => Flash::error(e.to_string()),
    };

    let _ = push_flash(&session, &flash).await;
    Ok(Redirect::to("/admin/employees"))
}

/// Update an employee.
///
/// POST /admin/employees/{id}
#[instrument(skip(user, state, session, form))]
async fn update(
    RequireStoreAdmin(user): RequireStoreAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    axum::Form(form): axum::Form<EmployeeForm>,
) -> Result<Redirect, AppError> {
    let store_id = require_store(&user)?;
    let repo = EmployeeRepository::new(state.pool());

    let flash = match form.into_fields() {
        Ok(fields) => match repo.update(EmployeeId::new(id), store_id, &fields).await {
            Ok(employee) => Flash::success(format!("Updated {}", employee.full_name())),
            Err(RepositoryError::NotFound) => Flash::error("Employee not found"),
            Err(RepositoryError::Conflict(msg)) => Flash::error(msg),
            Err(e) => return Err(e.into()),
        },
        Err(e) => Flash::error(e.to_string()),
    };

    let _ = push_flash(&session, &flash).await;
    Ok(Redirect::to("/admin/employees"))
}

/// Remove an employee from the roster.
///
/// POST /admin/employees/{id}/delete
#[instrument(skip(user, state, session))]
async fn delete(
    RequireStoreAdmin(user): RequireStoreAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    let store_id = require_store(&user)?;
    let repo = EmployeeRepository::new(state.pool());

    let flash = match repo.delete(EmployeeId::new(id), store_id).await {
        Ok(()) => Flash::success("Employee removed"),
        Err(RepositoryError::NotFound) => Flash::error("Employee not found"),
        Err(e) => return Err(e.into()),
    };

    let _ = push_flash(&session, &flash).await;
    Ok(Redirect::to("/admin/employees"))
}
