//! App text label route handlers (sysadmin).
//!
//! Labels are keyed UI copy used by the shopper app; keys and descriptions
//! are fixed at seed time, only values are editable here.

use askama::Template;
use axum::{
    Router,
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use curbside_core::LabelId;

use crate::db::{ContentRepository, RepositoryError};
use crate::error::AppError;
use crate::filters;
use crate::middleware::auth::RequireSysAdmin;
use crate::middleware::{push_flash, take_flash};
use crate::models::{AppLabel, Flash};
use crate::state::AppState;

use super::dashboard::{FlashView, UserView};

/// Label row view for templates.
#[derive(Debug, Clone)]
pub struct LabelRowView {
    pub id: i32,
    pub key: String,
    pub value: String,
    pub description: String,
}

impl From<&AppLabel> for LabelRowView {
    fn from(label: &AppLabel) -> Self {
        Self {
            id: label.id.as_i32(),
            key: label.key.clone(),
            value: label.value.clone(),
            description: label.description.clone(),
        }
    }
}

/// Labels page template.
#[derive(Template)]
#[template(path = "labels/index.html")]
struct LabelsIndexTemplate {
    user: UserView,
    current_path: String,
    flash: FlashView,
    labels: Vec<LabelRowView>,
}

/// Label update form.
#[derive(Debug, Deserialize)]
pub struct LabelForm {
    value: String,
}

/// Build the labels router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sysadmin/labels", get(index))
        .route("/sysadmin/labels/{id}", post(update))
}

/// App label listing.
///
/// GET /sysadmin/labels
#[instrument(skip(user, state, session))]
async fn index(
    RequireSysAdmin(user): RequireSysAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, AppError> {
    let repo = ContentRepository::new(state.pool());
    let labels = repo.list_labels().await?;

    let template = LabelsIndexTemplate {
        user: UserView::from(&user),
        current_path: "/sysadmin/labels".to_string(),
        flash: FlashView::from(take_flash(&session).await),
        labels: labels.iter().map(LabelRowView::from).collect(),
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Update a label's value.
///
/// POST /sysadmin/labels/{id}
#[instrument(skip(state, session, form))]
async fn update(
    RequireSysAdmin(_user): RequireSysAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    axum::Form(form): axum::Form<LabelForm>,
) -> Result<Redirect, AppError> {
    let repo = ContentRepository::new(state.pool());

    let value = form.value.trim();
    let flash = if value.is_empty() {
        Flash::error("Label value cannot be empty")
    } else {
        match repo.update_label(LabelId::new(id), value).await {
            Ok(label) => Flash::success(format!("Updated {}", label.key)),
            Err(RepositoryError::NotFound) => Flash::error("Label not found"),
            Err(e) => return Err(e.into()),
        }
    };

    let _ = push_flash(&session, &flash).await;
    Ok(Redirect::to("/sysadmin/labels"))
}
