//! Category icon route handlers (sysadmin).
//!
//! Icons are seeded; the console only renames them or points them at a
//! different image.

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

use curbside_core::CategoryIconId;

use crate::db::{ContentRepository, RepositoryError};
use crate::error::AppError;
use crate::filters;
use crate::middleware::auth::RequireSysAdmin;
use crate::middleware::{push_flash, take_flash};
use crate::models::{CategoryIcon, Flash};
use crate::state::AppState;

use super::dashboard::{FlashView, UserView};

/// Icon row view for templates.
#[derive(Debug, Clone)]
pub struct IconRowView {
    pub id: i32,
    pub name: String,
    pub image_url: String,
}

impl From<&CategoryIcon> for IconRowView {
    fn from(icon: &CategoryIcon) -> Self {
        Self {
            id: icon.id.as_i32(),
            name: icon.name.clone(),
            image_url: icon.image_url.clone(),
        }
    }
}

/// Icons page template.
#[derive(Template)]
#[template(path = "icons/index.html")]
struct IconsIndexTemplate {
    user: UserView,
    current_path: String,
    flash: FlashView,
    icons: Vec<IconRowView>,
}

/// Icon update form.
#[derive(Debug, Deserialize)]
pub struct IconForm {
    name: String,
    image_url: String,
}

/// Build the icons router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sysadmin/icons", get(index))
        .route("/sysadmin/icons/{id}", post(update))
}

/// Category icon listing.
///
/// GET /sysadmin/icons
#[instrument(skip(user, state, session))]
async fn index(
    RequireSysAdmin(user): RequireSysAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, AppError> {
    let repo = ContentRepository::new(state.pool());
    let icons = repo.list_icons().await?;

    let template = IconsIndexTemplate {
        user: UserView::from(&user),
        current_path: "/sysadmin/icons".to_string(),
        flash: FlashView::from(take_flash(&session).await),
        icons: icons.iter().map(IconRowView::from).collect(),
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Update an icon's name and image URL.
///
/// POST /sysadmin/icons/{id}
#[instrument(skip(state, session, form))]
async fn update(
    RequireSysAdmin(_user): RequireSysAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    axum::Form(form): axum::Form<IconForm>,
) -> Result<Redirect, AppError> {
    let repo = ContentRepository::new(state.pool());

    let name = form.name.trim();
    let image_url = form.image_url.trim();

    let flash = if name.is_empty() || image_url.is_empty() {
        Flash::error("Name and image URL are required")
    } else {
        match repo.update_icon(CategoryIconId::new(id), name, image_url).await {
            Ok(icon) => Flash::success(format!("Updated {}", icon.name)),
            Err(RepositoryError::NotFound) => Flash::error("Icon not found"),
            Err(e) => return Err(e.into()),
        }
    };

    let _ = push_flash(&session, &flash).await;
    Ok(Redirect::to("/sysadmin/icons"))
}
