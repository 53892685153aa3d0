//! Store layout section route handlers (sysadmin).

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

use curbside_core::SectionId;

use crate::db::{LayoutRepository, RepositoryError};
use crate::error::AppError;
use crate::filters;
use crate::middleware::auth::RequireSysAdmin;
use crate::middleware::{push_flash, take_flash};
use crate::models::{Flash, LayoutSection, MoveDirection};
use crate::state::AppState;

use super::dashboard::{FlashView, UserView};

/// Section row view for templates.
#[derive(Debug, Clone)]
pub struct SectionRowView {
    pub id: i32,
    pub name: String,
    pub position: i32,
    pub enabled: bool,
    pub is_first: bool,
    pub is_last: bool,
}

/// Layout page template.
#[derive(Template)]
#[template(path = "layout/index.html")]
struct LayoutIndexTemplate {
    user: UserView,
    current_path: String,
    flash: FlashView,
    sections: Vec<SectionRowView>,
}

/// New section form.
#[derive(Debug, Deserialize)]
pub struct SectionForm {
    name: String,
}

/// Move form: `direction` is `up` or `down`.
#[derive(Debug, Deserialize)]
pub struct MoveForm {
    direction: String,
}

fn section_views(sections: &[LayoutSection]) -> Vec<SectionRowView> {
    let last = sections.len().saturating_sub(1);
    sections
        .iter()
        .enumerate()
        .map(|(i, s)| SectionRowView {
            id: s.id.as_i32(),
            name: s.name.clone(),
            position: s.position,
            enabled: s.enabled,
            is_first: i == 0,
            is_last: i == last,
        })
        .collect()
}

/// Build the layout router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sysadmin/layout", get(index).post(create))
        .route("/sysadmin/layout/{id}/toggle", post(toggle))
        .route("/sysadmin/layout/{id}/move", post(shift))
        .route("/sysadmin/layout/{id}/delete", post(delete))
}

/// Layout sections in display order.
///
/// GET /sysadmin/layout
#[instrument(skip(user, state, session))]
async fn index(
    RequireSysAdmin(user): RequireSysAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, AppError> {
    let repo = LayoutRepository::new(state.pool());
    let sections = repo.list().await?;

    let template = LayoutIndexTemplate {
        user: UserView::from(&user),
        current_path: "/sysadmin/layout".to_string(),
        flash: FlashView::from(take_flash(&session).await),
        sections: section_views(&sections),
    };

    Ok(Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    })))
}

/// Append a new section to the layout.
///
/// POST /sysadmin/layout
#[instrument(skip(state, session, form))]
async fn create(
    RequireSysAdmin(_user): RequireSysAdmin,
    State(state): State<AppState>,
    session: Session,
    axum::Form(form): axum::Form<SectionForm>,
) -> Result<Redirect, AppError> {
    let repo = LayoutRepository::new(state.pool());

    let name = form.name.trim();
    let flash = if name.is_empty() {
        Flash::error("Section name cannot be empty")
    } else {
        let section = repo.add(name).await?;
        Flash::success(format!("Added section {}", section.name))
    };

    let _ = push_flash(&session, &flash).await;
    Ok(Redirect::to("/sysadmin/layout"))
}

/// Enable or disable a section.
///
/// POST /sysadmin/layout/{id}/toggle
#[instrument(skip(state, session))]
async fn toggle(
    RequireSysAdmin(_user): RequireSysAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    let repo = LayoutRepository::new(state.pool());

    let flash = match repo.toggle(SectionId::new(id)).await {
        Ok(section) => {
            let verb = if section.enabled { "enabled" } else { "disabled" };
            Flash::success(format!("{} {verb}", section.name))
        }
        Err(RepositoryError::NotFound) => Flash::error("Section not found"),
        Err(e) => return Err(e.into()),
    };

    let _ = push_flash(&session, &flash).await;
    Ok(Redirect::to("/sysadmin/layout"))
}

/// Move a section up or down one position.
///
/// POST /sysadmin/layout/{id}/move
#[instrument(skip(state, session, form))]
async fn shift(
    RequireSysAdmin(_user): RequireSysAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    axum::Form(form): axum::Form<MoveForm>,
) -> Result<Redirect, AppError> {
    let repo = LayoutRepository::new(state.pool());

    let direction = form
        .direction
        .parse::<MoveDirection>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    match repo.shift(SectionId::new(id), direction).await {
        Ok(()) => {}
        Err(RepositoryError::NotFound) => {
            let _ = push_flash(&session, &Flash::error("Section not found")).await;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to("/sysadmin/layout"))
}

/// Remove a section, closing the gap in positions.
///
/// POST /sysadmin/layout/{id}/delete
#[instrument(skip(state, session))]
async fn delete(
    RequireSysAdmin(_user): RequireSysAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    let repo = LayoutRepository::new(state.pool());

    let flash = match repo.delete(SectionId::new(id)).await {
        Ok(()) => Flash::success("Section removed"),
        Err(RepositoryError::NotFound) => Flash::error("Section not found"),
        Err(e) => return Err(e.into()),
    };

    let _ = push_flash(&session, &flash).await;
    Ok(Redirect::to("/sysadmin/layout"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use curbside_core::SectionId;

    fn section(id: i32, position: i32) -> LayoutSection {
        LayoutSection {
            id: SectionId::new(id),
            name: format!("Section {id}"),
            position,
            enabled: true,
        }
    }

    #[test]
    fn test_section_views_mark_edges() {
        let sections = vec![section(1, 0), section(2, 1), section(3, 2)];
        let views = section_views(&sections);

        assert!(views[0].is_first && !views[0].is_last);
        assert!(!views[1].is_first && !views[1].is_last);
        assert!(!views[2].is_first && views[2].is_last);
    }

    #[test]
    fn test_single_section_is_both_edges() {
        let views = section_views(&[section(1, 0)]);
        assert!(views[0].is_first && views[0].is_last);
    }
}
