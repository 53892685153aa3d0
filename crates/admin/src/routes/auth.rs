//! Authentication route handlers.
//!
//! Email/password sign-in, sign-out, and the unauthorized page.

use askama::Template;
use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::auth::OptionalUser;
use crate::middleware::{clear_current_user, push_flash, set_current_user, take_flash};
use crate::models::Flash;
use crate::services::auth::{AuthError, AuthService, landing_path};
use crate::state::AppState;

use super::dashboard::FlashView;

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginPageTemplate {
    flash: FlashView,
}

/// Unauthorized page template.
#[derive(Template)]
#[template(path = "auth/unauthorized.html")]
struct UnauthorizedTemplate {
    signed_in: bool,
    landing: String,
}

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
        .route("/unauthorized", get(unauthorized))
}

/// Redirect to the current role's landing path, or to login when anonymous.
///
/// GET /
async fn root(OptionalUser(user): OptionalUser) -> Redirect {
    match user {
        Some(user) => Redirect::to(landing_path(user.role)),
        None => Redirect::to("/login"),
    }
}

/// Render the login page.
///
/// Already signed-in users are sent to their landing path.
///
/// GET /login
async fn login_page(OptionalUser(user): OptionalUser, session: Session) -> Response {
    if let Some(user) = user {
        return Redirect::to(landing_path(user.role)).into_response();
    }

    let template = LoginPageTemplate {
        flash: FlashView::from(take_flash(&session).await),
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
    .into_response()
}

/// Verify credentials and establish the session.
///
/// Unknown email and wrong password are deliberately indistinguishable.
///
/// POST /login
#[instrument(skip(state, session, form))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    axum::Form(form): axum::Form<LoginForm>,
) -> Result<Redirect, AppError> {
    let auth = AuthService::new(state.pool());

    match auth.verify_login(&form.email, &form.password).await {
        Ok(user) => {
            set_current_user(&session, &user)
                .await
                .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;
            set_sentry_user(user.id.as_i32(), Some(user.email.as_str()));

            let _ = push_flash(
                &session,
                &Flash::success(format!("Welcome back, {}!", user.first_name)),
            )
            .await;

            tracing::info!(user_id = user.id.as_i32(), role = %user.role, "User signed in");
            Ok(Redirect::to(landing_path(user.role)))
        }
        Err(AuthError::InvalidCredentials) => {
            let _ = push_flash(&session, &Flash::error("Invalid email or password")).await;
            Ok(Redirect::to("/login"))
        }
        Err(AuthError::Repository(e)) => Err(AppError::Database(e)),
        Err(e) => Err(AppError::Internal(e.to_string())),
    }
}

/// Sign out and clear the session identity.
///
/// POST /logout
async fn logout(session: Session) -> Redirect {
    let _ = clear_current_user(&session).await;
    clear_sentry_user();
    let _ = push_flash(&session, &Flash::info("You have been logged out")).await;

    Redirect::to("/login")
}

/// Page shown when a signed-in user lacks the role for a screen.
///
/// GET /unauthorized
async fn unauthorized(OptionalUser(user): OptionalUser) -> Html<String> {
    let template = UnauthorizedTemplate {
        signed_in: user.is_some(),
        landing: user
            .map_or("/login", |u| landing_path(u.role))
            .to_string(),
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}
