//! Authentication middleware and extractors.
//!
//! Provides a pure authorization decision function plus extractors for
//! requiring a signed-in user with a given role in route handlers.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use curbside_core::Role;

use crate::models::{CurrentUser, session_keys};

/// Roles allowed to reach system administration screens.
pub const SYSADMIN_ROLES: &[Role] = &[Role::SysAdmin];

/// Roles allowed to reach store administration screens.
pub const STORE_ADMIN_ROLES: &[Role] = &[Role::SysAdmin, Role::Admin];

/// Roles allowed to reach the employee order screens.
pub const EMPLOYEE_ROLES: &[Role] = &[Role::SysAdmin, Role::Admin, Role::Employee];

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The user may proceed.
    Granted,
    /// Nobody is signed in; send them to the login page.
    SignIn,
    /// Signed in but the role doesn't permit this screen.
    Denied,
}

/// Decide whether a (possibly anonymous) user may access a screen
/// restricted to the given roles.
#[must_use]
pub fn authorize(user: Option<&CurrentUser>, allowed: &[Role]) -> Access {
    match user {
        None => Access::SignIn,
        Some(u) if u.has_role(allowed) => Access::Granted,
        Some(_) => Access::Denied,
    }
}

/// Error returned when authentication or a role is required.
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Redirect to the unauthorized page (for HTML requests).
    RedirectToUnauthorized,
    /// Unauthorized response (for API requests).
    Unauthorized,
    /// Forbidden response (for API requests).
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::RedirectToUnauthorized => Redirect::to("/unauthorized").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::Forbidden => StatusCode::FORBIDDEN.into_response(),
        }
    }
}

async fn extract_with_roles(
    parts: &mut Parts,
    allowed: &[Role],
) -> Result<CurrentUser, AuthRejection> {
    // Get the session from extensions (set by SessionManagerLayer)
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(AuthRejection::Unauthorized)?;

    let is_api = parts.uri.path().starts_with("/api/");

    // A malformed session value reads as anonymous
    let user: Option<CurrentUser> = session
        .get(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten();

    match (authorize(user.as_ref(), allowed), user) {
        (Access::Granted, Some(user)) => Ok(user),
        (Access::SignIn | Access::Granted, _) => Err(if is_api {
            AuthRejection::Unauthorized
        } else {
            AuthRejection::RedirectToLogin
        }),
        (Access::Denied, _) => Err(if is_api {
            AuthRejection::Forbidden
        } else {
            AuthRejection::RedirectToUnauthorized
        }),
    }
}

/// Extractor that requires a signed-in system administrator.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireSysAdmin(user): RequireSysAdmin) -> impl IntoResponse {
///     format!("Hello, {}!", user.full_name())
/// }
/// ```
pub struct RequireSysAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireSysAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_with_roles(parts, SYSADMIN_ROLES).await.map(Self)
    }
}

/// Extractor that requires a store administrator (or system administrator).
pub struct RequireStoreAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireStoreAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_with_roles(parts, STORE_ADMIN_ROLES).await.map(Self)
    }
}

/// Extractor that requires any staff role (employee and up).
pub struct RequireEmployee(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireEmployee
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_with_roles(parts, EMPLOYEE_ROLES).await.map(Self)
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike the `Require*` extractors, this never rejects the request.
pub struct OptionalUser(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Helper to set the current user in the session.
///
/// A second sign-in on the same session overwrites the first.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current user from the session (sign-out).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use curbside_core::{Email, StoreId, UserId};

    fn user_with_role(role: Role) -> CurrentUser {
        CurrentUser {
            id: UserId::new(1),
            email: Email::parse("staff@example.com").unwrap(),
            first_name: "Sam".to_string(),
            last_name: "Rivera".to_string(),
            role,
            store_id: Some(StoreId::new(1)),
        }
    }

    #[test]
    fn test_anonymous_must_sign_in() {
        assert_eq!(authorize(None, EMPLOYEE_ROLES), Access::SignIn);
        assert_eq!(authorize(None, SYSADMIN_ROLES), Access::SignIn);
    }

    #[test]
    fn test_matching_role_granted() {
        let user = user_with_role(Role::Employee);
        assert_eq!(authorize(Some(&user), EMPLOYEE_ROLES), Access::Granted);
    }

    #[test]
    fn test_wrong_role_denied() {
        let user = user_with_role(Role::Employee);
        assert_eq!(authorize(Some(&user), STORE_ADMIN_ROLES), Access::Denied);
        assert_eq!(authorize(Some(&user), SYSADMIN_ROLES), Access::Denied);
    }

    #[test]
    fn test_sysadmin_passes_all_staff_gates() {
        let user = user_with_role(Role::SysAdmin);
        assert_eq!(authorize(Some(&user), SYSADMIN_ROLES), Access::Granted);
        assert_eq!(authorize(Some(&user), STORE_ADMIN_ROLES), Access::Granted);
        assert_eq!(authorize(Some(&user), EMPLOYEE_ROLES), Access::Granted);
    }

    #[test]
    fn test_customer_denied_everywhere() {
        let user = user_with_role(Role::Customer);
        assert_eq!(authorize(Some(&user), SYSADMIN_ROLES), Access::Denied);
        assert_eq!(authorize(Some(&user), STORE_ADMIN_ROLES), Access::Denied);
        assert_eq!(authorize(Some(&user), EMPLOYEE_ROLES), Access::Denied);
    }

    #[test]
    fn test_empty_role_list_denies_signed_in_user() {
        let user = user_with_role(Role::SysAdmin);
        assert_eq!(authorize(Some(&user), &[]), Access::Denied);
    }
}
