//! One-shot flash messages carried in the session.
//!
//! A flash is written by the handler that performs an action and consumed
//! by the next page render, so it survives exactly one redirect.

use tower_sessions::Session;

use crate::models::{Flash, session_keys};

/// Store a flash message for the next page render.
///
/// A later flash on the same session replaces an unread one.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn push_flash(
    session: &Session,
    flash: &Flash,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::FLASH, flash).await
}

/// Take the pending flash message, if any, removing it from the session.
///
/// A malformed stored value reads as no flash.
pub async fn take_flash(session: &Session) -> Option<Flash> {
    session
        .remove::<Flash>(session_keys::FLASH)
        .await
        .ok()
        .flatten()
}
