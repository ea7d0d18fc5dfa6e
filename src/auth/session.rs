use actix_session::Session;

use crate::errors::AppError;
use crate::workspace::{SessionRegistry, SharedWorkspace};

use super::csrf::generate_token;

const WORKSPACE_KEY: &str = "workspace_id";

/// Workspace id stored in the cookie, if this browser already has one.
pub fn workspace_id(session: &Session) -> Option<String> {
    session.get::<String>(WORKSPACE_KEY).unwrap_or(None)
}

/// The workspace of this browser session, created on first use.
pub fn current_workspace(
    session: &Session,
    registry: &SessionRegistry,
) -> Result<SharedWorkspace, AppError> {
    let id = match workspace_id(session) {
        Some(id) => id,
        None => {
            let id = generate_token();
            session
                .insert(WORKSPACE_KEY, &id)
                .map_err(|e| AppError::Session(format!("Failed to store workspace id: {e}")))?;
            id
        }
    };
    Ok(registry.get_or_create(&id))
}

/// True when this browser's workspace holds a logged-in session.
pub async fn is_authenticated(session: &Session, registry: &SessionRegistry) -> bool {
    let Some(id) = workspace_id(session) else {
        return false;
    };
    match registry.get(&id) {
        Some(ws) => ws.lock().await.auth.is_authenticated(),
        None => false,
    }
}
