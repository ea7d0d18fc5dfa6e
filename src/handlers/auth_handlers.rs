use std::time::Instant;

use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::api::DocsApi;
use crate::auth::{csrf, session};
use crate::errors::{AppError, render};
use crate::pages::{AuthIntent, AuthPage};
use crate::templates_structs::LoginTemplate;
use crate::workspace::SessionRegistry;

use super::see_other;

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

/// GET /
pub async fn root(
    session: Session,
    registry: web::Data<SessionRegistry>,
) -> HttpResponse {
    if session::is_authenticated(&session, &registry).await {
        see_other("/table")
    } else {
        see_other("/login")
    }
}

/// GET /login
/// Anonymous visitors get a blank form without a workspace; one is only
/// created when they submit it.
pub async fn login_page(
    session: Session,
    registry: web::Data<SessionRegistry>,
) -> Result<HttpResponse, AppError> {
    let existing = session::workspace_id(&session).and_then(|id| registry.get(&id));
    let csrf_token = csrf::get_or_create_token(&session);

    let Some(shared) = existing else {
        return render(LoginTemplate::build(&AuthPage::default(), csrf_token, Instant::now()));
    };
    let ws = shared.lock().await;
    if ws.auth.is_authenticated() {
        return Ok(see_other("/table"));
    }
    render(LoginTemplate::build(&ws.auth_page, csrf_token, Instant::now()))
}

/// POST /login
/// The workspace is not locked while the API checks the credentials.
pub async fn login_submit(
    session: Session,
    registry: web::Data<SessionRegistry>,
    api: web::Data<DocsApi>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let shared = session::current_workspace(&session, &registry)?;
    let LoginForm { username, password, .. } = form.into_inner();
    let intent = AuthIntent::LoginRequested { username, password };
    let Some(call) = shared.lock().await.auth_page.begin(intent) else {
        return Ok(see_other("/login"));
    };

    let result = call.run(api.get_ref()).await;

    let mut guard = shared.lock().await;
    let ws = &mut *guard;
    if ws.auth_page.finish(result, &mut ws.auth) {
        ws.mount_table_page();
        Ok(see_other("/table"))
    } else {
        Ok(see_other("/login"))
    }
}

/// POST /logout
pub async fn logout(
    session: Session,
    registry: web::Data<SessionRegistry>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    if let Some(id) = session::workspace_id(&session) {
        if let Some(shared) = registry.get(&id) {
            shared.lock().await.logout();
        }
        registry.remove(&id);
    }
    session.purge();
    log::info!("Session logged out");
    Ok(see_other("/login"))
}
