use std::collections::HashMap;
use std::time::Instant;

use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::api::DocsApi;
use crate::auth::{csrf, session};
use crate::errors::{AppError, render};
use crate::models::RowField;
use crate::pages::{PendingCall, TableIntent};
use crate::templates_structs::TableTemplate;
use crate::workspace::{SessionRegistry, SharedWorkspace};

use super::auth_handlers::CsrfOnly;
use super::see_other;

/// Run a remote call with the workspace unlocked, then reconcile.
/// Other requests from the same browser see the page busy meanwhile.
async fn complete(shared: &SharedWorkspace, api: &DocsApi, call: Option<PendingCall>) {
    let Some(call) = call else {
        return;
    };
    let outcome = call.run(api).await;
    let mut guard = shared.lock().await;
    let ws = &mut *guard;
    ws.table_page.finish(outcome, &mut ws.table);
}

/// Apply one intent to this browser's table page, then go back to the table.
async fn dispatch(
    session: &Session,
    registry: &SessionRegistry,
    api: &DocsApi,
    intent: TableIntent,
) -> Result<HttpResponse, AppError> {
    let shared = session::current_workspace(session, registry)?;
    let call = {
        let mut guard = shared.lock().await;
        let ws = &mut *guard;
        ws.table_page.begin(intent, &ws.auth, &ws.table)
    };
    complete(&shared, api, call).await;
    Ok(see_other("/table"))
}

/// GET /table
/// Renders the table. The first request after login fetches the rows;
/// requests arriving while that fetch runs render the loading state.
pub async fn index(
    session: Session,
    registry: web::Data<SessionRegistry>,
    api: web::Data<DocsApi>,
) -> Result<HttpResponse, AppError> {
    let shared = session::current_workspace(&session, &registry)?;
    let call = {
        let mut guard = shared.lock().await;
        let ws = &mut *guard;
        ws.table_page.begin_load(&ws.auth)
    };
    complete(&shared, api.get_ref(), call).await;

    let csrf_token = csrf::get_or_create_token(&session);
    let ws = shared.lock().await;
    render(TableTemplate::build(&ws.table_page, &ws.table, csrf_token, Instant::now()))
}

/// POST /table/reload
pub async fn reload(
    session: Session,
    registry: web::Data<SessionRegistry>,
    api: web::Data<DocsApi>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    dispatch(&session, &registry, &api, TableIntent::ReloadRequested).await
}

/// GET /table/rows/new
pub async fn new_row(
    session: Session,
    registry: web::Data<SessionRegistry>,
    api: web::Data<DocsApi>,
) -> Result<HttpResponse, AppError> {
    dispatch(&session, &registry, &api, TableIntent::RowCreateOpened).await
}

/// GET /table/rows/{id}/edit
pub async fn edit_row(
    session: Session,
    registry: web::Data<SessionRegistry>,
    api: web::Data<DocsApi>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    dispatch(&session, &registry, &api, TableIntent::RowEditOpened { id }).await
}

/// POST /table/rows
/// Feeds every changed input through the modal, then asks it to save.
pub async fn save_row(
    session: Session,
    registry: web::Data<SessionRegistry>,
    api: web::Data<DocsApi>,
    form: web::Form<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let submitted = form.get("csrf_token").map(String::as_str).unwrap_or_default();
    csrf::validate_csrf(&session, submitted)?;

    let shared = session::current_workspace(&session, &registry)?;
    let call = {
        let mut guard = shared.lock().await;
        let ws = &mut *guard;
        for (key, value) in &form {
            let Some(field) = RowField::from_key(key) else {
                continue;
            };
            // Untouched inputs are not edits; re-applying a date would drop its time of day.
            if *value == ws.table_page.modal().form_value(field) {
                continue;
            }
            let intent = TableIntent::FieldEdited { field, value: value.clone() };
            ws.table_page.begin(intent, &ws.auth, &ws.table);
        }
        ws.table_page.begin(TableIntent::RowSaveRequested, &ws.auth, &ws.table)
    };
    complete(&shared, api.get_ref(), call).await;
    Ok(see_other("/table"))
}

/// POST /table/modal/cancel
pub async fn cancel_modal(
    session: Session,
    registry: web::Data<SessionRegistry>,
    api: web::Data<DocsApi>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    dispatch(&session, &registry, &api, TableIntent::ModalCancelled).await
}

/// GET /table/rows/{id}/delete
/// Asks for confirmation; nothing is sent to the API yet.
pub async fn confirm_delete(
    session: Session,
    registry: web::Data<SessionRegistry>,
    api: web::Data<DocsApi>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    dispatch(&session, &registry, &api, TableIntent::RowDeleteRequested { id }).await
}

/// POST /table/rows/{id}/delete
/// Deletes only the row whose confirmation is pending; any other id is
/// treated as a fresh delete request.
pub async fn delete_row(
    session: Session,
    registry: web::Data<SessionRegistry>,
    api: web::Data<DocsApi>,
    path: web::Path<String>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    let shared = session::current_workspace(&session, &registry)?;
    let call = {
        let mut guard = shared.lock().await;
        let ws = &mut *guard;
        let intent = if ws.table_page.pending_delete() == Some(id.as_str()) {
            TableIntent::DeleteConfirmed
        } else {
            TableIntent::RowDeleteRequested { id }
        };
        ws.table_page.begin(intent, &ws.auth, &ws.table)
    };
    complete(&shared, api.get_ref(), call).await;
    Ok(see_other("/table"))
}

/// POST /table/delete/cancel
pub async fn cancel_delete(
    session: Session,
    registry: web::Data<SessionRegistry>,
    api: web::Data<DocsApi>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    dispatch(&session, &registry, &api, TableIntent::DeleteCancelled).await
}
