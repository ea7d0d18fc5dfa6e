use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web,
};

use crate::workspace::SessionRegistry;

use super::session::is_authenticated;

/// Middleware function that checks for an authenticated workspace.
/// Redirects to /login otherwise.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let session = req.get_session();
    let authenticated = match req.app_data::<web::Data<SessionRegistry>>() {
        Some(registry) => is_authenticated(&session, registry).await,
        None => false,
    };

    if !authenticated {
        let response = HttpResponse::SeeOther()
            .insert_header(("Location", "/login"))
            .finish();
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}
