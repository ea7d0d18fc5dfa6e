pub mod auth_handlers;
pub mod table_handlers;

use actix_web::HttpResponse;

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}
