use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{cookie::Key, web};

use crate::auth;
use crate::handlers::{auth_handlers, table_handlers};

pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(false)
        .cookie_http_only(true)
        .build()
}

/// All browser-facing routes. Expects `SessionRegistry` and `DocsApi` app data
/// and a session middleware around the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Static files
        .service(actix_files::Files::new("/static", "./static"))
        // Public routes
        .route("/", web::get().to(auth_handlers::root))
        .route("/login", web::get().to(auth_handlers::login_page))
        .route("/login", web::post().to(auth_handlers::login_submit))
        .route("/logout", web::post().to(auth_handlers::logout))
        // Protected routes; /table/rows/new BEFORE /table/rows/{id}/...
        .service(
            web::scope("/table")
                .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                .route("", web::get().to(table_handlers::index))
                .route("/reload", web::post().to(table_handlers::reload))
                .route("/rows/new", web::get().to(table_handlers::new_row))
                .route("/rows", web::post().to(table_handlers::save_row))
                .route("/rows/{id}/edit", web::get().to(table_handlers::edit_row))
                .route("/rows/{id}/delete", web::get().to(table_handlers::confirm_delete))
                .route("/rows/{id}/delete", web::post().to(table_handlers::delete_row))
                .route("/modal/cancel", web::post().to(table_handlers::cancel_modal))
                .route("/delete/cancel", web::post().to(table_handlers::cancel_delete)),
        )
        // Unknown paths go back to the start page
        .default_service(web::to(|| async {
            actix_web::HttpResponse::SeeOther()
                .insert_header(("Location", "/"))
                .finish()
        }));
}
