use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use docdesk::api::{ApiClient, HttpTransport};
use docdesk::config::AppConfig;
use docdesk::routes;
use docdesk::workspace::{self, SessionRegistry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let transport = HttpTransport::new(&config.api_url, config.request_timeout)
        .map_err(std::io::Error::other)?;
    let api = web::Data::new(ApiClient::new(transport));
    log::info!("Using docs API at {}", config.api_url);

    // Session signing key; a generated one means sessions are lost on restart
    let secret_key = match &config.session_key {
        Some(val) => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        None => {
            log::warn!("No usable SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let registry = SessionRegistry::new();
    workspace::spawn_sweeper(registry.clone());
    let registry = web::Data::new(registry);

    log::info!("Starting server at http://{}", config.bind);

    HttpServer::new(move || {
        App::new()
            .wrap(routes::session_middleware(secret_key.clone()))
            .wrap(middleware::Logger::default())
            .app_data(api.clone())
            .app_data(registry.clone())
            .configure(routes::configure)
    })
    .bind(&config.bind)?
    .run()
    .await
}
