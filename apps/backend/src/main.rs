use actix_web::{web, App, HttpServer};
use gamehub::config::db::DbProfile;
use gamehub::config::lifecycle::LifecycleConfig;
use gamehub::infra::state::build_state;
use gamehub::routes;
use gamehub::state::security_config::SecurityConfig;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment.
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
    {
        Ok(port) => port,
        Err(_) => {
            error!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        }
    };

    let security_config = match SecurityConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid security configuration");
            std::process::exit(1);
        }
    };
    let lifecycle_config = match LifecycleConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid lifecycle configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_db(DbProfile::Prod)
        .with_security(security_config)
        .with_lifecycle(lifecycle_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        %host,
        port,
        min_players = lifecycle_config.min_players,
        "Starting gamehub backend"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
