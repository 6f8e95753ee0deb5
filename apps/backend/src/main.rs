use actix_web::{web, App, HttpServer};
use backend::config::ServerConfig;
use backend::middleware::request_trace::RequestTrace;
use backend::routes;
use backend::state::app_state::AppState;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };
    info!(
        host = %config.host,
        port = config.port,
        seeded = config.game_seed.is_some(),
        "Starting Vetrolisci backend"
    );

    let bind = (config.host.clone(), config.port);
    let data = web::Data::new(AppState::new(config));

    HttpServer::new(move || {
        App::new()
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind(bind)?
    .run()
    .await
}
