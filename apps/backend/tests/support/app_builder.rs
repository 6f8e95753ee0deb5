use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};
use backend::config::ServerConfig;
use backend::middleware::RequestTrace;
use backend::routes;
use backend::state::AppState;

/// Seeded config so dealt cards repeat across runs.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        game_seed: Some(0x5eed),
        ..ServerConfig::default()
    }
}

/// In-process app with the production route table and middleware.
pub async fn create_test_app(
    state: web::Data<AppState>,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(state)
            .wrap(RequestTrace)
            .configure(routes::configure),
    )
    .await
}
