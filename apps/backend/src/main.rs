use actix_web::{web, App, HttpServer};
use guandan_backend::config::ServerConfig;
use guandan_backend::middleware::cors::cors_middleware;
use guandan_backend::routes;
use guandan_backend::state::app_state::AppState;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let config = ServerConfig::from_env();
    let host = config.host.clone();
    let port = config.port;

    println!("🀄 Starting Guandan Backend on http://{}:{}", host, port);

    let data = web::Data::new(AppState::new(config));

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
