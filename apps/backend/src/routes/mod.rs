use actix_web::web;

pub mod health;
pub mod rooms;

/// Configure application routes. Tests register the same paths without the
/// outer middleware so endpoint behavior can be exercised directly.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(rooms::configure_routes)
            .configure(health::configure_routes),
    );
}
