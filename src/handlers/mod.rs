pub mod index;
pub mod servers;

use actix_web::{web, HttpResponse};

/// Registers every route; shared by the binary and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index::index))
        .service(
            web::resource("/servers/{address}")
                .route(web::get().to(servers::get_server))
                .route(web::post().to(servers::post_server))
                .default_service(web::to(|| async { HttpResponse::MethodNotAllowed().finish() })),
        );
}
