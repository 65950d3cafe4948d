// src/main.rs
use actix_web::{ middleware, web, App, HttpServer };
use env_logger::Env;
use governor::RateLimiter;
use log::info;
use samp_directory::config::Config;
use samp_directory::handlers::{ self, servers::ServerRateLimiters };
use samp_directory::storage::{ memory::ServerStorage, ServerStore };
use std::sync::Arc;
use std::time::Duration;

fn invalid_config(what: &str) -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        format!("Invalid {} rate limit: period and burst must be non-zero", what)
    )
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    // Initialize logger only once at the start
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let bind = config.bind();

    let storage: Arc<dyn ServerStore> = Arc::new(ServerStorage::new(&config));
    let storage = web::Data::from(storage);

    // Lookups already hide expired entries; this only reclaims their memory.
    let sweeper = storage.clone();
    let sweep_every = Duration::from_secs(config.server_timeout_secs.max(1));
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(sweep_every);
        loop {
            interval.tick().await;
            sweeper.cleanup_stale_servers();
        }
    });

    let get_quota = config.server_get_quota().ok_or_else(|| invalid_config("server get"))?;
    let post_quota = config.server_post_quota().ok_or_else(|| invalid_config("server post"))?;
    let rate_limiters = web::Data::new(ServerRateLimiters {
        get: RateLimiter::keyed(get_quota),
        post: RateLimiter::keyed(post_quota),
    });

    info!(
        "Starting server on {} (max {} servers, {}s timeout)",
        bind,
        config.max_servers,
        config.server_timeout_secs
    );
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(storage.clone())
            .app_data(rate_limiters.clone())
            .configure(handlers::configure)
    })
        .bind(&bind)?
        .run().await
}
