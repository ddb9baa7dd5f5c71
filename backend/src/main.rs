mod config;
mod gemini;
mod routes;
mod upload;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use config::AppConfig;
use gemini::GeminiService;
use routes::configure_routes;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    } else {
        log::error!("Failed to get the current working directory.");
    }

    let config = AppConfig::from_env();
    if config.gemini_configured() {
        log::info!(
            "Gemini configured (identification: {}, segmentation: {})",
            config.identification_model,
            config.segmentation_model
        );
    } else {
        log::warn!(
            "GEMINI_API_KEY environment variable is not set. Identification and segmentation requests will fail."
        );
    }

    let gemini = GeminiService::new(&config);
    let frontend_dir = config.frontend_dir.clone();
    let bind_address = format!("0.0.0.0:{}", config.port);

    log::info!("Serving frontend from {}", frontend_dir);
    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(web::Data::new(gemini.clone()))
            .app_data(web::Data::new(config.clone()))
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
