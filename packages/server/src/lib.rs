#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the job board.
//!
//! Serves the REST API for listing, creating, updating, and deleting
//! jobs, plus the two derived-query endpoints: radius search around a
//! postal code and grouped statistics by topic. Every handler failure is
//! funneled through [`error::ApiError`] into a uniform
//! `{success, message}` JSON envelope.

pub mod error;
mod handlers;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use job_board_database::{DbError, db, run_migrations};
use job_board_geocoder::ZipResolver;
use std::sync::Arc;
use switchy_database::Database;

/// Default Nominatim endpoint used when `GEOCODER_URL` is not set.
const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Shared application state.
pub struct AppState {
    /// Database connection.
    pub db: Arc<dyn Database>,
    /// Postal code resolver with its bounded in-process cache.
    pub geocoder: Arc<ZipResolver>,
}

/// Fatal failures that end the process: startup faults and server
/// runtime errors. Request-path failures never reach this type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Database connection failed at startup.
    #[error("Database connection failed: {0}")]
    Connect(Box<dyn std::error::Error>),

    /// Migrations failed to apply at startup.
    #[error("Migration failed: {0}")]
    Migration(#[from] DbError),

    /// The HTTP server failed to bind or crashed.
    #[error("HTTP server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Starts the job board API server.
///
/// Connects to the database, runs migrations, builds the geocoder, and
/// starts the Actix-Web HTTP server. This is a regular async function —
/// the caller is responsible for providing the async runtime (e.g. via
/// `#[actix_web::main]`) and for deciding what a returned error means
/// for the process.
///
/// # Errors
///
/// Returns [`ServerError`] if the database connection, migrations, or
/// the HTTP server fail.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> Result<(), ServerError> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Connecting to database...");
    let db_conn = db::connect_from_env().await.map_err(ServerError::Connect)?;

    log::info!("Running migrations...");
    run_migrations(db_conn.as_ref()).await?;

    let geocoder_url =
        std::env::var("GEOCODER_URL").unwrap_or_else(|_| DEFAULT_GEOCODER_URL.to_string());

    let state = web::Data::new(AppState {
        db: Arc::from(db_conn),
        geocoder: Arc::new(ZipResolver::new(geocoder_url)),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let environment =
        std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

    log::info!("Starting server on {bind_addr}:{port} in {environment} mode");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            // Malformed JSON bodies get the same envelope as every
            // other validation failure.
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                error::ApiError::Validation(format!("invalid JSON payload: {err}")).into()
            }))
            .service(
                web::scope("/api/v1")
                    .route("/jobs", web::get().to(handlers::jobs))
                    .route("/jobs/new", web::post().to(handlers::new_job))
                    .route("/jobs/{id}", web::put().to(handlers::update_job))
                    .route("/jobs/{id}", web::delete().to(handlers::delete_job))
                    .route(
                        "/jobs/{first}/{second}",
                        web::get().to(handlers::job_or_radius),
                    )
                    .route("/stats/{topic}", web::get().to(handlers::stats)),
            )
            .default_service(web::route().to(handlers::route_not_found))
    })
    .bind((bind_addr, port))?
    .run()
    .await?;

    Ok(())
}
