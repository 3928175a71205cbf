//! HTTP surface of the worklog service.
//!
//! Thin request/response adapters over the database layer: handlers
//! validate input, move SQLite work onto the blocking pool, and wrap
//! results in the uniform response envelope. Routes are registered through
//! [`routes`] so integration tests can mount the exact production surface.

pub mod error;
pub mod projects;
pub mod reports;
pub mod response;
pub mod work;

use std::path::{Path, PathBuf};

use actix_web::{web, App, HttpServer};

use crate::db::projects::Projects;
use crate::libs::error::AppError;
use crate::libs::messages::Message;
use crate::msg_info;

/// Shared per-worker state: the database file every request-scoped
/// connection is opened against.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db_path: PathBuf,
}

/// Registers all API routes under the common `/api` prefix, together with
/// the extractor error handlers that keep failures in the uniform shape.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/project")
                        .route("/all", web::get().to(projects::all))
                        .route("/create", web::post().to(projects::create))
                        .route("/delete", web::delete().to(projects::delete)),
                )
                .service(
                    web::scope("/work")
                        .route("/all", web::post().to(work::load))
                        .route("/create", web::post().to(work::create))
                        .route("/update", web::put().to(work::update))
                        .route("/delete", web::delete().to(work::delete))
                        .route("/statistics", web::post().to(work::statistics))
                        .route("/years", web::get().to(work::years)),
                )
                .service(web::scope("/report").route("/generate", web::post().to(reports::generate))),
        );
}

/// Ensures the default project exists, creating it when absent. Runs once
/// at startup before the listener binds; safe to call repeatedly.
pub fn seed_default_project(db_path: &Path) -> Result<(), AppError> {
    let (_, created) = Projects::new(db_path)?.ensure_default()?;
    if created {
        msg_info!(Message::DefaultProjectCreated);
    } else {
        msg_info!(Message::DefaultProjectExists);
    }
    Ok(())
}

/// Seeds the database and runs the HTTP server until shutdown.
pub async fn run(port: u16, db_path: PathBuf) -> anyhow::Result<()> {
    seed_default_project(&db_path)?;

    let state = web::Data::new(AppState { db_path });
    msg_info!(Message::ServerListening(format!("http://127.0.0.1:{}", port)));

    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
    .bind(("127.0.0.1", port))?
    .run()
    .await?;

    Ok(())
}
