//! Project endpoints: listing, creation, and transactional deletion.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::projects::Projects;
use crate::libs::error::AppError;
use crate::libs::project::Project;
use crate::server::response::ApiResponse;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProjectRequest {
    pub id: Uuid,
    pub should_delete_work_entries: bool,
}

pub async fn all(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db_path = state.db_path.clone();
    let projects = web::block(move || Projects::new(&db_path)?.fetch_all()).await??;
    Ok(ApiResponse::ok(projects))
}

pub async fn create(state: web::Data<AppState>, body: web::Json<CreateProjectRequest>) -> Result<HttpResponse, AppError> {
    let name = body.into_inner().name;
    if name.trim().is_empty() {
        return Err(AppError::validation("name must not be empty"));
    }

    let db_path = state.db_path.clone();
    let project = web::block(move || {
        let mut projects = Projects::new(&db_path)?;
        if projects.fetch_by_name(&name)?.is_some() {
            return Err(AppError::BusinessRule("Project already exists".to_string()));
        }
        let project = Project::new(&name);
        projects.insert(&project)?;
        Ok(project)
    })
    .await??;

    Ok(ApiResponse::ok(project))
}

pub async fn delete(state: web::Data<AppState>, body: web::Json<DeleteProjectRequest>) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    let db_path = state.db_path.clone();
    let project = web::block(move || Projects::new(&db_path)?.delete(&request.id, request.should_delete_work_entries)).await??;
    Ok(ApiResponse::ok(project))
}
