//! Work entry endpoints: CRUD, month-window pagination, and statistics.

use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::projects::Projects;
use crate::db::work_entries::WorkEntries;
use crate::libs::error::AppError;
use crate::libs::pagination::{LoadMoreRequest, MonthWindow, Page};
use crate::libs::statistics::{self, StatisticsRequest};
use crate::libs::work_entry::{validate_interval, validate_update, WorkEntry};
use crate::server::response::ApiResponse;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkEntryRequest {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub project_id: Uuid,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteWorkEntryQuery {
    pub id: Uuid,
}

/// POST /work/all: one month-window page of entries, newest first.
pub async fn load(state: web::Data<AppState>, body: web::Json<LoadMoreRequest>) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    request.validate()?;

    let window = MonthWindow::compute(request.month_cursor, request.months_to_load(), Utc::now().date_naive());
    let db_path = state.db_path.clone();
    let page = web::block(move || {
        let mut entries = WorkEntries::new(&db_path)?;
        let items = entries.fetch_window(&window)?;
        let has_more = entries.has_entries_before(window.start)?;
        Ok::<_, AppError>(Page::new(items, &window, has_more))
    })
    .await??;

    Ok(ApiResponse::ok(page))
}

pub async fn create(state: web::Data<AppState>, body: web::Json<CreateWorkEntryRequest>) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    validate_interval(request.start_time, request.end_time)?;

    let db_path = state.db_path.clone();
    let entry = web::block(move || {
        Projects::new(&db_path)?
            .fetch(&request.project_id)?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        let entry = WorkEntry::new(request.start_time, request.end_time, request.project_id, &request.description);
        WorkEntries::new(&db_path)?.insert(&entry)?;
        Ok::<_, AppError>(entry)
    })
    .await??;

    Ok(ApiResponse::ok(entry))
}

pub async fn update(state: web::Data<AppState>, body: web::Json<WorkEntry>) -> Result<HttpResponse, AppError> {
    let entry = body.into_inner();
    validate_update(&entry, Utc::now())?;

    let db_path = state.db_path.clone();
    let entry = web::block(move || {
        Projects::new(&db_path)?
            .fetch(&entry.project_id)?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
        WorkEntries::new(&db_path)?.update(&entry)
    })
    .await??;

    Ok(ApiResponse::ok(entry))
}

pub async fn delete(state: web::Data<AppState>, query: web::Query<DeleteWorkEntryQuery>) -> Result<HttpResponse, AppError> {
    let id = query.into_inner().id;
    let db_path = state.db_path.clone();
    let entry = web::block(move || WorkEntries::new(&db_path)?.delete(&id)).await??;
    Ok(ApiResponse::ok(entry))
}

/// POST /work/statistics: zero-filled bucket aggregation for one period.
pub async fn statistics(state: web::Data<AppState>, body: web::Json<StatisticsRequest>) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    request.validate()?;

    let db_path = state.db_path.clone();
    let items = web::block(move || {
        let mut entries = WorkEntries::new(&db_path)?;
        let scanned = match request.range() {
            Some((start, end)) => entries.fetch_between(start, end, request.project_id.as_ref())?,
            None => entries.fetch_all(request.project_id.as_ref())?,
        };
        Ok::<_, AppError>(statistics::aggregate(&request, &scanned))
    })
    .await??;

    Ok(ApiResponse::ok(items))
}

/// GET /work/years: distinct calendar years with recorded entries.
pub async fn years(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db_path = state.db_path.clone();
    let years = web::block(move || WorkEntries::new(&db_path)?.years()).await??;
    Ok(ApiResponse::ok(years))
}
