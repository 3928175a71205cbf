//! Report endpoint: renders entries of a date range into a downloadable
//! CSV or Excel spreadsheet.

use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::work_entries::WorkEntries;
use crate::libs::error::AppError;
use crate::libs::report::{self, Report, ReportFormat};
use crate::server::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    pub project_id: Option<Uuid>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub format: ReportFormat,
}

pub async fn generate(state: web::Data<AppState>, body: web::Json<GenerateReportRequest>) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    if request.start_date > request.end_date {
        return Err(AppError::validation("startDate must not be after endDate"));
    }

    let db_path = state.db_path.clone();
    let format = request.format;
    let bytes = web::block(move || {
        let rows = WorkEntries::new(&db_path)?.fetch_report_rows(request.start_date, request.end_date, request.project_id.as_ref())?;
        Report::build(&rows).to_bytes(format)
    })
    .await??;

    let file_name = report::file_name(format, Utc::now().date_naive());
    Ok(HttpResponse::Ok()
        .content_type(format.content_type())
        .insert_header(("Content-Disposition", format!("attachment; filename={}", file_name)))
        .body(bytes))
}
