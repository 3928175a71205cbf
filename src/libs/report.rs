//! Spreadsheet report generation for external analysis.
//!
//! Renders a set of work entries into a tabular time report with one row per
//! entry (date, project, start, end, duration) and a closing total row. Two
//! output formats are supported:
//!
//! - **CSV**: universal compatibility with spreadsheet applications
//! - **Excel**: formatted headers, bold totals, and auto-sized columns
//!
//! Reports are built entirely in memory and returned as raw bytes so the
//! HTTP layer can stream them as a download attachment.

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};
use serde::Deserialize;

use crate::libs::error::AppError;
use crate::libs::work_entry::WorkEntry;

/// Supported report output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Csv,
    Xlsx,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Xlsx => "xlsx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "text/csv",
            ReportFormat::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }
}

const REPORT_HEADERS: [&str; 5] = ["Date", "Project", "Start Time", "End Time", "Duration (hours)"];

/// One formatted report line.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub date: String,
    pub project: String,
    pub start: String,
    pub end: String,
    pub hours: f64,
}

/// An in-memory time report ready for serialization.
pub struct Report {
    rows: Vec<ReportRow>,
    total_hours: f64,
}

impl Report {
    /// Builds report rows from entries paired with their project names.
    /// Entries are expected in ascending start-time order.
    pub fn build(entries: &[(WorkEntry, String)]) -> Self {
        let rows: Vec<ReportRow> = entries
            .iter()
            .map(|(entry, project_name)| ReportRow {
                date: entry.start_time.format("%Y-%m-%d").to_string(),
                project: project_name.clone(),
                start: entry.start_time.format("%H:%M").to_string(),
                end: entry.end_time.format("%H:%M").to_string(),
                hours: entry.duration_hours(),
            })
            .collect();
        let total_hours = rows.iter().map(|row| row.hours).sum();

        Report { rows, total_hours }
    }

    pub fn total_hours(&self) -> f64 {
        self.total_hours
    }

    /// Serializes the report in the requested format.
    pub fn to_bytes(&self, format: ReportFormat) -> Result<Vec<u8>, AppError> {
        match format {
            ReportFormat::Csv => self.write_csv(),
            ReportFormat::Xlsx => self.write_xlsx(),
        }
    }

    fn write_csv(&self) -> Result<Vec<u8>, AppError> {
        let mut wtr = csv::Writer::from_writer(Vec::new());

        wtr.write_record(REPORT_HEADERS).map_err(AppError::internal)?;
        for row in &self.rows {
            wtr.write_record(&[
                row.date.clone(),
                row.project.clone(),
                row.start.clone(),
                row.end.clone(),
                format!("{:.2}", row.hours),
            ])
            .map_err(AppError::internal)?;
        }
        wtr.write_record(&[
            "Total".to_string(),
            String::new(),
            String::new(),
            String::new(),
            format!("{:.2}", self.total_hours),
        ])
        .map_err(AppError::internal)?;

        wtr.into_inner().map_err(AppError::internal)
    }

    fn write_xlsx(&self) -> Result<Vec<u8>, AppError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Time Report").map_err(AppError::internal)?;

        let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);
        let total_format = Format::new().set_bold();

        for (col, header) in REPORT_HEADERS.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *header, &header_format)
                .map_err(AppError::internal)?;
        }

        let mut row_idx = 1;
        for row in &self.rows {
            worksheet.write_string(row_idx, 0, &row.date).map_err(AppError::internal)?;
            worksheet.write_string(row_idx, 1, &row.project).map_err(AppError::internal)?;
            worksheet.write_string(row_idx, 2, &row.start).map_err(AppError::internal)?;
            worksheet.write_string(row_idx, 3, &row.end).map_err(AppError::internal)?;
            worksheet
                .write_string(row_idx, 4, &format!("{:.2}", row.hours))
                .map_err(AppError::internal)?;
            row_idx += 1;
        }

        worksheet
            .write_string_with_format(row_idx, 0, "Total", &total_format)
            .map_err(AppError::internal)?;
        worksheet
            .write_string_with_format(row_idx, 4, &format!("{:.2}", self.total_hours), &total_format)
            .map_err(AppError::internal)?;

        worksheet.autofit();

        workbook.save_to_buffer().map_err(AppError::internal)
    }
}

/// Attachment file name for a report generated on `date`.
pub fn file_name(format: ReportFormat, date: NaiveDate) -> String {
    format!("time_report_{}.{}", date.format("%Y-%m-%d"), format.extension())
}
