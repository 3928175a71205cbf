//! Time-bucketed statistics over work entries.
//!
//! Builds zero-filled bucket sequences for a requested period and folds the
//! matching work entries into them. Buckets come in three granularities:
//!
//! - **monthly**: one bucket per calendar day of the requested month
//! - **yearly**: twelve buckets, one per month of the requested year
//! - **total**: one bucket per distinct calendar year seen in the entries
//!
//! An entry is attributed entirely to the bucket containing its start time;
//! entries crossing a midnight or month boundary are not split. Durations
//! accumulate as floating-point hours and are only rounded at presentation
//! time.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::libs::error::AppError;
use crate::libs::work_entry::WorkEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatisticsType {
    Monthly,
    Yearly,
    Total,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsRequest {
    #[serde(rename = "type")]
    pub kind: StatisticsType,
    #[serde(default)]
    pub month: u32,
    #[serde(default)]
    pub year: i32,
    pub project_id: Option<Uuid>,
}

/// One aggregated bucket. `date` is the bucket label: `YYYY-MM-DD` for
/// daily buckets, `YYYY-MM` for monthly buckets, `YYYY` for yearly ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsItem {
    pub date: String,
    pub total_hours: f64,
    pub project_id: String,
}

impl StatisticsRequest {
    /// Field checks that must pass before any entries are scanned.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        match self.kind {
            StatisticsType::Monthly => {
                if !(1..=12).contains(&self.month) {
                    errors.push("month must be between 1 and 12".to_string());
                }
                if !(1..=9999).contains(&self.year) {
                    errors.push("year is out of range".to_string());
                }
            }
            StatisticsType::Yearly => {
                if !(1..=9999).contains(&self.year) {
                    errors.push("year is out of range".to_string());
                }
            }
            StatisticsType::Total => {}
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }

    /// Half-open UTC scan range for the requested period, `None` when the
    /// whole history is scanned.
    pub fn range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match self.kind {
            StatisticsType::Monthly => {
                let start = NaiveDate::from_ymd_opt(self.year, self.month, 1)?;
                let end = start.checked_add_months(Months::new(1))?;
                Some((start_of_day(start), start_of_day(end)))
            }
            StatisticsType::Yearly => {
                let start = NaiveDate::from_ymd_opt(self.year, 1, 1)?;
                let end = NaiveDate::from_ymd_opt(self.year + 1, 1, 1)?;
                Some((start_of_day(start), start_of_day(end)))
            }
            StatisticsType::Total => None,
        }
    }
}

/// Folds `entries` into the zero-filled bucket sequence for `request`.
///
/// Entries outside the requested period (or belonging to another project
/// when a filter is set) are ignored, so callers may pass a broader slice
/// than the period itself.
pub fn aggregate(request: &StatisticsRequest, entries: &[WorkEntry]) -> Vec<StatisticsItem> {
    let project_label = request.project_id.map(|id| id.to_string()).unwrap_or_default();

    let matches = |entry: &WorkEntry| match request.project_id {
        Some(id) => entry.project_id == id,
        None => true,
    };

    match request.kind {
        StatisticsType::Monthly => {
            let mut items = month_buckets(request.year, request.month, &project_label);
            for entry in entries.iter().filter(|e| matches(e)) {
                let start = entry.start_time.date_naive();
                if start.year() == request.year && start.month() == request.month {
                    items[start.day() as usize - 1].total_hours += entry.duration_hours();
                }
            }
            items
        }
        StatisticsType::Yearly => {
            let mut items: Vec<StatisticsItem> = (1..=12)
                .map(|month| StatisticsItem {
                    date: format!("{:04}-{:02}", request.year, month),
                    total_hours: 0.0,
                    project_id: project_label.clone(),
                })
                .collect();
            for entry in entries.iter().filter(|e| matches(e)) {
                let start = entry.start_time.date_naive();
                if start.year() == request.year {
                    items[start.month0() as usize].total_hours += entry.duration_hours();
                }
            }
            items
        }
        StatisticsType::Total => {
            let years: BTreeSet<i32> = entries.iter().filter(|e| matches(e)).map(|e| e.start_time.year()).collect();
            let mut items: Vec<StatisticsItem> = years
                .iter()
                .map(|year| StatisticsItem {
                    date: format!("{:04}", year),
                    total_hours: 0.0,
                    project_id: project_label.clone(),
                })
                .collect();
            for entry in entries.iter().filter(|e| matches(e)) {
                let label = format!("{:04}", entry.start_time.year());
                if let Some(item) = items.iter_mut().find(|i| i.date == label) {
                    item.total_hours += entry.duration_hours();
                }
            }
            items
        }
    }
}

/// Number of days in a calendar month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid month");
    let next = first.checked_add_months(Months::new(1)).expect("valid month");
    (next - first).num_days() as u32
}

fn month_buckets(year: i32, month: u32, project_label: &str) -> Vec<StatisticsItem> {
    (1..=days_in_month(year, month))
        .map(|day| StatisticsItem {
            date: format!("{:04}-{:02}-{:02}", year, month, day),
            total_hours: 0.0,
            project_id: project_label.to_string(),
        })
        .collect()
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0).expect("midnight is always valid").and_utc()
}
