use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::libs::error::AppError;

/// One recorded interval of tracked work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub project_id: Uuid,
    #[serde(default)]
    pub description: String,
}

impl WorkEntry {
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>, project_id: Uuid, description: &str) -> Self {
        WorkEntry {
            id: Uuid::new_v4(),
            start_time,
            end_time,
            project_id,
            description: description.to_string(),
        }
    }

    /// Wall-clock duration of the entry in fractional hours.
    pub fn duration_hours(&self) -> f64 {
        (self.end_time - self.start_time).num_seconds() as f64 / 3600.0
    }
}

/// Interval rule applied when an entry is recorded.
pub fn validate_interval(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Result<(), AppError> {
    if start_time > end_time {
        return Err(AppError::BusinessRule("Start time cannot be greater than end time".to_string()));
    }
    Ok(())
}

/// Interval rules applied when an entry is edited. Edits additionally may
/// not move either endpoint into the future.
pub fn validate_update(entry: &WorkEntry, now: DateTime<Utc>) -> Result<(), AppError> {
    if entry.start_time > entry.end_time || entry.start_time > now || entry.end_time > now {
        return Err(AppError::BusinessRule(
            "Start time cannot be greater than end time or current date".to_string(),
        ));
    }
    Ok(())
}
