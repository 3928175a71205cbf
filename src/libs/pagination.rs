//! Month-window cursor pagination over historical work entries.
//!
//! Entry listing pages backward through time in whole calendar months. A
//! page covers the month containing the cursor plus the `monthsToLoad - 1`
//! months before it; the next cursor points at the last day of the month
//! preceding the window. Windows are deterministic and non-overlapping, so
//! repeated requests with the same cursor are idempotent and a cursor chain
//! never skips or duplicates a month.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::libs::error::AppError;
use crate::libs::work_entry::WorkEntry;

/// Months loaded per page when the request does not say otherwise.
pub const DEFAULT_MONTHS_TO_LOAD: u32 = 1;

/// Upper bound on months per page, keeps the month arithmetic well-defined.
const MAX_MONTHS_TO_LOAD: u32 = 1200;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadMoreRequest {
    /// Any date inside the newest month of the window, e.g. `2024-03-01`.
    pub month_cursor: Option<NaiveDate>,
    pub months_to_load: Option<u32>,
}

impl LoadMoreRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        match self.months_to_load {
            Some(n) if !(1..=MAX_MONTHS_TO_LOAD).contains(&n) => Err(AppError::validation(format!(
                "monthsToLoad must be between 1 and {}",
                MAX_MONTHS_TO_LOAD
            ))),
            _ => Ok(()),
        }
    }

    pub fn months_to_load(&self) -> u32 {
        self.months_to_load.unwrap_or(DEFAULT_MONTHS_TO_LOAD)
    }
}

/// A half-open UTC time range `[start, end)` covering whole months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MonthWindow {
    /// Computes the window for a cursor. The newest month is the one
    /// containing `cursor`, or the month of `today` when no cursor is given.
    pub fn compute(cursor: Option<NaiveDate>, months_to_load: u32, today: NaiveDate) -> MonthWindow {
        let anchor = cursor.unwrap_or(today);
        let newest = anchor.with_day(1).expect("first of month is always valid");
        let end = newest.checked_add_months(Months::new(1)).expect("in-range month");
        let start = newest
            .checked_sub_months(Months::new(months_to_load.saturating_sub(1)))
            .expect("in-range month");

        MonthWindow {
            start: start_of_day(start),
            end: start_of_day(end),
        }
    }

    /// Cursor for the next (older) page: the last day of the month that
    /// precedes this window.
    pub fn next_cursor(&self) -> NaiveDate {
        self.start.date_naive().pred_opt().expect("window start is past year zero")
    }
}

/// One page of entries, newest first.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub items: Vec<WorkEntry>,
    pub next_cursor: Option<NaiveDate>,
    pub has_more: bool,
}

impl Page {
    pub fn new(items: Vec<WorkEntry>, window: &MonthWindow, has_more: bool) -> Self {
        Page {
            items,
            next_cursor: has_more.then(|| window.next_cursor()),
            has_more,
        }
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0).expect("midnight is always valid").and_utc()
}
