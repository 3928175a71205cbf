//! # Worklog - self-hosted personal time tracking
//!
//! A REST service for recording work entries per project, aggregating
//! per-day/month/year statistics, and exporting tabular time reports.
//!
//! ## Features
//!
//! - **Projects**: Named containers for work entries, with a protected
//!   default project that orphaned entries fall back to
//! - **Work Entries**: Recorded intervals with start/end time and description
//! - **Statistics**: Zero-filled daily, monthly, and yearly aggregation
//! - **Pagination**: Month-window cursor paging over historical entries
//! - **Report Export**: CSV and Excel time reports with totals
//!
//! ## Usage
//!
//! ```rust,no_run
//! use worklog::commands::Cli;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
pub mod server;
