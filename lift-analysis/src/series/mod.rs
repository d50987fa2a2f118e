//! Date-indexed panel utilities: header sanitization, grid completion,
//! weekly aggregation.

pub mod grid;
pub mod headers;
pub mod panel;
pub mod weekly;

pub use grid::{check_all_dates, fill_date_grid};
pub use headers::sanitize_headers;
pub use panel::{DatePanel, Observation};
pub use weekly::{aggregate_weekly, week_start, WeeklyAgg};
