//! Series and date-grid errors.

use super::error_code::{self, LiftErrorCode};

/// Errors from header sanitization, date-grid validation, and aggregation.
#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
    #[error("Duplicate column name after sanitization: {name}")]
    DuplicateColumn { name: String },

    #[error("Series is empty")]
    Empty,

    #[error("Duplicate date {date} for group {group}")]
    DuplicateDate { date: String, group: String },

    #[error("Span of {span_days} days is not a multiple of frequency {freq_days}")]
    FrequencyMismatch { span_days: i64, freq_days: i64 },

    #[error("Missing dates: expected {expected} on the grid, found {found}")]
    MissingDates { expected: usize, found: usize },

    #[error("Missing value for {group} on {date}")]
    MissingValue { date: String, group: String },

    #[error("Date {date} is off the {freq_days}-day grid starting {start}")]
    OffGrid {
        date: String,
        start: String,
        freq_days: i64,
    },

    #[error("Invalid frequency: {freq_days} (must be >= 1)")]
    InvalidFrequency { freq_days: i64 },

    #[error("Week starting {week_start} does not begin on Monday")]
    NotMonday { week_start: String },
}

impl LiftErrorCode for SeriesError {
    fn error_code(&self) -> &'static str {
        error_code::SERIES_ERROR
    }
}
