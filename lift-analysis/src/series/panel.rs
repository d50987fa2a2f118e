//! Long-form date panel: one row per (date, group) observation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One observation. `value` is `None` for rows inserted by grid
/// completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub group: String,
    pub value: Option<f64>,
}

/// A long-form panel of observations, the shape KPI exports come in:
/// `(date, group, value)` rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatePanel {
    rows: Vec<Observation>,
}

impl DatePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    pub fn push(&mut self, date: NaiveDate, group: impl Into<String>, value: Option<f64>) {
        self.rows.push(Observation {
            date,
            group: group.into(),
            value,
        });
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct groups in sorted order.
    pub fn groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = self.rows.iter().map(|r| r.group.clone()).collect();
        groups.sort_unstable();
        groups.dedup();
        groups
    }

    /// Distinct dates in sorted order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.rows.iter().map(|r| r.date).collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }

    /// Dates observed for one group, in row order.
    pub fn group_dates(&self, group: &str) -> Vec<NaiveDate> {
        self.rows
            .iter()
            .filter(|r| r.group == group)
            .map(|r| r.date)
            .collect()
    }
}
