//! Weekly aggregation of daily panels. Weeks start on Monday.

use chrono::{Datelike, Duration, NaiveDate};
use lift_core::errors::SeriesError;
use lift_core::types::BTreeMap;

use super::grid::check_all_dates;
use super::panel::{DatePanel, Observation};

/// Weekly aggregation function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeeklyAgg {
    Sum,
    Mean,
}

/// The Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Aggregate a daily panel into Monday-start weeks, per group.
///
/// Each group's dates must form a complete daily grid with no duplicates.
/// `None` values are skipped by the aggregation, matching how exports
/// treat missing observations. With `drop_incomplete`, weeks covering
/// fewer than 7 days are removed from the output.
pub fn aggregate_weekly(
    panel: &DatePanel,
    agg: WeeklyAgg,
    drop_incomplete: bool,
) -> Result<DatePanel, SeriesError> {
    if panel.is_empty() {
        return Err(SeriesError::Empty);
    }

    for group in panel.groups() {
        let dates = panel.group_dates(&group);
        check_all_dates(&dates, 1, true)?;
    }

    // (group, week_start) -> (sum, non-null count, day count)
    let mut buckets: BTreeMap<(String, NaiveDate), (f64, usize, usize)> = BTreeMap::new();
    for row in panel.rows() {
        let key = (row.group.clone(), week_start(row.date));
        let bucket = buckets.entry(key).or_insert((0.0, 0, 0));
        if let Some(value) = row.value {
            bucket.0 += value;
            bucket.1 += 1;
        }
        bucket.2 += 1;
    }

    let mut rows = Vec::with_capacity(buckets.len());
    for ((group, week), (sum, non_null, days)) in buckets {
        if drop_incomplete && days < 7 {
            continue;
        }
        let value = match agg {
            WeeklyAgg::Sum if non_null > 0 => Some(sum),
            WeeklyAgg::Mean if non_null > 0 => Some(sum / non_null as f64),
            _ => None,
        };
        rows.push(Observation {
            date: week,
            group,
            value,
        });
    }

    rows.sort_by(|a, b| (a.date, &a.group).cmp(&(b.date, &b.group)));
    Ok(DatePanel::from_rows(rows))
}
