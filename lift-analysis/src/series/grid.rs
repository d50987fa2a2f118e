//! Date-grid validation and completion.
//!
//! Grid operations never invent or drop observed dates: a panel whose
//! dates do not fit the requested frequency is an error, not something to
//! silently reshape.

use chrono::{Duration, NaiveDate};
use lift_core::errors::SeriesError;
use lift_core::types::{FxHashMap, FxHashSet};
use tracing::warn;

use super::panel::{DatePanel, Observation};

/// Check that a series of dates covers a `[min, max]` range at
/// `freq_days` spacing, optionally rejecting duplicates.
pub fn check_all_dates(
    dates: &[NaiveDate],
    freq_days: i64,
    check_duplicates: bool,
) -> Result<(), SeriesError> {
    if freq_days < 1 {
        return Err(SeriesError::InvalidFrequency { freq_days });
    }
    let (min, max) = match (dates.iter().min(), dates.iter().max()) {
        (Some(min), Some(max)) => (*min, *max),
        _ => return Err(SeriesError::Empty),
    };

    let span_days = (max - min).num_days();
    if span_days % freq_days != 0 {
        return Err(SeriesError::FrequencyMismatch {
            span_days,
            freq_days,
        });
    }
    let expected = (span_days / freq_days) as usize + 1;

    let unique: FxHashSet<NaiveDate> = dates.iter().copied().collect();
    if unique.len() < expected {
        return Err(SeriesError::MissingDates {
            expected,
            found: unique.len(),
        });
    }
    if check_duplicates && dates.len() > expected {
        return Err(SeriesError::DuplicateDate {
            date: max.to_string(),
            group: String::new(),
        });
    }
    Ok(())
}

/// Complete a panel onto the `[min, max]` date grid at `freq_days`
/// spacing, replicating the grid across every group.
///
/// Inserted rows carry `None` values. Errors if a `(date, group)` pair is
/// duplicated, or if an observed date does not sit on the grid (the data
/// is at the wrong frequency and recomputing it is the caller's job).
pub fn fill_date_grid(panel: &DatePanel, freq_days: i64) -> Result<DatePanel, SeriesError> {
    if freq_days < 1 {
        return Err(SeriesError::InvalidFrequency { freq_days });
    }
    if panel.is_empty() {
        return Err(SeriesError::Empty);
    }

    let mut observed: FxHashMap<(NaiveDate, &str), Option<f64>> = FxHashMap::default();
    for row in panel.rows() {
        if observed
            .insert((row.date, row.group.as_str()), row.value)
            .is_some()
        {
            return Err(SeriesError::DuplicateDate {
                date: row.date.to_string(),
                group: row.group.clone(),
            });
        }
    }

    let dates = panel.dates();
    let (start, end) = (dates[0], dates[dates.len() - 1]);
    for date in &dates {
        if (*date - start).num_days() % freq_days != 0 {
            return Err(SeriesError::OffGrid {
                date: date.to_string(),
                start: start.to_string(),
                freq_days,
            });
        }
    }

    let mut grid = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        grid.push(cursor);
        cursor = cursor + Duration::days(freq_days);
    }

    let groups = panel.groups();
    let mut filled = Vec::with_capacity(grid.len() * groups.len());
    let mut inserted = 0usize;
    for date in &grid {
        for group in &groups {
            let value = match observed.get(&(*date, group.as_str())) {
                Some(value) => *value,
                None => {
                    inserted += 1;
                    None
                }
            };
            filled.push(Observation {
                date: *date,
                group: group.clone(),
                value,
            });
        }
    }

    if inserted > 0 {
        warn!(
            inserted,
            freq_days, "date grid completion inserted empty rows"
        );
    }

    Ok(DatePanel::from_rows(filled))
}
