//! Series pipeline tests: export-shaped data through grid completion,
//! weekly aggregation, and pivoting.

use chrono::{Duration, NaiveDate};
use lift_analysis::selection::RegionPanel;
use lift_analysis::series::{
    aggregate_weekly, fill_date_grid, sanitize_headers, DatePanel, WeeklyAgg,
};

fn d(s: &str) -> NaiveDate {
    s.parse().expect("date")
}

/// Build a daily two-region export covering `days` days from a Monday.
fn export_panel(days: i64) -> DatePanel {
    let start = d("2022-03-07");
    let mut panel = DatePanel::new();
    for i in 0..days {
        let date = start + Duration::days(i);
        panel.push(date, "berlin", Some(100.0 + (i % 7) as f64));
        panel.push(date, "munich", Some(200.0 + (i % 5) as f64));
    }
    panel
}

#[test]
fn test_daily_export_aggregates_to_weeks_and_pivots() {
    let panel = export_panel(28);

    let weekly = aggregate_weekly(&panel, WeeklyAgg::Sum, true).expect("weekly");
    assert_eq!(weekly.dates().len(), 4);
    assert_eq!(weekly.groups(), vec!["berlin", "munich"]);

    let wide = RegionPanel::from_panel(&weekly).expect("pivot");
    assert_eq!(wide.regions(), ["berlin", "munich"]);
    assert_eq!(wide.dates().len(), 4);
    // Each berlin week sums 100..106 offsets: 7*100 + 0+1+..+6.
    assert_eq!(wide.series(0)[0], 721.0);
}

#[test]
fn test_grid_completion_then_weekly_keeps_observed_values() {
    // A daily series with one hole.
    let mut panel = DatePanel::new();
    let start = d("2022-03-07");
    for i in 0..7 {
        if i == 3 {
            continue;
        }
        panel.push(start + Duration::days(i), "kpi", Some(10.0));
    }

    let filled = fill_date_grid(&panel, 1).expect("fill");
    assert_eq!(filled.len(), 7);

    let weekly = aggregate_weekly(&filled, WeeklyAgg::Sum, true).expect("weekly");
    assert_eq!(weekly.len(), 1);
    // Six observed days of 10, the filled day skipped.
    assert_eq!(weekly.rows()[0].value, Some(60.0));
}

#[test]
fn test_incomplete_week_dropped_end_to_end() {
    // 4 weeks + 2 trailing days.
    let panel = export_panel(30);
    let weekly = aggregate_weekly(&panel, WeeklyAgg::Sum, true).expect("weekly");
    assert_eq!(weekly.dates().len(), 4);
}

#[test]
fn test_sanitized_headers_for_export_columns() {
    let raw = ["Date", "Region Name", "Impr.  A.", "price [$]"];
    let clean = sanitize_headers(&raw).expect("sanitize");
    assert_eq!(clean, vec!["date", "region_name", "impr_a", "price"]);
}

#[test]
fn test_pivot_requires_filled_grid() {
    let mut panel = export_panel(7);
    // Punch a hole: pivoting must refuse, filling first must fix it.
    let rows: Vec<_> = panel
        .rows()
        .iter()
        .filter(|r| !(r.group == "munich" && r.date == d("2022-03-09")))
        .cloned()
        .collect();
    panel = DatePanel::from_rows(rows);

    assert!(RegionPanel::from_panel(&panel).is_err());
}
