//! Candidate region scan tests: enumeration order, caps, bounds,
//! profiles, and design grids.

use chrono::{Duration, NaiveDate};
use lift_analysis::design::{Alternative, DesignGrid, DesignParams};
use lift_analysis::selection::{
    select_candidate_cells, RegionPanel, RegionProfiles, ScanParams,
};
use lift_analysis::series::DatePanel;
use lift_core::errors::SelectionError;

fn d(s: &str) -> NaiveDate {
    s.parse().expect("date")
}

/// Four regions with distinct scales over 14 days.
fn demo_panel() -> RegionPanel {
    let start = d("2022-03-07");
    let mut panel = DatePanel::new();
    for i in 0..14i64 {
        let date = start + Duration::days(i);
        let wobble = (i % 3) as f64;
        panel.push(date, "berlin", Some(100.0 + wobble));
        panel.push(date, "hamburg", Some(50.0 + wobble));
        panel.push(date, "munich", Some(80.0 + wobble));
        panel.push(date, "rural", Some(20.0 + wobble));
    }
    RegionPanel::from_panel(&panel).expect("pivot")
}

fn mde_design() -> DesignParams {
    DesignParams {
        alpha: 0.05,
        n_obs: 8,
        alternative: Alternative::TwoSided,
        power: None,
        mde_percent: Some(10.0),
    }
}

fn base_params(candidates: &[&str]) -> ScanParams {
    ScanParams {
        candidates: candidates.iter().map(|s| s.to_string()).collect(),
        max_group_size: 3,
        max_combinations: 1000,
        size_bounds_frac: None,
        designs: vec![mde_design()],
        log_every: 100,
    }
}

#[test]
fn test_enumerates_ascending_sizes_in_order() {
    let panel = demo_panel();
    let outcome =
        select_candidate_cells(&panel, None, &base_params(&["berlin", "hamburg", "munich"]))
            .expect("scan");

    // 3 singles + 3 pairs + 1 triple.
    assert_eq!(outcome.combinations_enumerated, 7);
    assert!(!outcome.truncated);
    let first_sizes: Vec<usize> = outcome.cells.iter().map(|c| c.group_size).collect();
    assert_eq!(first_sizes, vec![1, 1, 1, 2, 2, 2, 3]);
    assert_eq!(outcome.cells[0].regions, vec!["berlin"]);
    assert_eq!(outcome.cells[3].regions, vec!["berlin", "hamburg"]);
}

#[test]
fn test_combination_cap_truncates() {
    let panel = demo_panel();
    let mut params = base_params(&["berlin", "hamburg", "munich"]);
    params.max_combinations = 4;

    let outcome = select_candidate_cells(&panel, None, &params).expect("scan");
    assert_eq!(outcome.combinations_enumerated, 4);
    assert!(outcome.truncated);
    assert_eq!(outcome.cells.len(), 4);
}

#[test]
fn test_size_bounds_filter_cells() {
    let panel = demo_panel();
    // Market: berlin 0.4, munich 0.32, hamburg 0.2, rural 0.08 (approx).
    let mut params = base_params(&["berlin", "hamburg", "munich"]);
    params.size_bounds_frac = Some((0.3, 0.6));

    let outcome = select_candidate_cells(&panel, None, &params).expect("scan");
    assert!(outcome
        .cells
        .iter()
        .all(|c| c.size_frac > 0.3 && c.size_frac < 0.6));
    // hamburg alone (~0.2) is enumerated but filtered out.
    assert!(outcome
        .cells
        .iter()
        .all(|c| c.regions != vec!["hamburg".to_string()]));
    assert_eq!(outcome.combinations_enumerated, 7);
}

#[test]
fn test_bigger_cells_have_more_power() {
    let panel = demo_panel();
    // A 1% effect keeps power away from saturation so the ordering is
    // visible.
    let mut params = base_params(&["berlin", "hamburg", "munich"]);
    params.designs[0].mde_percent = Some(1.0);
    let outcome = select_candidate_cells(&panel, None, &params).expect("scan");

    let single = outcome
        .cells
        .iter()
        .find(|c| c.regions == vec!["hamburg".to_string()])
        .expect("single cell");
    let triple = outcome
        .cells
        .iter()
        .find(|c| c.group_size == 3)
        .expect("triple cell");
    // Same relative MDE on a larger mean with the same wobble: the
    // aggregated cell detects it with more power.
    assert!(triple.summary.power > single.summary.power);
}

#[test]
fn test_design_grid_multiplies_cells() {
    let panel = demo_panel();
    let mut params = base_params(&["berlin", "hamburg"]);
    params.designs = DesignGrid {
        alphas: vec![0.05, 0.1],
        n_obs: vec![4, 8],
        alternative: Alternative::TwoSided,
        powers: vec![],
        mde_percents: vec![10.0],
    }
    .expand()
    .expect("grid");

    let outcome = select_candidate_cells(&panel, None, &params).expect("scan");
    // 3 combinations x 4 designs.
    assert_eq!(outcome.cells.len(), 12);
}

#[test]
fn test_profiles_produce_deltas() {
    let panel = demo_panel();
    let mut profiles = RegionProfiles::new(vec!["income".into()]);
    profiles.insert("berlin", vec![38.0]);
    profiles.insert("hamburg", vec![34.0]);
    profiles.insert("munich", vec![40.0]);
    profiles.insert("rural", vec![22.0]);

    let outcome = select_candidate_cells(
        &panel,
        Some(&profiles),
        &base_params(&["berlin", "hamburg"]),
    )
    .expect("scan");

    let cell = &outcome.cells[0];
    assert!(cell.profile.contains_key("income"));
    assert!(cell.profile_delta.contains_key("income"));
    // berlin alone is richer than the size-weighted market.
    assert!(cell.profile["income"] > 34.0);
}

#[test]
fn test_profile_mismatch_rejected() {
    let panel = demo_panel();
    let mut profiles = RegionProfiles::new(vec!["income".into()]);
    profiles.insert("berlin", vec![38.0]);

    let err = select_candidate_cells(
        &panel,
        Some(&profiles),
        &base_params(&["berlin", "hamburg"]),
    )
    .unwrap_err();
    assert!(matches!(err, SelectionError::ProfileMismatch { .. }));
}

#[test]
fn test_unknown_candidate_rejected() {
    let panel = demo_panel();
    let err = select_candidate_cells(&panel, None, &base_params(&["atlantis"])).unwrap_err();
    assert!(matches!(
        err,
        SelectionError::UnknownRegion { region } if region == "atlantis"
    ));
}

#[test]
fn test_invalid_params_rejected() {
    let panel = demo_panel();

    let mut params = base_params(&["berlin"]);
    params.candidates.clear();
    assert!(matches!(
        select_candidate_cells(&panel, None, &params),
        Err(SelectionError::NoCandidates)
    ));

    let mut params = base_params(&["berlin"]);
    params.size_bounds_frac = Some((0.6, 0.4));
    assert!(matches!(
        select_candidate_cells(&panel, None, &params),
        Err(SelectionError::InvalidSizeBounds { .. })
    ));

    let mut params = base_params(&["berlin"]);
    params.designs[0].alpha = 2.0;
    assert!(matches!(
        select_candidate_cells(&panel, None, &params),
        Err(SelectionError::Design(_))
    ));
}

#[test]
fn test_scan_is_deterministic() {
    let panel = demo_panel();
    let params = base_params(&["berlin", "hamburg", "munich"]);

    let first = select_candidate_cells(&panel, None, &params).expect("scan");
    let second = select_candidate_cells(&panel, None, &params).expect("scan");

    assert_eq!(first.cells.len(), second.cells.len());
    for (a, b) in first.cells.iter().zip(second.cells.iter()) {
        assert_eq!(a.regions, b.regions);
        assert_eq!(a.summary, b.summary);
    }
}
