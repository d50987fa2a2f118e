//! The candidate region scan.
//!
//! Enumerates combinations of candidate regions by ascending group size
//! (lexicographic within a size), filters them by market-share bounds,
//! and sizes a test for each surviving cell. Enumeration is sequential
//! and capped; evaluation runs on rayon with deterministic output order.

use lift_core::errors::{SelectionError, SeriesError};
use lift_core::types::BTreeMap;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::design::{design_summary, DesignParams};
use crate::selection::combinations::Combinations;
use crate::selection::profiles::{profile_deltas, RegionProfiles};
use crate::selection::types::{CandidateCell, RegionPanel};

/// Parameters for one scan.
#[derive(Debug, Clone)]
pub struct ScanParams {
    /// Regions eligible for the test cell; must be panel regions.
    pub candidates: Vec<String>,
    /// Largest cell size to try.
    pub max_group_size: usize,
    /// Cap on enumerated combinations across all sizes.
    pub max_combinations: usize,
    /// `(lo, hi)` bounds on cell size as a fraction of the whole market,
    /// both exclusive.
    pub size_bounds_frac: Option<(f64, f64)>,
    /// Designs evaluated for every surviving cell.
    pub designs: Vec<DesignParams>,
    /// Progress logging interval, in enumerated combinations. Zero
    /// disables progress lines.
    pub log_every: usize,
}

/// The result of a scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// One cell per surviving combination and design, in enumeration
    /// order.
    pub cells: Vec<CandidateCell>,
    /// Combinations enumerated before the cap kicked in.
    pub combinations_enumerated: usize,
    /// True when the cap stopped the scan before the search space was
    /// exhausted.
    pub truncated: bool,
}

/// Run the scan. See the module docs for the enumeration contract.
pub fn select_candidate_cells(
    panel: &RegionPanel,
    profiles: Option<&RegionProfiles>,
    params: &ScanParams,
) -> Result<ScanOutcome, SelectionError> {
    let candidate_indices = validate(panel, profiles, params)?;

    let sizes = panel.size_fractions();
    let sizes_by_region: BTreeMap<String, f64> = panel
        .regions()
        .iter()
        .cloned()
        .zip(sizes.iter().copied())
        .collect();
    let reference = profiles.map(|p| p.reference(&sizes_by_region));

    // Enumeration is sequential and cheap; only surviving cells pay for
    // evaluation.
    let mut eligible: Vec<(Vec<usize>, f64)> = Vec::new();
    let mut enumerated = 0usize;
    let mut truncated = false;

    'sizes: for group_size in 1..=params.max_group_size {
        info!(group_size, "exploring group size");
        for combo in Combinations::new(candidate_indices.len(), group_size) {
            enumerated += 1;

            let members: Vec<usize> = combo.iter().map(|i| candidate_indices[*i]).collect();
            let size_frac: f64 = members.iter().map(|idx| sizes[*idx]).sum();

            let in_bounds = match params.size_bounds_frac {
                Some((lo, hi)) => size_frac > lo && size_frac < hi,
                None => true,
            };
            if in_bounds {
                eligible.push((members, size_frac));
            }

            if params.log_every > 0 && enumerated % params.log_every == 0 {
                info!(enumerated, eligible = eligible.len(), "scan progress");
            }
            if enumerated >= params.max_combinations {
                info!(
                    enumerated,
                    "combination cap reached, stopping the search"
                );
                truncated = true;
                break 'sizes;
            }
        }
    }

    let cells: Vec<Vec<CandidateCell>> = eligible
        .par_iter()
        .map(|(members, size_frac)| {
            evaluate_cell(
                panel,
                profiles,
                reference.as_ref(),
                &sizes,
                params,
                members,
                *size_frac,
            )
        })
        .collect::<Result<_, SelectionError>>()?;
    let cells: Vec<CandidateCell> = cells.into_iter().flatten().collect();

    info!(
        enumerated,
        eligible = eligible.len(),
        cells = cells.len(),
        truncated,
        "scan complete"
    );

    Ok(ScanOutcome {
        cells,
        combinations_enumerated: enumerated,
        truncated,
    })
}

/// Evaluate one surviving combination: aggregate the member series and
/// size every design against it.
fn evaluate_cell(
    panel: &RegionPanel,
    profiles: Option<&RegionProfiles>,
    reference: Option<&BTreeMap<String, f64>>,
    sizes: &[f64],
    params: &ScanParams,
    members: &[usize],
    size_frac: f64,
) -> Result<Vec<CandidateCell>, SelectionError> {
    let series = panel.sum_series(members);
    let (mean, std) = mean_and_std(&series)?;

    let regions: Vec<String> = members
        .iter()
        .map(|idx| panel.regions()[*idx].clone())
        .collect();
    debug!(regions = ?regions, mean, std, size_frac, "evaluating cell");

    let (profile, profile_delta, profile_delta_pct) = match (profiles, reference) {
        (Some(profiles), Some(reference)) => {
            let weighted_members: Vec<(&str, f64)> = members
                .iter()
                .map(|idx| (panel.regions()[*idx].as_str(), sizes[*idx]))
                .collect();
            let profile = profiles.weighted(&weighted_members);
            let (delta, delta_pct) = profile_deltas(&profile, reference);
            (profile, delta, delta_pct)
        }
        _ => Default::default(),
    };

    let mut cells = Vec::with_capacity(params.designs.len());
    for design in &params.designs {
        let summary = design_summary(mean, std, design)?;
        cells.push(CandidateCell {
            regions: regions.clone(),
            group_size: members.len(),
            size_frac,
            mean,
            std,
            summary,
            profile: profile.clone(),
            profile_delta: profile_delta.clone(),
            profile_delta_pct: profile_delta_pct.clone(),
        });
    }
    Ok(cells)
}

/// Mean and sample standard deviation of a daily series.
fn mean_and_std(series: &[f64]) -> Result<(f64, f64), SelectionError> {
    if series.len() < 2 {
        return Err(SeriesError::Empty.into());
    }
    let n = series.len() as f64;
    let mean = series.iter().sum::<f64>() / n;
    let variance = series.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Ok((mean, variance.sqrt()))
}

fn validate(
    panel: &RegionPanel,
    profiles: Option<&RegionProfiles>,
    params: &ScanParams,
) -> Result<Vec<usize>, SelectionError> {
    if params.candidates.is_empty() {
        return Err(SelectionError::NoCandidates);
    }
    if params.max_group_size == 0 {
        return Err(SelectionError::InvalidGroupSize { value: 0 });
    }
    if params.max_combinations == 0 {
        return Err(SelectionError::InvalidCombinationCap { value: 0 });
    }
    if let Some((lo, hi)) = params.size_bounds_frac {
        if lo >= hi {
            return Err(SelectionError::InvalidSizeBounds { lo, hi });
        }
    }
    for design in &params.designs {
        design.validate()?;
    }
    if let Some(profiles) = profiles {
        profiles.check_matches(panel.regions())?;
    }

    params
        .candidates
        .iter()
        .map(|region| {
            panel
                .region_index(region)
                .ok_or_else(|| SelectionError::UnknownRegion {
                    region: region.clone(),
                })
        })
        .collect()
}
