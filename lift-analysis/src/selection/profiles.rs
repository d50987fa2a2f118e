//! Region profiles: descriptive columns (demographics, spend shares)
//! used to judge how representative a candidate cell is of the market.

use lift_core::errors::SelectionError;
use lift_core::types::{BTreeMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Per-region profile table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionProfiles {
    columns: Vec<String>,
    /// region -> values aligned with `columns`.
    rows: BTreeMap<String, Vec<f64>>,
}

impl RegionProfiles {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, region: impl Into<String>, values: Vec<f64>) {
        self.rows.insert(region.into(), values);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Require the profile regions to match the panel regions exactly.
    pub fn check_matches(&self, panel_regions: &[String]) -> Result<(), SelectionError> {
        let profile: FxHashSet<&str> = self.rows.keys().map(String::as_str).collect();
        let panel: FxHashSet<&str> = panel_regions.iter().map(String::as_str).collect();
        let missing = panel.difference(&profile).count();
        let extra = profile.difference(&panel).count();
        if missing > 0 || extra > 0 {
            return Err(SelectionError::ProfileMismatch { missing, extra });
        }
        Ok(())
    }

    /// Size-weighted profile of a set of regions: for each column, the
    /// weighted mean over the members, weights renormalized within the
    /// set.
    pub fn weighted(
        &self,
        members: &[(&str, f64)], // (region, market size fraction)
    ) -> BTreeMap<String, f64> {
        let total_weight: f64 = members.iter().map(|(_, w)| w).sum();
        let mut profile = BTreeMap::new();
        if total_weight <= 0.0 {
            return profile;
        }
        for (i, column) in self.columns.iter().enumerate() {
            let weighted_sum: f64 = members
                .iter()
                .filter_map(|(region, weight)| {
                    self.rows
                        .get(*region)
                        .and_then(|values| values.get(i))
                        .map(|value| weight * value)
                })
                .sum();
            profile.insert(column.clone(), weighted_sum / total_weight);
        }
        profile
    }

    /// The whole-market reference profile: weighted over every region.
    pub fn reference(&self, sizes: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
        let members: Vec<(&str, f64)> = sizes
            .iter()
            .map(|(region, size)| (region.as_str(), *size))
            .collect();
        self.weighted(&members)
    }
}

/// Deltas of a cell profile against the reference, absolute and (where
/// the reference is away from zero) as percentages.
pub fn profile_deltas(
    profile: &BTreeMap<String, f64>,
    reference: &BTreeMap<String, f64>,
) -> (BTreeMap<String, f64>, BTreeMap<String, f64>) {
    let mut delta = BTreeMap::new();
    let mut delta_pct = BTreeMap::new();
    for (column, value) in profile {
        let Some(reference_value) = reference.get(column) else {
            continue;
        };
        let d = value - reference_value;
        delta.insert(column.clone(), d);
        if reference_value.abs() > 1e-6 {
            delta_pct.insert(column.clone(), 100.0 * d / reference_value);
        }
    }
    (delta, delta_pct)
}
