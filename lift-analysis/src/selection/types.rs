//! Selection data types: the wide region panel and scan results.

use chrono::NaiveDate;
use lift_core::errors::SeriesError;
use lift_core::types::{BTreeMap, FxHashMap};
use serde::{Deserialize, Serialize};

use crate::design::DesignSummary;
use crate::series::DatePanel;

/// Wide daily panel: one KPI series per region, aligned on a shared date
/// index. Built from a long-form [`DatePanel`] that must be complete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionPanel {
    dates: Vec<NaiveDate>,
    regions: Vec<String>,
    /// Region-major values: `values[r][t]`.
    values: Vec<Vec<f64>>,
}

impl RegionPanel {
    /// Pivot a long-form panel into region columns.
    ///
    /// Every region must cover every date exactly once with a non-null
    /// value; run the panel through grid completion first if it has holes.
    pub fn from_panel(panel: &DatePanel) -> Result<Self, SeriesError> {
        if panel.is_empty() {
            return Err(SeriesError::Empty);
        }

        let dates = panel.dates();
        let regions = panel.groups();

        let mut cells: FxHashMap<(NaiveDate, &str), f64> = FxHashMap::default();
        for row in panel.rows() {
            let value = row.value.ok_or_else(|| SeriesError::MissingValue {
                date: row.date.to_string(),
                group: row.group.clone(),
            })?;
            if cells.insert((row.date, row.group.as_str()), value).is_some() {
                return Err(SeriesError::DuplicateDate {
                    date: row.date.to_string(),
                    group: row.group.clone(),
                });
            }
        }

        let mut values = Vec::with_capacity(regions.len());
        for region in &regions {
            let mut series = Vec::with_capacity(dates.len());
            for date in &dates {
                let value = cells.get(&(*date, region.as_str())).ok_or_else(|| {
                    SeriesError::MissingDates {
                        expected: dates.len() * regions.len(),
                        found: cells.len(),
                    }
                })?;
                series.push(*value);
            }
            values.push(series);
        }

        Ok(Self {
            dates,
            regions,
            values,
        })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn region_index(&self, region: &str) -> Option<usize> {
        self.regions.iter().position(|r| r == region)
    }

    /// The daily series of one region.
    pub fn series(&self, region_idx: usize) -> &[f64] {
        &self.values[region_idx]
    }

    /// Element-wise sum of the given regions' series.
    pub fn sum_series(&self, region_indices: &[usize]) -> Vec<f64> {
        let mut sum = vec![0.0; self.dates.len()];
        for &idx in region_indices {
            for (t, value) in self.values[idx].iter().enumerate() {
                sum[t] += value;
            }
        }
        sum
    }

    /// Per-region totals over the whole window, normalized to fractions
    /// of the market. Every region counts, not just candidates, so size
    /// bounds read as fractions of the whole market.
    pub fn size_fractions(&self) -> Vec<f64> {
        let totals: Vec<f64> = self.values.iter().map(|s| s.iter().sum()).collect();
        let market: f64 = totals.iter().sum();
        if market == 0.0 {
            return vec![0.0; totals.len()];
        }
        totals.iter().map(|t| t / market).collect()
    }
}

/// One evaluated candidate cell: a set of test regions plus the sized
/// design and optional profile deltas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateCell {
    pub regions: Vec<String>,
    pub group_size: usize,
    /// Fraction of the whole market covered by the cell.
    pub size_frac: f64,
    /// Mean of the aggregated daily series.
    pub mean: f64,
    /// Sample standard deviation of the aggregated daily series.
    pub std: f64,
    pub summary: DesignSummary,
    /// Weighted profile of the cell, per profile column.
    #[serde(default)]
    pub profile: BTreeMap<String, f64>,
    /// Cell profile minus the whole-market reference profile.
    #[serde(default)]
    pub profile_delta: BTreeMap<String, f64>,
    /// Delta as a percentage of the reference, where defined.
    #[serde(default)]
    pub profile_delta_pct: BTreeMap<String, f64>,
}
