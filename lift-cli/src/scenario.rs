//! Power scan scenario files: a YAML description of the panel, the
//! candidate set, and the design grid.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use lift_analysis::design::DesignGrid;
use lift_analysis::selection::{
    select_candidate_cells, RegionPanel, RegionProfiles, ScanOutcome, ScanParams,
};
use lift_analysis::series::{sanitize_headers, DatePanel};
use lift_core::config::PowerConfig;
use serde::Deserialize;

use crate::fail;

/// Raw scenario file shape.
#[derive(Debug, Deserialize)]
struct ScenarioFile {
    /// Long-form CSV with date, region, value columns.
    panel: PathBuf,
    candidates: Vec<String>,
    #[serde(default)]
    max_group_size: Option<usize>,
    #[serde(default)]
    max_combinations: Option<usize>,
    #[serde(default)]
    size_bounds_frac: Option<(f64, f64)>,
    #[serde(default)]
    log_every: Option<usize>,
    design: DesignGrid,
    /// Optional CSV with a region column plus numeric profile columns.
    #[serde(default)]
    profiles: Option<PathBuf>,
}

/// A loaded, validated scenario ready to run.
pub struct Scenario {
    panel: RegionPanel,
    profiles: Option<RegionProfiles>,
    params: ScanParams,
}

impl Scenario {
    pub fn run(&self) -> Result<ScanOutcome> {
        select_candidate_cells(&self.panel, self.profiles.as_ref(), &self.params).map_err(fail)
    }
}

/// Load a scenario file, resolving data paths relative to it and filling
/// defaults from `[power]` config.
pub fn load_scenario(path: &Path, defaults: &PowerConfig) -> Result<Scenario> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    let file: ScenarioFile = serde_yaml::from_str(&raw)
        .with_context(|| format!("parsing scenario {}", path.display()))?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let panel = load_panel_csv(&base.join(&file.panel))?;
    let profiles = match &file.profiles {
        Some(rel) => Some(load_profiles_csv(&base.join(rel))?),
        None => None,
    };

    let mut design = file.design;
    if design.alphas.is_empty() {
        design.alphas = vec![defaults.effective_alpha()];
    }
    if design.n_obs.is_empty() {
        return Err(anyhow!("scenario design needs at least one n_obs value"));
    }
    let designs = design.expand().map_err(fail)?;

    let params = ScanParams {
        candidates: file.candidates,
        max_group_size: file
            .max_group_size
            .unwrap_or(defaults.effective_max_group_size()),
        max_combinations: file
            .max_combinations
            .unwrap_or(defaults.effective_max_combinations()),
        size_bounds_frac: file.size_bounds_frac,
        designs,
        log_every: file.log_every.unwrap_or(defaults.effective_log_every()),
    };

    Ok(Scenario {
        panel,
        profiles,
        params,
    })
}

/// Load a long-form panel CSV (`date,region,value`) and pivot it.
fn load_panel_csv(path: &Path) -> Result<RegionPanel> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("reading panel {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("reading headers of {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();
    let headers = sanitize_headers(&headers).map_err(fail)?;
    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow!("{} has no `{name}` column", path.display()))
    };
    let (date_col, region_col, value_col) =
        (column("date")?, column("region")?, column("value")?);

    let mut panel = DatePanel::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("row {} of {}", i + 2, path.display()))?;
        let date: NaiveDate = record
            .get(date_col)
            .unwrap_or_default()
            .parse()
            .with_context(|| format!("bad date in row {} of {}", i + 2, path.display()))?;
        let region = record.get(region_col).unwrap_or_default().to_string();
        let raw_value = record.get(value_col).unwrap_or_default();
        let value = if raw_value.is_empty() {
            None
        } else {
            Some(raw_value.parse::<f64>().with_context(|| {
                format!("bad value in row {} of {}", i + 2, path.display())
            })?)
        };
        panel.push(date, region, value);
    }

    RegionPanel::from_panel(&panel).map_err(fail)
}

/// Load a profiles CSV: a `region` column plus numeric columns.
fn load_profiles_csv(path: &Path) -> Result<RegionProfiles> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("reading profiles {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("reading headers of {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();
    let headers = sanitize_headers(&headers).map_err(fail)?;
    let region_col = headers
        .iter()
        .position(|h| h == "region")
        .ok_or_else(|| anyhow!("{} has no `region` column", path.display()))?;

    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != region_col)
        .map(|(_, h)| h.clone())
        .collect();

    let mut profiles = RegionProfiles::new(columns);
    for (i, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("row {} of {}", i + 2, path.display()))?;
        let region = record.get(region_col).unwrap_or_default().to_string();
        let mut values = Vec::with_capacity(headers.len() - 1);
        for (col, raw) in record.iter().enumerate() {
            if col == region_col {
                continue;
            }
            values.push(raw.parse::<f64>().with_context(|| {
                format!("bad profile value in row {} of {}", i + 2, path.display())
            })?);
        }
        profiles.insert(region, values);
    }

    Ok(profiles)
}
