//! Test-design summaries: achieved power for a target effect, or the
//! minimum detectable effect at a target power.
//!
//! Normal approximation on the mean of `n_obs` observations with standard
//! deviation `std`: the standard error is `std / sqrt(n_obs)`. With
//! `z_a` the upper critical value for `alpha` (halved when two-sided) and
//! `lambda = effect / se`:
//!
//! - power given effect: `power = Phi(lambda - z_a)`
//! - effect given power: `effect = (z_a + Phi^-1(power)) * se`
//!
//! Distribution kernels come from `statrs`; nothing here estimates causal
//! effects.

use lift_core::errors::DesignError;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Alternative hypothesis for the test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alternative {
    #[default]
    TwoSided,
    Larger,
    Smaller,
}

impl Alternative {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TwoSided => "two-sided",
            Self::Larger => "larger",
            Self::Smaller => "smaller",
        }
    }
}

impl std::fmt::Display for Alternative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for one test design. Exactly one of `power` and
/// `mde_percent` is set; the other is what the summary solves for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignParams {
    pub alpha: f64,
    /// Number of observations the test will aggregate over (e.g. weeks).
    pub n_obs: usize,
    #[serde(default)]
    pub alternative: Alternative,
    /// Target statistical power.
    #[serde(default)]
    pub power: Option<f64>,
    /// Target minimum detectable effect, as a percentage of the mean.
    #[serde(default)]
    pub mde_percent: Option<f64>,
}

impl DesignParams {
    pub fn validate(&self) -> Result<(), DesignError> {
        if self.alpha <= 0.0 || self.alpha >= 1.0 {
            return Err(DesignError::InvalidAlpha { value: self.alpha });
        }
        if self.n_obs < 2 {
            return Err(DesignError::InvalidObservations { value: self.n_obs });
        }
        match (self.power, self.mde_percent) {
            (Some(power), None) => {
                if power <= 0.0 || power >= 1.0 {
                    return Err(DesignError::InvalidPower { value: power });
                }
            }
            (None, Some(_)) => {}
            _ => return Err(DesignError::AmbiguousTarget),
        }
        Ok(())
    }
}

/// The resolved design: both power and MDE populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSummary {
    pub alpha: f64,
    pub n_obs: usize,
    pub alternative: Alternative,
    pub power: f64,
    pub mde_percent: f64,
    /// Absolute effect corresponding to `mde_percent`.
    pub effect_abs: f64,
    pub std_error: f64,
}

/// Compute the design summary for a series with the given mean and
/// standard deviation. Pure: identical inputs produce identical output.
pub fn design_summary(
    mean: f64,
    std: f64,
    params: &DesignParams,
) -> Result<DesignSummary, DesignError> {
    params.validate()?;
    if !(std > 0.0) || !std.is_finite() {
        return Err(DesignError::NonPositiveStd { value: std });
    }
    if !(mean > 0.0) || !mean.is_finite() {
        return Err(DesignError::NonPositiveMean { value: mean });
    }

    let normal = standard_normal();
    let se = std / (params.n_obs as f64).sqrt();
    let tail_alpha = match params.alternative {
        Alternative::TwoSided => params.alpha / 2.0,
        Alternative::Larger | Alternative::Smaller => params.alpha,
    };
    let z_a = normal.inverse_cdf(1.0 - tail_alpha);

    let (power, mde_percent, effect_abs) = match (params.power, params.mde_percent) {
        (None, Some(mde_percent)) => {
            let effect_abs = (mde_percent / 100.0 * mean).abs();
            let lambda = effect_abs / se;
            let power = normal.cdf(lambda - z_a).clamp(0.0, 1.0);
            (power, mde_percent, effect_abs)
        }
        (Some(power), None) => {
            let lambda = z_a + normal.inverse_cdf(power);
            let effect_abs = lambda * se;
            let mde_percent = 100.0 * effect_abs / mean;
            (power, mde_percent, effect_abs)
        }
        // validate() rules the remaining arms out.
        _ => return Err(DesignError::AmbiguousTarget),
    };

    Ok(DesignSummary {
        alpha: params.alpha,
        n_obs: params.n_obs,
        alternative: params.alternative,
        power,
        mde_percent,
        effect_abs,
        std_error: se,
    })
}

/// Grids of design inputs expanded to their cartesian product, so a scan
/// can evaluate several alphas / horizons / targets in one pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignGrid {
    pub alphas: Vec<f64>,
    pub n_obs: Vec<usize>,
    pub alternative: Alternative,
    pub powers: Vec<f64>,
    pub mde_percents: Vec<f64>,
}

impl DesignGrid {
    /// Expand the grid. Exactly one of `powers` / `mde_percents` must be
    /// non-empty; every expanded design is validated.
    pub fn expand(&self) -> Result<Vec<DesignParams>, DesignError> {
        if self.powers.is_empty() == self.mde_percents.is_empty() {
            return Err(DesignError::AmbiguousTarget);
        }
        if self.n_obs.is_empty() {
            return Err(DesignError::InvalidObservations { value: 0 });
        }
        if self.alphas.is_empty() {
            return Err(DesignError::InvalidAlpha { value: f64::NAN });
        }

        let targets: Vec<(Option<f64>, Option<f64>)> = if self.mde_percents.is_empty() {
            self.powers.iter().map(|p| (Some(*p), None)).collect()
        } else {
            self.mde_percents.iter().map(|m| (None, Some(*m))).collect()
        };

        let mut designs = Vec::new();
        for alpha in &self.alphas {
            for n_obs in &self.n_obs {
                for (power, mde_percent) in &targets {
                    let params = DesignParams {
                        alpha: *alpha,
                        n_obs: *n_obs,
                        alternative: self.alternative,
                        power: *power,
                        mde_percent: *mde_percent,
                    };
                    params.validate()?;
                    designs.push(params);
                }
            }
        }
        Ok(designs)
    }
}

/// Standard normal; the (0, 1) parameterization is always valid.
fn standard_normal() -> Normal {
    match Normal::new(0.0, 1.0) {
        Ok(dist) => dist,
        Err(_) => unreachable!("standard normal parameters are valid"),
    }
}
