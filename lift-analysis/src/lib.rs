//! Series utilities, test-design summaries, and the candidate region scan
//! for lift studies.
//!
//! Statistical kernels (distribution CDFs and quantiles) come from
//! `statrs`; this crate composes them into test sizing and the region
//! selection scan, and keeps panel data on a plain long-form
//! representation.

pub mod design;
pub mod selection;
pub mod series;

pub use design::{design_summary, Alternative, DesignGrid, DesignParams, DesignSummary};
pub use selection::{select_candidate_cells, CandidateCell, ScanOutcome, ScanParams};
pub use series::{DatePanel, Observation};
