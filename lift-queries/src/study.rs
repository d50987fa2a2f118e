//! The `studies/<name>` folder convention.
//!
//! A study is a working folder, not a software component: query templates
//! under `queries/`, exported data under `data/`, notebooks under
//! `notebooks/`, and a `study.yml` manifest with default parameters.

use std::path::{Path, PathBuf};

use lift_core::config::QueriesConfig;
use lift_core::constants;
use lift_core::errors::{LiftError, StudyError};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::params::{self, ParamMap};
use crate::registry::QueryRegistry;
use crate::render::Renderer;

/// Starter template written by `scaffold`.
const STARTER_TEMPLATE: &str = "\
-- Daily KPI by region.
SELECT
    date,
    region,
    SUM(value) AS value
FROM `{{ kpi_table }}`
WHERE date BETWEEN '{{ start_date }}' AND '{{ end_date }}'
GROUP BY date, region
ORDER BY date, region
";

/// `study.yml` contents: metadata plus default rendering parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyManifest {
    pub name: String,
    /// KPI under study (e.g. "revenue").
    pub kpi: Option<String>,
    /// Default rendering parameters; call-site parameters win on merge.
    pub params: ParamMap,
}

/// An opened study: manifest plus the registry built from its `queries/`.
#[derive(Debug)]
pub struct Study {
    pub name: String,
    pub path: PathBuf,
    pub manifest: StudyManifest,
    pub registry: QueryRegistry,
}

impl Study {
    /// Create `studies/<name>` with the conventional layout and a starter
    /// template. Refuses to overwrite an existing study.
    pub fn scaffold(project_root: &Path, name: &str) -> Result<PathBuf, StudyError> {
        validate_name(name)?;

        let path = study_path(project_root, name);
        if path.exists() {
            return Err(StudyError::AlreadyExists {
                name: name.to_string(),
                path,
            });
        }

        for dir in [
            constants::QUERIES_DIR,
            constants::DATA_DIR,
            constants::NOTEBOOKS_DIR,
        ] {
            let dir_path = path.join(dir);
            std::fs::create_dir_all(&dir_path).map_err(|source| StudyError::Io {
                path: dir_path.clone(),
                source,
            })?;
        }

        let manifest = StudyManifest {
            name: name.to_string(),
            ..Default::default()
        };
        let manifest_path = path.join(constants::STUDY_MANIFEST);
        let manifest_yaml =
            serde_yaml::to_string(&manifest).map_err(|err| StudyError::InvalidManifest {
                path: manifest_path.clone(),
                message: err.to_string(),
            })?;
        std::fs::write(&manifest_path, manifest_yaml).map_err(|source| StudyError::Io {
            path: manifest_path,
            source,
        })?;

        let starter_path = path.join(constants::QUERIES_DIR).join("kpi_daily.sql");
        std::fs::write(&starter_path, STARTER_TEMPLATE).map_err(|source| StudyError::Io {
            path: starter_path,
            source,
        })?;

        info!(study = name, path = %path.display(), "scaffolded study");
        Ok(path)
    }

    /// Open an existing study and build its query registry.
    ///
    /// A missing `study.yml` falls back to a default manifest; a manifest
    /// that exists but does not parse is an error. A missing `queries/`
    /// folder yields an empty registry.
    pub fn open(
        project_root: &Path,
        name: &str,
        config: &QueriesConfig,
    ) -> Result<Self, LiftError> {
        let path = study_path(project_root, name);
        if !path.is_dir() {
            return Err(StudyError::NotFound {
                name: name.to_string(),
                path,
            }
            .into());
        }

        let manifest_path = path.join(constants::STUDY_MANIFEST);
        let manifest = if manifest_path.is_file() {
            let raw =
                std::fs::read_to_string(&manifest_path).map_err(|source| StudyError::Io {
                    path: manifest_path.clone(),
                    source,
                })?;
            serde_yaml::from_str(&raw).map_err(|err| StudyError::InvalidManifest {
                path: manifest_path,
                message: err.to_string(),
            })?
        } else {
            StudyManifest {
                name: name.to_string(),
                ..Default::default()
            }
        };

        let queries_path = path.join(constants::QUERIES_DIR);
        let registry = if queries_path.is_dir() {
            let (registry, _) = QueryRegistry::from_dir(&queries_path, config)?;
            registry
        } else {
            QueryRegistry::new()
        };

        Ok(Self {
            name: name.to_string(),
            path,
            manifest,
            registry,
        })
    }

    /// Render one of the study's queries, merging the manifest's default
    /// parameters under the supplied ones.
    pub fn render(
        &self,
        renderer: &Renderer,
        query: &str,
        call_params: &ParamMap,
    ) -> Result<String, LiftError> {
        let merged = params::merge(&self.manifest.params, call_params);
        Ok(renderer.render_named(&self.registry, query, &merged)?)
    }
}

fn study_path(project_root: &Path, name: &str) -> PathBuf {
    project_root.join(constants::STUDIES_DIR).join(name)
}

fn validate_name(name: &str) -> Result<(), StudyError> {
    if name.is_empty() {
        return Err(StudyError::InvalidName {
            name: name.to_string(),
            message: "name must be non-empty".into(),
        });
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(StudyError::InvalidName {
            name: name.to_string(),
            message: "use lowercase letters, digits, `-` and `_`".into(),
        });
    }
    Ok(())
}
