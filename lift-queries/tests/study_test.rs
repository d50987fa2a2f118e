//! Study convention tests: scaffold layout, open/render, manifest defaults.

use std::fs;

use lift_core::config::QueriesConfig;
use lift_core::errors::{LiftError, StudyError};
use lift_queries::params::ParamMap;
use lift_queries::render::Renderer;
use lift_queries::study::Study;
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_scaffold_creates_convention_layout() {
    let root = TempDir::new().expect("create temp dir");
    let path = Study::scaffold(root.path(), "geo-de").expect("scaffold");

    assert!(path.join("queries").is_dir());
    assert!(path.join("data").is_dir());
    assert!(path.join("notebooks").is_dir());
    assert!(path.join("study.yml").is_file());
    assert!(path.join("queries/kpi_daily.sql").is_file());
}

#[test]
fn test_scaffold_refuses_existing_study() {
    let root = TempDir::new().expect("create temp dir");
    Study::scaffold(root.path(), "geo-de").expect("scaffold");
    let err = Study::scaffold(root.path(), "geo-de").unwrap_err();
    assert!(matches!(err, StudyError::AlreadyExists { .. }));
}

#[test]
fn test_scaffold_rejects_bad_names() {
    let root = TempDir::new().expect("create temp dir");
    assert!(Study::scaffold(root.path(), "../escape").is_err());
    assert!(Study::scaffold(root.path(), "With Space").is_err());
}

#[test]
fn test_open_missing_study_is_not_found() {
    let root = TempDir::new().expect("create temp dir");
    let err = Study::open(root.path(), "absent", &QueriesConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        LiftError::Study(StudyError::NotFound { .. })
    ));
}

#[test]
fn test_open_scaffolded_study_and_render_starter() {
    let root = TempDir::new().expect("create temp dir");
    Study::scaffold(root.path(), "geo-de").expect("scaffold");

    let study = Study::open(root.path(), "geo-de", &QueriesConfig::default()).expect("open");
    assert_eq!(study.name, "geo-de");
    assert_eq!(study.registry.names(), vec!["kpi_daily"]);

    let mut params = ParamMap::new();
    params.insert("kpi_table".into(), json!("acme.kpi"));
    params.insert("start_date".into(), json!("2022-03-05"));
    params.insert("end_date".into(), json!("2022-04-05"));

    let sql = study
        .render(&Renderer::new(), "kpi_daily", &params)
        .expect("render");
    assert!(sql.contains("`acme.kpi`"));
    assert!(sql.contains("BETWEEN '2022-03-05' AND '2022-04-05'"));
}

#[test]
fn test_manifest_params_merge_under_call_params() {
    let root = TempDir::new().expect("create temp dir");
    let path = Study::scaffold(root.path(), "geo-de").expect("scaffold");

    fs::write(
        path.join("study.yml"),
        "name: geo-de\nkpi: revenue\nparams:\n  kpi_table: acme.kpi\n  start_date: '2022-01-01'\n",
    )
    .expect("write manifest");

    let study = Study::open(root.path(), "geo-de", &QueriesConfig::default()).expect("open");
    assert_eq!(study.manifest.kpi.as_deref(), Some("revenue"));

    // end_date comes from the call site; start_date override wins over the
    // manifest default.
    let mut params = ParamMap::new();
    params.insert("start_date".into(), json!("2022-03-05"));
    params.insert("end_date".into(), json!("2022-04-05"));

    let sql = study
        .render(&Renderer::new(), "kpi_daily", &params)
        .expect("render");
    assert!(sql.contains("BETWEEN '2022-03-05'"));
    assert!(sql.contains("`acme.kpi`"));
}

#[test]
fn test_open_without_manifest_uses_defaults() {
    let root = TempDir::new().expect("create temp dir");
    let path = Study::scaffold(root.path(), "geo-de").expect("scaffold");
    fs::remove_file(path.join("study.yml")).expect("remove manifest");

    let study = Study::open(root.path(), "geo-de", &QueriesConfig::default()).expect("open");
    assert_eq!(study.manifest.name, "geo-de");
    assert!(study.manifest.params.is_empty());
}
