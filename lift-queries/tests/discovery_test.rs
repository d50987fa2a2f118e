//! Discovery tests: extension filtering, depth limits, error handling,
//! deterministic ordering.

use std::fs;
use std::path::Path;

use lift_queries::discovery::{discover, DiscoveryOptions};
use lift_queries::registry::QueryRegistry;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, content).expect("write file");
}

#[test]
fn test_discovers_only_matching_extension() {
    let dir = TempDir::new().expect("create temp dir");
    write(dir.path(), "kpi_daily.sql", "SELECT 1");
    write(dir.path(), "notes.md", "# notes");
    write(dir.path(), "params.yml", "a: 1");

    let discovery = discover(dir.path(), &DiscoveryOptions::default()).expect("discover");
    assert_eq!(discovery.stats.total_templates, 1);
    assert_eq!(discovery.templates[0].name, "kpi_daily");
    assert_eq!(discovery.stats.files_skipped_extension, 2);
}

#[test]
fn test_nested_names_are_slash_joined() {
    let dir = TempDir::new().expect("create temp dir");
    write(dir.path(), "geo/kpi_daily.sql", "SELECT 1");
    write(dir.path(), "geo/de/kpi_weekly.sql", "SELECT 2");

    let discovery = discover(dir.path(), &DiscoveryOptions::default()).expect("discover");
    let names: Vec<&str> = discovery.templates.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["geo/de/kpi_weekly", "geo/kpi_daily"]);
}

#[test]
fn test_max_depth_limits_descent() {
    let dir = TempDir::new().expect("create temp dir");
    write(dir.path(), "top.sql", "SELECT 0");
    write(dir.path(), "a/one.sql", "SELECT 1");
    write(dir.path(), "a/b/two.sql", "SELECT 2");
    write(dir.path(), "a/b/c/three.sql", "SELECT 3");

    let options = DiscoveryOptions {
        max_depth: 2,
        ..Default::default()
    };
    let discovery = discover(dir.path(), &options).expect("discover");
    let names: Vec<&str> = discovery.templates.iter().map(|t| t.name.as_str()).collect();
    assert!(names.contains(&"top"));
    assert!(names.contains(&"a/one"));
    assert!(names.contains(&"a/b/two"));
    assert!(!names.contains(&"a/b/c/three"));
}

#[test]
fn test_deterministic_ordering() {
    let dir = TempDir::new().expect("create temp dir");
    write(dir.path(), "zebra.sql", "SELECT 1");
    write(dir.path(), "alpha.sql", "SELECT 2");
    write(dir.path(), "mid/beta.sql", "SELECT 3");

    let first = discover(dir.path(), &DiscoveryOptions::default()).expect("discover");
    let second = discover(dir.path(), &DiscoveryOptions::default()).expect("discover");
    let first_names: Vec<&str> = first.templates.iter().map(|t| t.name.as_str()).collect();
    let second_names: Vec<&str> = second.templates.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(first_names, second_names);
}

#[test]
fn test_missing_root_is_error() {
    let dir = TempDir::new().expect("create temp dir");
    let missing = dir.path().join("nope");
    assert!(discover(&missing, &DiscoveryOptions::default()).is_err());
}

#[test]
fn test_content_hash_tracks_content() {
    let dir = TempDir::new().expect("create temp dir");
    write(dir.path(), "a.sql", "SELECT 1");
    write(dir.path(), "b.sql", "SELECT 1");
    write(dir.path(), "c.sql", "SELECT 2");

    let discovery = discover(dir.path(), &DiscoveryOptions::default()).expect("discover");
    let by_name = |name: &str| {
        discovery
            .templates
            .iter()
            .find(|t| t.name == name)
            .expect("template")
    };
    assert_eq!(by_name("a").content_hash, by_name("b").content_hash);
    assert_ne!(by_name("a").content_hash, by_name("c").content_hash);
}

#[test]
fn test_continue_on_error_records_failures() {
    let dir = TempDir::new().expect("create temp dir");
    write(dir.path(), "good.sql", "SELECT 1");
    // Invalid UTF-8 makes read_to_string fail.
    let bad = dir.path().join("bad.sql");
    fs::write(&bad, [0xFF, 0xFE, 0x00]).expect("write bytes");

    let options = DiscoveryOptions {
        continue_on_error: true,
        ..Default::default()
    };
    let discovery = discover(dir.path(), &options).expect("discover");
    assert_eq!(discovery.stats.total_templates, 1);
    assert_eq!(discovery.failed.len(), 1);
    assert_eq!(discovery.failed[0].0, bad);

    // Without the flag the same tree aborts.
    let strict = DiscoveryOptions::default();
    assert!(discover(dir.path(), &strict).is_err());
}

#[test]
fn test_registry_from_dir_end_to_end() {
    let dir = TempDir::new().expect("create temp dir");
    write(dir.path(), "kpi_daily.sql", "SELECT '{{ start_date }}'");
    write(dir.path(), "geo/regions.sql", "SELECT region FROM geo");

    let config = lift_core::config::QueriesConfig::default();
    let (registry, discovery) = QueryRegistry::from_dir(dir.path(), &config).expect("from_dir");
    assert_eq!(registry.names(), vec!["geo/regions", "kpi_daily"]);
    assert_eq!(discovery.stats.total_templates, 2);
    assert!(registry.get("kpi_daily").is_ok());
    assert!(registry.get("absent").is_err());
}
