//! Directory walker assembling the discovery result.

use std::path::{Component, Path};
use std::time::Instant;

use ignore::WalkBuilder;
use lift_core::errors::QueryError;
use tracing::{debug, info};
use xxhash_rust::xxh3::xxh3_64;

use super::types::{DiscoveredTemplate, Discovery, DiscoveryOptions};

/// Discover template files under `root`.
///
/// Files with the configured extension are collected up to `max_depth`
/// directory levels below `root`; everything else is skipped. Entries come
/// back sorted by name, so repeated runs over the same tree are identical.
pub fn discover(root: &Path, options: &DiscoveryOptions) -> Result<Discovery, QueryError> {
    if !root.is_dir() {
        return Err(QueryError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let started = Instant::now();
    let mut discovery = Discovery::default();

    // ignore counts the root as depth 0 and files directly under it as
    // depth 1; max_depth counts directory levels below the root.
    let walk = WalkBuilder::new(root)
        .max_depth(Some(options.max_depth + 1))
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    for entry in walk {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if options.continue_on_error {
                    discovery.failed.push((root.to_path_buf(), err.to_string()));
                    continue;
                }
                return Err(QueryError::Io {
                    path: root.to_path_buf(),
                    source: std::io::Error::other(err),
                });
            }
        };

        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(options.extension.as_str()) {
            discovery.stats.files_skipped_extension += 1;
            continue;
        }

        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                if options.continue_on_error {
                    discovery
                        .failed
                        .push((path.to_path_buf(), err.to_string()));
                    continue;
                }
                return Err(QueryError::Io {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        let name = template_name(root, path);
        let file_size = entry.metadata().map(|m| m.len()).unwrap_or(source.len() as u64);
        let content_hash = xxh3_64(source.as_bytes());

        debug!(name = %name, path = %path.display(), "discovered template");
        discovery.stats.total_templates += 1;
        discovery.stats.total_size_bytes += file_size;
        discovery.templates.push(DiscoveredTemplate {
            name,
            path: path.to_path_buf(),
            source,
            file_size,
            content_hash,
        });
    }

    discovery.stats.discovery_ms = started.elapsed().as_millis() as u64;
    info!(
        templates = discovery.stats.total_templates,
        failed = discovery.failed.len(),
        elapsed_ms = discovery.stats.discovery_ms,
        root = %root.display(),
        "template discovery complete"
    );

    Ok(discovery)
}

/// Derive the registry name for a template: relative path with the
/// extension stripped, components joined with `/`.
fn template_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if let Some(file) = parts.last_mut() {
        if let Some(stem) = Path::new(file.as_str())
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
        {
            *file = stem;
        }
    }
    parts.join("/")
}
