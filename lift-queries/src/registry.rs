//! Process-level query registry: name -> raw template.

use std::path::{Path, PathBuf};

use lift_core::config::QueriesConfig;
use lift_core::errors::QueryError;
use lift_core::types::FxHashMap;

use crate::discovery::{self, Discovery, DiscoveryOptions};

/// A registered query template.
#[derive(Debug, Clone)]
pub struct RegisteredQuery {
    pub name: String,
    /// Raw template text.
    pub source: String,
    /// Path the template was discovered at, when it came from disk.
    pub path: Option<PathBuf>,
    /// xxh3 hash of the template text.
    pub content_hash: u64,
}

/// Mapping from query name to raw SQL-template string.
///
/// Assembled once at start-up from a discovery run; lookups of absent
/// names fail with [`QueryError::MissingQuery`].
#[derive(Debug, Default)]
pub struct QueryRegistry {
    templates: FxHashMap<String, RegisteredQuery>,
}

impl QueryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry by discovering templates under `root`.
    pub fn from_dir(root: &Path, config: &QueriesConfig) -> Result<(Self, Discovery), QueryError> {
        let options = DiscoveryOptions::from(config);
        let discovery = discovery::discover(root, &options)?;
        let registry = Self::from_discovery(&discovery)?;
        Ok((registry, discovery))
    }

    /// Build a registry from an existing discovery result.
    pub fn from_discovery(discovery: &Discovery) -> Result<Self, QueryError> {
        let mut registry = Self::new();
        for template in &discovery.templates {
            registry.insert(RegisteredQuery {
                name: template.name.clone(),
                source: template.source.clone(),
                path: Some(template.path.clone()),
                content_hash: template.content_hash,
            })?;
        }
        Ok(registry)
    }

    /// Insert a template; duplicate names are an error.
    pub fn insert(&mut self, query: RegisteredQuery) -> Result<(), QueryError> {
        if self.templates.contains_key(&query.name) {
            return Err(QueryError::DuplicateName {
                name: query.name,
                path: query.path.unwrap_or_default(),
            });
        }
        self.templates.insert(query.name.clone(), query);
        Ok(())
    }

    /// Insert a template from a raw source string (no backing file).
    pub fn insert_source(
        &mut self,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<(), QueryError> {
        let name = name.into();
        let source = source.into();
        let content_hash = xxhash_rust::xxh3::xxh3_64(source.as_bytes());
        self.insert(RegisteredQuery {
            name,
            source,
            path: None,
            content_hash,
        })
    }

    /// Look up a query by name.
    pub fn get(&self, name: &str) -> Result<&RegisteredQuery, QueryError> {
        self.templates
            .get(name)
            .ok_or_else(|| QueryError::MissingQuery {
                name: name.to_string(),
            })
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_query_error() {
        let registry = QueryRegistry::new();
        let err = registry.get("absent").unwrap_err();
        assert!(matches!(err, QueryError::MissingQuery { name } if name == "absent"));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = QueryRegistry::new();
        registry.insert_source("kpi_daily", "SELECT 1").unwrap();
        let err = registry.insert_source("kpi_daily", "SELECT 2").unwrap_err();
        assert!(matches!(err, QueryError::DuplicateName { .. }));
    }

    #[test]
    fn test_names_sorted() {
        let mut registry = QueryRegistry::new();
        registry.insert_source("b", "SELECT 1").unwrap();
        registry.insert_source("a/c", "SELECT 2").unwrap();
        registry.insert_source("a/b", "SELECT 3").unwrap();
        assert_eq!(registry.names(), vec!["a/b", "a/c", "b"]);
    }
}
