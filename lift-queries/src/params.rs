//! Rendering parameters: YAML files, merge semantics, CLI literals.

use std::collections::BTreeMap;
use std::path::Path;

use lift_core::errors::QueryError;
use serde_json::Value;

/// Named substitution values for rendering. BTreeMap keeps iteration
/// order deterministic in logs and error messages.
pub type ParamMap = BTreeMap<String, Value>;

/// Load a parameter file: a YAML mapping with string keys.
pub fn load_params_file(path: &Path) -> Result<ParamMap, QueryError> {
    let raw = std::fs::read_to_string(path).map_err(|source| QueryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_yaml::from_str(&raw).map_err(|err| QueryError::InvalidParams {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        Value::Null => Ok(ParamMap::new()),
        other => Err(QueryError::InvalidParams {
            path: path.to_path_buf(),
            message: format!("expected a mapping, got {}", type_name(&other)),
        }),
    }
}

/// Merge parameter maps; entries in `overrides` win over `base`.
pub fn merge(base: &ParamMap, overrides: &ParamMap) -> ParamMap {
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Parse a CLI `key=value` literal. The value is interpreted as YAML, so
/// `n=7` is a number, `flag=true` a bool, and anything else a string.
pub fn parse_literal(literal: &str) -> Result<(String, Value), QueryError> {
    let (key, raw) = literal.split_once('=').ok_or_else(|| QueryError::InvalidParams {
        path: Default::default(),
        message: format!("expected key=value, got `{literal}`"),
    })?;
    if key.is_empty() {
        return Err(QueryError::InvalidParams {
            path: Default::default(),
            message: format!("empty key in `{literal}`"),
        });
    }
    let value = serde_yaml::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
