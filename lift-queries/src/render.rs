//! Template rendering with named parameters.
//!
//! Jinja semantics come from `minijinja` in strict-undefined mode; this
//! module only wires lookup, parameter checking, and error mapping.
//! Rendering is pure: same template and parameters always produce the
//! same output string.

use lift_core::errors::QueryError;
use minijinja::{Environment, UndefinedBehavior};

use crate::params::ParamMap;
use crate::registry::{QueryRegistry, RegisteredQuery};

/// Stateless template renderer.
pub struct Renderer {
    env: Environment<'static>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        Self { env }
    }

    /// Render a registered query with the given parameters.
    ///
    /// Fails with [`QueryError::MissingParameter`] when the template
    /// references a variable not present in `params`.
    pub fn render(&self, query: &RegisteredQuery, params: &ParamMap) -> Result<String, QueryError> {
        self.render_source(&query.name, &query.source, params)
    }

    /// Look a query up by name in `registry` and render it.
    ///
    /// Fails with [`QueryError::MissingQuery`] when the name is absent.
    pub fn render_named(
        &self,
        registry: &QueryRegistry,
        name: &str,
        params: &ParamMap,
    ) -> Result<String, QueryError> {
        let query = registry.get(name)?;
        self.render(query, params)
    }

    /// Render a raw template source. `name` is used in error messages only.
    pub fn render_source(
        &self,
        name: &str,
        source: &str,
        params: &ParamMap,
    ) -> Result<String, QueryError> {
        let template =
            self.env
                .template_from_str(source)
                .map_err(|err| QueryError::TemplateSyntax {
                    query: name.to_string(),
                    message: err.to_string(),
                })?;

        // Check referenced variables up front so the error can name the
        // variable; strict undefined mode backstops nested lookups.
        let mut missing: Vec<String> = template
            .undeclared_variables(false)
            .into_iter()
            .filter(|variable| !params.contains_key(variable))
            .collect();
        if !missing.is_empty() {
            missing.sort_unstable();
            return Err(QueryError::MissingParameter {
                query: name.to_string(),
                variable: missing.remove(0),
            });
        }

        template
            .render(params)
            .map_err(|err| QueryError::RenderFailed {
                query: name.to_string(),
                message: err.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, serde_json::Value)]) -> ParamMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_render_interpolates_parameters() {
        let renderer = Renderer::new();
        let sql = renderer
            .render_source(
                "kpi_daily",
                "SELECT * FROM kpi WHERE date >= '{{ start_date }}'",
                &params(&[("start_date", json!("2022-03-05"))]),
            )
            .unwrap();
        assert_eq!(sql, "SELECT * FROM kpi WHERE date >= '2022-03-05'");
    }

    #[test]
    fn test_missing_parameter_names_the_variable() {
        let renderer = Renderer::new();
        let err = renderer
            .render_source("kpi_daily", "SELECT {{ a }}, {{ b }}", &params(&[]))
            .unwrap_err();
        // Sorted, so `a` is reported first.
        assert!(
            matches!(err, QueryError::MissingParameter { ref variable, .. } if variable == "a"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_unused_parameters_are_allowed() {
        let renderer = Renderer::new();
        let sql = renderer
            .render_source(
                "plain",
                "SELECT 1",
                &params(&[("unused", json!("value"))]),
            )
            .unwrap();
        assert_eq!(sql, "SELECT 1");
    }

    #[test]
    fn test_syntax_error_is_template_error() {
        let renderer = Renderer::new();
        let err = renderer
            .render_source("broken", "SELECT {% if %}", &params(&[]))
            .unwrap_err();
        assert!(matches!(err, QueryError::TemplateSyntax { .. }));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let renderer = Renderer::new();
        let p = params(&[("regions", json!(["berlin", "hamburg"])), ("n", json!(7))]);
        let source = "SELECT {{ n }} FROM t WHERE r IN ({% for r in regions %}'{{ r }}'{% if not loop.last %}, {% endif %}{% endfor %})";
        let first = renderer.render_source("loop", source, &p).unwrap();
        let second = renderer.render_source("loop", source, &p).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "SELECT 7 FROM t WHERE r IN ('berlin', 'hamburg')");
    }
}
