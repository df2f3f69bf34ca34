use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateRenderError {
    #[error("invalid regex for template placeholder: {0}")]
    Regex(String),

    #[error("failed to write rendered template {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type RenderContext = HashMap<String, String>;

/// Render a string template with variable substitution.
///
/// Supports:
/// - Simple variables: `{{var_name}}`
/// - Filters: `{{var_name | filter}}` (escape, lower, upper, trim)
///
/// Unknown variables are left untouched.
pub fn render_string(
    template: &str,
    ctx: &RenderContext,
) -> Result<String, TemplateRenderError> {
    let re = Regex::new(r"\{\{([^{}]+)\}\}")
        .map_err(|e| TemplateRenderError::Regex(e.to_string()))?;

    let result = re.replace_all(template, |caps: &regex::Captures<'_>| {
        let expr = caps[1].trim();

        // Check for filter syntax: "var_name | filter"
        if let Some((var_name, filter)) = parse_filter_expr(expr) {
            if let Some(value) = ctx.get(var_name) {
                return apply_filter(value, filter);
            }
            // Variable not found, return original
            return caps[0].to_string();
        }

        ctx.get(expr).cloned().unwrap_or_else(|| caps[0].to_string())
    });

    Ok(result.into_owned())
}

/// Render `template` and write the result to `out_path`.
pub fn render_to_file(
    template: &str,
    ctx: &RenderContext,
    out_path: &Path,
) -> Result<(), TemplateRenderError> {
    let rendered = render_string(template, ctx)?;
    fs::write(out_path, rendered)
        .map_err(|e| TemplateRenderError::Write { path: out_path.to_path_buf(), source: e })
}

/// Parse a filter expression like "var_name | filter_name".
/// Returns (var_name, filter_name) if valid, None otherwise.
fn parse_filter_expr(expr: &str) -> Option<(&str, &str)> {
    let (var_name, filter) = expr.split_once('|')?;
    let var_name = var_name.trim();
    let filter = filter.trim();
    if var_name.is_empty() || filter.is_empty() {
        return None;
    }
    Some((var_name, filter))
}

/// Apply a filter to a value.
fn apply_filter(value: &str, filter: &str) -> String {
    match filter {
        "escape" | "e" => escape_html(value),
        "lowercase" | "lower" => value.to_lowercase(),
        "uppercase" | "upper" => value.to_uppercase(),
        "trim" => value.trim().to_string(),
        _ => value.to_string(), // Unknown filter, return unchanged
    }
}

/// Escape the characters HTML treats specially.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn ctx(pairs: &[(&str, &str)]) -> RenderContext {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_simple_variables() {
        let out = render_string("<h1>{{ title }}</h1>{{body}}", &ctx(&[
            ("title", "Vault"),
            ("body", "<svg/>"),
        ]))
        .unwrap();
        assert_eq!(out, "<h1>Vault</h1><svg/>");
    }

    #[test]
    fn test_unknown_variable_kept() {
        let out = render_string("{{missing}} {{missing | upper}}", &ctx(&[])).unwrap();
        assert_eq!(out, "{{missing}} {{missing | upper}}");
    }

    #[test]
    fn test_filters() {
        let c = ctx(&[("name", " <Fire & Water> ")]);
        assert_eq!(
            render_string("{{name | escape}}", &c).unwrap(),
            " &lt;Fire &amp; Water&gt; "
        );
        assert_eq!(render_string("{{name|trim}}", &c).unwrap(), "<Fire & Water>");
        assert_eq!(render_string("{{name | upper}}", &c).unwrap(), " <FIRE & WATER> ");
    }

    #[test]
    fn test_render_to_file() {
        let tmp = tempdir().unwrap();
        let out = tmp.path().join("index.html");
        render_to_file("<p>{{n}}</p>", &ctx(&[("n", "3")]), &out).unwrap();
        assert_eq!(fs::read_to_string(out).unwrap(), "<p>3</p>");
    }
}
