//! `%{ expression }` interpolation.
//!
//! Placeholders are evaluated against an ordered list of context layers,
//! innermost first. A placeholder that resolves nowhere is replaced by its
//! own expression text.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use tracing::trace;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::expression::{render_value, Expression};

/// Opening delimiter of a placeholder.
pub const INTERPOLATION_PREFIX: &str = "%{";

/// `%{`, the shortest run of anything (newlines included), then `}`.
pub static INTERPOLATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%\{((?s:.)+?)\}").expect("interpolation pattern is valid"));

static MUSTACHE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{((?s:.)+?)\}\}").expect("mustache pattern is valid"));

/// Replaces every placeholder in `template`.
///
/// `layers` is searched in order for each expression; the first layer where
/// the path resolves supplies the value.
pub fn interpolate(template: &str, layers: &[&Value], diagnostics: &Diagnostics) -> String {
    if MUSTACHE_RE.is_match(template) {
        diagnostics.report(Diagnostic::MustacheSyntax {
            template: template.to_string(),
        });
    }
    if !template.contains(INTERPOLATION_PREFIX) {
        return template.to_string();
    }

    INTERPOLATION_RE
        .replace_all(template, |captures: &Captures<'_>| {
            let expression = captures[1].trim();
            evaluate_in_layers(expression, layers).unwrap_or_else(|| {
                diagnostics.report(Diagnostic::UnresolvedExpression {
                    expression: expression.to_string(),
                });
                expression.to_string()
            })
        })
        .into_owned()
}

/// Single-context shorthand for [`interpolate`].
pub fn interpolate_with(template: &str, context: &Value, diagnostics: &Diagnostics) -> String {
    interpolate(template, &[context], diagnostics)
}

/// Evaluates `expression` in each layer until one resolves it.
pub fn evaluate_in_layers(expression: &str, layers: &[&Value]) -> Option<String> {
    let parsed = match Expression::parse(expression) {
        Ok(parsed) => parsed,
        Err(e) => {
            trace!("Refusing to evaluate {:?}: {}", expression, e);
            return None;
        }
    };
    layers
        .iter()
        .enumerate()
        .find_map(|(depth, layer)| {
            parsed.evaluate(layer).map(|value| {
                trace!(expression, depth, "Resolved placeholder");
                render_value(&value)
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use serde_json::json;

    #[test]
    fn test_simple_placeholder() {
        let diagnostics = Diagnostics::new(true);
        let context = json!({ "user": { "name": "Bob" } });
        assert_eq!(
            interpolate_with("Hi %{ user.name }", &context, &diagnostics),
            "Hi Bob"
        );
    }

    #[test]
    fn test_unresolved_expression_is_echoed() {
        let sink = MemorySink::shared();
        let diagnostics = Diagnostics::with_sink(sink.clone(), false);
        assert_eq!(
            interpolate_with("Value: %{ missing.path }", &json!({}), &diagnostics),
            "Value: missing.path"
        );
        assert_eq!(
            sink.records(),
            vec![Diagnostic::UnresolvedExpression {
                expression: "missing.path".into()
            }]
        );
    }

    #[test]
    fn test_outer_layers_are_searched() {
        let diagnostics = Diagnostics::new(true);
        let inner = json!({ "count": 2 });
        let outer = json!({ "count": 9, "owner": { "name": "Ana" } });
        assert_eq!(
            interpolate(
                "%{ count } cars for %{owner.name}",
                &[&inner, &outer],
                &diagnostics
            ),
            "2 cars for Ana"
        );
    }

    #[test]
    fn test_multiline_placeholder() {
        let diagnostics = Diagnostics::new(true);
        let context = json!({ "name": "Zoë" });
        assert_eq!(
            interpolate_with("Hello %{\n  name\n}!", &context, &diagnostics),
            "Hello Zoë!"
        );
    }

    #[test]
    fn test_mustache_is_reported_and_kept() {
        let sink = MemorySink::shared();
        let diagnostics = Diagnostics::with_sink(sink.clone(), false);
        let context = json!({ "name": "Ana" });
        assert_eq!(
            interpolate_with("{{ name }} and %{ name }", &context, &diagnostics),
            "{{ name }} and Ana"
        );
        assert!(matches!(
            sink.records().as_slice(),
            [Diagnostic::MustacheSyntax { .. }]
        ));
    }

    #[test]
    fn test_code_is_never_run() {
        let diagnostics = Diagnostics::new(true);
        let context = json!({ "a": 1 });
        assert_eq!(
            interpolate_with("%{ a + 1 }", &context, &diagnostics),
            "a + 1"
        );
    }

    #[test]
    fn test_no_layers() {
        let diagnostics = Diagnostics::new(true);
        assert_eq!(interpolate("%{ x }", &[], &diagnostics), "x");
        assert_eq!(interpolate("plain", &[], &diagnostics), "plain");
    }
}
