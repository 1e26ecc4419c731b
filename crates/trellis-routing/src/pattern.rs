//! Path templates and named route patterns.
//!
//! A path template is a `/`-separated path whose segments are either
//! literals or `{param}` placeholders, e.g. `/reviews/{id}/comments/`.
//! Templates support both directions: matching a concrete request path
//! (extracting parameter values) and rendering a concrete path from
//! keyword arguments (reverse lookup).

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RoutingError;

/// One segment of a parsed path template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
enum Segment {
    /// A literal path segment, matched verbatim.
    Literal(String),
    /// A `{name}` placeholder, matching any single non-empty segment.
    Param(String),
}

/// A parsed path template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathTemplate {
    /// The original template string.
    raw: String,
    /// Parsed segments, including empty literals for leading/trailing slashes.
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parse a template string.
    ///
    /// Fails if a segment mixes braces with other characters, if a
    /// placeholder name is empty, or if the same placeholder appears twice.
    pub fn parse(template: &str) -> Result<Self, RoutingError> {
        if !template.starts_with('/') {
            return Err(RoutingError::InvalidTemplate {
                template: template.to_string(),
                reason: "template must start with '/'".to_string(),
            });
        }

        let mut segments = Vec::new();
        let mut seen = Vec::new();

        for part in template.split('/') {
            if part.starts_with('{') || part.ends_with('}') {
                let name = part
                    .strip_prefix('{')
                    .and_then(|p| p.strip_suffix('}'))
                    .ok_or_else(|| RoutingError::InvalidTemplate {
                        template: template.to_string(),
                        reason: format!("malformed placeholder segment '{part}'"),
                    })?;

                if name.is_empty() {
                    return Err(RoutingError::InvalidTemplate {
                        template: template.to_string(),
                        reason: "empty placeholder name".to_string(),
                    });
                }
                if seen.contains(&name) {
                    return Err(RoutingError::InvalidTemplate {
                        template: template.to_string(),
                        reason: format!("duplicate placeholder '{name}'"),
                    });
                }

                seen.push(name);
                segments.push(Segment::Param(name.to_string()));
            } else if part.contains('{') || part.contains('}') {
                return Err(RoutingError::InvalidTemplate {
                    template: template.to_string(),
                    reason: format!("stray brace in segment '{part}'"),
                });
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }

        Ok(Self {
            raw: template.to_string(),
            segments,
        })
    }

    /// The original template string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Names of the placeholder parameters, in template order.
    pub fn param_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Match a concrete request path, extracting placeholder values.
    ///
    /// Returns `None` when the path does not match. Placeholders match any
    /// single non-empty segment.
    pub fn captures(&self, path: &str) -> Option<HashMap<String, String>> {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut kwargs = HashMap::new();
        for (segment, part) in self.segments.iter().zip(&parts) {
            match segment {
                Segment::Literal(lit) => {
                    if lit != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    kwargs.insert(name.clone(), (*part).to_string());
                }
            }
        }

        Some(kwargs)
    }

    /// Render a concrete path from keyword arguments.
    ///
    /// The keyword arguments must match the placeholder set exactly: a
    /// missing placeholder value fails, and so does an extra argument the
    /// template does not accept. The strictness is what lets callers detect
    /// that a route "takes no arguments" and retry without them.
    pub fn render(&self, kwargs: &HashMap<String, String>) -> Result<String, RoutingError> {
        let params = self.param_names();

        for key in kwargs.keys() {
            if !params.contains(&key.as_str()) {
                return Err(RoutingError::UnexpectedKwarg { param: key.clone() });
            }
        }

        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(lit) => parts.push(lit.clone()),
                Segment::Param(name) => {
                    let value =
                        kwargs
                            .get(name)
                            .ok_or_else(|| RoutingError::MissingParam {
                                param: name.clone(),
                            })?;
                    parts.push(value.clone());
                }
            }
        }

        Ok(parts.join("/"))
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// A route pattern: a path template with an optional route name.
///
/// The name is what reverse lookup keys on; unnamed patterns can still be
/// resolved by path but never reversed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePattern {
    /// Optional route name for reverse lookup.
    name: Option<String>,
    /// The path template.
    template: PathTemplate,
}

impl RoutePattern {
    /// Create an unnamed pattern from a template string.
    pub fn new(template: &str) -> Result<Self, RoutingError> {
        Ok(Self {
            name: None,
            template: PathTemplate::parse(template)?,
        })
    }

    /// Create a named pattern from a template string.
    pub fn named(name: &str, template: &str) -> Result<Self, RoutingError> {
        Ok(Self {
            name: Some(name.to_string()),
            template: PathTemplate::parse(template)?,
        })
    }

    /// The route name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The path template.
    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// The template's original string form.
    pub fn path(&self) -> &str {
        self.template.as_str()
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", self.template, name),
            None => write!(f, "{}", self.template),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kwargs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_literal_template() {
        let template = PathTemplate::parse("/dashboard/").unwrap();
        assert!(template.param_names().is_empty());
        assert_eq!(template.as_str(), "/dashboard/");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(PathTemplate::parse("dashboard/").is_err());
        assert!(PathTemplate::parse("/a/{}/").is_err());
        assert!(PathTemplate::parse("/a/{id/").is_err());
        assert!(PathTemplate::parse("/a/x{id}/").is_err());
        assert!(PathTemplate::parse("/{id}/{id}/").is_err());
    }

    #[test]
    fn test_captures() {
        let template = PathTemplate::parse("/reviews/{id}/comments/").unwrap();

        let captured = template.captures("/reviews/42/comments/").unwrap();
        assert_eq!(captured.get("id").map(String::as_str), Some("42"));

        assert!(template.captures("/reviews/42/").is_none());
        assert!(template.captures("/reviews//comments/").is_none());
        assert!(template.captures("/articles/42/comments/").is_none());
    }

    #[test]
    fn test_render_round_trip() {
        let template = PathTemplate::parse("/reviews/{id}/comments/").unwrap();
        let rendered = template.render(&kwargs(&[("id", "42")])).unwrap();
        assert_eq!(rendered, "/reviews/42/comments/");
    }

    #[test]
    fn test_render_missing_param() {
        let template = PathTemplate::parse("/reviews/{id}/").unwrap();
        let err = template.render(&HashMap::new()).unwrap_err();
        assert!(matches!(err, RoutingError::MissingParam { .. }));
    }

    #[test]
    fn test_render_rejects_extra_kwargs() {
        let template = PathTemplate::parse("/dashboard/").unwrap();
        let err = template.render(&kwargs(&[("id", "42")])).unwrap_err();
        assert!(matches!(err, RoutingError::UnexpectedKwarg { .. }));
    }
}
