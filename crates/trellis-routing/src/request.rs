//! Request and template context types.
//!
//! The host's extension middleware resolves the incoming request and stashes
//! the captured path parameters into a [`RequestContext`]; template hooks
//! read them back when deciding whether they apply to the current page.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-request data visible to extension hooks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestContext {
    /// The request path, e.g. `/reviews/42/`.
    pub path: String,
    /// Path keyword arguments stashed by the extension middleware.
    pub kwargs: HashMap<String, String>,
}

impl RequestContext {
    /// Creates a context for a request path with no stashed kwargs.
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            kwargs: HashMap::new(),
        }
    }

    /// Adds a stashed keyword argument.
    pub fn with_kwarg(mut self, key: &str, value: &str) -> Self {
        self.kwargs.insert(key.to_string(), value.to_string());
        self
    }
}

/// Context handed to template hooks at render time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateContext {
    /// The current request.
    pub request: RequestContext,
    /// Arbitrary template variables keyed by name.
    pub values: HashMap<String, Value>,
}

impl TemplateContext {
    /// Creates a template context for a request.
    pub fn new(request: RequestContext) -> Self {
        Self {
            request,
            values: HashMap::new(),
        }
    }

    /// Adds a template variable.
    pub fn with_value(mut self, key: &str, value: Value) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    /// Gets a template variable by name.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}
