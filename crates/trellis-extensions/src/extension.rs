//! Extension metadata.

use serde::{Deserialize, Serialize};

/// Metadata about a registered extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionInfo {
    /// Unique extension identifier.
    pub id: String,
    /// Human-readable extension name.
    pub name: String,
    /// Extension version string.
    pub version: String,
    /// Extension description.
    pub description: String,
    /// Author or maintainer.
    pub author: String,
    /// Whether the extension is currently enabled.
    pub enabled: bool,
}

impl ExtensionInfo {
    /// Creates metadata for an enabled extension.
    pub fn new(id: &str, name: &str, version: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            version: version.to_string(),
            description: String::new(),
            author: String::new(),
            enabled: true,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Sets the author.
    pub fn with_author(mut self, author: &str) -> Self {
        self.author = author.to_string();
        self
    }
}
