//! Extension hook configuration.

use serde::{Deserialize, Serialize};

/// Extension hook configuration.
///
/// Controls which resolver extension-contributed URL patterns are installed
/// into. When `extension_root_urlconf` is unset, `site_root_urlconf` is used;
/// when both are unset, the directory's default resolver is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtensionsConfig {
    /// Name of the resolver that receives extension URL patterns.
    #[serde(default)]
    pub extension_root_urlconf: Option<String>,
    /// Name of the site-wide root resolver, used as a fallback.
    #[serde(default)]
    pub site_root_urlconf: Option<String>,
}
