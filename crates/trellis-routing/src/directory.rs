//! Resolver directory — named resolvers plus a default fallback.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use trellis_core::config::extensions::ExtensionsConfig;

use crate::error::RoutingError;
use crate::resolver::RouteResolver;

/// Directory of named [`RouteResolver`] instances.
///
/// The host registers its root resolvers here by name; extension URL hooks
/// pick their parent resolver through [`ResolverDirectory::resolver_for`]
/// using the configured fallback chain.
#[derive(Debug)]
pub struct ResolverDirectory {
    /// The default resolver, used when configuration names none.
    default: Arc<RouteResolver>,
    /// Named resolvers.
    named: RwLock<HashMap<String, Arc<RouteResolver>>>,
}

impl ResolverDirectory {
    /// Creates a directory with a fresh default resolver.
    pub fn new() -> Self {
        Self {
            default: Arc::new(RouteResolver::new()),
            named: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a resolver under a name, replacing any previous entry.
    pub async fn insert(&self, name: &str, resolver: Arc<RouteResolver>) {
        let mut named = self.named.write().await;
        named.insert(name.to_string(), resolver);

        info!(resolver = %name, "Resolver registered");
    }

    /// Looks up a resolver by name.
    pub async fn get(&self, name: &str) -> Option<Arc<RouteResolver>> {
        let named = self.named.read().await;
        named.get(name).cloned()
    }

    /// Returns the default resolver.
    pub fn default_resolver(&self) -> Arc<RouteResolver> {
        self.default.clone()
    }

    /// Selects the parent resolver for extension URL patterns.
    ///
    /// Order: `extension_root_urlconf`, then `site_root_urlconf`, then the
    /// default resolver. A configured name that is absent from the directory
    /// is an error rather than a silent fallback.
    pub async fn resolver_for(
        &self,
        config: &ExtensionsConfig,
    ) -> Result<Arc<RouteResolver>, RoutingError> {
        let configured = config
            .extension_root_urlconf
            .as_deref()
            .or(config.site_root_urlconf.as_deref());

        match configured {
            Some(name) => self
                .get(name)
                .await
                .ok_or_else(|| RoutingError::UnknownResolver {
                    name: name.to_string(),
                }),
            None => Ok(self.default_resolver()),
        }
    }
}

impl Default for ResolverDirectory {
    fn default() -> Self {
        Self::new()
    }
}
