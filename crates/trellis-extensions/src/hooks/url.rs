//! URL hook — installs extension URL patterns into a parent resolver.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use trellis_core::config::extensions::ExtensionsConfig;
use trellis_core::result::AppResult;
use trellis_routing::directory::ResolverDirectory;
use trellis_routing::pattern::RoutePattern;
use trellis_routing::resolver::RouteResolver;

use super::{ExtensionHook, HookKind};

/// A hook that installs custom URL patterns.
///
/// The patterns reside in a host-selected parent resolver: the resolver named
/// by `extension_root_urlconf`, falling back to `site_root_urlconf`, falling
/// back to the directory's default. Installation appends the patterns to the
/// parent's list; shutdown removes exactly those patterns, by identity.
#[derive(Debug)]
pub struct UrlHook {
    /// Owning extension ID.
    extension_id: String,
    /// The parent resolver the patterns were installed into.
    parent_resolver: Arc<RouteResolver>,
    /// The patterns this hook added.
    patterns: Vec<Arc<RoutePattern>>,
}

impl UrlHook {
    /// Installs the patterns and returns the hook.
    ///
    /// Fails with a configuration error when the configured parent resolver
    /// does not exist in the directory.
    pub async fn install(
        extension_id: &str,
        directory: &ResolverDirectory,
        config: &ExtensionsConfig,
        patterns: Vec<Arc<RoutePattern>>,
    ) -> AppResult<Self> {
        let parent_resolver = directory.resolver_for(config).await?;

        parent_resolver.install(&patterns).await;

        info!(
            extension_id = %extension_id,
            patterns = patterns.len(),
            "URL hook installed"
        );

        Ok(Self {
            extension_id: extension_id.to_string(),
            parent_resolver,
            patterns,
        })
    }

    /// Removes exactly the patterns this hook installed.
    ///
    /// Fails on the first pattern that is no longer present in the parent
    /// resolver; a pattern removed behind the hook's back breaks the
    /// exactly-once teardown invariant, as does a second shutdown.
    pub async fn shutdown(&self) -> AppResult<()> {
        for pattern in &self.patterns {
            self.parent_resolver.remove(pattern).await?;
        }

        info!(
            extension_id = %self.extension_id,
            patterns = self.patterns.len(),
            "URL hook shut down"
        );

        Ok(())
    }

    /// The patterns this hook installed.
    pub fn patterns(&self) -> &[Arc<RoutePattern>] {
        &self.patterns
    }

    /// The resolver the patterns were installed into.
    pub fn parent_resolver(&self) -> &Arc<RouteResolver> {
        &self.parent_resolver
    }
}

#[async_trait]
impl ExtensionHook for UrlHook {
    fn extension_id(&self) -> &str {
        &self.extension_id
    }

    fn kind(&self) -> HookKind {
        HookKind::Url
    }

    async fn shutdown(&self) -> AppResult<()> {
        UrlHook::shutdown(self).await
    }
}
