//! Template hook — renders an extension template at a named injection point.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use trellis_core::result::AppResult;
use trellis_routing::request::TemplateContext;
use trellis_routing::resolver::RouteResolver;

use super::registry::TemplateHookRegistry;
use super::{ExtensionHook, HookKind};

/// A hook that renders a template at injection points defined in host
/// templates.
///
/// Installation registers the hook in the shared [`TemplateHookRegistry`]
/// under its injection-point name; the rendering middleware enumerates the
/// registered hooks per point and asks each one whether it applies to the
/// current request.
#[derive(Debug)]
pub struct TemplateHook {
    /// Owning extension ID.
    extension_id: String,
    /// Injection-point name this hook renders into.
    point: String,
    /// Identifier of the template to render.
    template_name: String,
    /// Route names this hook is restricted to. Empty means "everywhere".
    apply_to: Vec<String>,
    /// Registry the hook is installed in.
    registry: Arc<TemplateHookRegistry>,
    /// Resolver used for reverse URL lookup during applicability checks.
    resolver: Arc<RouteResolver>,
}

impl TemplateHook {
    /// Registers a new template hook and returns the shared instance.
    pub async fn install(
        extension_id: &str,
        registry: Arc<TemplateHookRegistry>,
        resolver: Arc<RouteResolver>,
        point: &str,
        template_name: &str,
        apply_to: Vec<String>,
    ) -> Arc<Self> {
        let hook = Arc::new(Self {
            extension_id: extension_id.to_string(),
            point: point.to_string(),
            template_name: template_name.to_string(),
            apply_to,
            registry: registry.clone(),
            resolver,
        });

        registry.register(hook.clone()).await;
        hook
    }

    /// Returns whether this hook should render for the given context.
    ///
    /// With no restriction list the hook applies everywhere. Otherwise each
    /// restricted route name is reverse-resolved with the kwargs stashed in
    /// the request context; when that fails the reversal is retried without
    /// arguments, since the route may not take any. The hook applies when a
    /// reversed URL equals the current request path. Routes that reverse
    /// neither way are skipped; reversal failures are never surfaced as
    /// errors.
    pub async fn applies_to(&self, context: &TemplateContext) -> bool {
        if self.apply_to.is_empty() {
            return true;
        }

        let kwargs = &context.request.kwargs;
        let current_url = &context.request.path;

        for applicable in &self.apply_to {
            let reversed = match self.resolver.reverse(applicable, kwargs).await {
                Ok(url) => url,
                Err(_) => match self.resolver.reverse(applicable, &HashMap::new()).await {
                    Ok(url) => url,
                    Err(err) => {
                        debug!(
                            route = %applicable,
                            error = %err,
                            "Route does not reverse, skipping"
                        );
                        continue;
                    }
                },
            };

            if reversed == *current_url {
                return true;
            }
        }

        false
    }

    /// Removes this hook from the registry.
    pub async fn shutdown(&self) -> AppResult<()> {
        self.registry.remove(self).await
    }

    /// The injection-point name.
    pub fn point(&self) -> &str {
        &self.point
    }

    /// The template identifier.
    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    /// The route-name restriction list.
    pub fn apply_to(&self) -> &[String] {
        &self.apply_to
    }

    /// The owning extension's ID.
    pub fn extension_id(&self) -> &str {
        &self.extension_id
    }
}

#[async_trait]
impl ExtensionHook for TemplateHook {
    fn extension_id(&self) -> &str {
        &self.extension_id
    }

    fn kind(&self) -> HookKind {
        HookKind::Template
    }

    async fn shutdown(&self) -> AppResult<()> {
        TemplateHook::shutdown(self).await
    }
}
