//! Extension manager — lifecycle management for extensions and their hooks.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use trellis_core::config::extensions::ExtensionsConfig;
use trellis_core::error::AppError;
use trellis_core::result::AppResult;
use trellis_routing::directory::ResolverDirectory;

use crate::extension::ExtensionInfo;
use crate::hooks::ExtensionHook;
use crate::hooks::registry::TemplateHookRegistry;

/// Manages registered extensions and drives exactly-once hook teardown.
///
/// The manager owns the shared state hooks register into (the resolver
/// directory and the template hook registry) and keeps a per-extension
/// ledger of live hooks so that shutting an extension down tears each of
/// its hooks down exactly once.
#[derive(Debug)]
pub struct ExtensionManager {
    /// Extension hook configuration.
    config: ExtensionsConfig,
    /// Directory of resolvers that URL hooks install patterns into.
    directory: Arc<ResolverDirectory>,
    /// Shared template hook registry.
    template_hooks: Arc<TemplateHookRegistry>,
    /// Extension ID → metadata.
    extensions: RwLock<HashMap<String, ExtensionInfo>>,
    /// Extension ID → live hooks, in attach order.
    hooks: RwLock<HashMap<String, Vec<Arc<dyn ExtensionHook>>>>,
}

impl ExtensionManager {
    /// Creates a manager with fresh shared state.
    pub fn new(config: ExtensionsConfig) -> Self {
        Self {
            config,
            directory: Arc::new(ResolverDirectory::new()),
            template_hooks: Arc::new(TemplateHookRegistry::new()),
            extensions: RwLock::new(HashMap::new()),
            hooks: RwLock::new(HashMap::new()),
        }
    }

    /// The extension hook configuration.
    pub fn config(&self) -> &ExtensionsConfig {
        &self.config
    }

    /// The resolver directory URL hooks install into.
    pub fn directory(&self) -> &Arc<ResolverDirectory> {
        &self.directory
    }

    /// The shared template hook registry.
    pub fn template_hooks(&self) -> &Arc<TemplateHookRegistry> {
        &self.template_hooks
    }

    /// Registers an extension.
    pub async fn register_extension(&self, info: ExtensionInfo) -> AppResult<()> {
        let id = info.id.clone();

        let mut extensions = self.extensions.write().await;
        if extensions.contains_key(&id) {
            return Err(AppError::conflict(format!(
                "Extension '{id}' is already registered"
            )));
        }

        info!(
            extension_id = %id,
            name = %info.name,
            version = %info.version,
            "Registering extension"
        );

        extensions.insert(id.clone(), info);

        let mut hooks = self.hooks.write().await;
        hooks.insert(id, Vec::new());

        Ok(())
    }

    /// Records a live hook against its owning extension.
    ///
    /// The extension must be registered first.
    pub async fn attach_hook(&self, hook: Arc<dyn ExtensionHook>) -> AppResult<()> {
        let extension_id = hook.extension_id().to_string();

        let mut hooks = self.hooks.write().await;
        let ledger = hooks.get_mut(&extension_id).ok_or_else(|| {
            AppError::not_found(format!("Extension '{extension_id}' is not registered"))
        })?;

        info!(
            extension_id = %extension_id,
            kind = %hook.kind(),
            "Hook attached"
        );

        ledger.push(hook);
        Ok(())
    }

    /// Shuts down every hook of an extension exactly once and disables it.
    ///
    /// Individual hook shutdown failures are logged and do not abort the
    /// teardown of the extension's remaining hooks; the first failure is
    /// returned after all hooks were attempted.
    pub async fn shutdown_extension(&self, extension_id: &str) -> AppResult<()> {
        let ledger = {
            let mut hooks = self.hooks.write().await;
            hooks.remove(extension_id).ok_or_else(|| {
                AppError::not_found(format!("Extension '{extension_id}' is not registered"))
            })?
        };

        let mut first_error = None;
        for hook in &ledger {
            if let Err(e) = hook.shutdown().await {
                warn!(
                    extension_id = %extension_id,
                    kind = %hook.kind(),
                    error = %e,
                    "Hook shutdown returned error"
                );
                first_error.get_or_insert(e);
            }
        }

        let mut extensions = self.extensions.write().await;
        if let Some(info) = extensions.get_mut(extension_id) {
            info.enabled = false;
        }

        info!(
            extension_id = %extension_id,
            hooks = ledger.len(),
            "Extension shut down"
        );

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Shuts down all registered extensions.
    ///
    /// Errors from individual extensions are logged and do not stop the
    /// remaining shutdowns.
    pub async fn shutdown_all(&self) {
        let ids: Vec<String> = {
            let hooks = self.hooks.read().await;
            hooks.keys().cloned().collect()
        };

        for id in ids {
            if let Err(e) = self.shutdown_extension(&id).await {
                warn!(extension_id = %id, error = %e, "Error shutting down extension");
            }
        }

        info!("All extensions shut down");
    }

    /// Lists registered extension metadata, ordered by ID.
    pub async fn list_extensions(&self) -> Vec<ExtensionInfo> {
        let extensions = self.extensions.read().await;
        let mut infos: Vec<ExtensionInfo> = extensions.values().cloned().collect();
        infos.sort_by(|a, b| a.id.cmp(&b.id));
        infos
    }

    /// Checks whether an extension is registered.
    pub async fn contains(&self, extension_id: &str) -> bool {
        let extensions = self.extensions.read().await;
        extensions.contains_key(extension_id)
    }

    /// Checks whether an extension is enabled.
    pub async fn is_enabled(&self, extension_id: &str) -> bool {
        let extensions = self.extensions.read().await;
        extensions
            .get(extension_id)
            .map(|info| info.enabled)
            .unwrap_or(false)
    }

    /// Returns the number of live hooks for an extension.
    pub async fn hook_count(&self, extension_id: &str) -> usize {
        let hooks = self.hooks.read().await;
        hooks.get(extension_id).map(|ledger| ledger.len()).unwrap_or(0)
    }
}
