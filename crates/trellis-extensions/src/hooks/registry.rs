//! Template hook registry — hooks keyed by injection-point name.
//!
//! Per the platform's design rules this is an explicit, injectable registry
//! object shared by reference between the extension manager and the
//! template-rendering middleware, never hidden module-level state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use trellis_core::error::AppError;
use trellis_core::result::AppResult;

use super::template::TemplateHook;

/// Registry of template hooks organized by injection point.
#[derive(Debug, Default)]
pub struct TemplateHookRegistry {
    /// Injection-point name → hooks in registration order.
    by_point: RwLock<HashMap<String, Vec<Arc<TemplateHook>>>>,
}

impl TemplateHookRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            by_point: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a hook under its injection-point name.
    pub async fn register(&self, hook: Arc<TemplateHook>) {
        let mut by_point = self.by_point.write().await;
        by_point
            .entry(hook.point().to_string())
            .or_default()
            .push(hook.clone());

        info!(
            extension_id = %hook.extension_id(),
            point = %hook.point(),
            template = %hook.template_name(),
            "Template hook registered"
        );
    }

    /// Removes a hook instance, matched by identity.
    ///
    /// Fails if the instance is not registered under its injection point —
    /// either it was never registered or it was already removed.
    pub async fn remove(&self, hook: &TemplateHook) -> AppResult<()> {
        let mut by_point = self.by_point.write().await;

        let entries = by_point.get_mut(hook.point()).ok_or_else(|| {
            AppError::not_found(format!(
                "No template hooks registered for injection point '{}'",
                hook.point()
            ))
        })?;

        let position = entries
            .iter()
            .position(|h| std::ptr::eq(Arc::as_ptr(h), hook))
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Template hook '{}' of extension '{}' is not registered",
                    hook.template_name(),
                    hook.extension_id()
                ))
            })?;

        entries.remove(position);
        if entries.is_empty() {
            by_point.remove(hook.point());
        }

        info!(
            extension_id = %hook.extension_id(),
            point = %hook.point(),
            "Template hook removed"
        );

        Ok(())
    }

    /// Returns the hooks for an injection point, in registration order.
    ///
    /// Unknown names yield an empty vector.
    pub async fn hooks_for(&self, point: &str) -> Vec<Arc<TemplateHook>> {
        let by_point = self.by_point.read().await;
        by_point.get(point).cloned().unwrap_or_default()
    }

    /// Returns the number of hooks registered for an injection point.
    pub async fn hook_count(&self, point: &str) -> usize {
        let by_point = self.by_point.read().await;
        by_point.get(point).map(|entries| entries.len()).unwrap_or(0)
    }

    /// Returns all injection-point names with at least one hook.
    pub async fn points(&self) -> Vec<String> {
        let by_point = self.by_point.read().await;
        by_point.keys().cloned().collect()
    }
}
