//! # ext-dashboard
//!
//! Sample Trellis extension contributing a dashboard: URL patterns for the
//! dashboard pages plus template hooks for the navigation bar and footer.
//! Serves as the reference for extension authors and as an end-to-end
//! exercise of the hook lifecycle.

use std::sync::Arc;

use tracing::info;

use trellis_core::result::AppResult;
use trellis_extensions::{ExtensionInfo, ExtensionManager, TemplateHook, UrlHook};
use trellis_routing::pattern::RoutePattern;

/// The dashboard extension.
#[derive(Debug)]
pub struct DashboardExtension;

impl DashboardExtension {
    /// Extension identifier.
    pub const ID: &'static str = "trellis.dashboard";

    /// Returns the extension metadata.
    pub fn info() -> ExtensionInfo {
        ExtensionInfo::new(Self::ID, "Dashboard", "1.0.0")
            .with_description("Site dashboard pages and navigation entries")
            .with_author("Trellis Team")
    }

    /// Registers the extension and installs its hooks through the manager.
    pub async fn install(manager: &ExtensionManager) -> AppResult<()> {
        manager.register_extension(Self::info()).await?;

        let patterns = vec![
            Arc::new(RoutePattern::named("dashboard", "/dashboard/")?),
            Arc::new(RoutePattern::named(
                "dashboard-widget",
                "/dashboard/widgets/{id}/",
            )?),
        ];

        let url_hook =
            UrlHook::install(Self::ID, manager.directory(), manager.config(), patterns).await?;
        let parent_resolver = url_hook.parent_resolver().clone();
        manager.attach_hook(Arc::new(url_hook)).await?;

        // Navigation entry only on the dashboard pages themselves.
        let nav_hook = TemplateHook::install(
            Self::ID,
            manager.template_hooks().clone(),
            parent_resolver.clone(),
            "nav-bar",
            "dashboard/nav.html",
            vec!["dashboard".to_string(), "dashboard-widget".to_string()],
        )
        .await;
        manager.attach_hook(nav_hook).await?;

        // Footer credit everywhere.
        let footer_hook = TemplateHook::install(
            Self::ID,
            manager.template_hooks().clone(),
            parent_resolver,
            "footer",
            "dashboard/footer.html",
            Vec::new(),
        )
        .await;
        manager.attach_hook(footer_hook).await?;

        info!(extension_id = Self::ID, "Dashboard extension installed");
        Ok(())
    }
}
