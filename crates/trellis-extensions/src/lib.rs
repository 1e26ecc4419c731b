//! # trellis-extensions
//!
//! Extension hook framework for Trellis. Provides:
//!
//! - Extension metadata and lifecycle management
//! - `UrlHook`: installs extension URL patterns into a parent resolver
//! - `TemplateHook`: renders extension templates at named injection points,
//!   with per-request applicability matching via reverse URL lookup
//! - An injectable template hook registry keyed by injection-point name
//! - `ExtensionManager` driving exactly-once hook teardown

pub mod extension;
pub mod hooks;
pub mod manager;

pub use extension::ExtensionInfo;
pub use hooks::registry::TemplateHookRegistry;
pub use hooks::template::TemplateHook;
pub use hooks::url::UrlHook;
pub use hooks::{ExtensionHook, HookKind};
pub use manager::ExtensionManager;
