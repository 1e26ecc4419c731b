//! Extension hook types.

pub mod registry;
pub mod template;
pub mod url;

use async_trait::async_trait;

use trellis_core::result::AppResult;

/// The kind of an extension hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// A hook contributing URL patterns.
    Url,
    /// A hook contributing template injection-point content.
    Template,
}

impl std::fmt::Display for HookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url => write!(f, "url"),
            Self::Template => write!(f, "template"),
        }
    }
}

/// Common surface of all extension hooks.
///
/// A hook registers itself into shared state at install time and must be
/// removed from that state exactly once, on shutdown. Shutdown is fallible:
/// attempting to tear down a hook whose state was already removed is an
/// error, not a no-op.
#[async_trait]
pub trait ExtensionHook: Send + Sync + std::fmt::Debug {
    /// Returns the ID of the extension owning this hook.
    fn extension_id(&self) -> &str;

    /// Returns the hook kind.
    fn kind(&self) -> HookKind;

    /// Removes the hook's contributions from shared state.
    async fn shutdown(&self) -> AppResult<()>;
}
