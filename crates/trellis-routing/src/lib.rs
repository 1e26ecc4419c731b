//! # trellis-routing
//!
//! URL routing model for Trellis. Provides:
//!
//! - Path templates with `{param}` placeholder segments
//! - Named route patterns
//! - A resolver with a mutable pattern list, path matching, and reverse lookup
//! - A directory of named resolvers with a default fallback
//! - Request/template context types consumed by extension hooks

pub mod directory;
pub mod error;
pub mod pattern;
pub mod request;
pub mod resolver;

pub use directory::ResolverDirectory;
pub use error::RoutingError;
pub use pattern::{PathTemplate, RoutePattern};
pub use request::{RequestContext, TemplateContext};
pub use resolver::{RouteMatch, RouteResolver};
