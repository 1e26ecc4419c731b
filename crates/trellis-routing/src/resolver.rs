//! Route resolver — mutable pattern list with matching and reverse lookup.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::RoutingError;
use crate::pattern::RoutePattern;

/// Result of resolving a request path against a pattern list.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The pattern that matched.
    pub pattern: Arc<RoutePattern>,
    /// Placeholder values extracted from the path.
    pub kwargs: HashMap<String, String>,
}

/// A resolver owning an ordered, mutable list of route patterns.
///
/// Extensions append their patterns at install time and remove them (by
/// identity) at shutdown. Lookups are linear scans; the pattern lists
/// involved are small.
#[derive(Debug, Default)]
pub struct RouteResolver {
    /// Ordered pattern list.
    patterns: RwLock<Vec<Arc<RoutePattern>>>,
}

impl RouteResolver {
    /// Creates a new resolver with an empty pattern list.
    pub fn new() -> Self {
        Self {
            patterns: RwLock::new(Vec::new()),
        }
    }

    /// Appends patterns to the end of the pattern list.
    pub async fn install(&self, patterns: &[Arc<RoutePattern>]) {
        let mut list = self.patterns.write().await;
        list.extend(patterns.iter().cloned());

        info!(count = patterns.len(), "Route patterns installed");
    }

    /// Removes a single pattern, matched by identity.
    ///
    /// Fails if the pattern is not present — the caller added something
    /// that has since been removed externally, which corrupts the
    /// install/shutdown pairing.
    pub async fn remove(&self, pattern: &Arc<RoutePattern>) -> Result<(), RoutingError> {
        let mut list = self.patterns.write().await;

        let position = list
            .iter()
            .position(|p| Arc::ptr_eq(p, pattern))
            .ok_or_else(|| RoutingError::PatternNotInstalled {
                path: pattern.path().to_string(),
            })?;

        list.remove(position);

        debug!(pattern = %pattern, "Route pattern removed");
        Ok(())
    }

    /// Resolves a request path to the first matching pattern.
    pub async fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let list = self.patterns.read().await;

        for pattern in list.iter() {
            if let Some(kwargs) = pattern.template().captures(path) {
                return Some(RouteMatch {
                    pattern: pattern.clone(),
                    kwargs,
                });
            }
        }

        None
    }

    /// Reverse lookup: renders the path for the first pattern with the given
    /// name that accepts the keyword arguments.
    pub async fn reverse(
        &self,
        name: &str,
        kwargs: &HashMap<String, String>,
    ) -> Result<String, RoutingError> {
        let list = self.patterns.read().await;

        for pattern in list.iter() {
            if pattern.name() != Some(name) {
                continue;
            }
            if let Ok(path) = pattern.template().render(kwargs) {
                return Ok(path);
            }
        }

        Err(RoutingError::NoReverseMatch {
            name: name.to_string(),
        })
    }

    /// Returns the number of installed patterns.
    pub async fn pattern_count(&self) -> usize {
        let list = self.patterns.read().await;
        list.len()
    }

    /// Returns a snapshot of the pattern list in order.
    pub async fn patterns(&self) -> Vec<Arc<RoutePattern>> {
        let list = self.patterns.read().await;
        list.clone()
    }
}
