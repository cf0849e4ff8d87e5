//! Route cache invalidation and post-write redirects
//!
//! A successful mutation finishes in two steps: the rendered view it
//! affects is marked stale, then the caller is sent to that view. Neither
//! step runs when the write failed.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Invalidation of previously rendered views, keyed by route path
pub trait RouteCache: Send + Sync {
    /// Mark the view at `path` stale; it is regenerated on next access
    fn revalidate_path(&self, path: &str);
}

/// Result of an action that may hand control to another route
///
/// A redirect is not an error: it is the normal end of a successful
/// mutation and is never caught by store-error handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome<S> {
    /// The action stays on the current page with this state
    State(S),
    /// The caller must navigate to this path
    Redirect(String),
}

impl<S> ActionOutcome<S> {
    pub fn is_redirect(&self) -> bool {
        matches!(self, ActionOutcome::Redirect(_))
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            ActionOutcome::Redirect(path) => Some(path),
            ActionOutcome::State(_) => None,
        }
    }

    pub fn into_state(self) -> Option<S> {
        match self {
            ActionOutcome::State(state) => Some(state),
            ActionOutcome::Redirect(_) => None,
        }
    }
}

/// Revalidate `path`, then redirect to it
pub fn finalize<S>(cache: &dyn RouteCache, path: &str) -> ActionOutcome<S> {
    cache.revalidate_path(path);
    ActionOutcome::Redirect(path.to_string())
}

/// In-memory route cache keeping a revision counter per path
///
/// Each revalidation bumps the revision of its path.
#[derive(Clone, Default)]
pub struct InMemoryRouteCache {
    revisions: Arc<RwLock<HashMap<String, u64>>>,
}

impl InMemoryRouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current revision of `path`; 0 until it is first revalidated
    pub fn revision(&self, path: &str) -> u64 {
        self.revisions
            .read()
            .map(|revisions| revisions.get(path).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

impl RouteCache for InMemoryRouteCache {
    fn revalidate_path(&self, path: &str) {
        match self.revisions.write() {
            Ok(mut revisions) => {
                *revisions.entry(path.to_string()).or_insert(0) += 1;
                tracing::debug!(path = %path, "Route revalidated");
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Failed to acquire route cache lock");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_starts_at_zero() {
        let cache = InMemoryRouteCache::new();
        assert_eq!(cache.revision("/dashboard/invoices"), 0);
    }

    #[test]
    fn test_revalidate_bumps_only_that_path() {
        let cache = InMemoryRouteCache::new();
        cache.revalidate_path("/dashboard/invoices");
        cache.revalidate_path("/dashboard/invoices");
        assert_eq!(cache.revision("/dashboard/invoices"), 2);
        assert_eq!(cache.revision("/dashboard"), 0);
    }

    #[test]
    fn test_repeated_revalidation_keeps_counting() {
        let cache = InMemoryRouteCache::new();
        cache.revalidate_path("/dashboard/invoices");
        cache.revalidate_path("/dashboard/invoices");
        assert_eq!(cache.revision("/dashboard/invoices"), 2);
    }

    #[test]
    fn test_finalize_revalidates_then_redirects() {
        let cache = InMemoryRouteCache::new();
        let outcome: ActionOutcome<()> = finalize(&cache, "/dashboard/invoices");
        assert_eq!(outcome.redirect_target(), Some("/dashboard/invoices"));
        assert_eq!(cache.revision("/dashboard/invoices"), 1);
    }

    #[test]
    fn test_clones_share_revisions() {
        let cache = InMemoryRouteCache::new();
        let handle = cache.clone();
        handle.revalidate_path("/x");
        assert_eq!(cache.revision("/x"), 1);
    }
}
