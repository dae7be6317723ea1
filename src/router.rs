use crate::auth::AuthState;
use crate::error::NavigationError;
use crate::guard::{self, Outcome};
use crate::routes::{Route, RouteTable};
use crate::session::SessionCache;

/// Guard redirects are re-entered as fresh navigations; this caps the chain so
/// a misconfigured table cannot bounce forever.
const MAX_REDIRECTS: usize = 8;

/// Navigation
///
/// The terminal result of a dispatched navigation: either a route to mount,
/// or an explicit rejection. A rejection carries only the attempted path —
/// the portal never registered a 'forbidden' view to resolve it to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The guard allowed the navigation; mount this route's view.
    Complete(Route),
    /// The guard blocked the navigation.
    Forbidden { path: String },
}

/// Router
///
/// The in-process navigation dispatcher: resolves a requested path against the
/// route table, runs the navigation guard, and follows redirect outcomes by
/// re-entering the guard at the named route, the way a SPA router restarts a
/// navigation a guard has retargeted.
///
/// `navigate` takes `&mut self`, so a router instance handles exactly one
/// navigation at a time and the session caches need no locking.
pub struct Router {
    table: RouteTable,
    provider: AuthState,
    cache: SessionCache,
}

impl Router {
    pub fn new(table: RouteTable, provider: AuthState) -> Self {
        Self {
            table,
            provider,
            cache: SessionCache::new(),
        }
    }

    /// The registered route table.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// navigate
    ///
    /// Dispatches a navigation to `path` and runs it to a terminal result.
    ///
    /// Each redirect the guard returns starts a fresh guarded navigation at
    /// the named route; the chain is capped at `MAX_REDIRECTS`. A redirect
    /// naming an unregistered route (the legacy table's 'dashboard' and
    /// 'forbidden' targets were never registered) fails with `UnknownRoute`
    /// rather than silently completing.
    pub async fn navigate(&mut self, path: &str) -> Result<Navigation, NavigationError> {
        let mut route = self
            .table
            .resolve_path(path)
            .ok_or_else(|| NavigationError::RouteNotFound(path.to_string()))?
            .clone();

        for _ in 0..MAX_REDIRECTS {
            match guard::decide(&route, self.provider.as_ref(), &mut self.cache).await? {
                Outcome::Proceed => {
                    tracing::debug!(path = route.path, name = route.name, "navigation complete");
                    return Ok(Navigation::Complete(route));
                }
                Outcome::Forbid => {
                    tracing::info!(path = route.path, "navigation forbidden");
                    return Ok(Navigation::Forbidden {
                        path: route.path.to_string(),
                    });
                }
                Outcome::RedirectTo(name) => {
                    tracing::debug!(from = route.path, to = %name, "navigation redirected");
                    route = self
                        .table
                        .resolve_name(&name)
                        .ok_or(NavigationError::UnknownRoute(name))?
                        .clone();
                }
            }
        }

        Err(NavigationError::RedirectLoop)
    }

    /// reset_session
    ///
    /// Drops the cached identity and allow-list. Must be called whenever the
    /// underlying session changes (sign-out, or sign-in as a different user),
    /// since the caches are scoped to a single session.
    pub fn reset_session(&mut self) {
        self.cache.reset();
    }
}
