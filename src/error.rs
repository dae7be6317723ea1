use thiserror::Error;

/// AuthError
///
/// Failures raised by the external authentication/data collaborator (Supabase).
/// These cover the full surface the navigation flows depend on: the session
/// check, the user-information lookup, and the role page allow-list query.
///
/// The guard does not attempt any recovery for these; they abort the pending
/// navigation and surface to the caller unchanged.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Transport-level failure reaching the service (DNS, TLS, timeout, etc.).
    #[error("auth service request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status code.
    #[error("auth service returned status {status}: {message}")]
    Service { status: u16, message: String },

    /// The service answered 2xx but the payload did not match the expected shape.
    #[error("failed to decode auth service payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// An operation that requires an active session was invoked without one
    /// (e.g. fetching user information before sign-in).
    #[error("no active session")]
    NotAuthenticated,
}

/// NavigationError
///
/// Errors terminating a navigation before a final outcome could be produced.
/// Distinct from the guard's `Forbid` outcome, which is a *decision*, not a
/// failure: `Forbid` means the navigation was evaluated and rejected, while
/// these variants mean the router could not finish evaluating it at all.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// The requested path matches no registered route (router path-resolution
    /// failure; never produced by the guard itself).
    #[error("no route registered for path '{0}'")]
    RouteNotFound(String),

    /// A guard redirect named a route that was never registered.
    /// The legacy table references redirect targets ('dashboard', 'forbidden')
    /// that it does not itself register, so this is reachable in practice.
    #[error("redirect target '{0}' is not a registered route")]
    UnknownRoute(String),

    /// The guard kept redirecting past the hop limit.
    #[error("navigation exceeded the redirect limit")]
    RedirectLoop,

    /// Two routes were registered with the same path or the same name.
    #[error("duplicate route registration: {0}")]
    DuplicateRoute(String),

    /// The external collaborator failed while the guard was consulting it.
    /// Navigation-aborting: no retry or fallback policy exists.
    #[error(transparent)]
    Auth(#[from] AuthError),
}
