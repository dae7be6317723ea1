// --- Module Structure ---

// Core navigation components.
pub mod guard;
pub mod router;
pub mod routes;
pub mod session;

// Services and shared state.
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod supabase;

// --- Public Re-exports ---

// Makes the core types easily accessible to the application entry point and
// to the views embedding the navigation shell.
pub use auth::{AuthProvider, AuthState, MockAuthProvider};
pub use config::{AppConfig, Env};
pub use error::{AuthError, NavigationError};
pub use guard::{Outcome, SessionSnapshot, SUPER_ADMIN_ROLE};
pub use models::{AuthSession, Credentials, FormActionState, SignUpRequest, UserRecord};
pub use router::{Navigation, Router};
pub use routes::{default_routes, Route, RouteMeta, RouteTable, View};
pub use session::SessionCache;
pub use supabase::SupabaseClient;

use std::sync::Arc;

/// create_router
///
/// Assembles the portal's navigation shell: the startup route table wired to
/// the given auth collaborator. This is the single composition point the
/// entry point (and tests substituting a mock provider) go through.
pub fn create_router(provider: AuthState) -> Result<Router, NavigationError> {
    let table = RouteTable::new(default_routes())?;
    Ok(Router::new(table, provider))
}

/// create_supabase_router
///
/// Convenience wiring for the production path: builds the hosted-service
/// client from configuration and hands it to `create_router`.
pub fn create_supabase_router(config: &AppConfig) -> Result<Router, NavigationError> {
    let client = Arc::new(SupabaseClient::new(config)) as AuthState;
    create_router(client)
}
