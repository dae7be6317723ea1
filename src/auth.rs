use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::AuthError;
use crate::models::UserRecord;

// 1. AuthProvider Contract

/// AuthProvider
///
/// Defines the abstract contract for the external session/auth collaborator.
/// This trait allows swapping the concrete implementation—from the real hosted
/// client (`SupabaseClient`) in production to the in-memory
/// `MockAuthProvider` during testing—without affecting the guard or router.
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn AuthProvider>`) safely shareable across task boundaries.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Whether an authenticated session is currently active.
    /// May suspend while the implementation consults the external service.
    async fn is_authenticated(&self) -> Result<bool, AuthError>;

    /// Resolves the identity record of the signed-in user.
    /// Requires an active session.
    async fn get_user_information(&self) -> Result<UserRecord, AuthError>;

    /// Fetches the ordered page allow-list for a role. The caller is expected
    /// to cache the result for the lifetime of the session.
    async fn get_auth_pages(&self, role: &str) -> Result<Vec<String>, AuthError>;
}

/// AuthState
///
/// The concrete type used to share the auth collaborator across the router.
pub type AuthState = Arc<dyn AuthProvider>;

// 2. The Mock Implementation (For Unit Tests)

/// MockAuthProvider
///
/// A mock implementation of `AuthProvider` used for unit and integration
/// testing. It answers from canned state, can simulate collaborator failures,
/// and counts how often each lookup is invoked so tests can assert that the
/// session caches fetch at most once.
#[derive(Default)]
pub struct MockAuthProvider {
    /// Session state the mock reports.
    pub authenticated: bool,
    /// Identity record returned by `get_user_information`.
    pub user: Option<UserRecord>,
    /// Allow-list returned by `get_auth_pages`, regardless of role.
    pub auth_pages: Vec<String>,
    /// When true, every operation returns a simulated service failure.
    pub should_fail: bool,

    user_fetches: AtomicUsize,
    page_fetches: AtomicUsize,
}

impl MockAuthProvider {
    /// An anonymous session: not signed in, no identity.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A signed-in session with the given role and page allow-list.
    pub fn signed_in(role: &str, auth_pages: Vec<String>) -> Self {
        Self {
            authenticated: true,
            user: Some(UserRecord {
                id: uuid::Uuid::new_v4(),
                email: format!("{}@clinic.test", role.to_lowercase().replace(' ', ".")),
                role: role.to_string(),
            }),
            auth_pages,
            should_fail: false,
            user_fetches: AtomicUsize::new(0),
            page_fetches: AtomicUsize::new(0),
        }
    }

    /// A provider whose every call fails, for fault-injection tests.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// How many times `get_user_information` has been called.
    pub fn user_fetches(&self) -> usize {
        self.user_fetches.load(Ordering::SeqCst)
    }

    /// How many times `get_auth_pages` has been called.
    pub fn page_fetches(&self) -> usize {
        self.page_fetches.load(Ordering::SeqCst)
    }

    fn fail(&self) -> AuthError {
        AuthError::Service {
            status: 503,
            message: "mock auth error: simulation requested".to_string(),
        }
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn is_authenticated(&self) -> Result<bool, AuthError> {
        if self.should_fail {
            return Err(self.fail());
        }
        Ok(self.authenticated)
    }

    async fn get_user_information(&self) -> Result<UserRecord, AuthError> {
        self.user_fetches.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(self.fail());
        }
        self.user.clone().ok_or(AuthError::NotAuthenticated)
    }

    async fn get_auth_pages(&self, _role: &str) -> Result<Vec<String>, AuthError> {
        self.page_fetches.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(self.fail());
        }
        Ok(self.auth_pages.clone())
    }
}
