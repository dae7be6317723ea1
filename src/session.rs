use crate::auth::AuthProvider;
use crate::error::AuthError;
use crate::models::UserRecord;

/// SessionCache
///
/// Explicit per-session caches for the two lazy external lookups the guard
/// performs: the identity record and the role page allow-list. Each is fetched
/// at most once per session and served from the cache on every later guard
/// invocation.
///
/// The cache is owned by the router, which handles one navigation at a time,
/// so no synchronization is needed: each field is written at most once and
/// read thereafter.
#[derive(Debug, Default)]
pub struct SessionCache {
    user_data: Option<UserRecord>,
    auth_pages: Option<Vec<String>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// user_data
    ///
    /// Returns the signed-in user's identity record, consulting the external
    /// collaborator only on the first call of the session.
    pub async fn user_data(
        &mut self,
        provider: &dyn AuthProvider,
    ) -> Result<&UserRecord, AuthError> {
        if self.user_data.is_none() {
            let user = provider.get_user_information().await?;
            tracing::debug!(role = %user.role, "resolved user information");
            self.user_data = Some(user);
        }
        // Populated just above when it was empty.
        Ok(self.user_data.as_ref().unwrap())
    }

    /// auth_pages
    ///
    /// Returns the page allow-list for the session's role, fetching it lazily
    /// on first use. A session carries exactly one role, so caching by session
    /// also caches by role.
    pub async fn auth_pages(
        &mut self,
        provider: &dyn AuthProvider,
        role: &str,
    ) -> Result<&[String], AuthError> {
        if self.auth_pages.is_none() {
            let pages = provider.get_auth_pages(role).await?;
            tracing::debug!(role, pages = pages.len(), "resolved role page allow-list");
            self.auth_pages = Some(pages);
        }
        Ok(self.auth_pages.as_deref().unwrap())
    }

    /// Whether the identity record has already been resolved.
    pub fn user_fetched(&self) -> bool {
        self.user_data.is_some()
    }

    /// Whether the allow-list has already been resolved.
    pub fn pages_fetched(&self) -> bool {
        self.auth_pages.is_some()
    }

    /// reset
    ///
    /// Clears both caches. Called when the session changes (sign-in of a
    /// different user, sign-out), since the cached data is scoped to the
    /// lifetime of a single session.
    pub fn reset(&mut self) {
        self.user_data = None;
        self.auth_pages = None;
    }
}
