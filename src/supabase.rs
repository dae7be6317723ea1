use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::json;
use std::sync::RwLock;
use uuid::Uuid;

use crate::auth::AuthProvider;
use crate::config::AppConfig;
use crate::error::AuthError;
use crate::models::{AuthSession, Credentials, SignUpRequest, UserRecord};

/// SupabaseClient
///
/// The thin wrapper around the hosted backend-as-a-service project. It covers
/// exactly the calls the portal's navigation and form flows need: password
/// sign-in/sign-up/sign-out, the current-user lookup, and the role page
/// allow-list query against the data API.
///
/// The signed-in session is held behind an `RwLock`: it is written on
/// sign-in/sign-out and read on every authenticated call, and the lock keeps
/// the client shareable as an `Arc<dyn AuthProvider>`.
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    session: RwLock<Option<AuthSession>>,
}

// --- Wire Payloads (service-side shapes, private to this module) ---

/// Token grant response from `POST /auth/v1/token`.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    /// Validity window in seconds, relative to issuance.
    expires_in: i64,
    /// Absolute expiry as a unix timestamp. Not sent by every gateway
    /// version, so `expires_in` is the fallback.
    expires_at: Option<i64>,
    user: Option<WireUser>,
}

/// Identity record as the auth API serializes it. The role rides inside
/// `user_metadata` rather than as a top-level column.
#[derive(Deserialize)]
struct WireUser {
    id: Uuid,
    // Explicitly null for non-email identities.
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: serde_json::Value,
}

impl WireUser {
    fn into_record(self) -> UserRecord {
        let role = self
            .user_metadata
            .get("role")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        UserRecord {
            id: self.id,
            email: self.email.unwrap_or_default(),
            role,
        }
    }
}

/// One row of the `role_pages` table, narrowed to the path column.
#[derive(Deserialize)]
struct RolePageRow {
    page_path: String,
}

impl SupabaseClient {
    /// new
    ///
    /// Constructs the client from the loaded configuration. No connection is
    /// established here; every operation is an independent HTTPS request.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
            session: RwLock::new(None),
        }
    }

    /// The currently stored session, if any. Exposed for the form flows and
    /// for tests; guard code goes through `AuthProvider` instead.
    pub fn session(&self) -> Option<AuthSession> {
        self.session.read().expect("session lock poisoned").clone()
    }

    /// Bearer token for data API calls: the user's access token once signed
    /// in, the anon key otherwise.
    fn bearer(&self) -> String {
        self.session()
            .filter(AuthSession::is_valid)
            .map(|s| s.access_token)
            .unwrap_or_else(|| self.anon_key.clone())
    }

    /// Converts a non-success response into `AuthError::Service`, reading the
    /// body for the service's error message.
    async fn service_error(resp: reqwest::Response) -> AuthError {
        let status = resp.status().as_u16();
        let message = resp.text().await.unwrap_or_default();
        AuthError::Service { status, message }
    }

    fn store_session(&self, token: &TokenResponse) {
        // Prefer the absolute expiry when the gateway sends one.
        let expires_at: DateTime<Utc> = match token.expires_at {
            Some(ts) => Utc
                .timestamp_opt(ts, 0)
                .single()
                .unwrap_or_else(|| Utc::now() + chrono::Duration::seconds(token.expires_in)),
            None => Utc::now() + chrono::Duration::seconds(token.expires_in),
        };

        let session = AuthSession {
            access_token: token.access_token.clone(),
            refresh_token: token.refresh_token.clone(),
            expires_at,
        };

        *self.session.write().expect("session lock poisoned") = Some(session);
    }

    /// sign_in_with_password
    ///
    /// `POST /auth/v1/token?grant_type=password`. On success the returned
    /// session is stored for subsequent authenticated calls, and the identity
    /// record embedded in the grant is handed back for the views.
    pub async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<UserRecord, AuthError> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);

        let resp = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&json!({
                "email": credentials.email,
                "password": credentials.password,
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::service_error(resp).await);
        }

        let body = resp.text().await?;
        let token: TokenResponse = serde_json::from_str(&body)?;
        self.store_session(&token);

        tracing::info!("password sign-in succeeded");

        match token.user {
            Some(user) => Ok(user.into_record()),
            // Older gateways omit the user from the grant; resolve it with a
            // follow-up lookup.
            None => self.get_user_information().await,
        }
    }

    /// sign_up
    ///
    /// `POST /auth/v1/signup`. The role is placed in `user_metadata` so it
    /// comes back attached to the identity record on every later lookup.
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<UserRecord, AuthError> {
        let url = format!("{}/auth/v1/signup", self.base_url);

        let resp = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&json!({
                "email": request.email,
                "password": request.password,
                "data": { "role": request.role },
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::service_error(resp).await);
        }

        let body = resp.text().await?;
        let user: WireUser = serde_json::from_str(&body)?;

        tracing::info!("registration succeeded");
        Ok(user.into_record())
    }

    /// sign_out
    ///
    /// `POST /auth/v1/logout`, then drops the stored session. The local
    /// session is cleared even if the service call fails: a stale token on
    /// the server is the service's problem, a stale token here is ours.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let token = match self.session() {
            Some(session) => session.access_token,
            None => return Ok(()),
        };

        let url = format!("{}/auth/v1/logout", self.base_url);

        let result = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&token)
            .send()
            .await;

        *self.session.write().expect("session lock poisoned") = None;

        let resp = result?;
        if !resp.status().is_success() {
            return Err(Self::service_error(resp).await);
        }

        tracing::info!("signed out");
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for SupabaseClient {
    /// is_authenticated
    ///
    /// A purely local check on the stored session's expiry; once signed in,
    /// no network round trip is needed to answer it.
    async fn is_authenticated(&self) -> Result<bool, AuthError> {
        Ok(self.session().is_some_and(|s| s.is_valid()))
    }

    /// get_user_information
    ///
    /// `GET /auth/v1/user` with the session's access token.
    async fn get_user_information(&self) -> Result<UserRecord, AuthError> {
        let session = self
            .session()
            .filter(AuthSession::is_valid)
            .ok_or(AuthError::NotAuthenticated)?;

        let url = format!("{}/auth/v1/user", self.base_url);

        let resp = self
            .http
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::service_error(resp).await);
        }

        let body = resp.text().await?;
        let user: WireUser = serde_json::from_str(&body)?;
        Ok(user.into_record())
    }

    /// get_auth_pages
    ///
    /// PostgREST query against the `role_pages` table, narrowed to the path
    /// column: `GET /rest/v1/role_pages?select=page_path&role=eq.{role}`.
    /// Row order is the service's ordering; the table is small and read-only
    /// from the client's perspective.
    async fn get_auth_pages(&self, role: &str) -> Result<Vec<String>, AuthError> {
        let url = format!(
            "{}/rest/v1/role_pages?select=page_path&role=eq.{}",
            self.base_url,
            urlencoding::encode(role),
        );

        let resp = self
            .http
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::service_error(resp).await);
        }

        let body = resp.text().await?;
        let rows: Vec<RolePageRow> = serde_json::from_str(&body)?;
        Ok(rows.into_iter().map(|r| r.page_path).collect())
    }
}
