use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Core Application Schemas (Mapped to the hosted auth service) ---

/// UserRecord
///
/// Represents the user's canonical identity record as resolved from the hosted
/// auth service (`GET /auth/v1/user`). The `role` field is the only piece of
/// identity the navigation guard consults locally; everything else rides along
/// for the views.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UserRecord {
    /// Primary key, mirroring the service's `auth.users.id`.
    pub id: Uuid,
    /// The user's primary identifier.
    pub email: String,
    /// The RBAC field, e.g. 'Nurse', 'Doctor' or 'Super Administrator'.
    /// Stored in the service's `user_metadata`, defaulted to empty when absent.
    #[serde(default)]
    pub role: String,
}

/// AuthSession
///
/// The token bundle returned by the password grant. `expires_at` is the
/// absolute instant after which the access token must be considered stale;
/// `is_authenticated` is a purely local comparison against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    /// Whether the access token is still within its validity window.
    pub fn is_valid(&self) -> bool {
        self.expires_at > Utc::now()
    }
}

// --- Request Payloads (Input Schemas) ---

/// Credentials
///
/// Input payload for the password sign-in flow. The password is only passed
/// through to the external auth provider and never persisted or logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// SignUpRequest
///
/// Input payload for registration. The role travels inside the provider's
/// `user_metadata` so it comes back attached to the identity record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

// --- Shared Form State ---

/// FormActionState
///
/// The shared convenience state every form-backed view carries while talking
/// to the backend: an in-flight flag, the last status code, and the outcome
/// messages. `Default` yields the idle state (`process = false`, status 200,
/// empty messages).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormActionState {
    /// True while a submission round trip is in flight.
    pub process: bool,
    /// HTTP-style status of the last completed action.
    pub status: u16,
    pub error_message: String,
    pub success_message: String,
}

impl Default for FormActionState {
    fn default() -> Self {
        Self {
            process: false,
            status: 200,
            error_message: String::new(),
            success_message: String::new(),
        }
    }
}

impl FormActionState {
    /// Marks the start of a submission: in-flight, previous messages cleared.
    pub fn begin(&mut self) {
        self.process = true;
        self.error_message.clear();
        self.success_message.clear();
    }

    /// Records a successful completion.
    pub fn succeed(&mut self, message: impl Into<String>) {
        self.process = false;
        self.status = 200;
        self.success_message = message.into();
        self.error_message.clear();
    }

    /// Records a failed completion with the service's status code.
    pub fn fail(&mut self, status: u16, message: impl Into<String>) {
        self.process = false;
        self.status = status;
        self.error_message = message.into();
        self.success_message.clear();
    }
}
