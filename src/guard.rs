use crate::auth::AuthProvider;
use crate::error::NavigationError;
use crate::routes::Route;
use crate::session::SessionCache;

/// The role exempt from the page allow-list check.
pub const SUPER_ADMIN_ROLE: &str = "Super Administrator";

// Route names with dispatch behavior hardwired into the guard.
const HOME: &str = "home";
const LOGIN: &str = "login";
const REGISTER: &str = "register";
const DASHBOARD: &str = "dashboard";

/// Outcome
///
/// The guard's decision for a pending navigation: let it complete, restart it
/// at a named route, or block it outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Proceed,
    RedirectTo(String),
    Forbid,
}

impl Outcome {
    fn redirect(name: &str) -> Self {
        Outcome::RedirectTo(name.to_string())
    }
}

/// SessionSnapshot
///
/// The resolved session facts the guard evaluates against. Built by `decide`
/// from the external collaborator and the per-session caches; built directly
/// by tests. `role` and `auth_pages` are only populated as far as the branch
/// ordering requires: targets dispatched before identity resolution carry
/// neither.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub logged_in: bool,
    pub role: Option<String>,
    /// The role's page allow-list. `None` when unresolved (anonymous session,
    /// super admin, or a pre-identity branch); an unresolved list is treated
    /// as empty by the accessibility check.
    pub auth_pages: Option<Vec<String>>,
}

impl SessionSnapshot {
    /// A session with nobody signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A signed-in session with a resolved role and allow-list.
    pub fn signed_in(role: &str, auth_pages: Vec<String>) -> Self {
        Self {
            logged_in: true,
            role: Some(role.to_string()),
            auth_pages: Some(auth_pages),
        }
    }

    fn is_super_admin(&self) -> bool {
        self.role.as_deref() == Some(SUPER_ADMIN_ROLE)
    }
}

/// evaluate
///
/// The navigation guard as a pure function over the target route and a session
/// snapshot. The branch ordering is load-bearing and must not be reshuffled:
///
/// 1. The `home` target dispatches unconditionally — to `dashboard` when a
///    session is active, to `login` otherwise — before any authorization
///    check runs. `home` therefore never yields `Proceed` or `Forbid`.
/// 2. An active session is bounced from `login`/`register` to `dashboard`.
/// 3. Without a session, any `requires_auth` target redirects to `login`.
/// 4. A super-admin session bypasses the allow-list entirely.
/// 5. Any other session is forbidden from targets outside its role's
///    allow-list, unless the target is marked `is_default`.
/// 6. Everything else proceeds.
pub fn evaluate(target: &Route, session: &SessionSnapshot) -> Outcome {
    // 1. Home is a pure dispatcher, never a destination.
    if target.name == HOME {
        return if session.logged_in {
            Outcome::redirect(DASHBOARD)
        } else {
            Outcome::redirect(LOGIN)
        };
    }

    // 2. Signed-in users have no business on the auth pages.
    if session.logged_in && (target.name == LOGIN || target.name == REGISTER) {
        return Outcome::redirect(DASHBOARD);
    }

    // 3. Protected targets demand a session.
    if !session.logged_in && target.meta.requires_auth {
        return Outcome::redirect(LOGIN);
    }

    // 4./5. Role-based allow-list check for authenticated non-admins.
    if session.logged_in && !session.is_super_admin() {
        let accessible = session
            .auth_pages
            .as_ref()
            .is_some_and(|pages| pages.iter().any(|page| page == target.path));

        if !accessible && !target.meta.is_default {
            return Outcome::Forbid;
        }
    }

    // 6.
    Outcome::Proceed
}

/// decide
///
/// Evaluates the guard for one pending navigation, resolving session facts
/// from the external collaborator exactly as far as the branch ordering
/// requires:
///
/// - the session check always runs (may suspend on a service round trip);
/// - targets settled by the pre-identity branches (`home`, and the auth pages
///   under an active session) never touch the identity or allow-list caches;
/// - otherwise the identity record and, for non-admins, the allow-list are
///   resolved through the at-most-once session caches.
///
/// Any collaborator failure aborts the navigation; there is no recovery
/// policy at this level.
pub async fn decide(
    target: &Route,
    provider: &dyn AuthProvider,
    cache: &mut SessionCache,
) -> Result<Outcome, NavigationError> {
    let logged_in = provider.is_authenticated().await?;

    if !logged_in {
        // Anonymous sessions never reach the identity-dependent branches.
        return Ok(evaluate(target, &SessionSnapshot::anonymous()));
    }

    // Targets the ordering settles before identity resolution. Evaluating the
    // bare snapshot here keeps `home` and the auth-page bounces from ever
    // triggering a lookup.
    if matches!(target.name, HOME | LOGIN | REGISTER) {
        let bare = SessionSnapshot {
            logged_in: true,
            role: None,
            auth_pages: None,
        };
        return Ok(evaluate(target, &bare));
    }

    let role = cache.user_data(provider).await?.role.clone();

    let auth_pages = if role == SUPER_ADMIN_ROLE {
        // Exempt from the allow-list; skip the fetch entirely.
        None
    } else {
        Some(cache.auth_pages(provider, &role).await?.to_vec())
    };

    let snapshot = SessionSnapshot {
        logged_in: true,
        role: Some(role),
        auth_pages,
    };

    Ok(evaluate(target, &snapshot))
}
