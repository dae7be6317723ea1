use crate::error::NavigationError;

/// View
///
/// Identifies the view component a route renders. The navigation core never
/// instantiates views itself; it only resolves which one a completed
/// navigation should mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Register,
    Home,
    Profile,
    About,
    Contact,
    Appointments,
    DeleteHistory,
}

/// RouteMeta
///
/// Per-route metadata flags consulted by the navigation guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteMeta {
    /// The route is only reachable with an authenticated session.
    pub requires_auth: bool,
    /// The route is reachable by every authenticated role, even when it is
    /// absent from the role's page allow-list.
    pub is_default: bool,
}

/// Route
///
/// A named, path-addressable navigation target. Routes are immutable after
/// registration; the set is fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub view: View,
    pub meta: RouteMeta,
}

impl Route {
    pub const fn new(path: &'static str, name: &'static str, view: View, meta: RouteMeta) -> Self {
        Self {
            path,
            name,
            view,
            meta,
        }
    }
}

/// RouteTable
///
/// The static path → route mapping. Registration order is insertion order, no
/// two routes may share a path or a name, and the table never changes after
/// construction. This is configuration, not computed state.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// new
    ///
    /// Builds the table from the startup route set, rejecting duplicate paths
    /// and duplicate names up front so resolution is unambiguous afterwards.
    pub fn new(routes: Vec<Route>) -> Result<Self, NavigationError> {
        for (i, route) in routes.iter().enumerate() {
            for earlier in &routes[..i] {
                if earlier.path == route.path {
                    return Err(NavigationError::DuplicateRoute(route.path.to_string()));
                }
                if earlier.name == route.name {
                    return Err(NavigationError::DuplicateRoute(route.name.to_string()));
                }
            }
        }
        Ok(Self { routes })
    }

    /// resolve_path
    ///
    /// Resolves a requested path to exactly one registered route, or `None`
    /// to signal "not found".
    pub fn resolve_path(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.path == path)
    }

    /// resolve_name
    ///
    /// Resolves a route by its registered name. Guard redirects are expressed
    /// by name, so this is the lookup the router uses to follow them.
    pub fn resolve_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Iterates registered routes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// default_routes
///
/// The portal's startup route set. Everything past the auth pages requires a
/// session; `/about` is the shared default page every role may reach.
pub fn default_routes() -> Vec<Route> {
    const PUBLIC: RouteMeta = RouteMeta {
        requires_auth: false,
        is_default: false,
    };
    const PROTECTED: RouteMeta = RouteMeta {
        requires_auth: true,
        is_default: false,
    };
    const PROTECTED_DEFAULT: RouteMeta = RouteMeta {
        requires_auth: true,
        is_default: true,
    };

    vec![
        Route::new("/", "login", View::Login, PUBLIC),
        Route::new("/register", "register", View::Register, PUBLIC),
        Route::new("/home", "home", View::Home, PROTECTED),
        Route::new("/profile", "profile", View::Profile, PROTECTED),
        Route::new("/about", "about", View::About, PROTECTED_DEFAULT),
        Route::new("/contact", "contact", View::Contact, PROTECTED),
        Route::new("/appointments", "appointments", View::Appointments, PROTECTED),
        Route::new("/DeleteHistory", "DeleteHistory", View::DeleteHistory, PROTECTED),
    ]
}
