//! # Authorization Guard
//!
//! Route table and the decision function evaluated on every navigation.
//! Everything here is pure: it only inspects an already-derived identity.

use std::fmt;

use serde::Serialize;

use super::identity::{Identity, Role};

/// Outcome of an authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allow,
    RedirectToLogin,
    RedirectToDashboard,
}

/// Decide whether `identity` may enter a route.
///
/// - no identity: `RedirectToLogin`
/// - `require_admin` and not an administrator: `RedirectToDashboard`
/// - otherwise: `Allow`
pub fn authorize(identity: Option<&Identity>, require_admin: bool) -> Decision {
    let Some(identity) = identity else {
        return Decision::RedirectToLogin;
    };

    match (identity.role, require_admin) {
        (Role::Admin, _) => Decision::Allow,
        (Role::User, false) => Decision::Allow,
        (Role::User, true) => Decision::RedirectToDashboard,
    }
}

/// What a route demands of the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

/// Application routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Root,
    Dashboard,
    Admin,
    Login,
    Register,
    Logout,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Dashboard => "/dashboard",
            Route::Admin => "/admin",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Logout => "/logout",
        }
    }

    /// Resolve a path; trailing slashes are ignored
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" if trimmed.starts_with('/') => "/",
            other => other,
        };
        match normalized {
            "/" => Some(Route::Root),
            "/dashboard" => Some(Route::Dashboard),
            "/admin" => Some(Route::Admin),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            "/logout" => Some(Route::Logout),
            _ => None,
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Root | Route::Login | Route::Register => Access::Public,
            Route::Dashboard | Route::Logout => Access::Authenticated,
            Route::Admin => Access::Admin,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Result of navigating to a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "route", rename_all = "lowercase")]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

/// Resolve a navigation to `route` for the current identity
pub fn navigate(identity: Option<&Identity>, route: Route) -> Navigation {
    if route == Route::Root {
        return Navigation::Redirect(Route::Dashboard);
    }

    let decision = match route.access() {
        Access::Public => Decision::Allow,
        Access::Authenticated => authorize(identity, false),
        Access::Admin => authorize(identity, true),
    };

    match decision {
        Decision::Allow => Navigation::Render(route),
        Decision::RedirectToLogin => Navigation::Redirect(Route::Login),
        Decision::RedirectToDashboard => Navigation::Redirect(Route::Dashboard),
    }
}

/// Where to send a user right after logging in
pub fn landing_route(identity: &Identity) -> Route {
    match identity.role {
        Role::Admin => Route::Admin,
        Role::User => Route::Dashboard,
    }
}

/// Navigation links shown for the current session
pub fn nav_links(identity: Option<&Identity>) -> Vec<Route> {
    match identity.map(|i| i.role) {
        None => vec![Route::Login, Route::Register],
        Some(Role::Admin) => vec![Route::Admin, Route::Logout],
        Some(Role::User) => vec![Route::Dashboard, Route::Logout],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            user_id: Some("u1".to_string()),
            role,
            company_id: match role {
                Role::Admin => None,
                Role::User => Some("c1".to_string()),
            },
            email: None,
            expires_at: None,
        }
    }

    #[test]
    fn test_anonymous_always_redirected_to_login() {
        assert_eq!(authorize(None, false), Decision::RedirectToLogin);
        assert_eq!(authorize(None, true), Decision::RedirectToLogin);
    }

    #[test]
    fn test_user_blocked_from_admin() {
        let user = identity(Role::User);
        assert_eq!(authorize(Some(&user), true), Decision::RedirectToDashboard);
        assert_eq!(authorize(Some(&user), false), Decision::Allow);
    }

    #[test]
    fn test_admin_allowed_everywhere() {
        let admin = identity(Role::Admin);
        assert_eq!(authorize(Some(&admin), true), Decision::Allow);
        assert_eq!(authorize(Some(&admin), false), Decision::Allow);
    }

    #[test]
    fn test_route_paths() {
        for route in [
            Route::Root,
            Route::Dashboard,
            Route::Admin,
            Route::Login,
            Route::Register,
            Route::Logout,
        ] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/admin/"), Some(Route::Admin));
        assert_eq!(Route::from_path("/nowhere"), None);
    }

    #[test]
    fn test_navigate() {
        let user = identity(Role::User);
        let admin = identity(Role::Admin);

        assert_eq!(
            navigate(None, Route::Dashboard),
            Navigation::Redirect(Route::Login)
        );
        assert_eq!(navigate(None, Route::Login), Navigation::Render(Route::Login));
        assert_eq!(
            navigate(Some(&user), Route::Admin),
            Navigation::Redirect(Route::Dashboard)
        );
        assert_eq!(
            navigate(Some(&admin), Route::Admin),
            Navigation::Render(Route::Admin)
        );
        assert_eq!(
            navigate(Some(&admin), Route::Root),
            Navigation::Redirect(Route::Dashboard)
        );
    }

    #[test]
    fn test_landing_and_links() {
        let user = identity(Role::User);
        let admin = identity(Role::Admin);

        assert_eq!(landing_route(&admin), Route::Admin);
        assert_eq!(landing_route(&user), Route::Dashboard);

        assert_eq!(nav_links(None), vec![Route::Login, Route::Register]);
        assert_eq!(nav_links(Some(&admin)), vec![Route::Admin, Route::Logout]);
        assert_eq!(nav_links(Some(&user)), vec![Route::Dashboard, Route::Logout]);
    }
}
