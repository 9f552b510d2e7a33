//! Route table and navigation guard.
//!
//! The guard is a pure function of token presence: it never touches the
//! network and cannot fail.

use std::fmt;

use crate::session::SessionStore;

/// A client view addressed by path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    SignUp,
    Home,
    SearchEvents,
    /// `/event` or `/event/<id>`
    Event(Option<String>),
    PersonalInfo,
    CreateEvent,
    MyEvents,
    MyAccount,
}

impl Route {
    /// Parses a path into a route. Returns `None` for unknown paths.
    ///
    /// A single trailing slash and any query string are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = if path.len() > 1 {
            path.strip_suffix('/').unwrap_or(path)
        } else {
            path
        };

        let route = match path {
            "/login" => Route::Login,
            "/sign-up" => Route::SignUp,
            "/" => Route::Home,
            "/search-events" => Route::SearchEvents,
            "/event" => Route::Event(None),
            "/personal-info-page" => Route::PersonalInfo,
            "/create-event" => Route::CreateEvent,
            "/my-events" => Route::MyEvents,
            "/my-account" => Route::MyAccount,
            other => {
                let id = other.strip_prefix("/event/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Route::Event(Some(id.to_string()))
            }
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::SignUp => "/sign-up".to_string(),
            Route::Home => "/".to_string(),
            Route::SearchEvents => "/search-events".to_string(),
            Route::Event(None) => "/event".to_string(),
            Route::Event(Some(id)) => format!("/event/{id}"),
            Route::PersonalInfo => "/personal-info-page".to_string(),
            Route::CreateEvent => "/create-event".to_string(),
            Route::MyEvents => "/my-events".to_string(),
            Route::MyAccount => "/my-account".to_string(),
        }
    }

    /// Public routes render without a token.
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::SignUp)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of a guarded route transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the requested route.
    Render(Route),
    /// Render this route instead, replacing the history entry.
    Redirect(Route),
}

impl GuardDecision {
    /// The route that ends up on screen.
    pub fn route(&self) -> &Route {
        match self {
            GuardDecision::Render(route) | GuardDecision::Redirect(route) => route,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, GuardDecision::Redirect(_))
    }
}

/// Decides what to render for `path` given the current session.
///
/// Unknown paths go to the login view. Protected routes go to the login view
/// when no token is present.
pub fn guard(path: &str, session: &dyn SessionStore) -> GuardDecision {
    match Route::parse(path) {
        None => {
            tracing::debug!(path, "unknown route");
            GuardDecision::Redirect(Route::Login)
        }
        Some(route) if route.is_public() || session.is_authenticated() => {
            GuardDecision::Render(route)
        }
        Some(route) => {
            tracing::debug!(route = %route, "route requires login");
            GuardDecision::Redirect(Route::Login)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;

    const PROTECTED: &[&str] = &[
        "/",
        "/search-events",
        "/event",
        "/event/42",
        "/personal-info-page",
        "/create-event",
        "/my-events",
        "/my-account",
    ];

    #[test]
    fn test_anonymous_protected_routes_redirect_to_login() {
        let session = MemorySessionStore::new();
        for path in PROTECTED {
            assert_eq!(
                guard(path, &session),
                GuardDecision::Redirect(Route::Login),
                "{path}"
            );
        }
    }

    #[test]
    fn test_public_routes_render_without_token() {
        let session = MemorySessionStore::new();
        assert_eq!(guard("/login", &session), GuardDecision::Render(Route::Login));
        assert_eq!(guard("/sign-up", &session), GuardDecision::Render(Route::SignUp));
    }

    #[test]
    fn test_authenticated_routes_render() {
        let session = MemorySessionStore::with_token("abc");
        for path in PROTECTED {
            let decision = guard(path, &session);
            assert!(!decision.is_redirect(), "{path}");
            assert_eq!(decision.route().path(), *path);
        }
        assert_eq!(guard("/login", &session), GuardDecision::Render(Route::Login));
    }

    #[test]
    fn test_unknown_routes_redirect_to_login() {
        let anonymous = MemorySessionStore::new();
        let signed_in = MemorySessionStore::with_token("abc");
        for path in ["/nope", "", "/event//", "/event/1/edit", "login"] {
            assert_eq!(guard(path, &anonymous), GuardDecision::Redirect(Route::Login));
            assert_eq!(guard(path, &signed_in), GuardDecision::Redirect(Route::Login));
        }
    }

    #[test]
    fn test_parse_ignores_trailing_slash_and_query() {
        assert_eq!(Route::parse("/my-events/"), Some(Route::MyEvents));
        assert_eq!(Route::parse("/search-events?q=bo"), Some(Route::SearchEvents));
        assert_eq!(
            Route::parse("/event/abc"),
            Some(Route::Event(Some("abc".to_string())))
        );
    }

    #[test]
    fn test_guard_reacts_to_session_changes() {
        let session = MemorySessionStore::new();
        assert!(guard("/create-event", &session).is_redirect());
        session.set_token("abc");
        assert_eq!(
            guard("/create-event", &session),
            GuardDecision::Render(Route::CreateEvent)
        );
        session.clear();
        assert!(guard("/create-event", &session).is_redirect());
    }
}
