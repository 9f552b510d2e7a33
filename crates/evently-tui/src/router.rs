//! In-app navigation history.

use evently_core::routes::Route;

/// Navigation requested by a view handler. The reducer runs the guard on
/// every request before anything is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavRequest {
    Push(String),
    Replace(String),
    Back,
}

impl NavRequest {
    pub fn push(route: &Route) -> Self {
        NavRequest::Push(route.path())
    }

    pub fn replace(route: &Route) -> Self {
        NavRequest::Replace(route.path())
    }
}

/// History stack. Never empty.
#[derive(Debug, Clone)]
pub struct Router {
    history: Vec<Route>,
}

impl Router {
    pub fn new(initial: Route) -> Self {
        Self {
            history: vec![initial],
        }
    }

    pub fn current(&self) -> &Route {
        // History always holds at least the initial entry.
        &self.history[self.history.len() - 1]
    }

    pub fn push(&mut self, route: Route) {
        self.history.push(route);
    }

    /// Replaces the current entry.
    pub fn replace(&mut self, route: Route) {
        if let Some(top) = self.history.last_mut() {
            *top = route;
        } else {
            self.history.push(route);
        }
    }

    /// Pops the current entry and returns the one below, if any.
    pub fn back(&mut self) -> Option<&Route> {
        if self.history.len() <= 1 {
            return None;
        }
        self.history.pop();
        self.history.last()
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_replace_back() {
        let mut router = Router::new(Route::Login);
        router.push(Route::Home);
        router.push(Route::SearchEvents);
        router.replace(Route::CreateEvent);
        assert_eq!(router.current(), &Route::CreateEvent);
        assert_eq!(router.depth(), 3);

        assert_eq!(router.back(), Some(&Route::Home));
        assert_eq!(router.back(), Some(&Route::Login));
        assert_eq!(router.back(), None);
        assert_eq!(router.current(), &Route::Login);
    }
}
