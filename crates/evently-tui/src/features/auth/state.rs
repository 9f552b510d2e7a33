use crate::common::{TaskId, TextField};

/// Which credential form is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFocus {
    Name,
    Email,
    Password,
    Submit,
    /// Link to the other form
    Switch,
}

impl AuthMode {
    pub fn focus_order(self) -> &'static [AuthFocus] {
        match self {
            AuthMode::Login => &[
                AuthFocus::Email,
                AuthFocus::Password,
                AuthFocus::Submit,
                AuthFocus::Switch,
            ],
            AuthMode::SignUp => &[
                AuthFocus::Name,
                AuthFocus::Email,
                AuthFocus::Password,
                AuthFocus::Submit,
                AuthFocus::Switch,
            ],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AuthMode::Login => "Log in",
            AuthMode::SignUp => "Sign up",
        }
    }
}

/// State for the login and sign-up views.
#[derive(Debug)]
pub struct AuthState {
    pub mode: AuthMode,
    pub name: TextField,
    pub email: TextField,
    pub password: TextField,
    pub focus: AuthFocus,
    pub error: Option<String>,
    /// Informational message carried over from the previous view
    pub notice: Option<String>,
    pub task: Option<TaskId>,
}

impl AuthState {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            name: TextField::new(),
            email: TextField::new(),
            password: TextField::new(),
            focus: mode.focus_order()[0],
            error: None,
            notice: None,
            task: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.task.is_some()
    }

    pub fn awaits(&self, id: TaskId) -> bool {
        self.task == Some(id)
    }

    pub fn field_mut(&mut self, focus: AuthFocus) -> Option<&mut TextField> {
        match focus {
            AuthFocus::Name => Some(&mut self.name),
            AuthFocus::Email => Some(&mut self.email),
            AuthFocus::Password => Some(&mut self.password),
            AuthFocus::Submit | AuthFocus::Switch => None,
        }
    }

    pub fn move_focus(&mut self, forward: bool) {
        let order = self.mode.focus_order();
        let idx = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (idx + 1) % order.len()
        } else {
            (idx + order.len() - 1) % order.len()
        };
        self.focus = order[next];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_focus_skips_name() {
        let mut state = AuthState::new(AuthMode::Login);
        assert_eq!(state.focus, AuthFocus::Email);
        state.move_focus(false);
        assert_eq!(state.focus, AuthFocus::Switch);
        state.move_focus(true);
        assert_eq!(state.focus, AuthFocus::Email);
        assert!(!AuthMode::Login.focus_order().contains(&AuthFocus::Name));
    }
}
