//! Login and sign-up views.

mod render;
mod state;
mod update;

pub use render::render_auth;
pub use state::{AuthFocus, AuthMode, AuthState};
pub use update::{
    SIGNED_UP_NOTICE, handle_key, handle_login_result, handle_signup_result, signup_form,
};
