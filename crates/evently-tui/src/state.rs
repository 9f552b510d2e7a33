//! Application state composition.
//!
//! ```text
//! AppState
//! ├── router: Router          (history; top entry is on screen)
//! ├── view: View              (state of the mounted view)
//! ├── session: SharedSession  (read by the guard on every transition)
//! ├── task_seq / tasks        (async task ids and lifecycle)
//! └── pointer: PointerListeners
//! ```
//!
//! Views own the ids of the tasks they launched. A result is delivered only
//! to the view that is still waiting for it.

use std::time::Duration;

use evently_core::routes::Route;
use evently_core::session::SharedSession;

use crate::common::{PointerListeners, TaskId, TaskSeq, Tasks};
use crate::features::auth::{AuthMode, AuthState};
use crate::features::composer::ComposerState;
use crate::features::events::{EventDetailState, EventListState};
use crate::features::pages::{AccountState, HomeState, Placeholder};
use crate::router::Router;

/// The mounted view.
#[derive(Debug)]
pub enum View {
    Auth(AuthState),
    Home(HomeState),
    EventList(EventListState),
    EventDetail(EventDetailState),
    Composer(ComposerState),
    Placeholder(Placeholder),
    Account(AccountState),
}

impl View {
    /// Whether this view launched `id` and still waits for its result.
    pub fn awaits(&self, id: TaskId) -> bool {
        match self {
            View::Auth(state) => state.awaits(id),
            View::EventList(state) => state.awaits(id),
            View::EventDetail(state) => state.awaits(id),
            View::Composer(state) => state.awaits(id),
            View::Account(state) => state.awaits(id),
            View::Home(_) | View::Placeholder(_) => false,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Auth(state) => state.mode.title(),
            View::Home(_) => "Home",
            View::EventList(_) => "Search events",
            View::EventDetail(_) => "Event",
            View::Composer(_) => "Create event",
            View::Placeholder(Placeholder::PersonalInfo) => "Personal info",
            View::Placeholder(Placeholder::MyEvents) => "My events",
            View::Account(_) => "My account",
        }
    }
}

pub struct AppState {
    pub should_quit: bool,
    pub session: SharedSession,
    pub redirect_delay: Duration,
    /// Base URL shown in the header
    pub base_url: String,
    pub router: Router,
    pub view: View,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    pub pointer: PointerListeners,
    /// Message for the next login view (after sign-up or logout)
    pub notice: Option<String>,
    pub spinner_frame: usize,
    pub screen: (u16, u16),
}

impl AppState {
    /// Creates the state with the login view mounted. Call
    /// `update::start` to run the guard for the initial route.
    pub fn new(session: SharedSession, base_url: String, redirect_delay: Duration) -> Self {
        Self {
            should_quit: false,
            session,
            redirect_delay,
            base_url,
            router: Router::new(Route::Login),
            view: View::Auth(AuthState::new(AuthMode::Login)),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            pointer: PointerListeners::new(),
            notice: None,
            spinner_frame: 0,
            screen: (0, 0),
        }
    }

    pub fn current_route(&self) -> &Route {
        self.router.current()
    }
}
