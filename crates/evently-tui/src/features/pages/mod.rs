//! Home menu, account page and static placeholder pages.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use evently_core::api::ApiError;
use evently_core::routes::Route;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::form::{ACCENT, banner_line, button_line};
use crate::common::{TaskId, TaskSeq};
use crate::effects::UiEffect;
use crate::overlays::render_utils::{InputHint, render_hints};
use crate::router::NavRequest;

/// Shown on the login view after logging out.
pub const LOGGED_OUT_NOTICE: &str = "You have been logged out.";

const MENU: &[(&str, Route)] = &[
    ("Search events", Route::SearchEvents),
    ("Create event", Route::CreateEvent),
    ("My events", Route::MyEvents),
    ("Personal info", Route::PersonalInfo),
    ("My account", Route::MyAccount),
];

#[derive(Debug, Default)]
pub struct HomeState {
    pub selected: usize,
}

impl HomeState {
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<NavRequest> {
        if matches!(key.kind, KeyEventKind::Release) {
            return None;
        }
        match key.code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.selected = (self.selected + 1).min(MENU.len() - 1),
            KeyCode::Enter => return MENU.get(self.selected).map(|(_, r)| NavRequest::push(r)),
            KeyCode::Char(c) => {
                // 1-based shortcuts
                let idx = c.to_digit(10)? as usize;
                return MENU.get(idx.checked_sub(1)?).map(|(_, r)| NavRequest::push(r));
            }
            _ => {}
        }
        None
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled(
                "Welcome to Evently",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];
        for (i, (label, _)) in MENU.iter().enumerate() {
            let style = if i == self.selected {
                Style::default().fg(Color::Black).bg(ACCENT)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(format!(" {}. {label} ", i + 1), style)));
        }
        frame.render_widget(Paragraph::new(lines), area);
        render_hints(
            frame,
            area,
            &[
                InputHint::new("↑↓", "select"),
                InputHint::new("Enter", "open"),
                InputHint::new("Ctrl+Q", "quit"),
            ],
            ACCENT,
        );
    }
}

/// Static pages with no behavior beyond going back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    PersonalInfo,
    MyEvents,
}

impl Placeholder {
    pub fn handle_key(key: KeyEvent) -> Option<NavRequest> {
        (key.kind != KeyEventKind::Release && matches!(key.code, KeyCode::Esc | KeyCode::Backspace))
            .then_some(NavRequest::Back)
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let text = match self {
            Placeholder::PersonalInfo => "Personal information will appear here.",
            Placeholder::MyEvents => "Events you created will appear here.",
        };
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray))),
            area,
        );
        render_hints(frame, area, &[InputHint::new("Esc", "back")], ACCENT);
    }
}

/// Account page: offers logout.
#[derive(Debug, Default)]
pub struct AccountState {
    pub task: Option<TaskId>,
    pub error: Option<String>,
}

impl AccountState {
    pub fn awaits(&self, id: TaskId) -> bool {
        self.task == Some(id)
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        seq: &mut TaskSeq,
    ) -> (Vec<UiEffect>, Option<NavRequest>) {
        if matches!(key.kind, KeyEventKind::Release) {
            return (vec![], None);
        }
        match key.code {
            KeyCode::Enter if self.task.is_none() => {
                let task = seq.next_id();
                self.task = Some(task);
                self.error = None;
                (vec![UiEffect::Logout { task }], None)
            }
            KeyCode::Esc | KeyCode::Backspace => (vec![], Some(NavRequest::Back)),
            _ => (vec![], None),
        }
    }

    /// The local session is already gone either way; a failed server call is
    /// only logged.
    pub fn handle_logout_result(&mut self, result: Result<(), ApiError>) -> NavRequest {
        self.task = None;
        if let Err(e) = result {
            tracing::warn!(error = %e, "logout not acknowledged by server");
        }
        NavRequest::replace(&Route::Login)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut lines = Vec::new();
        if let Some(error) = &self.error {
            lines.push(banner_line("Error", error, Color::Red));
            lines.push(Line::default());
        }
        let label = if self.task.is_some() {
            "Logging out…"
        } else {
            "Log out"
        };
        lines.push(button_line(label, true, self.task.is_none()));
        frame.render_widget(Paragraph::new(lines), area);
        render_hints(
            frame,
            area,
            &[InputHint::new("Enter", "log out"), InputHint::new("Esc", "back")],
            ACCENT,
        );
    }
}
