use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::{AuthFocus, AuthMode, AuthState};
use crate::common::form::{ACCENT, banner_line, button_line, field_line};
use crate::overlays::render_utils::{InputHint, render_hints};

pub fn render_auth(state: &AuthState, frame: &mut Frame, area: Rect) {
    let mut lines: Vec<Line<'static>> = Vec::new();

    if let Some(notice) = &state.notice {
        lines.push(banner_line("Info", notice, Color::Green));
        lines.push(Line::default());
    }
    if let Some(error) = &state.error {
        lines.push(banner_line("Error", error, Color::Red));
        lines.push(Line::default());
    }

    for focus in state.mode.focus_order() {
        let focused = state.focus == *focus;
        let line = match focus {
            AuthFocus::Name => field_line("Name", &state.name, "Your name", focused, false),
            AuthFocus::Email => field_line("Email", &state.email, "you@example.com", focused, false),
            AuthFocus::Password => field_line("Password", &state.password, "", focused, true),
            AuthFocus::Submit => {
                let label = match (state.mode, state.is_busy()) {
                    (AuthMode::Login, false) => "Log in",
                    (AuthMode::Login, true) => "Logging in…",
                    (AuthMode::SignUp, false) => "Create account",
                    (AuthMode::SignUp, true) => "Creating account…",
                };
                button_line(label, focused, !state.is_busy())
            }
            AuthFocus::Switch => {
                let label = match state.mode {
                    AuthMode::Login => "No account? Sign up",
                    AuthMode::SignUp => "Have an account? Log in",
                };
                let style = if focused {
                    Style::default().fg(ACCENT).add_modifier(Modifier::UNDERLINED)
                } else {
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::UNDERLINED)
                };
                Line::from(Span::styled(format!("  {label}"), style))
            }
        };
        lines.push(line);
        lines.push(Line::default());
    }

    frame.render_widget(Paragraph::new(lines), area);
    render_hints(
        frame,
        area,
        &[
            InputHint::new("Tab", "next"),
            InputHint::new("Enter", "submit"),
            InputHint::new("Ctrl+C", "quit"),
        ],
        ACCENT,
    );
}
