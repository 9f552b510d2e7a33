//! Single event view.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use evently_core::api::{ApiError, Event};
use evently_core::events::display_date;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::common::form::{ACCENT, value_line};
use crate::common::{TaskId, TaskSeq};
use crate::effects::UiEffect;
use crate::overlays::render_utils::{InputHint, render_hints};
use crate::router::NavRequest;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailStatus {
    Loading,
    Loaded(Event),
    NotFound,
    Failed(String),
    /// `/event` without an id
    Missing,
}

#[derive(Debug)]
pub struct EventDetailState {
    pub id: Option<String>,
    pub status: DetailStatus,
    pub task: Option<TaskId>,
}

impl EventDetailState {
    pub fn mount(id: Option<String>, seq: &mut TaskSeq) -> (Self, Vec<UiEffect>) {
        let mut state = Self {
            id,
            status: DetailStatus::Missing,
            task: None,
        };
        let effects = state.load(seq);
        (state, effects)
    }

    fn load(&mut self, seq: &mut TaskSeq) -> Vec<UiEffect> {
        let Some(id) = self.id.clone() else {
            self.status = DetailStatus::Missing;
            return vec![];
        };
        let task = seq.next_id();
        self.task = Some(task);
        self.status = DetailStatus::Loading;
        vec![UiEffect::LoadEvent { task, id }]
    }

    pub fn awaits(&self, id: TaskId) -> bool {
        self.task == Some(id)
    }

    pub fn handle_loaded(&mut self, id: &str, result: Result<Event, ApiError>) {
        if self.id.as_deref() != Some(id) {
            return;
        }
        self.task = None;
        self.status = match result {
            Ok(event) => DetailStatus::Loaded(event),
            Err(e) if e.is_not_found() => DetailStatus::NotFound,
            Err(e) => DetailStatus::Failed(e.to_string()),
        };
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
            KeyCode::Esc | KeyCode::Backspace => (vec![], Some(NavRequest::Back)),
            KeyCode::Char('r')
                if key.modifiers.contains(KeyModifiers::CONTROL) && self.task.is_none() =>
            {
                (self.load(seq), None)
            }
            _ => (vec![], None),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, spinner: &str) {
        let muted = Style::default().fg(Color::DarkGray);
        let lines: Vec<Line<'static>> = match &self.status {
            DetailStatus::Loading => vec![Line::from(Span::styled(
                format!("{spinner} Loading event…"),
                muted,
            ))],
            DetailStatus::Missing => vec![Line::from(Span::styled(
                "Pick an event from the search page.",
                muted,
            ))],
            DetailStatus::NotFound => vec![Line::from(Span::styled(
                "Event not found",
                Style::default().fg(Color::Yellow),
            ))],
            DetailStatus::Failed(message) => vec![Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            ))],
            DetailStatus::Loaded(event) => event_lines(event),
        };
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
        render_hints(
            frame,
            area,
            &[InputHint::new("Ctrl+R", "reload"), InputHint::new("Esc", "back")],
            ACCENT,
        );
    }
}

fn event_lines(event: &Event) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            event.name.clone(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        value_line("Date", &display_date(&event.date), false, false),
        value_line("Address", &event.address, false, false),
    ];
    if !event.access.is_empty() {
        lines.push(value_line("Access", &event.access, false, false));
    }
    for (key, value) in &event.extra {
        if let Some(text) = value.as_str() {
            lines.push(value_line(key, text, false, false));
        } else if value.is_number() || value.is_boolean() {
            lines.push(value_line(key, &value.to_string(), false, false));
        }
    }
    lines
}
