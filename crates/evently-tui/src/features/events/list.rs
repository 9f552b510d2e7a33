//! Search-events view: fetch on mount, filter locally by name.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use evently_core::api::{ApiError, Event};
use evently_core::events::{display_date, filter_events};
use evently_core::routes::Route;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use crate::common::form::{ACCENT, banner_line, field_line};
use crate::common::{TaskId, TaskSeq, TextField, truncate_with_ellipsis};
use crate::effects::UiEffect;
use crate::overlays::render_utils::{InputHint, render_hints};
use crate::router::NavRequest;

#[derive(Debug, Default)]
pub struct EventListState {
    pub search: TextField,
    pub events: Vec<Event>,
    pub selected: usize,
    pub load_task: Option<TaskId>,
    pub error: Option<String>,
}

impl EventListState {
    /// Creates the view and the fetch it needs. The list is never cached.
    pub fn mount(seq: &mut TaskSeq) -> (Self, UiEffect) {
        let mut state = Self::default();
        let effect = state.fetch(seq);
        (state, effect)
    }

    fn fetch(&mut self, seq: &mut TaskSeq) -> UiEffect {
        let task = seq.next_id();
        self.load_task = Some(task);
        self.error = None;
        UiEffect::FetchEvents { task }
    }

    pub fn awaits(&self, id: TaskId) -> bool {
        self.load_task == Some(id)
    }

    pub fn is_loading(&self) -> bool {
        self.load_task.is_some()
    }

    /// Events matching the search box, in server order.
    pub fn visible(&self) -> Vec<&Event> {
        filter_events(&self.events, self.search.text())
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.visible().get(self.selected).copied()
    }

    pub fn handle_loaded(&mut self, result: Result<Vec<Event>, ApiError>) {
        self.load_task = None;
        match result {
            Ok(events) => {
                tracing::debug!(count = events.len(), "events loaded");
                self.events = events;
                self.selected = 0;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        seq: &mut TaskSeq,
    ) -> (Vec<UiEffect>, Option<NavRequest>) {
        if matches!(key.kind, KeyEventKind::Release) {
            return (vec![], None);
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('n') if ctrl => (vec![], Some(NavRequest::push(&Route::CreateEvent))),
            KeyCode::Char('r') if ctrl => {
                if self.is_loading() {
                    return (vec![], None);
                }
                (vec![self.fetch(seq)], None)
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                (vec![], None)
            }
            KeyCode::Down => {
                let count = self.visible().len();
                if self.selected + 1 < count {
                    self.selected += 1;
                }
                (vec![], None)
            }
            KeyCode::Enter => {
                let nav = self
                    .selected_event()
                    .map(|e| NavRequest::push(&Route::Event(Some(e.id.clone()))));
                (vec![], nav)
            }
            KeyCode::Esc => {
                if self.search.is_empty() {
                    (vec![], Some(NavRequest::Back))
                } else {
                    self.search.set_text("");
                    self.selected = 0;
                    (vec![], None)
                }
            }
            _ => {
                if self.search.input(key) {
                    self.selected = 0;
                }
                (vec![], None)
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, spinner: &str) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new(field_line("Search", &self.search, "Filter by name", true, false)),
            chunks[0],
        );

        let body = chunks[1];
        if let Some(error) = &self.error {
            frame.render_widget(Paragraph::new(banner_line("Error", error, Color::Red)), body);
        } else if self.is_loading() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("{spinner} Loading events…"),
                    Style::default().fg(Color::DarkGray),
                )),
                body,
            );
        } else {
            let visible = self.visible();
            if visible.is_empty() {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        "No events found",
                        Style::default().fg(Color::DarkGray),
                    )),
                    body,
                );
            } else {
                let width = usize::from(body.width);
                let items: Vec<ListItem> = visible.iter().map(|e| event_item(e, width)).collect();
                let list = List::new(items).highlight_style(
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                );
                let mut list_state = ListState::default();
                list_state.select(Some(self.selected));
                frame.render_stateful_widget(list, body, &mut list_state);
            }
        }

        render_hints(
            frame,
            chunks[2],
            &[
                InputHint::new("↑↓", "select"),
                InputHint::new("Enter", "open"),
                InputHint::new("Ctrl+N", "new event"),
                InputHint::new("Ctrl+R", "refresh"),
                InputHint::new("Esc", "back"),
            ],
            ACCENT,
        );
    }
}

fn event_item(event: &Event, width: usize) -> ListItem<'static> {
    let name = truncate_with_ellipsis(&event.name, width.saturating_sub(2));
    let mut details = vec![display_date(&event.date)];
    if !event.address.is_empty() {
        details.push(event.address.clone());
    }
    if !event.access.is_empty() {
        details.push(event.access.clone());
    }
    let details = truncate_with_ellipsis(&details.join(" · "), width.saturating_sub(4));
    ListItem::new(vec![
        Line::from(Span::styled(
            format!(" {name}"),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("   {details}"),
            Style::default().fg(Color::Gray),
        )),
    ])
}
