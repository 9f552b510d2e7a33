use std::cell::Cell;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use evently_core::events::EventType;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{List, ListItem, ListState};

use super::render_utils::{InputHint, popup_below, render_hints, render_popup_container};
use super::{DraftMutation, PickerUpdate};
use crate::common::pointer::hit;

const POPUP_WIDTH: u16 = 30;

/// Category list. Selecting commits immediately and closes.
#[derive(Debug)]
pub struct EventTypePickerState {
    pub selected: usize,
    area: Cell<Rect>,
    list: Cell<Rect>,
}

impl EventTypePickerState {
    pub fn open(current: Option<EventType>) -> Self {
        let selected = current
            .and_then(|c| EventType::all().iter().position(|t| *t == c))
            .unwrap_or(0);
        Self {
            selected,
            area: Cell::new(Rect::default()),
            list: Cell::new(Rect::default()),
        }
    }

    pub fn area(&self) -> Rect {
        self.area.get()
    }

    pub fn selected_type(&self) -> Option<EventType> {
        EventType::all().get(self.selected).copied()
    }

    pub fn select(&self, event_type: EventType) -> PickerUpdate {
        PickerUpdate::close().with_mutation(DraftMutation::SetEventType(event_type))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerUpdate {
        if matches!(key.kind, KeyEventKind::Release) {
            return PickerUpdate::stay();
        }
        match key.code {
            KeyCode::Esc => PickerUpdate::close(),
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                PickerUpdate::stay()
            }
            KeyCode::Down => {
                if self.selected + 1 < EventType::all().len() {
                    self.selected += 1;
                }
                PickerUpdate::stay()
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let Some(event_type) = self.selected_type() else {
                    return PickerUpdate::close();
                };
                self.select(event_type)
            }
            _ => PickerUpdate::stay(),
        }
    }

    pub fn handle_click(&mut self, column: u16, row: u16) -> PickerUpdate {
        let list = self.list.get();
        if !hit(list, column, row) {
            return PickerUpdate::stay();
        }
        let index = usize::from(row - list.y);
        match EventType::all().get(index) {
            Some(&event_type) => {
                self.selected = index;
                self.select(event_type)
            }
            None => PickerUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, anchor: Rect, screen: Rect) {
        let types = EventType::all();
        let height = types.len() as u16 + 3;
        let area = popup_below(anchor, screen, POPUP_WIDTH, height);
        self.area.set(area);
        let inner = render_popup_container(frame, area, "Event Type", Color::Magenta);

        let list_height = inner.height.saturating_sub(1).min(types.len() as u16);
        let list_area = Rect::new(inner.x, inner.y, inner.width, list_height);
        self.list.set(list_area);

        let items: Vec<ListItem> = types
            .iter()
            .map(|t| ListItem::new(Line::from(format!("  {t}"))))
            .collect();
        let list = List::new(items).highlight_style(
            Style::default()
                .bg(Color::Magenta)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );
        let mut list_state = ListState::default();
        list_state.select(Some(self.selected));
        frame.render_stateful_widget(list, list_area, &mut list_state);

        let hints = [InputHint::new("Enter", "select"), InputHint::new("Esc", "cancel")];
        render_hints(frame, inner, &hints, Color::Magenta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlays::PickerTransition;

    #[test]
    fn test_select_commits_and_closes() {
        let mut picker = EventTypePickerState::open(None);
        picker.handle_key(KeyEvent::from(KeyCode::Down));
        picker.handle_key(KeyEvent::from(KeyCode::Down));
        picker.handle_key(KeyEvent::from(KeyCode::Down));
        let update = picker.handle_key(KeyEvent::from(KeyCode::Enter));
        assert_eq!(update.transition, PickerTransition::Close);
        assert_eq!(
            update.mutations,
            vec![DraftMutation::SetEventType(EventType::Social)]
        );
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut picker = EventTypePickerState::open(Some(EventType::Other));
        picker.handle_key(KeyEvent::from(KeyCode::Down));
        assert_eq!(picker.selected_type(), Some(EventType::Other));

        let mut picker = EventTypePickerState::open(None);
        picker.handle_key(KeyEvent::from(KeyCode::Up));
        assert_eq!(picker.selected_type(), Some(EventType::Business));
    }

    #[test]
    fn test_escape_closes_without_mutation() {
        let mut picker = EventTypePickerState::open(None);
        assert_eq!(picker.handle_key(KeyEvent::from(KeyCode::Esc)), PickerUpdate::close());
    }
}
