use std::cell::Cell;

use chrono::{Duration, Local, NaiveDate, NaiveTime};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use evently_core::events::{EventDraft, PendingDateTime};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::render_utils::{InputHint, popup_below, render_hints, render_popup_container};
use super::{DraftMutation, PickerUpdate};
use crate::common::pointer::hit;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const TIME_STEP_MINUTES: i64 = 15;
const DEFAULT_TIME: &str = "09:00";

const POPUP_WIDTH: u16 = 36;
const POPUP_HEIGHT: u16 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeFocus {
    Date,
    Time,
}

/// Date/time pop-out. Edits land in `pending` and reach the draft only
/// through `confirm()`.
#[derive(Debug)]
pub struct DateTimePickerState {
    pub pending: PendingDateTime,
    pub focus: DateTimeFocus,
    pub error: Option<String>,
    area: Cell<Rect>,
    date_row: Cell<Rect>,
    time_row: Cell<Rect>,
    confirm_button: Cell<Rect>,
}

impl DateTimePickerState {
    pub fn open(draft: &EventDraft) -> Self {
        Self {
            pending: draft.pending_date_time(),
            focus: DateTimeFocus::Date,
            error: None,
            area: Cell::new(Rect::default()),
            date_row: Cell::new(Rect::default()),
            time_row: Cell::new(Rect::default()),
            confirm_button: Cell::new(Rect::default()),
        }
    }

    pub fn area(&self) -> Rect {
        self.area.get()
    }

    pub fn set_date(&mut self, date: &str) {
        self.pending.date = date.to_string();
        self.error = None;
    }

    pub fn set_time(&mut self, time: &str) {
        self.pending.time = time.to_string();
        self.error = None;
    }

    /// Commits the staged values and closes. Values that do not parse keep
    /// the picker open with an error; empty values are allowed.
    pub fn confirm(&mut self) -> PickerUpdate {
        if let Err(message) = validate(&self.pending) {
            self.error = Some(message);
            return PickerUpdate::stay();
        }
        PickerUpdate::close().with_mutation(DraftMutation::CommitDateTime(self.pending.clone()))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerUpdate {
        if matches!(key.kind, KeyEventKind::Release) {
            return PickerUpdate::stay();
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => PickerUpdate::close(),
            KeyCode::Enter => self.confirm(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.focus = match self.focus {
                    DateTimeFocus::Date => DateTimeFocus::Time,
                    DateTimeFocus::Time => DateTimeFocus::Date,
                };
                PickerUpdate::stay()
            }
            KeyCode::Up => {
                self.step(1);
                PickerUpdate::stay()
            }
            KeyCode::Down => {
                self.step(-1);
                PickerUpdate::stay()
            }
            KeyCode::Backspace => {
                self.focused_mut().pop();
                self.error = None;
                PickerUpdate::stay()
            }
            KeyCode::Char(ch) if !ctrl && (ch.is_ascii_digit() || ch == '-' || ch == ':') => {
                self.focused_mut().push(ch);
                self.error = None;
                PickerUpdate::stay()
            }
            _ => PickerUpdate::stay(),
        }
    }

    pub fn handle_click(&mut self, column: u16, row: u16) -> PickerUpdate {
        if hit(self.confirm_button.get(), column, row) {
            return self.confirm();
        }
        if hit(self.date_row.get(), column, row) {
            self.focus = DateTimeFocus::Date;
        } else if hit(self.time_row.get(), column, row) {
            self.focus = DateTimeFocus::Time;
        }
        PickerUpdate::stay()
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            DateTimeFocus::Date => &mut self.pending.date,
            DateTimeFocus::Time => &mut self.pending.time,
        }
    }

    /// Moves the focused value by one day or one time step.
    fn step(&mut self, direction: i64) {
        self.error = None;
        match self.focus {
            DateTimeFocus::Date => {
                let next = match NaiveDate::parse_from_str(&self.pending.date, DATE_FORMAT) {
                    Ok(date) => step_date(date, direction),
                    Err(_) => Local::now().date_naive(),
                };
                self.pending.date = next.format(DATE_FORMAT).to_string();
            }
            DateTimeFocus::Time => {
                self.pending.time = match NaiveTime::parse_from_str(&self.pending.time, TIME_FORMAT) {
                    Ok(time) => {
                        let (next, _) = time
                            .overflowing_add_signed(Duration::minutes(direction * TIME_STEP_MINUTES));
                        next.format(TIME_FORMAT).to_string()
                    }
                    Err(_) => DEFAULT_TIME.to_string(),
                };
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, anchor: Rect, screen: Rect) {
        let area = popup_below(anchor, screen, POPUP_WIDTH, POPUP_HEIGHT);
        self.area.set(area);
        let inner = render_popup_container(frame, area, "Date & Time", Color::Cyan);
        if inner.height < 4 {
            return;
        }

        let date_row = Rect::new(inner.x, inner.y, inner.width, 1);
        let time_row = Rect::new(inner.x, inner.y + 1, inner.width, 1);
        let error_row = Rect::new(inner.x, inner.y + 2, inner.width, 1);
        let confirm = Rect::new(inner.x + 1, inner.y + 3, 11, 1);
        self.date_row.set(date_row);
        self.time_row.set(time_row);
        self.confirm_button.set(confirm);

        let row = |label: &str, value: &str, placeholder: &str, focused: bool| {
            let value_style = if focused {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            let shown = if value.is_empty() { placeholder } else { value };
            Line::from(vec![
                Span::styled(format!(" {label:<6}"), Style::default().fg(Color::DarkGray)),
                Span::styled(format!(" {shown} "), value_style),
            ])
        };

        frame.render_widget(
            Paragraph::new(row(
                "Date",
                &self.pending.date,
                "YYYY-MM-DD",
                self.focus == DateTimeFocus::Date,
            )),
            date_row,
        );
        frame.render_widget(
            Paragraph::new(row(
                "Time",
                &self.pending.time,
                "HH:MM",
                self.focus == DateTimeFocus::Time,
            )),
            time_row,
        );
        if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {error}"), Style::default().fg(Color::Red))),
                error_row,
            );
        }
        frame.render_widget(
            Paragraph::new(Span::styled(
                "[ Confirm ]",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            confirm,
        );

        let hints = [
            InputHint::new("↑↓", "adjust"),
            InputHint::new("Enter", "confirm"),
            InputHint::new("Esc", "cancel"),
        ];
        render_hints(frame, inner, &hints, Color::Cyan);
    }
}

fn validate(pending: &PendingDateTime) -> Result<(), String> {
    if !pending.date.is_empty() && NaiveDate::parse_from_str(&pending.date, DATE_FORMAT).is_err() {
        return Err("Date must be YYYY-MM-DD".to_string());
    }
    if !pending.time.is_empty() && NaiveTime::parse_from_str(&pending.time, TIME_FORMAT).is_err() {
        return Err("Time must be HH:MM".to_string());
    }
    Ok(())
}

/// Moves `date` by `days`, staying put at the calendar bounds.
fn step_date(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}
