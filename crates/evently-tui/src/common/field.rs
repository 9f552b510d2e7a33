//! Single-line text field.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Editable one-line buffer with a char-indexed cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
    cursor: usize,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = text.chars().count();
    }

    pub fn insert_str(&mut self, s: &str) {
        let s: String = s.chars().filter(|c| !c.is_control()).collect();
        let at = byte_index(&self.text, self.cursor);
        self.text.insert_str(at, &s);
        self.cursor += s.chars().count();
    }

    pub fn delete_prev_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = byte_index(&self.text, self.cursor - 1);
        let end = byte_index(&self.text, self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
    }

    pub fn delete_next_char(&mut self) {
        if self.cursor >= self.text.chars().count() {
            return;
        }
        let start = byte_index(&self.text, self.cursor);
        let end = byte_index(&self.text, self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    /// Applies an editing key. Returns true if the text changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        if matches!(key.kind, KeyEventKind::Release) {
            return false;
        }
        let before = self.text.len();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('u') if ctrl => {
                self.text.clear();
                self.cursor = 0;
                return before != 0;
            }
            KeyCode::Char(ch) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                let mut buf = [0u8; 4];
                self.insert_str(ch.encode_utf8(&mut buf));
            }
            KeyCode::Backspace => self.delete_prev_char(),
            KeyCode::Delete => self.delete_next_char(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.text.chars().count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.text.chars().count(),
            _ => return false,
        }
        self.text.len() != before
    }
}

fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut field = TextField::new();
        for ch in "Picnic".chars() {
            assert!(field.input(key(KeyCode::Char(ch))));
        }
        assert_eq!(field.text(), "Picnic");
        assert!(field.input(key(KeyCode::Backspace)));
        assert_eq!(field.text(), "Picni");
    }

    #[test]
    fn test_cursor_movement_is_not_an_edit() {
        let mut field = TextField::with_text("ab");
        assert!(!field.input(key(KeyCode::Left)));
        assert_eq!(field.cursor(), 1);
        field.input(key(KeyCode::Char('x')));
        assert_eq!(field.text(), "axb");
        field.input(key(KeyCode::Home));
        field.input(key(KeyCode::Delete));
        assert_eq!(field.text(), "xb");
    }

    #[test]
    fn test_multibyte_chars() {
        let mut field = TextField::with_text("café");
        field.delete_prev_char();
        assert_eq!(field.text(), "caf");
        field.insert_str("é!");
        assert_eq!(field.text(), "café!");
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut field = TextField::with_text("abc");
        assert!(field.input(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert!(field.is_empty());
        assert!(!field.input(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
    }
}
