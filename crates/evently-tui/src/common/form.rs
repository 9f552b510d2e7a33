//! Line builders shared by the form views.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::field::TextField;
use super::text::mask;

/// Width of the label column.
pub const LABEL_WIDTH: usize = 14;

pub const ACCENT: Color = Color::Cyan;

/// Renders `label  value` with a block cursor when focused.
pub fn field_line(
    label: &str,
    field: &TextField,
    placeholder: &str,
    focused: bool,
    secret: bool,
) -> Line<'static> {
    let mut spans = vec![label_span(label, focused)];
    let text = if secret {
        mask(field.text())
    } else {
        field.text().to_string()
    };

    if field.is_empty() && !focused {
        spans.push(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ));
        return Line::from(spans);
    }

    if focused {
        let split = text
            .char_indices()
            .nth(field.cursor())
            .map_or(text.len(), |(i, _)| i);
        let (before, after) = text.split_at(split);
        let mut rest = after.chars();
        let under = rest.next().map_or_else(|| " ".to_string(), String::from);
        spans.push(Span::raw(before.to_string()));
        spans.push(Span::styled(
            under,
            Style::default().fg(Color::Black).bg(Color::White),
        ));
        spans.push(Span::raw(rest.as_str().to_string()));
    } else {
        spans.push(Span::raw(text));
    }
    Line::from(spans)
}

/// Renders `label  value` for non-editable rows (pickers, toggles).
pub fn value_line(label: &str, value: &str, focused: bool, is_placeholder: bool) -> Line<'static> {
    let style = if is_placeholder {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default()
    };
    Line::from(vec![
        label_span(label, focused),
        Span::styled(value.to_string(), style),
    ])
}

/// Renders a `[ label ]` button.
pub fn button_line(label: &str, focused: bool, enabled: bool) -> Line<'static> {
    let style = if !enabled {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default()
            .fg(Color::Black)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    };
    Line::from(Span::styled(format!("[ {label} ]"), style))
}

/// One-line banner, e.g. `Error: Name required`.
pub fn banner_line(title: &str, message: &str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{title}: "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(message.to_string(), Style::default().fg(color)),
    ])
}

fn label_span(label: &str, focused: bool) -> Span<'static> {
    let marker = if focused { "› " } else { "  " };
    let style = if focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Span::styled(format!("{marker}{label:<LABEL_WIDTH$}"), style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_field_line_masks_secret() {
        let field = TextField::with_text("hunter2");
        let line = field_line("Password", &field, "", false, true);
        assert!(plain(&line).ends_with("•••••••"));
    }

    #[test]
    fn test_field_line_placeholder_when_empty() {
        let line = field_line("Email", &TextField::new(), "you@example.com", false, false);
        assert!(plain(&line).contains("you@example.com"));

        let focused = field_line("Email", &TextField::new(), "you@example.com", true, false);
        assert!(!plain(&focused).contains("you@example.com"));
    }

    #[test]
    fn test_field_line_cursor_keeps_text() {
        let field = TextField::with_text("abc");
        assert!(plain(&field_line("Name", &field, "", true, false)).ends_with("abc "));
    }
}
