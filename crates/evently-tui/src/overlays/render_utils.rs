use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Places a pop-out of `width` x `height` directly under `anchor`, shifted to
/// stay inside `screen`. Flips above the anchor when there is no room below.
pub fn popup_below(anchor: Rect, screen: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(screen.width);
    let height = height.min(screen.height);

    let max_x = screen.right().saturating_sub(width);
    let x = anchor.x.min(max_x).max(screen.x);

    let below = anchor.bottom();
    let y = if below.saturating_add(height) <= screen.bottom() {
        below
    } else {
        anchor.y.saturating_sub(height).max(screen.y)
    };
    Rect::new(x, y, width, height)
}

/// Clears the area and draws a bordered, titled block. Returns the inner area.
pub fn render_popup_container(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Helper struct for keyboard hints.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Renders a line of keyboard hints on the last row of `area`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], highlight_color: Color) {
    if area.height == 0 {
        return;
    }
    let hints_area = Rect::new(area.x, area.bottom() - 1, area.width, 1);

    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(highlight_color)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, hints_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_below_anchor() {
        let screen = Rect::new(0, 0, 80, 24);
        let anchor = Rect::new(10, 5, 20, 1);
        assert_eq!(popup_below(anchor, screen, 30, 6), Rect::new(10, 6, 30, 6));
    }

    #[test]
    fn test_popup_clamps_to_screen() {
        let screen = Rect::new(0, 0, 40, 12);
        let anchor = Rect::new(30, 10, 8, 1);
        let popup = popup_below(anchor, screen, 20, 6);
        assert_eq!(popup.right(), 40);
        assert_eq!(popup.y, 4);
    }
}
