//! Pure view functions. Rendering reads state and draws; it never returns
//! effects. Views record hit-test rectangles in `Cell`s as they draw.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

use crate::common::form::ACCENT;
use crate::common::truncate_start_with_ellipsis;
use crate::features::auth::render_auth;
use crate::features::composer::render_composer;
use crate::state::{AppState, View};

const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];
const SPINNER_SPEED_DIVISOR: usize = 6;

const HEADER_HEIGHT: u16 = 1;
const BODY_MARGIN: u16 = 1;

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(1)])
        .split(area);

    render_header(app, frame, chunks[0]);

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);
    let body = Rect {
        x: inner.x + BODY_MARGIN,
        y: inner.y,
        width: inner.width.saturating_sub(BODY_MARGIN * 2),
        height: inner.height,
    };

    let spinner = spinner(app);
    match &app.view {
        View::Auth(state) => render_auth(state, frame, body),
        View::Home(state) => state.render(frame, body),
        View::EventList(state) => state.render(frame, body, spinner),
        View::EventDetail(state) => state.render(frame, body, spinner),
        View::Composer(state) => render_composer(state, frame, body),
        View::Placeholder(page) => page.render(frame, body),
        View::Account(state) => state.render(frame, body),
    }
}

fn spinner(app: &AppState) -> &'static str {
    SPINNER_FRAMES[(app.spinner_frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len()]
}

fn render_header(app: &AppState, frame: &mut Frame, area: Rect) {
    let title = format!(" Evently · {} ", app.view.title());
    let route = app.current_route().path();
    let auth = if app.session.is_authenticated() {
        "signed in"
    } else {
        "signed out"
    };
    let busy = if app.tasks.is_any_running() {
        format!("{} ", spinner(app))
    } else {
        String::new()
    };

    let left = Span::styled(
        title,
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    );
    let used = left.width() + busy.chars().count() + route.len() + auth.len() + 6;
    let base = truncate_start_with_ellipsis(
        &app.base_url,
        usize::from(area.width).saturating_sub(used),
    );
    let line = Line::from(vec![
        left,
        Span::styled(route, Style::default().fg(Color::Gray)),
        Span::raw("  "),
        Span::styled(busy, Style::default().fg(Color::Yellow)),
        Span::styled(auth, Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled(base, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(line, area);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use evently_core::session::{MemorySessionStore, SharedSession};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::router::NavRequest;
    use crate::update::{navigate, start};

    fn screen(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(90)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app(token: Option<&str>) -> AppState {
        let session: SharedSession = Arc::new(match token {
            Some(t) => MemorySessionStore::with_token(t),
            None => MemorySessionStore::new(),
        });
        let mut app = AppState::new(
            session,
            "http://localhost:5000/api".to_string(),
            Duration::from_secs(2),
        );
        start(&mut app);
        app
    }

    #[test]
    fn test_login_screen() {
        let text = screen(&app(None));
        assert!(text.contains("Evently · Log in"));
        assert!(text.contains("signed out"));
        assert!(text.contains("[ Log in ]"));
    }

    #[test]
    fn test_every_protected_view_renders() {
        let mut app = app(Some("abc"));
        for route in [
            "/search-events",
            "/event/1",
            "/create-event",
            "/personal-info-page",
            "/my-events",
            "/my-account",
        ] {
            navigate(&mut app, NavRequest::Push(route.to_string()));
            let text = screen(&app);
            assert!(text.contains(route), "{route}");
        }
    }
}
