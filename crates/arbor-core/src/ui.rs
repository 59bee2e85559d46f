use crate::keybinds::InputMode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Spinner frames shown in the status bar while a request is in flight.
pub const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Standard layout: title bar (1 line) + banner (1 line) + main content
/// + status bar (1 line). Returns (title, banner, content, status).
pub fn standard_layout(area: Rect) -> (Rect, Rect, Rect, Rect) {
    let [title_area, banner_area, content_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    (title_area, banner_area, content_area, status_area)
}

/// Render the top title bar.
pub fn render_title_bar(frame: &mut Frame, area: Rect, app_name: &str, tree_name: &str) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app_name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", tree_name),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the error banner line. Empty message renders nothing.
pub fn render_error_banner(frame: &mut Frame, area: Rect, message: Option<&str>) {
    let Some(message) = message else {
        return;
    };
    let line = Line::from(Span::styled(
        format!(" {} ", message),
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the bottom status bar: mode, optional spinner, key hints.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    mode: InputMode,
    spinner: Option<&str>,
    info: &str,
) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Span::raw(" "),
    ];
    if let Some(frame_char) = spinner {
        spans.push(Span::styled(
            format!("{} loading ", frame_char),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled(
        info,
        Style::default().add_modifier(Modifier::DIM),
    ));

    let bar = Paragraph::new(Line::from(spans))
        .style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_widget(bar, area);
}
