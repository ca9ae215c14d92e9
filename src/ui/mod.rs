//! Terminal UI components
//!
//! Built with ratatui. Draws the [`App`] view model: two search panels side
//! by side, the details modal, and the alert popup on top.

pub mod theme;
pub mod search;
pub mod browser;
pub mod detail;

pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{App, Focus, InputMode};
use crate::models::MediaType;

/// Centered rect of at most `width` x `height` inside `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Draw one frame
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Theme::text()), area);

    let [header, body, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(6),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header, app);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(body);
    render_panel(frame, left, app, MediaType::Tv);
    render_panel(frame, right, app, MediaType::Movie);

    render_status_bar(frame, status, app);

    detail::render_modal(frame, body, &app.controller.doc.modal);

    if let Some(alert) = app.controller.doc.current_alert() {
        render_alert_popup(frame, area, alert, app.controller.doc.alert_count());
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let doc = &app.controller.doc;
    let mut spans = vec![
        Span::styled(" JELLYFINDARR ", Theme::title()),
        Span::styled(app.controller.client().base_url().to_string(), Theme::dimmed()),
    ];
    if doc.back_to_home_visible {
        spans.push(Span::raw("  "));
        spans.push(search::button_span(&doc.back_to_home));
        spans.push(Span::styled(" (h)", Theme::dimmed()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_panel(frame: &mut Frame, area: Rect, app: &App, media_type: MediaType) {
    let panel = app.controller.doc.panel(media_type);
    let [input, results] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(area);

    search::render_input(
        frame,
        input,
        panel,
        app.focus == Focus::Input(media_type),
        app.focus == Focus::Input(media_type) && app.input_mode == InputMode::Editing,
    );
    browser::render_results(
        frame,
        results,
        panel,
        app.controller.state().page(media_type),
        app.selected_row(media_type),
        app.focus == Focus::Results(media_type),
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::ACCENT),
        ),
    };

    let help: &[(&str, &str)] = if app.controller.doc.modal.visible {
        &[("↑↓", "season"), ("SPACE", "toggle"), ("b", "box set"), ("ENTER", "request"), ("ESC", "close")]
    } else if app.input_mode == InputMode::Editing {
        &[("ENTER", "search"), ("TAB", "next"), ("ESC", "normal")]
    } else {
        &[("ENTER", "details"), ("r", "request"), ("[ ]", "page"), ("h", "home"), ("/", "edit"), ("q", "quit")]
    };

    let mut spans = vec![mode_indicator, Span::raw(" ")];
    for (key, label) in help {
        spans.push(Span::styled(format!(" {} ", key), Theme::keybind()));
        spans.push(Span::styled(format!(" {}  ", label), Theme::dimmed()));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Theme::status_bar()),
        area,
    );
}

/// Alert popup; any key dismisses it
fn render_alert_popup(frame: &mut Frame, area: Rect, message: &str, pending: usize) {
    let popup_area = centered(area, 60, 7);
    frame.render_widget(Clear, popup_area);

    // Failures read as errors, everything else as a notice
    let style = if message.starts_with("Error:") || message.starts_with("Failed") {
        Theme::error()
    } else {
        Theme::accent()
    };

    let title = if pending > 1 {
        format!(" ! ALERT (1/{}) ", pending)
    } else {
        " ! ALERT ".to_string()
    };

    let popup = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), style)),
        Line::from(""),
        Line::from(Span::styled("press any key", Theme::dimmed())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(style)
            .title(Span::styled(title, style))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(popup, popup_area);
}
