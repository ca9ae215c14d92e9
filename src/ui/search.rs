//! Search input box for one panel

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::ui::Theme;
use crate::view::{Button, SearchPanel};

/// Placeholder text for an empty input
fn placeholder(panel: &SearchPanel) -> &'static str {
    match panel.media_type {
        crate::models::MediaType::Tv => "Enter a TV show name...",
        crate::models::MediaType::Movie => "Enter a movie name...",
    }
}

/// `[ Label ]` span for a button, styled by state
pub fn button_span(button: &Button) -> Span<'static> {
    let style = if button.loading {
        Theme::loading()
    } else if button.disabled {
        Theme::button_disabled()
    } else {
        Theme::button()
    };
    Span::styled(format!("[ {} ]", button.label), style)
}

/// Render the input and its search button
pub fn render_input(
    frame: &mut Frame,
    area: Rect,
    panel: &SearchPanel,
    focused: bool,
    editing: bool,
) {
    let border_style = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let text = if editing {
        let (before, after) = panel.input.split_at_cursor();
        Line::from(vec![
            Span::styled("⌕ ", Theme::secondary()),
            Span::styled(before.to_string(), Theme::text()),
            Span::styled("│", Theme::accent()),
            Span::styled(after.to_string(), Theme::text()),
        ])
    } else if panel.input.value.is_empty() {
        Line::from(vec![
            Span::styled("⌕ ", Theme::secondary()),
            Span::styled(placeholder(panel), Theme::dimmed()),
        ])
    } else {
        Line::from(vec![
            Span::styled("⌕ ", Theme::secondary()),
            Span::styled(panel.input.value.clone(), Theme::text()),
        ])
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Span::styled(format!(" {} ", panel.heading()), Theme::title()))
        .title_bottom(Line::from(button_span(&panel.search_button)).right_aligned());

    frame.render_widget(Paragraph::new(text).block(block), area);
}
