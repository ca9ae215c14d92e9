//! Details modal
//!
//! Centered popup over the result panels: basic fields, the season form
//! or box-set link, and the Request button.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::ui::search::button_span;
use crate::ui::{centered, Theme};
use crate::view::{DetailsModal, ExtraContent};

fn field(name: &'static str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<9}", name), Theme::dimmed()),
        Span::styled(value.to_string(), Theme::text()),
    ])
}

/// Render the modal if it is visible
pub fn render_modal(frame: &mut Frame, area: Rect, modal: &DetailsModal) {
    if !modal.visible {
        return;
    }

    let popup = centered(area, 70, 22);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("▶ ", Theme::accent()),
            Span::styled(modal.title.clone(), Theme::title()),
        ]),
        Line::from(""),
        field("Year", &modal.year),
        field("Genres", &modal.genres),
        field("Rating", &modal.ratings),
        field("Poster", &modal.poster),
    ];
    if modal.seasons_visible {
        lines.push(field("Seasons", &modal.season_boxes().len().to_string()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(modal.overview.clone(), Theme::text())));
    lines.push(Line::from(""));

    match modal.extra.as_ref().map(|e| &e.content) {
        Some(ExtraContent::Seasons(boxes)) => {
            lines.push(Line::from(Span::styled(
                "Select Seasons to Request:",
                Theme::accent(),
            )));
            for (i, b) in boxes.iter().enumerate() {
                let mark = if b.checked { "[x]" } else { "[ ]" };
                let style = if i == modal.season_cursor {
                    Theme::selected()
                } else {
                    Theme::text()
                };
                lines.push(Line::from(Span::styled(format!(" {} {}", mark, b.label), style)));
            }
        }
        Some(ExtraContent::BoxSetLink { label, .. }) => {
            lines.push(Line::from(vec![
                Span::styled(label.clone(), Theme::secondary().add_modifier(Modifier::UNDERLINED)),
                Span::styled("  (b)", Theme::dimmed()),
            ]));
        }
        Some(ExtraContent::Empty) | None => {}
    }

    let mut footer = vec![Span::styled(" Esc close ", Theme::dimmed())];
    if let Some(button) = &modal.request_button {
        footer.push(button_span(button));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Theme::border_focused())
        .title(Span::styled(" DETAILS ", Theme::title()))
        .title_bottom(Line::from(footer).right_aligned())
        .style(Style::default().bg(Theme::BACKGROUND));

    let body = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(body, popup);
}
