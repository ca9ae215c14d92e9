//! Result browser
//!
//! One list per media type. Each row shows `Title (Year)` followed by its
//! Details and Request buttons; pagination buttons sit in the bottom border.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::ui::search::button_span;
use crate::ui::Theme;
use crate::view::{ResultEntry, ResultRow, SearchPanel};

/// Render a result list
pub fn render_results(
    frame: &mut Frame,
    area: Rect,
    panel: &SearchPanel,
    page: u32,
    selected: usize,
    focused: bool,
) {
    let border_style = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let footer = Line::from(vec![
        button_span(&panel.prev_page),
        Span::styled(format!(" page {} ", page), Theme::dimmed()),
        button_span(&panel.next_page),
    ])
    .right_aligned();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Span::styled(
            format!(" RESULTS ({}) ", panel.results.rows().count()),
            Theme::title(),
        ))
        .title_bottom(footer);

    if panel.results.is_empty() {
        let empty = Paragraph::new("Type a name and press Enter to search")
            .style(Theme::dimmed())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    // Keep the selection in view
    let visible = area.height.saturating_sub(2) as usize;
    let offset = if visible > 0 && selected >= visible {
        selected + 1 - visible
    } else {
        0
    };

    let items: Vec<ListItem> = panel
        .results
        .entries()
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible.max(1))
        .map(|(i, entry)| match entry {
            ResultEntry::Placeholder(text) => {
                ListItem::new(Line::from(Span::styled(text.clone(), Theme::dimmed())))
            }
            ResultEntry::Row(row) => render_row(row, focused && i == selected),
        })
        .collect();

    frame.render_widget(List::new(items).block(block).style(Theme::text()), area);
}

/// Render a single row
fn render_row(row: &ResultRow, is_selected: bool) -> ListItem<'static> {
    let marker = if is_selected { "▸ " } else { "  " };
    let label_style = if is_selected {
        Theme::selected()
    } else {
        Theme::text()
    };

    ListItem::new(Line::from(vec![
        Span::styled(marker, Theme::accent()),
        Span::styled(row.label(), label_style),
        Span::raw(" "),
        button_span(&row.details),
        Span::raw(" "),
        button_span(&row.request),
    ]))
}
