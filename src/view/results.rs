//! Result panels: one search input, its buttons, and its result list

use crate::models::{MediaId, MediaItem, MediaType};
use crate::view::controls::{Button, TextInput};

/// Text of the single entry shown when a search finds nothing
pub const NO_RESULTS: &str = "No results found";

/// A rendered search result with its two controls
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub item: MediaItem,
    pub details: Button,
    pub request: Button,
}

impl ResultRow {
    pub fn new(item: MediaItem) -> Self {
        Self {
            item,
            details: Button::new("Details"),
            request: Button::new("Request"),
        }
    }

    /// `Title (Year)`
    pub fn label(&self) -> String {
        self.item.row_label()
    }
}

/// An entry in a result list
#[derive(Debug, Clone, PartialEq)]
pub enum ResultEntry {
    Placeholder(String),
    Row(ResultRow),
}

/// The items currently rendered for one media type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultList {
    entries: Vec<ResultEntry>,
}

impl ResultList {
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace the contents with a single placeholder line
    pub fn show_placeholder(&mut self, text: impl Into<String>) {
        self.entries = vec![ResultEntry::Placeholder(text.into())];
    }

    /// Replace the contents with one row per item
    pub fn set_items(&mut self, items: Vec<MediaItem>) {
        self.entries = items
            .into_iter()
            .map(|item| ResultEntry::Row(ResultRow::new(item)))
            .collect();
    }

    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows with their positions, placeholders skipped
    pub fn rows(&self) -> impl Iterator<Item = (usize, &ResultRow)> {
        self.entries.iter().enumerate().filter_map(|(i, e)| match e {
            ResultEntry::Row(row) => Some((i, row)),
            ResultEntry::Placeholder(_) => None,
        })
    }

    pub fn row(&self, index: usize) -> Option<&ResultRow> {
        match self.entries.get(index) {
            Some(ResultEntry::Row(row)) => Some(row),
            _ => None,
        }
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut ResultRow> {
        match self.entries.get_mut(index) {
            Some(ResultEntry::Row(row)) => Some(row),
            _ => None,
        }
    }

    /// First row whose item has this id
    pub fn find(&self, id: &MediaId) -> Option<&ResultRow> {
        self.rows()
            .map(|(_, row)| row)
            .find(|row| row.item.id.as_ref().is_some_and(|own| own.same_as(id)))
    }

    pub fn find_mut(&mut self, id: &MediaId) -> Option<&mut ResultRow> {
        self.entries.iter_mut().find_map(|e| match e {
            ResultEntry::Row(row) if row.item.id.as_ref().is_some_and(|own| own.same_as(id)) => {
                Some(row)
            }
            _ => None,
        })
    }

    /// Plain-text lines, one per entry (used by the CLI and tests)
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| match e {
                ResultEntry::Placeholder(text) => text.clone(),
                ResultEntry::Row(row) => row.label(),
            })
            .collect()
    }
}

/// Input, buttons and results for one media type
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPanel {
    pub media_type: MediaType,
    pub input: TextInput,
    pub search_button: Button,
    pub prev_page: Button,
    pub next_page: Button,
    pub results: ResultList,
}

impl SearchPanel {
    pub fn new(media_type: MediaType) -> Self {
        Self {
            media_type,
            input: TextInput::default(),
            search_button: Button::new("Search"),
            prev_page: Button::disabled("Previous"),
            next_page: Button::disabled("Next"),
            results: ResultList::default(),
        }
    }

    /// Heading shown above the panel
    pub fn heading(&self) -> &'static str {
        match self.media_type {
            MediaType::Tv => "TV SHOWS",
            MediaType::Movie => "MOVIES",
        }
    }
}
