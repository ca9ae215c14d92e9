//! Details modal
//!
//! Filled from an already-fetched [`MediaItem`]; no network involved.

use crate::models::{MediaItem, MediaType, PLACEHOLDER_POSTER};
use crate::view::controls::Button;

/// One season checkbox in the season form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonCheckbox {
    pub value: String,
    pub label: String,
    pub checked: bool,
}

/// Type-specific extras below the basic fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExtraContent {
    #[default]
    Empty,
    /// "Select Seasons to Request:" form (TV)
    Seasons(Vec<SeasonCheckbox>),
    /// "View Box Set Movies" link (movie)
    BoxSetLink { label: String, titles: Vec<String> },
}

/// Container created the first time details are shown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraDetails {
    pub content: ExtraContent,
}

/// The details modal and its fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailsModal {
    pub visible: bool,
    pub title: String,
    pub poster: String,
    pub overview: String,
    pub year: String,
    pub genres: String,
    pub ratings: String,
    /// Whether the "Seasons" label row is shown
    pub seasons_visible: bool,
    pub extra: Option<ExtraDetails>,
    pub request_button: Option<Button>,
    /// Highlighted season checkbox (keyboard focus)
    pub season_cursor: usize,
}

impl DetailsModal {
    /// Fill the basic fields and rebuild the extras for `item`
    pub fn populate(&mut self, item: &MediaItem) {
        self.title = item.title.clone();
        self.poster = item
            .poster
            .clone()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_POSTER.to_string());
        self.overview = item
            .overview
            .clone()
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| "No overview available.".to_string());
        self.year = item
            .known_year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        self.genres = item
            .genres
            .as_ref()
            .map(|g| g.join(", "))
            .unwrap_or_else(|| "N/A".to_string());
        self.ratings = item
            .ratings
            .as_ref()
            .and_then(|r| r.value)
            .filter(|v| *v != 0.0)
            .map(|v| format!("{}/10", v))
            .unwrap_or_else(|| "N/A".to_string());

        self.seasons_visible = item.media_type == MediaType::Tv;

        let extra = self.extra.get_or_insert_with(ExtraDetails::default);
        extra.content = match item.media_type {
            MediaType::Tv => match item.seasons() {
                Some(count) => ExtraContent::Seasons(
                    (1..=count)
                        .map(|n| SeasonCheckbox {
                            value: n.to_string(),
                            label: format!("Season {}", n),
                            checked: false,
                        })
                        .collect(),
                ),
                None => ExtraContent::Empty,
            },
            MediaType::Movie => match item.box_set_titles() {
                Some(titles) => ExtraContent::BoxSetLink {
                    label: "View Box Set Movies".to_string(),
                    titles: titles.to_vec(),
                },
                None => ExtraContent::Empty,
            },
        };
        self.season_cursor = 0;
    }

    fn season_boxes_mut(&mut self) -> Option<&mut Vec<SeasonCheckbox>> {
        match self.extra.as_mut().map(|e| &mut e.content) {
            Some(ExtraContent::Seasons(boxes)) => Some(boxes),
            _ => None,
        }
    }

    /// Season checkboxes, empty when the form is absent
    pub fn season_boxes(&self) -> &[SeasonCheckbox] {
        match self.extra.as_ref().map(|e| &e.content) {
            Some(ExtraContent::Seasons(boxes)) => boxes,
            _ => &[],
        }
    }

    /// Values of checked seasons, in form order
    pub fn checked_seasons(&self) -> Vec<String> {
        self.season_boxes()
            .iter()
            .filter(|b| b.checked)
            .map(|b| b.value.clone())
            .collect()
    }

    /// Flip the checkbox at `index`; out of range is ignored
    pub fn toggle_season(&mut self, index: usize) {
        if let Some(boxes) = self.season_boxes_mut() {
            if let Some(b) = boxes.get_mut(index) {
                b.checked = !b.checked;
            }
        }
    }

    pub fn season_cursor_up(&mut self) {
        self.season_cursor = self.season_cursor.saturating_sub(1);
    }

    pub fn season_cursor_down(&mut self) {
        let len = self.season_boxes().len();
        if len > 0 && self.season_cursor < len - 1 {
            self.season_cursor += 1;
        }
    }

    /// Box-set link, if one is shown
    pub fn box_set(&self) -> Option<&[String]> {
        match self.extra.as_ref().map(|e| &e.content) {
            Some(ExtraContent::BoxSetLink { titles, .. }) => Some(titles),
            _ => None,
        }
    }
}
