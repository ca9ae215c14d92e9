//! In-memory view model
//!
//! Everything the screen shows lives here: both search panels, the
//! back-to-home control, the details modal, and pending alerts. The
//! controller mutates it; the `ui` module draws it.

pub mod controls;
pub mod modal;
pub mod results;

use std::collections::VecDeque;
use tracing::info;

use crate::models::MediaType;

pub use controls::{
    set_loading_state, Action, Button, ControlId, HandlerRegistry, RequestTarget, TextInput,
    LOADING_LABEL,
};
pub use modal::{DetailsModal, ExtraContent, ExtraDetails, SeasonCheckbox};
pub use results::{ResultEntry, ResultList, ResultRow, SearchPanel, NO_RESULTS};

/// The whole screen
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub tv: SearchPanel,
    pub movie: SearchPanel,
    pub back_to_home: Button,
    pub back_to_home_visible: bool,
    pub modal: DetailsModal,
    alerts: VecDeque<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            tv: SearchPanel::new(MediaType::Tv),
            movie: SearchPanel::new(MediaType::Movie),
            back_to_home: Button::new("Back to Home"),
            back_to_home_visible: false,
            modal: DetailsModal::default(),
            alerts: VecDeque::new(),
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self, media_type: MediaType) -> &SearchPanel {
        match media_type {
            MediaType::Tv => &self.tv,
            MediaType::Movie => &self.movie,
        }
    }

    pub fn panel_mut(&mut self, media_type: MediaType) -> &mut SearchPanel {
        match media_type {
            MediaType::Tv => &mut self.tv,
            MediaType::Movie => &mut self.movie,
        }
    }

    /// Look up a button by control id
    pub fn button(&self, control: ControlId) -> Option<&Button> {
        match control {
            ControlId::Search(t) => Some(&self.panel(t).search_button),
            ControlId::PrevPage(t) => Some(&self.panel(t).prev_page),
            ControlId::NextPage(t) => Some(&self.panel(t).next_page),
            ControlId::BackToHome => {
                Some(&self.back_to_home).filter(|_| self.back_to_home_visible)
            }
            ControlId::Details { media_type, row } => {
                self.panel(media_type).results.row(row).map(|r| &r.details)
            }
            ControlId::Request { media_type, row } => {
                self.panel(media_type).results.row(row).map(|r| &r.request)
            }
            ControlId::ModalRequest => self.modal.request_button.as_ref(),
            // Link and close button are not buttons with state
            ControlId::BoxSetLink | ControlId::CloseModal => None,
        }
    }

    /// Queue a user-facing alert
    pub fn alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!(alert = %message);
        self.alerts.push_back(message);
    }

    /// Oldest alert not yet dismissed
    pub fn current_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn dismiss_alert(&mut self) -> Option<String> {
        self.alerts.pop_front()
    }

    /// Drain every pending alert, oldest first
    pub fn take_alerts(&mut self) -> Vec<String> {
        self.alerts.drain(..).collect()
    }

    pub fn alert_count(&self) -> usize {
        self.alerts.len()
    }
}
