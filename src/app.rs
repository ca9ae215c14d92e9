//! App state and keyboard handling
//!
//! Wraps the [`SearchController`] with what only the terminal needs:
//! which panel has focus, whether an input is being edited, and the
//! highlighted row in each result list. Keys are translated into control
//! clicks; any network work comes back as an [`Effect`] for the event
//! loop to run.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::{Completion, Effect, SearchController};
use crate::models::MediaType;
use crate::view::ControlId;

// =============================================================================
// Focus & Input Mode
// =============================================================================

/// Which part of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input(MediaType),
    Results(MediaType),
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Input(MediaType::Tv)
    }
}

impl Focus {
    pub fn media_type(&self) -> MediaType {
        match self {
            Focus::Input(t) | Focus::Results(t) => *t,
        }
    }

    /// Tab order: TV input, TV results, movie input, movie results
    pub fn next(self) -> Self {
        match self {
            Focus::Input(MediaType::Tv) => Focus::Results(MediaType::Tv),
            Focus::Results(MediaType::Tv) => Focus::Input(MediaType::Movie),
            Focus::Input(MediaType::Movie) => Focus::Results(MediaType::Movie),
            Focus::Results(MediaType::Movie) => Focus::Input(MediaType::Tv),
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Input(MediaType::Tv) => Focus::Results(MediaType::Movie),
            Focus::Results(MediaType::Tv) => Focus::Input(MediaType::Tv),
            Focus::Input(MediaType::Movie) => Focus::Results(MediaType::Tv),
            Focus::Results(MediaType::Movie) => Focus::Input(MediaType::Movie),
        }
    }
}

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    Normal,
    /// Text input mode (search box focused)
    #[default]
    Editing,
}

// =============================================================================
// List Selection
// =============================================================================

/// Highlighted row of a result list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    pub selected: usize,
    pub len: usize,
}

impl ListState {
    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.len.saturating_sub(1);
    }

    /// Update length, clamping the selection
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Terminal application state
#[derive(Debug)]
pub struct App {
    pub controller: SearchController,
    /// Whether the app is running
    pub running: bool,
    pub focus: Focus,
    pub input_mode: InputMode,
    selection: HashMap<MediaType, ListState>,
}

impl App {
    pub fn new(controller: SearchController) -> Self {
        Self {
            controller,
            running: true,
            focus: Focus::default(),
            input_mode: InputMode::Editing,
            selection: MediaType::ALL
                .iter()
                .map(|&t| (t, ListState::default()))
                .collect(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Highlighted row for a result list
    pub fn selected_row(&self, media_type: MediaType) -> usize {
        self.selection
            .get(&media_type)
            .map(|s| s.selected)
            .unwrap_or(0)
    }

    fn selection_mut(&mut self, media_type: MediaType) -> &mut ListState {
        self.selection.entry(media_type).or_default()
    }

    /// Re-clamp selections after the lists changed
    pub fn sync_lists(&mut self) {
        for t in MediaType::ALL {
            let len = self.controller.doc.panel(t).results.len();
            self.selection_mut(t).set_len(len);
        }
    }

    /// Apply a finished effect and re-clamp selections
    pub fn complete(&mut self, completion: Completion) {
        self.controller.complete(completion);
        self.sync_lists();
    }

    /// Click a control, then re-clamp selections
    fn click(&mut self, control: ControlId) -> Option<Effect> {
        let effect = self.controller.click(control);
        self.sync_lists();
        effect
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle a key press; returns network work to start, if any
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return None;
        }

        // Alerts are modal: any key dismisses the oldest one
        if self.controller.doc.current_alert().is_some() {
            self.controller.doc.dismiss_alert();
            return None;
        }

        if self.controller.doc.modal.visible {
            return self.handle_modal_key(key);
        }

        match self.input_mode {
            InputMode::Editing => self.handle_editing_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> Option<Effect> {
        let modal = &mut self.controller.doc.modal;
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.click(ControlId::CloseModal),
            KeyCode::Up | KeyCode::Char('k') => {
                modal.season_cursor_up();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                modal.season_cursor_down();
                None
            }
            KeyCode::Char(' ') => {
                let cursor = modal.season_cursor;
                modal.toggle_season(cursor);
                None
            }
            KeyCode::Char('b') => self.click(ControlId::BoxSetLink),
            KeyCode::Enter | KeyCode::Char('r') => self.click(ControlId::ModalRequest),
            _ => None,
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> Option<Effect> {
        let media_type = self.focus.media_type();
        let input = &mut self.controller.doc.panel_mut(media_type).input;
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                None
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.focus = Focus::Results(media_type);
                self.click(ControlId::Search(media_type))
            }
            KeyCode::Tab => {
                self.input_mode = InputMode::Normal;
                self.focus = self.focus.next();
                None
            }
            KeyCode::Char(c) => {
                input.insert(c);
                None
            }
            KeyCode::Backspace => {
                input.backspace();
                None
            }
            KeyCode::Delete => {
                input.delete();
                None
            }
            KeyCode::Left => {
                input.cursor_left();
                None
            }
            KeyCode::Right => {
                input.cursor_right();
                None
            }
            KeyCode::Home => {
                input.cursor_home();
                None
            }
            KeyCode::End => {
                input.cursor_end();
                None
            }
            _ => None,
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Option<Effect> {
        let media_type = self.focus.media_type();
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                None
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                None
            }
            KeyCode::Char('/') | KeyCode::Char('i') => {
                self.focus = Focus::Input(media_type);
                self.input_mode = InputMode::Editing;
                None
            }
            KeyCode::Enter if matches!(self.focus, Focus::Input(_)) => {
                self.focus = Focus::Results(media_type);
                self.click(ControlId::Search(media_type))
            }
            KeyCode::Char('s') => self.click(ControlId::Search(media_type)),
            KeyCode::Char('[') => self.click(ControlId::PrevPage(media_type)),
            KeyCode::Char(']') => self.click(ControlId::NextPage(media_type)),
            KeyCode::Char('h') => self.click(ControlId::BackToHome),
            _ if matches!(self.focus, Focus::Results(_)) => self.handle_results_key(key),
            _ => None,
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) -> Option<Effect> {
        let media_type = self.focus.media_type();
        let row = self.selected_row(media_type);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selection_mut(media_type).up();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selection_mut(media_type).down();
                None
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.selection_mut(media_type).first();
                None
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.selection_mut(media_type).last();
                None
            }
            KeyCode::Enter | KeyCode::Char('d') => {
                self.click(ControlId::Details { media_type, row })
            }
            KeyCode::Char('r') => self.click(ControlId::Request { media_type, row }),
            _ => None,
        }
    }
}
