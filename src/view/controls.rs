//! Interactive controls: buttons, text inputs, and the handler registry
//!
//! Every clickable thing on screen has a [`ControlId`]. What a click does
//! is looked up in the [`HandlerRegistry`]; binding a control again replaces
//! its previous action, so handlers never stack.

use std::collections::HashMap;

use crate::models::{MediaId, MediaItem, MediaType, MediaYear};

/// Label shown on a control while its network call is in flight
pub const LOADING_LABEL: &str = "Loading...";

// =============================================================================
// Button
// =============================================================================

/// A labelled button that can be disabled or put into a loading state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// Current visible label
    pub label: String,
    /// Whether clicks are ignored
    pub disabled: bool,
    /// Whether the loading affordance is active
    pub loading: bool,
    /// Label to restore once loading ends
    original_label: Option<String>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
            loading: false,
            original_label: None,
        }
    }

    /// Create a button that starts out disabled
    pub fn disabled(label: impl Into<String>) -> Self {
        Self {
            disabled: true,
            ..Self::new(label)
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }
}

/// Toggle the loading affordance on a control.
///
/// Entering loading twice keeps the first remembered label; leaving when
/// not loading does nothing. A missing control is ignored.
pub fn set_loading_state(control: Option<&mut Button>, is_loading: bool) {
    let Some(button) = control else {
        return;
    };

    if is_loading {
        if button.loading {
            return;
        }
        button.original_label = Some(std::mem::replace(
            &mut button.label,
            LOADING_LABEL.to_string(),
        ));
        button.loading = true;
        button.disabled = true;
    } else {
        if !button.loading {
            return;
        }
        if let Some(label) = button.original_label.take() {
            button.label = label;
        }
        button.loading = false;
        button.disabled = false;
    }
}

// =============================================================================
// Text Input
// =============================================================================

/// Single-line text input with a cursor (char-indexed)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Replace the whole value, cursor at the end
    pub fn set(&mut self, value: impl Into<String>) {
        *self = Self::new(value);
    }

    /// Text before and after the cursor, for drawing the caret
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.value.split_at(self.byte_index(self.cursor))
    }
}

// =============================================================================
// Control Identifiers & Actions
// =============================================================================

/// Identifies every clickable control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    /// Search button of a panel
    Search(MediaType),
    /// "Previous page" button of a panel
    PrevPage(MediaType),
    /// "Next page" button of a panel
    NextPage(MediaType),
    /// Back-to-home button
    BackToHome,
    /// Details button of a result row
    Details { media_type: MediaType, row: usize },
    /// Request button of a result row
    Request { media_type: MediaType, row: usize },
    /// Request button inside the details modal
    ModalRequest,
    /// Box-set link inside the details modal
    BoxSetLink,
    /// Close button of the details modal
    CloseModal,
}

impl ControlId {
    /// Whether this control belongs to a result row
    pub fn is_row_control(&self) -> bool {
        matches!(self, ControlId::Details { .. } | ControlId::Request { .. })
    }
}

/// The fields a row request carries (id, title, year, type)
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTarget {
    pub id: Option<MediaId>,
    pub title: String,
    pub year: Option<MediaYear>,
    pub media_type: MediaType,
}

impl From<&MediaItem> for RequestTarget {
    fn from(item: &MediaItem) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            year: item.year.clone(),
            media_type: item.media_type,
        }
    }
}

/// What happens when a bound control is clicked
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Search(MediaType),
    ChangePage(MediaType, i32),
    GoBackToHome,
    /// Open details for the item shown in `row`
    ShowDetails { media_type: MediaType, row: usize },
    /// Request straight from a result row, without seasons
    Request(RequestTarget),
    /// Request the item currently shown in the modal
    ModalRequest(Box<MediaItem>),
    /// Box-set link: alert the titles
    ShowBoxSet(Vec<String>),
    CloseModal,
}

// =============================================================================
// Handler Registry
// =============================================================================

/// One action per control; binding again replaces
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    bindings: HashMap<ControlId, Action>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `action` to `control`, returning the action it replaced
    pub fn bind(&mut self, control: ControlId, action: Action) -> Option<Action> {
        self.bindings.insert(control, action)
    }

    pub fn unbind(&mut self, control: &ControlId) -> Option<Action> {
        self.bindings.remove(control)
    }

    /// Drop every binding whose control matches `pred`
    pub fn unbind_where(&mut self, pred: impl Fn(&ControlId) -> bool) {
        self.bindings.retain(|control, _| !pred(control));
    }

    pub fn action_for(&self, control: &ControlId) -> Option<&Action> {
        self.bindings.get(control)
    }

    pub fn is_bound(&self, control: &ControlId) -> bool {
        self.bindings.contains_key(control)
    }

    /// Number of bindings matching `pred`
    pub fn count_where(&self, pred: impl Fn(&ControlId) -> bool) -> usize {
        self.bindings.keys().filter(|c| pred(c)).count()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_state_round_trip() {
        let mut button = Button::new("Search");

        set_loading_state(Some(&mut button), true);
        assert_eq!(button.label, LOADING_LABEL);
        assert!(button.loading);
        assert!(button.disabled);

        set_loading_state(Some(&mut button), false);
        assert_eq!(button.label, "Search");
        assert!(!button.loading);
        assert!(!button.disabled);
    }

    #[test]
    fn test_loading_state_is_idempotent() {
        let mut button = Button::new("Request");

        set_loading_state(Some(&mut button), true);
        set_loading_state(Some(&mut button), true);
        set_loading_state(Some(&mut button), false);
        assert_eq!(button.label, "Request");

        // Leaving again changes nothing
        set_loading_state(Some(&mut button), false);
        assert_eq!(button.label, "Request");
        assert!(button.is_enabled());
    }

    #[test]
    fn test_loading_state_missing_control() {
        set_loading_state(None, true);
        set_loading_state(None, false);
    }

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::default();
        for c in "dune".chars() {
            input.insert(c);
        }
        assert_eq!(input.value, "dune");
        assert_eq!(input.cursor, 4);

        input.cursor_left();
        input.cursor_left();
        input.insert('X');
        assert_eq!(input.value, "duXne");

        input.backspace();
        assert_eq!(input.value, "dune");

        input.cursor_home();
        input.delete();
        assert_eq!(input.value, "une");

        input.cursor_end();
        assert_eq!(input.cursor, 3);
    }

    #[test]
    fn test_text_input_multibyte() {
        let mut input = TextInput::new("Amélie");
        input.backspace();
        input.cursor_left();
        input.backspace();
        assert_eq!(input.value, "Améi");
        assert_eq!(input.split_at_cursor(), ("Amé", "i"));
    }

    #[test]
    fn test_registry_rebind_replaces() {
        let mut registry = HandlerRegistry::new();
        assert!(registry.bind(ControlId::CloseModal, Action::CloseModal).is_none());

        let previous = registry.bind(ControlId::CloseModal, Action::GoBackToHome);
        assert_eq!(previous, Some(Action::CloseModal));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.action_for(&ControlId::CloseModal),
            Some(&Action::GoBackToHome)
        );
    }

    #[test]
    fn test_registry_unbind_rows() {
        let mut registry = HandlerRegistry::new();
        registry.bind(ControlId::BackToHome, Action::GoBackToHome);
        registry.bind(
            ControlId::Details { media_type: MediaType::Tv, row: 0 },
            Action::ShowDetails { media_type: MediaType::Tv, row: 0 },
        );

        registry.unbind_where(ControlId::is_row_control);
        assert_eq!(registry.len(), 1);
        assert!(registry.is_bound(&ControlId::BackToHome));
    }
}
