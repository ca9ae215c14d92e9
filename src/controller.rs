//! Search controller
//!
//! Owns the view model, the per-type page state, and the handler registry,
//! and turns user actions into backend calls.
//!
//! Network-bound operations come in three parts: `begin_*` validates and
//! sets the loading affordance, the HTTP call runs wherever the caller
//! likes (see [`Effect::execute`]), and `finish_*` applies the result.
//! The `async` wrappers ([`SearchController::search_media`],
//! [`SearchController::request_media`]) chain all three.
//!
//! Overlapping searches for the same type are applied in the order their
//! responses arrive. A response that belongs to an older search than the
//! latest one issued is still applied, but logged as out of order.

use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::api::{BackendClient, BackendError};
use crate::models::{
    MediaId, MediaItem, MediaType, MediaYear, RequestPayload, RequestReply, SearchResponse,
};
use crate::view::{
    set_loading_state, Action, Button, ControlId, Document, HandlerRegistry, RequestTarget,
    NO_RESULTS,
};

// =============================================================================
// Search State
// =============================================================================

/// Current page per media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pages: HashMap<MediaType, u32>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            pages: MediaType::ALL.iter().map(|&t| (t, 1)).collect(),
        }
    }
}

impl SearchState {
    pub fn page(&self, media_type: MediaType) -> u32 {
        self.pages.get(&media_type).copied().unwrap_or(1)
    }

    pub fn set_page(&mut self, media_type: MediaType, page: u32) {
        self.pages.insert(media_type, page);
    }
}

// =============================================================================
// Effects
// =============================================================================

/// A search waiting for its HTTP call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub media_type: MediaType,
    pub query: String,
    pub page: u32,
    /// Per-type issue order
    pub seq: u64,
}

/// A request waiting for its HTTP call
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTicket {
    pub payload: RequestPayload,
}

/// Network work produced by a controller action
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Search(SearchTicket),
    Request(RequestTicket),
}

/// A finished effect, ready to be applied
#[derive(Debug)]
pub enum Completion {
    Search(SearchTicket, Result<SearchResponse, BackendError>),
    Request(RequestTicket, Result<RequestReply, BackendError>),
}

impl Effect {
    /// Run the HTTP call for this effect
    pub async fn execute(self, client: &BackendClient) -> Completion {
        match self {
            Effect::Search(ticket) => {
                let result = client
                    .search(&ticket.query, ticket.media_type, ticket.page)
                    .await;
                Completion::Search(ticket, result)
            }
            Effect::Request(ticket) => {
                let result = client.request(&ticket.payload).await;
                Completion::Request(ticket, result)
            }
        }
    }
}

// =============================================================================
// Controller
// =============================================================================

/// The search/request UI controller
#[derive(Debug)]
pub struct SearchController {
    client: BackendClient,
    /// What the screen shows
    pub doc: Document,
    state: SearchState,
    registry: HandlerRegistry,
    issued: HashMap<MediaType, u64>,
}

impl SearchController {
    pub fn new(client: BackendClient) -> Self {
        let mut registry = HandlerRegistry::new();
        for t in MediaType::ALL {
            registry.bind(ControlId::Search(t), Action::Search(t));
            registry.bind(ControlId::PrevPage(t), Action::ChangePage(t, -1));
            registry.bind(ControlId::NextPage(t), Action::ChangePage(t, 1));
        }
        registry.bind(ControlId::BackToHome, Action::GoBackToHome);
        registry.bind(ControlId::CloseModal, Action::CloseModal);

        Self {
            client,
            doc: Document::new(),
            state: SearchState::default(),
            registry,
            issued: HashMap::new(),
        }
    }

    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Replace the query text of a panel's input
    pub fn set_query(&mut self, media_type: MediaType, query: impl Into<String>) {
        self.doc.panel_mut(media_type).input.set(query);
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Validate the query and start a search; `None` means nothing to send
    pub fn begin_search(&mut self, media_type: MediaType, page: u32) -> Option<SearchTicket> {
        let query = self.doc.panel(media_type).input.value.clone();
        if query.trim().is_empty() {
            self.doc.alert("Please enter a name");
            return None;
        }

        set_loading_state(Some(&mut self.doc.panel_mut(media_type).search_button), true);

        let seq = self.issued.entry(media_type).or_insert(0);
        *seq += 1;
        debug!(media_type = media_type.as_str(), page, seq = *seq, "search issued");

        Some(SearchTicket {
            media_type,
            query,
            page,
            seq: *seq,
        })
    }

    /// Apply a search response (or failure) to the screen
    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        result: Result<SearchResponse, BackendError>,
    ) {
        let media_type = ticket.media_type;
        let latest = self.issued.get(&media_type).copied().unwrap_or(0);
        if ticket.seq < latest {
            warn!(
                media_type = media_type.as_str(),
                seq = ticket.seq,
                latest,
                "applying search response out of order; a newer search is pending or done"
            );
        }

        match result {
            Ok(response) => self.render_results(&ticket, response),
            Err(e) => {
                warn!(error = %e, "search failed");
                self.doc.alert("Failed to search. Ensure the backend is running.");
            }
        }

        set_loading_state(Some(&mut self.doc.panel_mut(media_type).search_button), false);
    }

    fn render_results(&mut self, ticket: &SearchTicket, response: SearchResponse) {
        let media_type = ticket.media_type;
        let page = ticket.page;

        if response.is_empty() {
            self.doc.panel_mut(media_type).results.show_placeholder(NO_RESULTS);
            return;
        }

        let has_next_page = response.has_next_page;
        let items: Vec<MediaItem> = response
            .items
            .into_iter()
            .map(|mut item| {
                item.media_type = media_type;
                item
            })
            .collect();
        info!(
            media_type = media_type.as_str(),
            page,
            count = items.len(),
            "rendering results"
        );

        let panel = self.doc.panel_mut(media_type);
        panel.results.set_items(items);
        panel.prev_page.disabled = page <= 1;
        panel.next_page.disabled = !has_next_page;

        self.doc.back_to_home_visible = true;
        self.state.set_page(media_type, page);
        self.attach_event_listeners();
    }

    /// Search and wait for the result
    pub async fn search_media(&mut self, media_type: MediaType, page: u32) {
        if let Some(ticket) = self.begin_search(media_type, page) {
            let result = self
                .client
                .search(&ticket.query, ticket.media_type, ticket.page)
                .await;
            self.finish_search(ticket, result);
        }
    }

    /// Start a search for the page `direction` away from the current one
    pub fn change_page(&mut self, media_type: MediaType, direction: i32) -> Option<SearchTicket> {
        let page = self.state.page(media_type).saturating_add_signed(direction);
        self.begin_search(media_type, page)
    }

    // -------------------------------------------------------------------------
    // Request
    // -------------------------------------------------------------------------

    /// Find the row Request button for `id`, TV list first
    fn request_button_mut(&mut self, id: &MediaId) -> Option<&mut Button> {
        let doc = &mut self.doc;
        if doc.tv.results.find(id).is_some() {
            return doc.tv.results.find_mut(id).map(|row| &mut row.request);
        }
        doc.movie.results.find_mut(id).map(|row| &mut row.request)
    }

    /// Validate and start a request; `None` means nothing to send
    pub fn begin_request(
        &mut self,
        id: Option<MediaId>,
        title: &str,
        year: Option<MediaYear>,
        media_type: MediaType,
        seasons: Option<Vec<String>>,
    ) -> Option<RequestTicket> {
        let Some(id) = id.filter(MediaId::is_valid) else {
            self.doc.alert("Invalid selection.");
            return None;
        };

        set_loading_state(self.request_button_mut(&id), true);

        let payload = RequestPayload::new(id, title, year, media_type, seasons);
        debug!(id = %payload.id, seasons = ?payload.seasons, "request issued");
        Some(RequestTicket { payload })
    }

    /// Surface the request outcome and clear the loading affordance
    pub fn finish_request(
        &mut self,
        ticket: RequestTicket,
        result: Result<RequestReply, BackendError>,
    ) {
        match result {
            Ok(reply) => self.doc.alert(reply.alert_text()),
            Err(e) => {
                warn!(error = %e, "request failed");
                self.doc.alert("Failed to send request.");
            }
        }

        set_loading_state(self.request_button_mut(&ticket.payload.id), false);
    }

    /// Request and wait for the reply
    pub async fn request_media(
        &mut self,
        id: Option<MediaId>,
        title: &str,
        year: Option<MediaYear>,
        media_type: MediaType,
        seasons: Option<Vec<String>>,
    ) {
        if let Some(ticket) = self.begin_request(id, title, year, media_type, seasons) {
            let result = self.client.request(&ticket.payload).await;
            self.finish_request(ticket, result);
        }
    }

    fn begin_target_request(
        &mut self,
        target: RequestTarget,
        seasons: Option<Vec<String>>,
    ) -> Option<RequestTicket> {
        self.begin_request(
            target.id,
            &target.title,
            target.year,
            target.media_type,
            seasons,
        )
    }

    // -------------------------------------------------------------------------
    // Details Modal
    // -------------------------------------------------------------------------

    /// Fill and open the details modal for `item`
    pub fn show_details(&mut self, item: &MediaItem) {
        let modal = &mut self.doc.modal;
        modal.populate(item);

        match modal.box_set() {
            Some(titles) => {
                let titles = titles.to_vec();
                self.registry
                    .bind(ControlId::BoxSetLink, Action::ShowBoxSet(titles));
            }
            None => {
                self.registry.unbind(&ControlId::BoxSetLink);
            }
        }

        if modal.request_button.is_none() {
            modal.request_button = Some(Button::new("Request"));
        }
        self.registry.bind(
            ControlId::ModalRequest,
            Action::ModalRequest(Box::new(item.clone())),
        );

        self.doc.modal.visible = true;
    }

    /// Request the item shown in the modal, with the checked seasons for TV
    fn begin_modal_request(&mut self, item: &MediaItem) -> Option<RequestTicket> {
        let target = RequestTarget::from(item);
        match item.media_type {
            MediaType::Tv => {
                let seasons = self.doc.modal.checked_seasons();
                if seasons.is_empty() {
                    self.doc.alert("Please select at least one season.");
                    return None;
                }
                self.begin_target_request(target, Some(seasons))
            }
            MediaType::Movie => self.begin_target_request(target, None),
        }
    }

    pub fn close_modal(&mut self) {
        self.doc.modal.visible = false;
    }

    // -------------------------------------------------------------------------
    // Navigation & Bindings
    // -------------------------------------------------------------------------

    /// Clear both result lists and hide back-to-home; pages are kept
    pub fn go_back_to_home(&mut self) {
        self.doc.tv.results.clear();
        self.doc.movie.results.clear();
        self.doc.back_to_home_visible = false;
        self.registry.unbind_where(ControlId::is_row_control);
    }

    /// Rebind the Details and Request controls of every current row
    pub fn attach_event_listeners(&mut self) {
        self.registry.unbind_where(ControlId::is_row_control);

        for media_type in MediaType::ALL {
            let panel = self.doc.panel(media_type);
            let bindings: Vec<_> = panel
                .results
                .rows()
                .map(|(row, r)| (row, RequestTarget::from(&r.item)))
                .collect();

            for (row, target) in bindings {
                self.registry.bind(
                    ControlId::Details { media_type, row },
                    Action::ShowDetails { media_type, row },
                );
                self.registry
                    .bind(ControlId::Request { media_type, row }, Action::Request(target));
            }
        }
    }

    /// Dispatch a click; returns network work to run, if any.
    ///
    /// Disabled, hidden and unbound controls ignore clicks.
    pub fn click(&mut self, control: ControlId) -> Option<Effect> {
        if self.doc.button(control).is_some_and(|b| b.disabled) {
            debug!(?control, "click on disabled control ignored");
            return None;
        }
        if control == ControlId::BackToHome && !self.doc.back_to_home_visible {
            debug!("back to home is hidden, click ignored");
            return None;
        }
        let action = self.registry.action_for(&control)?.clone();
        self.perform(action)
    }

    /// Carry out a bound action
    pub fn perform(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::Search(media_type) => self.begin_search(media_type, 1).map(Effect::Search),
            Action::ChangePage(media_type, direction) => {
                self.change_page(media_type, direction).map(Effect::Search)
            }
            Action::GoBackToHome => {
                self.go_back_to_home();
                None
            }
            Action::ShowDetails { media_type, row } => {
                let item = self.doc.panel(media_type).results.row(row)?.item.clone();
                self.show_details(&item);
                None
            }
            Action::Request(target) => self.begin_target_request(target, None).map(Effect::Request),
            Action::ModalRequest(item) => self.begin_modal_request(&item).map(Effect::Request),
            Action::ShowBoxSet(titles) => {
                self.doc.alert(format!("Box Set: {}", titles.join(", ")));
                None
            }
            Action::CloseModal => {
                self.close_modal();
                None
            }
        }
    }

    /// Apply a finished effect
    pub fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::Search(ticket, result) => self.finish_search(ticket, result),
            Completion::Request(ticket, result) => self.finish_request(ticket, result),
        }
    }

    /// Click and, if that produced network work, run it to completion
    pub async fn click_and_wait(&mut self, control: ControlId) {
        if let Some(effect) = self.click(control) {
            let completion = effect.execute(&self.client).await;
            self.complete(completion);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> SearchController {
        SearchController::new(BackendClient::new("http://127.0.0.1:9"))
    }

    fn response(items: Vec<MediaItem>, has_next_page: bool) -> SearchResponse {
        SearchResponse {
            items,
            has_next_page,
            error: None,
        }
    }

    fn dune() -> MediaItem {
        MediaItem {
            id: Some("1".into()),
            title: "Dune".into(),
            year: Some(2021.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_query_alerts_without_ticket() {
        let mut c = controller();
        c.set_query(MediaType::Movie, "   ");
        assert!(c.begin_search(MediaType::Movie, 1).is_none());
        assert_eq!(c.doc.take_alerts(), vec!["Please enter a name"]);
        assert!(!c.doc.movie.search_button.loading);
    }

    #[test]
    fn test_search_loading_cleared_on_finish() {
        let mut c = controller();
        c.set_query(MediaType::Movie, "dune");
        let ticket = c.begin_search(MediaType::Movie, 1).unwrap();
        assert_eq!(c.doc.movie.search_button.label, "Loading...");

        c.finish_search(ticket, Ok(response(vec![dune()], true)));
        assert_eq!(c.doc.movie.search_button.label, "Search");
        assert!(c.doc.movie.search_button.is_enabled());
        assert_eq!(c.doc.movie.results.lines(), vec!["Dune (2021)"]);
        assert!(c.doc.movie.prev_page.disabled);
        assert!(!c.doc.movie.next_page.disabled);
        assert!(c.doc.back_to_home_visible);
    }

    #[test]
    fn test_items_annotated_with_searched_type() {
        let mut c = controller();
        c.set_query(MediaType::Tv, "lost");
        let ticket = c.begin_search(MediaType::Tv, 1).unwrap();
        c.finish_search(ticket, Ok(response(vec![dune()], false)));
        assert_eq!(c.doc.tv.results.row(0).unwrap().item.media_type, MediaType::Tv);
    }

    #[test]
    fn test_empty_response_keeps_page_state() {
        let mut c = controller();
        c.set_query(MediaType::Movie, "dune");
        let ticket = c.begin_search(MediaType::Movie, 3).unwrap();
        c.finish_search(ticket, Ok(response(vec![], false)));

        assert_eq!(c.doc.movie.results.lines(), vec![NO_RESULTS]);
        assert_eq!(c.state().page(MediaType::Movie), 1);
        assert!(!c.doc.back_to_home_visible);
    }

    #[test]
    fn test_out_of_order_response_still_applied() {
        let mut c = controller();
        c.set_query(MediaType::Movie, "dune");
        let first = c.begin_search(MediaType::Movie, 1).unwrap();
        let second = c.begin_search(MediaType::Movie, 2).unwrap();
        assert_eq!((first.seq, second.seq), (1, 2));

        c.finish_search(second, Ok(response(vec![dune()], false)));
        c.finish_search(first, Ok(response(vec![dune()], true)));

        // Last response wins
        assert_eq!(c.state().page(MediaType::Movie), 1);
        assert!(!c.doc.movie.next_page.disabled);
    }

    #[test]
    fn test_falsy_id_never_tickets() {
        let mut c = controller();
        assert!(c.begin_request(None, "X", None, MediaType::Movie, None).is_none());
        assert!(c
            .begin_request(Some(MediaId::Number(0)), "X", None, MediaType::Movie, None)
            .is_none());
        assert!(c
            .begin_request(Some("".into()), "X", None, MediaType::Movie, None)
            .is_none());
        assert_eq!(c.doc.alert_count(), 3);
    }

    #[test]
    fn test_request_loading_on_matching_row() {
        let mut c = controller();
        c.set_query(MediaType::Movie, "dune");
        let ticket = c.begin_search(MediaType::Movie, 1).unwrap();
        c.finish_search(ticket, Ok(response(vec![dune()], false)));

        let ticket = c
            .begin_request(Some("1".into()), "Dune", None, MediaType::Movie, None)
            .unwrap();
        assert!(c.doc.movie.results.row(0).unwrap().request.loading);

        c.finish_request(
            ticket,
            Ok(RequestReply {
                message: Some("ok".into()),
                error: None,
            }),
        );
        assert!(!c.doc.movie.results.row(0).unwrap().request.loading);
        assert_eq!(c.doc.take_alerts(), vec!["ok"]);
    }

    #[test]
    fn test_modal_rebinding_does_not_stack() {
        let mut c = controller();
        let mut lost = dune();
        lost.media_type = MediaType::Tv;
        lost.season_count = Some(2);

        c.show_details(&dune());
        c.show_details(&lost);

        assert_eq!(c.registry().count_where(|id| *id == ControlId::ModalRequest), 1);
        assert_eq!(
            c.registry().action_for(&ControlId::ModalRequest),
            Some(&Action::ModalRequest(Box::new(lost)))
        );
        assert!(c.doc.modal.visible);
    }

    #[test]
    fn test_disabled_pagination_ignored() {
        let mut c = controller();
        c.set_query(MediaType::Tv, "lost");
        assert!(c.click(ControlId::PrevPage(MediaType::Tv)).is_none());
        assert!(c.doc.take_alerts().is_empty());
    }

    #[test]
    fn test_hidden_back_to_home_ignored() {
        let mut c = controller();
        c.set_query(MediaType::Movie, "dune");
        let ticket = c.begin_search(MediaType::Movie, 1).unwrap();
        c.finish_search(ticket, Ok(response(vec![], false)));

        assert!(c.click(ControlId::BackToHome).is_none());
        assert_eq!(c.doc.movie.results.lines(), vec![NO_RESULTS]);
    }

    #[test]
    fn test_go_back_to_home_keeps_pages() {
        let mut c = controller();
        c.set_query(MediaType::Movie, "dune");
        let ticket = c.begin_search(MediaType::Movie, 2).unwrap();
        c.finish_search(ticket, Ok(response(vec![dune()], false)));
        assert!(c.registry().is_bound(&ControlId::Details {
            media_type: MediaType::Movie,
            row: 0
        }));

        c.go_back_to_home();
        assert!(c.doc.movie.results.is_empty());
        assert!(!c.doc.back_to_home_visible);
        assert_eq!(c.state().page(MediaType::Movie), 2);
        assert_eq!(c.registry().count_where(ControlId::is_row_control), 0);
    }

    #[test]
    fn test_change_page_from_current() {
        let mut c = controller();
        c.set_query(MediaType::Movie, "dune");
        let ticket = c.begin_search(MediaType::Movie, 2).unwrap();
        c.finish_search(ticket, Ok(response(vec![dune()], true)));

        let next = c.change_page(MediaType::Movie, 1).unwrap();
        assert_eq!(next.page, 3);
        assert_eq!(next.query, "dune");
    }
}
