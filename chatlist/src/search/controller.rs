use std::sync::Arc;

use chatlist_link::LinkMatch;
use tokio::sync::mpsc;

use crate::models::ChatId;
use crate::ui::UiEvent;

use super::{ConnectionReporter, LinkConnector, LinkDetector, SimplexLinkDetector};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Typing,
    /// A link replaced the input and its connection flow is running.
    LinkPending,
    /// The link belongs to a known chat and the list is narrowed to it.
    LinkResolved,
}

/// Side effects the view has to carry out after a search transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchEffect {
    HideKeyboard,
    RequestFocus,
    ScrollToTop,
}

/// Owns the search box state and reacts to every distinct input value.
///
/// Must be driven from within a tokio runtime: a pasted link spawns its
/// connection flow as a background task. Results of that task arrive as
/// [`UiEvent::LinkKnownChat`] and [`UiEvent::LinkConnectionClosed`] and are
/// only honoured while their generation is current.
pub struct SearchBarController {
    text: String,
    // Cursor position in chars.
    selection: usize,
    last_processed: Option<String>,
    showing_link: bool,
    filtered_by_link: Option<ChatId>,
    state: SearchState,
    generation: u64,
    detector: Arc<dyn LinkDetector>,
    connector: Arc<dyn LinkConnector>,
    event_tx: mpsc::Sender<UiEvent>,
}

impl SearchBarController {
    pub fn new(connector: Arc<dyn LinkConnector>, event_tx: mpsc::Sender<UiEvent>) -> Self {
        Self::with_detector(Arc::new(SimplexLinkDetector), connector, event_tx)
    }

    pub fn with_detector(
        detector: Arc<dyn LinkDetector>,
        connector: Arc<dyn LinkConnector>,
        event_tx: mpsc::Sender<UiEvent>,
    ) -> Self {
        Self {
            text: String::new(),
            selection: 0,
            last_processed: None,
            showing_link: false,
            filtered_by_link: None,
            state: SearchState::Idle,
            generation: 0,
            detector,
            connector,
            event_tx,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn showing_link(&self) -> bool {
        self.showing_link
    }

    pub fn filtered_by_link(&self) -> Option<&ChatId> {
        self.filtered_by_link.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The input is read-only while it displays a link.
    pub fn is_input_enabled(&self) -> bool {
        !self.showing_link
    }

    pub fn on_text_changed(
        &mut self,
        text: impl Into<String>,
        list_has_items: bool,
    ) -> Vec<SearchEffect> {
        self.text = text.into();
        self.selection = self.text.chars().count();
        if self.last_processed.as_deref() == Some(self.text.as_str()) {
            tracing::trace!("Search text unchanged");
            return Vec::new();
        }
        self.last_processed = Some(self.text.clone());
        let normalized = self.text.trim().to_string();
        self.process(&normalized, list_has_items)
    }

    /// Connection flow matched the link to a chat the user already has.
    /// Returns false when the report is stale.
    pub fn on_known_chat(&mut self, generation: u64, chat_id: ChatId) -> bool {
        if generation != self.generation || !self.showing_link {
            tracing::debug!(
                generation,
                current = self.generation,
                %chat_id,
                "Ignoring stale link match"
            );
            return false;
        }
        tracing::debug!(%chat_id, "Narrowing chat list to linked chat");
        self.filtered_by_link = Some(chat_id);
        self.state = SearchState::LinkResolved;
        true
    }

    /// Connection flow ended without a known chat and clears the input.
    pub fn on_connection_cleanup(
        &mut self,
        generation: u64,
        list_has_items: bool,
    ) -> Vec<SearchEffect> {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "Ignoring stale connection cleanup"
            );
            return Vec::new();
        }
        self.on_text_changed("", list_has_items)
    }

    /// Clears the input and any link state.
    pub fn cancel(&mut self, list_has_items: bool) -> Vec<SearchEffect> {
        self.text.clear();
        self.selection = 0;
        self.last_processed = Some(String::new());
        self.process("", list_has_items)
    }

    /// Back navigation closes a non-empty search. Returns `None` when there
    /// was nothing to close.
    pub fn on_back(&mut self, list_has_items: bool) -> Option<Vec<SearchEffect>> {
        if self.text.is_empty() {
            None
        } else {
            Some(self.cancel(list_has_items))
        }
    }

    fn process(&mut self, normalized: &str, list_has_items: bool) -> Vec<SearchEffect> {
        if let Some(link) = self.detector.detect(normalized) {
            return self.show_link(link);
        }
        if self.showing_link && !normalized.is_empty() {
            // The input holds the link's display text.
            return Vec::new();
        }
        self.clear_link();
        // Whitespace still counts as an open search.
        if self.text.is_empty() {
            self.state = SearchState::Idle;
            if list_has_items {
                vec![SearchEffect::ScrollToTop]
            } else {
                Vec::new()
            }
        } else {
            self.state = SearchState::Typing;
            vec![SearchEffect::RequestFocus]
        }
    }

    fn show_link(&mut self, link: LinkMatch) -> Vec<SearchEffect> {
        self.generation += 1;
        let generation = self.generation;
        tracing::info!(generation, link_type = ?link.link.link_type, "Link pasted into search");
        self.text = link.display_text();
        self.selection = 0;
        self.last_processed = Some(self.text.clone());
        self.showing_link = true;
        self.filtered_by_link = None;
        self.state = SearchState::LinkPending;

        let reporter = ConnectionReporter::new(generation, self.event_tx.clone());
        let connector = self.connector.clone();
        tokio::spawn(async move {
            if let Err(err) = connector
                .initiate_connection(link, reporter.clone())
                .await
            {
                tracing::warn!(?err, generation, "Failed to initiate connection");
                reporter.cleanup().await;
            }
        });
        vec![SearchEffect::HideKeyboard]
    }

    fn clear_link(&mut self) {
        if self.showing_link || self.filtered_by_link.is_some() {
            // Reports from the abandoned connection flow become stale.
            self.generation += 1;
        }
        self.showing_link = false;
        self.filtered_by_link = None;
    }
}
