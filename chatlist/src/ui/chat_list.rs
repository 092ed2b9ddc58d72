use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::{AppPrefs, PrefsStore};
use crate::filter::ChatListFilter;
use crate::models::{Chat, ChatId, PresentedServersSummary, RemoteHostInfo, UserInfo};
use crate::scroll::{ChatListState, ScrollDirection, ScrollPosition, search_bar_offset};
use crate::search::{LinkConnector, SearchBarController, SearchEffect};
use crate::servers::{
    ServersSummaryPoller, ServersSummaryProvider, SubscriptionStatus, subscription_status,
};
use crate::users::{self, SettingsButtonAction};

use super::UiEvent;

/// New chat sheet opened by the floating action button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SheetState {
    #[default]
    Gone,
    Visible,
    /// Hide animation is running.
    Hiding,
}

/// Placeholder text shown instead of the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyState {
    LoadingChats,
    NoChats,
    NoFilteredChats,
}

/// Headless chat list screen.
///
/// Every background update enters through [`apply_event`](Self::apply_event);
/// user input goes through the `on_*` handlers. Both return the
/// [`SearchEffect`]s the view has to perform.
pub struct ChatListScreen {
    chats: Vec<Chat>,
    selected_chat: Option<ChatId>,
    prefs: AppPrefs,
    search: SearchBarController,
    list_state: ChatListState,
    new_chat_sheet: SheetState,
    servers: ServersSummaryPoller,
    servers_summary: Option<PresentedServersSummary>,
    // None until the chat core reports its state.
    chat_running: Option<bool>,
    stopped: bool,
    desktop_no_user_no_remote: bool,
    switching_users: bool,
    users: Vec<UserInfo>,
    remote_hosts: Vec<RemoteHostInfo>,
    current_remote_host: Option<i64>,
    event_tx: mpsc::Sender<UiEvent>,
}

impl ChatListScreen {
    /// Mount the screen, restoring the list position of the previous mount.
    pub fn mount(
        prefs: AppPrefs,
        saved_position: Option<ScrollPosition>,
        connector: Arc<dyn LinkConnector>,
        event_tx: mpsc::Sender<UiEvent>,
    ) -> Self {
        tracing::debug!(?saved_position, "Mounting chat list");
        Self {
            chats: Vec::new(),
            selected_chat: None,
            prefs,
            search: SearchBarController::new(connector, event_tx.clone()),
            list_state: ChatListState::mount(saved_position),
            new_chat_sheet: SheetState::Gone,
            servers: ServersSummaryPoller::new(),
            servers_summary: None,
            chat_running: None,
            stopped: false,
            desktop_no_user_no_remote: false,
            switching_users: false,
            users: Vec::new(),
            remote_hosts: Vec::new(),
            current_remote_host: None,
            event_tx,
        }
    }

    /// Tear down the screen. Stops the servers summary timer and hands back
    /// the list position for the next mount.
    pub fn unmount(mut self) -> ScrollPosition {
        self.servers.stop();
        let position = self.list_state.unmount();
        tracing::debug!(?position, "Unmounting chat list");
        position
    }

    pub fn start_servers_summary(&mut self, provider: Arc<dyn ServersSummaryProvider>) {
        self.servers
            .start(provider, self.current_remote_host, self.event_tx.clone());
    }

    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn selected_chat(&self) -> Option<&ChatId> {
        self.selected_chat.as_ref()
    }

    pub fn prefs(&self) -> &AppPrefs {
        &self.prefs
    }

    pub fn search(&self) -> &SearchBarController {
        &self.search
    }

    pub fn sheet_state(&self) -> SheetState {
        self.new_chat_sheet
    }

    pub fn servers_summary(&self) -> Option<&PresentedServersSummary> {
        self.servers_summary.as_ref()
    }

    pub fn set_desktop_no_user_no_remote(&mut self, value: bool) {
        self.desktop_no_user_no_remote = value;
    }

    pub fn apply_event(&mut self, event: UiEvent) -> Vec<SearchEffect> {
        match event {
            UiEvent::ChatsLoaded(chats) => {
                tracing::debug!(count = chats.len(), "Chats loaded");
                self.chats = chats;
            }
            UiEvent::ChatUpdated(chat) => {
                let id = chat.id();
                match self.chats.iter_mut().find(|c| c.id() == id) {
                    Some(existing) => *existing = chat,
                    None => self.chats.insert(0, chat),
                }
            }
            UiEvent::ChatRemoved(chat_id) => {
                self.chats.retain(|c| c.id() != chat_id);
                if self.selected_chat.as_ref() == Some(&chat_id) {
                    self.selected_chat = None;
                }
            }
            UiEvent::ChatSelected(chat_id) => self.selected_chat = chat_id,
            UiEvent::ChatRunning(running) => self.chat_running = running,
            UiEvent::ChatStopped(stopped) => self.stopped = stopped,
            UiEvent::UsersUpdated(users) => self.users = users,
            UiEvent::SwitchingUsers(switching) => self.switching_users = switching,
            UiEvent::RemoteHostsUpdated(hosts) => self.remote_hosts = hosts,
            UiEvent::RemoteHostChanged(remote_host_id) => {
                tracing::debug!(?remote_host_id, "Remote host changed");
                self.current_remote_host = remote_host_id;
                self.servers.set_remote_host(remote_host_id);
                return self.on_back().unwrap_or_default();
            }
            UiEvent::ServersSummary(summary) => self.servers_summary = Some(summary),
            UiEvent::ClearOverlays => self.hide_new_chat_sheet(false),
            UiEvent::LinkKnownChat {
                generation,
                chat_id,
            } => {
                self.search.on_known_chat(generation, chat_id);
            }
            UiEvent::LinkConnectionClosed { generation } => {
                let list_has_items = self.list_has_items();
                let effects = self.search.on_connection_cleanup(generation, list_has_items);
                return self.apply_effects(effects);
            }
        }
        Vec::new()
    }

    /// Chats passing the current search, filter toggle and link narrowing.
    pub fn visible_chats(&self) -> Vec<&Chat> {
        ChatListFilter {
            search_text: self.search.text(),
            show_unread_and_favorites: self.prefs.show_unread_and_favorites,
            showing_link: self.search.showing_link(),
            link_chat_id: self.search.filtered_by_link(),
            selected_chat_id: self.selected_chat.as_ref(),
        }
        .apply(&self.chats)
    }

    pub fn on_search_text_changed(&mut self, text: impl Into<String>) -> Vec<SearchEffect> {
        let list_has_items = self.list_has_items();
        let effects = self.search.on_text_changed(text, list_has_items);
        self.apply_effects(effects)
    }

    /// Back navigation. `None` when the search had nothing to close.
    pub fn on_back(&mut self) -> Option<Vec<SearchEffect>> {
        let list_has_items = self.list_has_items();
        let effects = self.search.on_back(list_has_items)?;
        Some(self.apply_effects(effects))
    }

    /// Flip the unread-and-favorites filter and persist it.
    pub async fn toggle_filter(&mut self, store: &PrefsStore) -> Result<(), anyhow::Error> {
        self.prefs = store.toggle_show_unread_and_favorites().await?;
        Ok(())
    }

    pub fn show_toggle_filter_button(&self) -> bool {
        self.search.text().is_empty() && !self.chats.is_empty()
    }

    pub fn show_fab(&self) -> bool {
        self.search.text().is_empty()
            && !self.desktop_no_user_no_remote
            && self.chat_running == Some(true)
    }

    /// The floating action button toggles the new chat sheet.
    pub fn on_fab_click(&mut self) {
        if self.stopped {
            tracing::debug!("Chat is stopped, ignoring new chat request");
            return;
        }
        match self.new_chat_sheet {
            SheetState::Gone => self.new_chat_sheet = SheetState::Visible,
            SheetState::Visible => self.hide_new_chat_sheet(true),
            SheetState::Hiding => {}
        }
    }

    pub fn hide_new_chat_sheet(&mut self, animated: bool) {
        if self.new_chat_sheet == SheetState::Gone {
            return;
        }
        self.new_chat_sheet = if animated {
            SheetState::Hiding
        } else {
            SheetState::Gone
        };
    }

    /// Hide animation finished.
    pub fn on_sheet_hidden(&mut self) {
        if self.new_chat_sheet == SheetState::Hiding {
            self.new_chat_sheet = SheetState::Gone;
        }
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.chats.is_empty() {
            if self.switching_users {
                None
            } else if self.chat_running.is_none() {
                Some(EmptyState::LoadingChats)
            } else {
                Some(EmptyState::NoChats)
            }
        } else if self.visible_chats().is_empty() {
            Some(EmptyState::NoFilteredChats)
        } else {
            None
        }
    }

    /// Onboarding button under the "no chats" placeholder.
    pub fn show_onboarding_button(&self) -> bool {
        self.empty_state() == Some(EmptyState::NoChats)
            && !self.stopped
            && self.new_chat_sheet != SheetState::Visible
            && self.chat_running == Some(true)
            && self.search.text().is_empty()
    }

    pub fn show_stopped_indicator(&self) -> bool {
        self.stopped
    }

    pub fn settings_button_action(&self) -> SettingsButtonAction {
        users::settings_button_action(
            &self.users,
            self.remote_hosts.len(),
            self.desktop_no_user_no_remote,
        )
    }

    pub fn all_users_read(&self) -> bool {
        users::all_read(&self.users)
    }

    pub fn subscription_status(&self) -> SubscriptionStatus {
        let totals = self
            .servers_summary
            .as_ref()
            .map(|s| *s.totals())
            .unwrap_or_default();
        subscription_status(
            self.chat_running == Some(true),
            &totals.subs,
            &totals.sessions,
        )
    }

    /// Whether the visible item after `index` is the selected chat.
    pub fn next_chat_selected(&self, index: usize) -> bool {
        next_chat_selected(&self.visible_chats(), index, self.selected_chat.as_ref())
    }

    pub fn on_scroll(&mut self, position: ScrollPosition) -> ScrollDirection {
        self.list_state.on_scroll(position)
    }

    pub fn search_bar_offset(&self) -> i32 {
        search_bar_offset(
            self.search.text().is_empty(),
            self.prefs.one_hand_ui,
            self.list_state.direction(),
            self.list_state.position(),
        )
    }

    // Scrolling is ours, keyboard and focus belong to the view.
    fn apply_effects(&mut self, effects: Vec<SearchEffect>) -> Vec<SearchEffect> {
        if effects.contains(&SearchEffect::ScrollToTop) {
            self.list_state.scroll_to_top();
        }
        effects
    }

    fn list_has_items(&self) -> bool {
        !self.visible_chats().is_empty()
    }
}

/// Whether `chats[index + 1]` is the selected chat.
pub fn next_chat_selected(chats: &[&Chat], index: usize, selected: Option<&ChatId>) -> bool {
    match (selected, chats.get(index + 1)) {
        (Some(selected), Some(next)) => &next.id() == selected,
        _ => false,
    }
}
