use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::models::{Chat, ChatId, PresentedServersSummary, RemoteHostInfo, UserInfo};

/// Updates delivered to the chat list screen from background work.
#[derive(Clone, Debug)]
pub enum UiEvent {
    ChatsLoaded(Vec<Chat>),
    ChatUpdated(Chat),
    ChatRemoved(ChatId),
    ChatSelected(Option<ChatId>),
    // None while the chat core is still starting.
    ChatRunning(Option<bool>),
    ChatStopped(bool),
    UsersUpdated(Vec<UserInfo>),
    SwitchingUsers(bool),
    RemoteHostsUpdated(Vec<RemoteHostInfo>),
    RemoteHostChanged(Option<i64>),
    ServersSummary(PresentedServersSummary),
    ClearOverlays,
    // Connection flow of a pasted link, tagged with the search generation
    // that started it.
    LinkKnownChat {
        generation: u64,
        chat_id: ChatId,
    },
    LinkConnectionClosed {
        generation: u64,
    },
}

/// Callbacks of the external conversation-sync subsystem.
#[async_trait]
pub trait ChatSyncListener: Send + Sync {
    async fn on_chats_loaded(&self, chats: Vec<Chat>);

    async fn on_chat_updated(&self, chat: Chat);

    async fn on_chat_removed(&self, chat_id: ChatId);

    async fn on_chat_running(&self, running: Option<bool>);

    async fn on_users_updated(&self, users: Vec<UserInfo>);
}

pub struct UiEventListener {
    tx: mpsc::Sender<UiEvent>,
}

impl UiEventListener {
    pub fn new(tx: mpsc::Sender<UiEvent>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl ChatSyncListener for UiEventListener {
    async fn on_chats_loaded(&self, chats: Vec<Chat>) {
        if let Err(err) = self.tx.send(UiEvent::ChatsLoaded(chats)).await {
            tracing::error!(?err, "Cannot send UI event: ChatsLoaded");
        }
    }

    async fn on_chat_updated(&self, chat: Chat) {
        if let Err(err) = self.tx.send(UiEvent::ChatUpdated(chat)).await {
            tracing::error!(?err, "Cannot send UI event: ChatUpdated");
        }
    }

    async fn on_chat_removed(&self, chat_id: ChatId) {
        if let Err(err) = self.tx.send(UiEvent::ChatRemoved(chat_id)).await {
            tracing::error!(?err, "Cannot send UI event: ChatRemoved");
        }
    }

    async fn on_chat_running(&self, running: Option<bool>) {
        if let Err(err) = self.tx.send(UiEvent::ChatRunning(running)).await {
            tracing::error!(?err, "Cannot send UI event: ChatRunning");
        }
    }

    async fn on_users_updated(&self, users: Vec<UserInfo>) {
        if let Err(err) = self.tx.send(UiEvent::UsersUpdated(users)).await {
            tracing::error!(?err, "Cannot send UI event: UsersUpdated");
        }
    }
}
