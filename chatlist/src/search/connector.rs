use async_trait::async_trait;
use chatlist_link::{LinkMatch, detect_single_link};
use tokio::sync::mpsc;

use crate::models::{ChatId, Contact, GroupInfo};
use crate::ui::UiEvent;

/// Finds a single connection link in search input.
pub trait LinkDetector: Send + Sync {
    fn detect(&self, text: &str) -> Option<LinkMatch>;
}

pub struct SimplexLinkDetector;

impl LinkDetector for SimplexLinkDetector {
    fn detect(&self, text: &str) -> Option<LinkMatch> {
        detect_single_link(text)
    }
}

/// Starts connecting via a pasted link. Runs in the background; results
/// come back through the reporter.
#[async_trait]
pub trait LinkConnector: Send + Sync {
    async fn initiate_connection(
        &self,
        link: LinkMatch,
        reporter: ConnectionReporter,
    ) -> Result<(), anyhow::Error>;
}

/// Posts the outcome of one connection attempt back to the screen.
#[derive(Clone)]
pub struct ConnectionReporter {
    generation: u64,
    tx: mpsc::Sender<UiEvent>,
}

impl ConnectionReporter {
    pub fn new(generation: u64, tx: mpsc::Sender<UiEvent>) -> Self {
        Self { generation, tx }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The link belongs to a contact the user already has.
    pub async fn known_contact(&self, contact: &Contact) {
        self.known_chat(ChatId::direct(contact.contact_id)).await;
    }

    /// The link belongs to a group the user is already in.
    pub async fn known_group(&self, group_info: &GroupInfo) {
        self.known_chat(ChatId::group(group_info.group_id)).await;
    }

    /// The flow finished without a known chat; the search box is cleared.
    pub async fn cleanup(&self) {
        let event = UiEvent::LinkConnectionClosed {
            generation: self.generation,
        };
        if let Err(err) = self.tx.send(event).await {
            tracing::error!(?err, "Cannot send UI event: LinkConnectionClosed");
        }
    }

    async fn known_chat(&self, chat_id: ChatId) {
        let event = UiEvent::LinkKnownChat {
            generation: self.generation,
            chat_id,
        };
        if let Err(err) = self.tx.send(event).await {
            tracing::error!(?err, "Cannot send UI event: LinkKnownChat");
        }
    }
}
