use std::sync::Arc;

use anyhow::{Context as _, anyhow};
use async_trait::async_trait;
use chatlist::config::PrefsStore;
use chatlist::models::{Chat, ChatId};
use chatlist::search::{ConnectionReporter, LinkConnector};
use chatlist::ui::{ChatListScreen, UiEvent};
use chatlist_link::LinkMatch;
use tokio::sync::mpsc;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

const USAGE: &str =
    "usage: chatlist <snapshot.json> [search text] [--unread] [--selected <chat id>]";

struct Args {
    snapshot: String,
    search: String,
    unread: bool,
    selected: Option<ChatId>,
}

impl Args {
    fn parse() -> Result<Self, anyhow::Error> {
        let mut args = std::env::args().skip(1);
        let mut snapshot = None;
        let mut search = Vec::new();
        let mut unread = false;
        let mut selected = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--unread" => unread = true,
                "--selected" => {
                    let id = args
                        .next()
                        .ok_or_else(|| anyhow!("--selected needs a chat id"))?;
                    selected = Some(ChatId::from(id));
                }
                _ if snapshot.is_none() => snapshot = Some(arg),
                _ => search.push(arg),
            }
        }
        Ok(Self {
            snapshot: snapshot.ok_or_else(|| anyhow!(USAGE))?,
            search: search.join(" "),
            unread,
            selected,
        })
    }
}

/// Reports pasted links without connecting anywhere.
struct PrintingConnector;

#[async_trait]
impl LinkConnector for PrintingConnector {
    async fn initiate_connection(
        &self,
        link: LinkMatch,
        _reporter: ConnectionReporter,
    ) -> Result<(), anyhow::Error> {
        tracing::info!(
            link_type = ?link.link.link_type,
            hosts = ?link.link.smp_hosts(),
            "Would connect via link"
        );
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatlist=info,chatlist_link=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    let args = Args::parse()?;

    let store = PrefsStore::open_default()?;
    let mut prefs = store.load().await?;
    prefs.show_unread_and_favorites |= args.unread;

    let raw = tokio::fs::read_to_string(&args.snapshot)
        .await
        .with_context(|| format!("Failed to read snapshot '{}'", args.snapshot))?;
    let chats: Vec<Chat> =
        serde_json::from_str(&raw).map_err(|e| anyhow!("Failed to parse snapshot: {}", e))?;
    tracing::info!(count = chats.len(), "Snapshot loaded");

    let (tx, _rx) = mpsc::channel(16);
    let mut screen = ChatListScreen::mount(prefs, None, Arc::new(PrintingConnector), tx);
    screen.apply_event(UiEvent::ChatsLoaded(chats));
    screen.apply_event(UiEvent::ChatSelected(args.selected));
    screen.on_search_text_changed(args.search);

    if screen.search().showing_link() {
        println!("search: {}", screen.search().text());
    }
    for chat in screen.visible_chats() {
        println!("{}\t{}", chat.id(), chat.chat_info.view_name());
    }
    screen.unmount();
    Ok(())
}
