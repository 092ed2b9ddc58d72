use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chatlist::config::{AppPrefs, PrefsStore};
use chatlist::models::{
    Chat, ChatId, ChatInfo, ChatSettings, Contact, DateTime, PresentedServersSummary, Profile,
    RemoteHostInfo, ServerSessions, SmpServerSubs, SmpTotals, User, UserInfo,
};
use chatlist::scroll::{ScrollDirection, ScrollPosition};
use chatlist::search::{ConnectionReporter, LinkConnector, SearchEffect, SearchState};
use chatlist::servers::SubscriptionStatus;
use chatlist::ui::{
    ChatListScreen, ChatSyncListener, EmptyState, SheetState, UiEvent, UiEventListener,
};
use chatlist::users::SettingsButtonAction;
use chatlist_link::LinkMatch;
use tokio::sync::mpsc;
use tokio::time::timeout;

const ENCODED_QUEUE: &str = "smp%3A%2F%2F0YuTwO05YJWS8rkjn9eLJDjQhFKvIYd8d4xG8X1blIU%3D%40smp8.simplex.im%2Fq1w2e3%23%2F%3Fv%3D1-3%26dh%3DMCowBQ";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("chatlist=trace")
        .try_init();
}

/// Reports every pasted link as belonging to contact 2.
struct KnownContactConnector;

#[async_trait]
impl LinkConnector for KnownContactConnector {
    async fn initiate_connection(
        &self,
        _link: LinkMatch,
        reporter: ConnectionReporter,
    ) -> Result<(), anyhow::Error> {
        reporter.known_contact(&contact(2, "Bob")).await;
        Ok(())
    }
}

fn contact(id: i64, name: &str) -> Contact {
    Contact {
        contact_id: id,
        local_display_name: name.to_string(),
        profile: Profile {
            display_name: name.to_string(),
            ..Default::default()
        },
        local_alias: String::new(),
        chat_settings: ChatSettings::default(),
        chat_deleted: false,
    }
}

fn direct(id: i64, name: &str) -> Chat {
    Chat::new(ChatInfo::Direct {
        contact: contact(id, name),
    })
}

fn mount(prefs: AppPrefs) -> (ChatListScreen, mpsc::Receiver<UiEvent>) {
    let (tx, rx) = mpsc::channel(16);
    let screen = ChatListScreen::mount(prefs, None, Arc::new(KnownContactConnector), tx);
    (screen, rx)
}

fn running_screen(chats: Vec<Chat>) -> (ChatListScreen, mpsc::Receiver<UiEvent>) {
    let (mut screen, rx) = mount(AppPrefs::default());
    screen.apply_event(UiEvent::ChatRunning(Some(true)));
    screen.apply_event(UiEvent::ChatsLoaded(chats));
    (screen, rx)
}

fn visible_ids(screen: &ChatListScreen) -> Vec<ChatId> {
    screen.visible_chats().iter().map(|c| c.id()).collect()
}

/// Test the new chat button needs a running core and an empty search
#[tokio::test]
async fn test_fab_visibility() {
    init_tracing();
    let (mut screen, _rx) = mount(AppPrefs::default());
    assert!(!screen.show_fab());

    screen.apply_event(UiEvent::ChatRunning(Some(true)));
    assert!(screen.show_fab());

    screen.on_search_text_changed("bo");
    assert!(!screen.show_fab());
    screen.on_search_text_changed("");

    screen.set_desktop_no_user_no_remote(true);
    assert!(!screen.show_fab());
}

/// Test the new chat sheet open, animated hide and overlay clearing
#[tokio::test]
async fn test_new_chat_sheet() {
    init_tracing();
    let (mut screen, _rx) = running_screen(Vec::new());
    assert_eq!(screen.sheet_state(), SheetState::Gone);

    screen.on_fab_click();
    assert_eq!(screen.sheet_state(), SheetState::Visible);
    screen.on_fab_click();
    assert_eq!(screen.sheet_state(), SheetState::Hiding);
    screen.on_fab_click();
    assert_eq!(screen.sheet_state(), SheetState::Hiding);
    screen.on_sheet_hidden();
    assert_eq!(screen.sheet_state(), SheetState::Gone);

    screen.on_fab_click();
    screen.apply_event(UiEvent::ClearOverlays);
    assert_eq!(screen.sheet_state(), SheetState::Gone);

    screen.apply_event(UiEvent::ChatStopped(true));
    assert!(screen.show_stopped_indicator());
    screen.on_fab_click();
    assert_eq!(screen.sheet_state(), SheetState::Gone);
}

/// Test the placeholder text for loading, empty and filtered-out lists
#[tokio::test]
async fn test_empty_state() {
    init_tracing();
    let (mut screen, _rx) = mount(AppPrefs::default());
    assert_eq!(screen.empty_state(), Some(EmptyState::LoadingChats));
    assert!(!screen.show_onboarding_button());

    screen.apply_event(UiEvent::ChatRunning(Some(true)));
    assert_eq!(screen.empty_state(), Some(EmptyState::NoChats));
    assert!(screen.show_onboarding_button());

    screen.on_fab_click();
    assert!(!screen.show_onboarding_button());
    screen.hide_new_chat_sheet(false);

    screen.apply_event(UiEvent::SwitchingUsers(true));
    assert_eq!(screen.empty_state(), None);
    screen.apply_event(UiEvent::SwitchingUsers(false));

    screen.apply_event(UiEvent::ChatsLoaded(vec![direct(1, "Alice")]));
    assert_eq!(screen.empty_state(), None);
    screen.on_search_text_changed("zed");
    assert_eq!(screen.empty_state(), Some(EmptyState::NoFilteredChats));
}

/// Test chat updates replace in place, add new chats on top and drop removed ones
#[tokio::test]
async fn test_chat_updates() {
    init_tracing();
    let (mut screen, _rx) = running_screen(vec![direct(1, "Alice"), direct(2, "Bob")]);
    screen.apply_event(UiEvent::ChatSelected(Some(ChatId::direct(2))));

    let mut renamed = contact(1, "Alice");
    renamed.local_alias = "Al".to_string();
    screen.apply_event(UiEvent::ChatUpdated(Chat::new(ChatInfo::Direct {
        contact: renamed,
    })));
    screen.apply_event(UiEvent::ChatUpdated(direct(3, "Carol")));
    assert_eq!(
        visible_ids(&screen),
        vec![ChatId::direct(3), ChatId::direct(1), ChatId::direct(2)]
    );
    assert_eq!(screen.chats()[1].chat_info.view_name(), "Al");

    assert!(screen.next_chat_selected(1));
    assert!(!screen.next_chat_selected(0));
    assert!(!screen.next_chat_selected(2));

    screen.apply_event(UiEvent::ChatRemoved(ChatId::direct(2)));
    assert_eq!(screen.selected_chat(), None);
    assert_eq!(screen.chats().len(), 2);
}

/// Test a pasted link of a known contact narrows the list to it
#[tokio::test]
async fn test_link_narrows_list() {
    init_tracing();
    let (mut screen, mut rx) = running_screen(vec![direct(1, "Alice"), direct(2, "Bob")]);
    let link = format!("simplex:/contact#/?v=2-7&smp={ENCODED_QUEUE}");
    let effects = screen.on_search_text_changed(link);
    assert_eq!(effects, vec![SearchEffect::HideKeyboard]);
    // Link text is not a query.
    assert_eq!(visible_ids(&screen), vec![ChatId::direct(1), ChatId::direct(2)]);
    assert!(!screen.show_toggle_filter_button());

    let event = timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for link result")
        .expect("event channel closed");
    screen.apply_event(event);
    assert_eq!(screen.search().state(), SearchState::LinkResolved);
    assert_eq!(visible_ids(&screen), vec![ChatId::direct(2)]);

    let effects = screen.on_back().expect("search should close");
    assert_eq!(effects, vec![SearchEffect::ScrollToTop]);
    assert_eq!(visible_ids(&screen), vec![ChatId::direct(1), ChatId::direct(2)]);
    assert!(screen.show_toggle_filter_button());
}

/// Test switching remote host resets the search
#[tokio::test]
async fn test_remote_host_change_cancels_search() {
    init_tracing();
    let (mut screen, _rx) = running_screen(vec![direct(1, "Alice")]);
    screen.on_search_text_changed("ali");
    assert_eq!(screen.search().state(), SearchState::Typing);

    let effects = screen.apply_event(UiEvent::RemoteHostChanged(Some(4)));
    assert_eq!(effects, vec![SearchEffect::ScrollToTop]);
    assert_eq!(screen.search().state(), SearchState::Idle);
    assert_eq!(screen.search().text(), "");
}

/// Test switching remote host with an empty search keeps the list position
#[tokio::test]
async fn test_remote_host_change_keeps_scroll() {
    init_tracing();
    let (tx, _rx) = mpsc::channel(16);
    let saved = ScrollPosition { index: 7, offset: 3 };
    let mut screen = ChatListScreen::mount(
        AppPrefs::default(),
        Some(saved),
        Arc::new(KnownContactConnector),
        tx,
    );
    screen.apply_event(UiEvent::ChatsLoaded(vec![direct(1, "Alice")]));

    let effects = screen.apply_event(UiEvent::RemoteHostChanged(Some(2)));
    assert!(effects.is_empty());
    assert_eq!(screen.search().state(), SearchState::Idle);
    assert_eq!(screen.unmount(), saved);
}

/// Test whitespace in the search box hides the new chat button and filter toggle
#[tokio::test]
async fn test_whitespace_search_is_active() {
    init_tracing();
    let (mut screen, _rx) = running_screen(vec![direct(1, "Alice")]);
    screen.on_scroll(ScrollPosition { index: 2, offset: 5 });

    let effects = screen.on_search_text_changed("  ");
    assert_eq!(effects, vec![SearchEffect::RequestFocus]);
    assert_eq!(screen.search().state(), SearchState::Typing);
    assert!(!screen.show_fab());
    assert!(!screen.show_toggle_filter_button());
    assert_eq!(visible_ids(&screen), vec![ChatId::direct(1)]);
    assert_eq!(screen.unmount(), ScrollPosition { index: 2, offset: 5 });
}

/// Test sync callbacks reach the screen through the event channel
#[tokio::test]
async fn test_sync_listener_drives_screen() {
    init_tracing();
    let (tx, mut rx) = mpsc::channel(16);
    let listener = UiEventListener::new(tx.clone());
    let mut screen =
        ChatListScreen::mount(AppPrefs::default(), None, Arc::new(KnownContactConnector), tx);

    listener.on_chat_running(Some(true)).await;
    listener
        .on_chats_loaded(vec![direct(1, "Alice"), direct(2, "Bob")])
        .await;
    listener.on_chat_removed(ChatId::direct(1)).await;
    listener.on_chat_updated(direct(3, "Carol")).await;
    while let Ok(event) = rx.try_recv() {
        screen.apply_event(event);
    }
    assert_eq!(visible_ids(&screen), vec![ChatId::direct(3), ChatId::direct(2)]);
    assert_eq!(screen.empty_state(), None);
    assert!(screen.show_fab());

    listener.on_chats_loaded(Vec::new()).await;
    listener.on_chat_running(None).await;
    while let Ok(event) = rx.try_recv() {
        screen.apply_event(event);
    }
    assert_eq!(screen.empty_state(), Some(EmptyState::LoadingChats));
    assert!(!screen.show_fab());
}

/// Test the filter toggle persists and applies to the list
#[tokio::test]
async fn test_toggle_filter() {
    init_tracing();
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let store = PrefsStore::new(dir.path());
    let mut bob = contact(2, "Bob");
    bob.chat_settings.favorite = true;
    let (mut screen, _rx) = running_screen(vec![
        direct(1, "Alice"),
        Chat::new(ChatInfo::Direct { contact: bob }),
    ]);
    assert_eq!(visible_ids(&screen).len(), 2);

    screen.toggle_filter(&store).await.expect("toggle failed");
    assert!(screen.prefs().show_unread_and_favorites);
    assert_eq!(visible_ids(&screen), vec![ChatId::direct(2)]);
    assert!(store.load().await.expect("load failed").show_unread_and_favorites);
}

/// Test the list position survives a remount and drives the search bar
#[tokio::test]
async fn test_scroll_state_lifecycle() {
    init_tracing();
    let (tx, _rx) = mpsc::channel(16);
    let prefs = AppPrefs {
        show_unread_and_favorites: false,
        one_hand_ui: true,
    };
    let mut screen =
        ChatListScreen::mount(prefs.clone(), None, Arc::new(KnownContactConnector), tx.clone());
    screen.apply_event(UiEvent::ChatsLoaded(vec![direct(1, "Alice")]));
    assert_eq!(screen.search_bar_offset(), 0);

    screen.on_scroll(ScrollPosition { index: 0, offset: 40 });
    assert_eq!(screen.search_bar_offset(), -40);
    screen.on_scroll(ScrollPosition { index: 4, offset: 0 });
    assert_eq!(screen.search_bar_offset(), -1000);
    assert_eq!(
        screen.on_scroll(ScrollPosition { index: 3, offset: 0 }),
        ScrollDirection::Up
    );
    assert_eq!(screen.search_bar_offset(), 0);

    let saved = screen.unmount();
    assert_eq!(saved, ScrollPosition { index: 3, offset: 0 });

    let mut screen =
        ChatListScreen::mount(prefs, Some(saved), Arc::new(KnownContactConnector), tx);
    screen.apply_event(UiEvent::ChatsLoaded(vec![direct(1, "Alice")]));
    assert_eq!(screen.search_bar_offset(), -1000);
    screen.on_search_text_changed("al");
    screen.on_search_text_changed("");
    assert_eq!(screen.unmount(), ScrollPosition::default());
}

/// Test the top bar reflects users, remote hosts and server subscriptions
#[tokio::test]
async fn test_top_bar() {
    init_tracing();
    let (mut screen, _rx) = running_screen(vec![direct(1, "Alice")]);
    assert_eq!(screen.settings_button_action(), SettingsButtonAction::ToggleDrawer);

    let user = |id: i64, active: bool, unread_count: u32| UserInfo {
        user: User {
            user_id: id,
            local_display_name: format!("user{id}"),
            profile: Profile::default(),
            active_user: active,
            hidden: false,
        },
        unread_count,
    };
    screen.apply_event(UiEvent::UsersUpdated(vec![user(1, true, 0)]));
    assert_eq!(screen.settings_button_action(), SettingsButtonAction::OpenDrawer);
    screen.apply_event(UiEvent::RemoteHostsUpdated(vec![RemoteHostInfo {
        remote_host_id: 1,
        host_device_name: "laptop".to_string(),
    }]));
    assert_eq!(screen.settings_button_action(), SettingsButtonAction::ShowUserPicker);

    screen.apply_event(UiEvent::UsersUpdated(vec![user(1, true, 0), user(2, false, 3)]));
    assert!(!screen.all_users_read());

    assert_eq!(
        screen.subscription_status(),
        SubscriptionStatus::NoConnection { active_share: 0.0 }
    );
    screen.apply_event(UiEvent::ServersSummary(PresentedServersSummary::new(
        DateTime::now(),
        SmpTotals {
            sessions: ServerSessions {
                ss_connected: 1,
                ..Default::default()
            },
            subs: SmpServerSubs {
                ss_active: 1,
                ss_pending: 1,
            },
        },
    )));
    assert!(screen.servers_summary().is_some());
    assert_eq!(
        screen.subscription_status(),
        SubscriptionStatus::Connected { active_share: 0.5 }
    );
}
