//! Chat list filtering: which conversations are visible for the current
//! search text, filter toggle and link narrowing.

use crate::models::{Chat, ChatId, ChatInfo, GroupMemberStatus};

/// Inputs of one filtering pass over the chat list.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChatListFilter<'a> {
    pub search_text: &'a str,
    pub show_unread_and_favorites: bool,
    /// A link occupies the search box, so its text is not a query.
    pub showing_link: bool,
    /// Chat the pasted link resolved to. Overrides everything else.
    pub link_chat_id: Option<&'a ChatId>,
    pub selected_chat_id: Option<&'a ChatId>,
}

impl<'a> ChatListFilter<'a> {
    pub fn apply<'c>(&self, chats: &'c [Chat]) -> Vec<&'c Chat> {
        if let Some(link_chat_id) = self.link_chat_id {
            return chats.iter().filter(|c| &c.id() == link_chat_id).collect();
        }
        let search = if self.showing_link {
            String::new()
        } else {
            normalize_search(self.search_text)
        };
        if search.is_empty() && !self.show_unread_and_favorites {
            return chats
                .iter()
                .filter(|c| !c.chat_info.chat_deleted())
                .collect();
        }
        chats
            .iter()
            .filter(|c| {
                let is_selected = self.selected_chat_id.is_some_and(|id| &c.id() == id);
                chat_matches(c, &search, is_selected)
            })
            .collect()
    }
}

/// Filters `chats` keeping their order.
///
/// With `link_chat_id` set only that chat can be returned. Otherwise an empty
/// search with the toggle off returns every chat that is not deleted, and
/// anything else runs [`chat_matches`] per chat.
pub fn filter_chats<'c>(
    chats: &'c [Chat],
    search_text: &str,
    show_unread_and_favorites: bool,
    link_chat_id: Option<&ChatId>,
    selected_chat_id: Option<&ChatId>,
) -> Vec<&'c Chat> {
    ChatListFilter {
        search_text,
        show_unread_and_favorites,
        showing_link: false,
        link_chat_id,
        selected_chat_id,
    }
    .apply(chats)
}

pub fn normalize_search(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Whether one chat passes the filter. `search` must already be normalized.
pub fn chat_matches(chat: &Chat, search: &str, is_selected: bool) -> bool {
    match &chat.chat_info {
        ChatInfo::Direct { contact } => {
            if contact.chat_deleted {
                false
            } else if search.is_empty() {
                is_selected || is_flagged_interesting(chat)
            } else {
                view_name_contains(&chat.chat_info, search)
                    || contact.profile.display_name.to_lowercase().contains(search)
                    || contact.full_name().to_lowercase().contains(search)
            }
        }
        ChatInfo::Group { group_info } => {
            if search.is_empty() {
                is_selected
                    || is_flagged_interesting(chat)
                    || group_info.membership.member_status == GroupMemberStatus::Invited
            } else {
                view_name_contains(&chat.chat_info, search)
            }
        }
        ChatInfo::Local { .. } | ChatInfo::ContactRequest { .. } => {
            search.is_empty() || view_name_contains(&chat.chat_info, search)
        }
        ChatInfo::ContactConnection { contact_connection } => {
            if search.is_empty() {
                is_selected
            } else {
                contact_connection
                    .local_alias
                    .to_lowercase()
                    .contains(search)
            }
        }
        ChatInfo::InvalidJson { .. } => is_selected,
    }
}

/// Favorite, marked unread, or unread with notifications on.
pub fn is_flagged_interesting(chat: &Chat) -> bool {
    chat.chat_info.favorite()
        || chat.chat_stats.unread_chat
        || (chat.chat_info.ntfs_enabled() && chat.chat_stats.unread_count > 0)
}

pub fn view_name_contains(chat_info: &ChatInfo, search: &str) -> bool {
    chat_info
        .view_name()
        .to_lowercase()
        .contains(&search.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChatSettings, Contact, MsgFilter, Profile};

    fn direct(id: i64, name: &str) -> Chat {
        Chat::new(ChatInfo::Direct {
            contact: Contact {
                contact_id: id,
                local_display_name: name.to_string(),
                profile: Profile {
                    display_name: name.to_string(),
                    ..Default::default()
                },
                local_alias: String::new(),
                chat_settings: ChatSettings::default(),
                chat_deleted: false,
            },
        })
    }

    #[test]
    fn test_normalize_search() {
        assert_eq!(normalize_search("  AlIce \t"), "alice");
        assert_eq!(normalize_search("   "), "");
    }

    #[test]
    fn test_flagged_interesting_requires_enabled_notifications() {
        let chat = direct(1, "Alice").with_stats(3, false);
        assert!(is_flagged_interesting(&chat));

        let mut muted = chat.clone();
        if let ChatInfo::Direct { contact } = &mut muted.chat_info {
            contact.chat_settings.enable_ntfs = MsgFilter::None;
        }
        assert!(!is_flagged_interesting(&muted));

        let marked = muted.with_stats(0, true);
        assert!(is_flagged_interesting(&marked));
    }

    #[test]
    fn test_showing_link_ignores_search_text() {
        let chats = vec![direct(1, "Alice"), direct(2, "Bob")];
        let filter = ChatListFilter {
            search_text: "SimpleX contact address (via smp.example.com)",
            showing_link: true,
            ..Default::default()
        };
        assert_eq!(filter.apply(&chats).len(), 2);
    }
}
