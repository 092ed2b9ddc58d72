use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Conversation identifier. The prefix encodes the conversation kind:
/// `@` direct, `#` group, `*` local notes, `<@` contact request,
/// `:` pending connection, `?` unreadable record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(String);

impl ChatId {
    pub fn direct(contact_id: i64) -> Self {
        Self(format!("@{contact_id}"))
    }

    pub fn group(group_id: i64) -> Self {
        Self(format!("#{group_id}"))
    }

    pub fn local(note_folder_id: i64) -> Self {
        Self(format!("*{note_folder_id}"))
    }

    pub fn contact_request(contact_request_id: i64) -> Self {
        Self(format!("<@{contact_request_id}"))
    }

    pub fn contact_connection(pcc_conn_id: i64) -> Self {
        Self(format!(":{pcc_conn_id}"))
    }

    pub fn invalid(api_id: i64) -> Self {
        Self(format!("?{api_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChatId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ChatId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MsgFilter {
    #[default]
    All,
    None,
    Mentions,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatSettings {
    pub enable_ntfs: MsgFilter,
    pub favorite: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatStats {
    pub unread_count: u32,
    // Marked unread by the user, independent of unread_count.
    pub unread_chat: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub display_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub contact_id: i64,
    pub local_display_name: String,
    pub profile: Profile,
    #[serde(default)]
    pub local_alias: String,
    #[serde(default)]
    pub chat_settings: ChatSettings,
    #[serde(default)]
    pub chat_deleted: bool,
}

impl Contact {
    pub fn display_name(&self) -> &str {
        if self.local_alias.is_empty() {
            &self.profile.display_name
        } else {
            &self.local_alias
        }
    }

    pub fn full_name(&self) -> &str {
        &self.profile.full_name
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupMemberStatus {
    Rejected,
    Removed,
    Left,
    #[serde(rename = "deleted")]
    GroupDeleted,
    Unknown,
    Invited,
    Introduced,
    IntroInv,
    Accepted,
    Announced,
    Connected,
    Complete,
    Creator,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub group_member_id: i64,
    pub member_status: GroupMemberStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupProfile {
    pub display_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInfo {
    pub group_id: i64,
    pub local_display_name: String,
    pub group_profile: GroupProfile,
    // The current user's own membership in this group.
    pub membership: GroupMember,
    #[serde(default)]
    pub local_alias: String,
    #[serde(default)]
    pub chat_settings: ChatSettings,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteFolder {
    pub note_folder_id: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContactRequest {
    pub contact_request_id: i64,
    pub local_display_name: String,
    pub profile: Profile,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingContactConnection {
    pub pcc_conn_id: i64,
    #[serde(default)]
    pub local_alias: String,
    #[serde(default)]
    pub via_contact_uri: bool,
    #[serde(default)]
    pub initiated: Option<bool>,
}

impl PendingContactConnection {
    pub fn display_name(&self) -> &str {
        if !self.local_alias.is_empty() {
            &self.local_alias
        } else if self.via_contact_uri {
            "requested to connect"
        } else if self.initiated == Some(false) {
            "accepted invitation"
        } else {
            "invited to connect"
        }
    }
}

pub const NOTE_FOLDER_NAME: &str = "Private notes";
pub const INVALID_CHAT_NAME: &str = "Invalid chat";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChatInfo {
    Direct {
        contact: Contact,
    },
    #[serde(rename_all = "camelCase")]
    Group {
        group_info: GroupInfo,
    },
    #[serde(rename_all = "camelCase")]
    Local {
        note_folder: NoteFolder,
    },
    #[serde(rename_all = "camelCase")]
    ContactRequest {
        contact_request: UserContactRequest,
    },
    #[serde(rename_all = "camelCase")]
    ContactConnection {
        contact_connection: PendingContactConnection,
    },
    // A record the chat core could not decode; kept so the user can still open it.
    #[serde(rename = "invalidJSON", rename_all = "camelCase")]
    InvalidJson {
        api_id: i64,
        json: String,
    },
}

impl ChatInfo {
    pub fn id(&self) -> ChatId {
        match self {
            Self::Direct { contact } => ChatId::direct(contact.contact_id),
            Self::Group { group_info } => ChatId::group(group_info.group_id),
            Self::Local { note_folder } => ChatId::local(note_folder.note_folder_id),
            Self::ContactRequest { contact_request } => {
                ChatId::contact_request(contact_request.contact_request_id)
            }
            Self::ContactConnection { contact_connection } => {
                ChatId::contact_connection(contact_connection.pcc_conn_id)
            }
            Self::InvalidJson { api_id, .. } => ChatId::invalid(*api_id),
        }
    }

    /// Name shown in the list and matched by search.
    pub fn view_name(&self) -> Cow<'_, str> {
        match self {
            Self::Direct { contact } => {
                if contact.local_alias.is_empty() {
                    with_full_name(&contact.profile.display_name, &contact.profile.full_name)
                } else {
                    Cow::Borrowed(&contact.local_alias)
                }
            }
            Self::Group { group_info } => {
                if group_info.local_alias.is_empty() {
                    let profile = &group_info.group_profile;
                    with_full_name(&profile.display_name, &profile.full_name)
                } else {
                    Cow::Borrowed(&group_info.local_alias)
                }
            }
            Self::Local { .. } => Cow::Borrowed(NOTE_FOLDER_NAME),
            Self::ContactRequest { contact_request } => with_full_name(
                &contact_request.profile.display_name,
                &contact_request.profile.full_name,
            ),
            Self::ContactConnection { contact_connection } => {
                Cow::Borrowed(contact_connection.display_name())
            }
            Self::InvalidJson { .. } => Cow::Borrowed(INVALID_CHAT_NAME),
        }
    }

    pub fn chat_settings(&self) -> Option<&ChatSettings> {
        match self {
            Self::Direct { contact } => Some(&contact.chat_settings),
            Self::Group { group_info } => Some(&group_info.chat_settings),
            _ => None,
        }
    }

    pub fn favorite(&self) -> bool {
        self.chat_settings().map(|s| s.favorite).unwrap_or(false)
    }

    pub fn ntfs_enabled(&self) -> bool {
        self.chat_settings()
            .map(|s| s.enable_ntfs == MsgFilter::All)
            .unwrap_or(false)
    }

    pub fn chat_deleted(&self) -> bool {
        match self {
            Self::Direct { contact } => contact.chat_deleted,
            _ => false,
        }
    }
}

fn with_full_name<'a>(display_name: &'a str, full_name: &str) -> Cow<'a, str> {
    if full_name.is_empty() || full_name == display_name {
        Cow::Borrowed(display_name)
    } else {
        Cow::Owned(format!("{display_name} / {full_name}"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub chat_info: ChatInfo,
    #[serde(default)]
    pub chat_stats: ChatStats,
}

impl Chat {
    pub fn new(chat_info: ChatInfo) -> Self {
        Self {
            chat_info,
            chat_stats: ChatStats::default(),
        }
    }

    pub fn id(&self) -> ChatId {
        self.chat_info.id()
    }

    pub fn with_stats(mut self, unread_count: u32, unread_chat: bool) -> Self {
        self.chat_stats = ChatStats {
            unread_count,
            unread_chat,
        };
        self
    }
}
