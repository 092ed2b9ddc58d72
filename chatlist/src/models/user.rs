use serde::{Deserialize, Serialize};

use super::Profile;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i64,
    pub local_display_name: String,
    pub profile: Profile,
    pub active_user: bool,
    // Hidden profiles are only listed while they are the active one.
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user: User,
    #[serde(default)]
    pub unread_count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteHostInfo {
    pub remote_host_id: i64,
    pub host_device_name: String,
}
