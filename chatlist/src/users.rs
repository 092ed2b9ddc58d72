//! User switcher: which profiles are listed and what the settings button does.

use crate::models::UserInfo;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsButtonAction {
    /// No profiles yet: the button is a plain menu toggle.
    ToggleDrawer,
    /// A single profile and no remote hosts: nothing to switch to.
    OpenDrawer,
    ShowUserPicker,
}

/// Profiles listed in the switcher: the active one and every non-hidden one.
pub fn visible_users(users: &[UserInfo]) -> Vec<&UserInfo> {
    users
        .iter()
        .filter(|u| u.user.active_user || !u.user.hidden)
        .collect()
}

/// True when no other listed profile has unread messages.
pub fn all_read(users: &[UserInfo]) -> bool {
    users
        .iter()
        .filter(|u| !u.user.active_user && !u.user.hidden)
        .all(|u| u.unread_count == 0)
}

pub fn settings_button_action(
    users: &[UserInfo],
    remote_host_count: usize,
    desktop_no_user_no_remote: bool,
) -> SettingsButtonAction {
    if users.is_empty() && !desktop_no_user_no_remote {
        return SettingsButtonAction::ToggleDrawer;
    }
    if visible_users(users).len() == 1 && remote_host_count == 0 {
        SettingsButtonAction::OpenDrawer
    } else {
        SettingsButtonAction::ShowUserPicker
    }
}
