use crate::models::{ServerSessions, SmpServerSubs};

/// State shown by the subscription indicator next to the title.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SubscriptionStatus {
    /// Offline, or no subscriptions at all.
    NoConnection { active_share: f32 },
    /// Sessions are being established, none connected yet.
    Connecting,
    /// Connected; `active_share` is the active fraction of subscriptions
    /// rounded to a quarter.
    Connected { active_share: f32 },
}

pub fn subscription_status(
    online: bool,
    subs: &SmpServerSubs,
    sessions: &ServerSessions,
) -> SubscriptionStatus {
    if !online || subs.total() == 0 {
        return SubscriptionStatus::NoConnection { active_share: 0.0 };
    }
    let active_share = rounded_to_quarter(subs.share_of_active());
    if sessions.ss_connected > 0 {
        SubscriptionStatus::Connected { active_share }
    } else if sessions.ss_connecting > 0 {
        SubscriptionStatus::Connecting
    } else {
        SubscriptionStatus::NoConnection { active_share }
    }
}

/// Rounds a share to 0, 0.25, 0.5, 0.75 or 1. Only exact 0 and 1 map to the
/// extremes.
pub fn rounded_to_quarter(share: f32) -> f32 {
    if share >= 1.0 {
        1.0
    } else if share <= 0.0 {
        0.0
    } else {
        ((share * 4.0).round() / 4.0).clamp(0.25, 0.75)
    }
}
