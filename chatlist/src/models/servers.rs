use serde::{Deserialize, Serialize};

use crate::models::DateTime;

/// Queue subscription counters of the SMP agent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmpServerSubs {
    pub ss_active: u32,
    pub ss_pending: u32,
}

impl SmpServerSubs {
    pub fn total(&self) -> u32 {
        self.ss_active + self.ss_pending
    }

    pub fn share_of_active(&self) -> f32 {
        match self.total() {
            0 => 0.0,
            total => self.ss_active as f32 / total as f32,
        }
    }
}

/// Transport session counters of the SMP agent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSessions {
    pub ss_connected: u32,
    pub ss_errors: u32,
    pub ss_connecting: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmpTotals {
    pub sessions: ServerSessions,
    pub subs: SmpServerSubs,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmpServerSummary {
    pub smp_server: String,
    #[serde(default)]
    pub known: Option<bool>,
    #[serde(default)]
    pub sessions: Option<ServerSessions>,
    #[serde(default)]
    pub subs: Option<SmpServerSubs>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmpServersSummary {
    pub smp_totals: SmpTotals,
    #[serde(default)]
    pub current_user_smp: Vec<SmpServerSummary>,
}

/// Agent statistics shown behind the subscription status indicator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentedServersSummary {
    pub stats_started_at: DateTime,
    #[serde(rename = "allUsersSMP")]
    pub all_users_smp: SmpServersSummary,
}

impl PresentedServersSummary {
    pub fn new(stats_started_at: DateTime, smp_totals: SmpTotals) -> Self {
        Self {
            stats_started_at,
            all_users_smp: SmpServersSummary {
                smp_totals,
                current_user_smp: Vec::new(),
            },
        }
    }

    pub fn totals(&self) -> &SmpTotals {
        &self.all_users_smp.smp_totals
    }

    /// Pretty JSON used by the share button.
    pub fn to_share_text(&self) -> Result<String, anyhow::Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
