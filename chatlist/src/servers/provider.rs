use async_trait::async_trait;

use crate::models::PresentedServersSummary;

/// Source of agent server statistics, usually the chat core API.
#[async_trait]
pub trait ServersSummaryProvider: Send + Sync {
    async fn get_agent_servers_summary(
        &self,
        remote_host_id: Option<i64>,
    ) -> Result<PresentedServersSummary, anyhow::Error>;
}
