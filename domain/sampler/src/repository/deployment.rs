use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::model::entity::Deployment;

#[async_trait]
pub trait DeploymentRepo: Send + Sync {
    /// Atomically looks up the deployment of `device_id` with `token`,
    /// inserting one dated `now` on miss.
    async fn get_or_create(
        &self,
        device_id: u64,
        token: &str,
        now: DateTime<Utc>,
    ) -> anyhow::Result<(Deployment, bool)>;

    /// The earliest created deployment carrying `token`.
    async fn get_by_token(&self, token: &str) -> anyhow::Result<Option<Deployment>>;

    async fn get_all_by_device(&self, device_id: u64) -> anyhow::Result<Vec<Deployment>>;

    async fn get_all(&self) -> anyhow::Result<Vec<Deployment>>;

    async fn update(&self, deployment: &Deployment) -> anyhow::Result<()>;
}
