use anyhow::anyhow;
use chrono::{DateTime, Utc};
use domain_sampler::{model::entity::Deployment, repository::DeploymentRepo};

use crate::infrastructure::database::JsonRepository;

#[async_trait::async_trait]
impl DeploymentRepo for JsonRepository {
    async fn get_or_create(
        &self,
        device_id: u64,
        token: &str,
        now: DateTime<Utc>,
    ) -> anyhow::Result<(Deployment, bool)> {
        let mut state = self.lock().await;
        if let Some(deployment) = state
            .deployments
            .iter()
            .find(|d| d.device_id == device_id && d.token == token)
        {
            return Ok((deployment.clone(), false));
        }
        let deployment = self
            .commit(&mut state, |s| {
                s.last_id += 1;
                let deployment = Deployment::new(s.last_id, device_id, token, now);
                s.deployments.push(deployment.clone());
                deployment
            })
            .await?;
        Ok((deployment, true))
    }

    async fn get_by_token(&self, token: &str) -> anyhow::Result<Option<Deployment>> {
        let state = self.lock().await;
        Ok(state
            .deployments
            .iter()
            .filter(|d| d.token == token)
            .min_by_key(|d| d.id)
            .cloned())
    }

    async fn get_all_by_device(&self, device_id: u64) -> anyhow::Result<Vec<Deployment>> {
        let state = self.lock().await;
        Ok(state.deployments.iter().filter(|d| d.device_id == device_id).cloned().collect())
    }

    async fn get_all(&self) -> anyhow::Result<Vec<Deployment>> {
        Ok(self.lock().await.deployments.clone())
    }

    async fn update(&self, deployment: &Deployment) -> anyhow::Result<()> {
        let mut state = self.lock().await;
        let index = state
            .deployments
            .iter()
            .position(|d| d.id == deployment.id)
            .ok_or(anyhow!("No such deployment with id: {}", deployment.id))?;
        self.commit(&mut state, |s| s.deployments[index] = deployment.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_device_and_token_is_one_deployment() {
        let repo = JsonRepository::in_memory();
        let (first, created) = repo.get_or_create(1, "A1B2C3D4", Utc::now()).await.unwrap();
        assert!(created);
        let (again, created) = repo.get_or_create(1, "A1B2C3D4", Utc::now()).await.unwrap();
        assert!(!created);
        assert_eq!(first, again);
        assert_eq!(repo.get_all_by_device(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn token_lookup_prefers_earliest() {
        let repo = JsonRepository::in_memory();
        repo.get_or_create(1, "SHARED01", Utc::now()).await.unwrap();
        repo.get_or_create(2, "SHARED01", Utc::now()).await.unwrap();
        let found = repo.get_by_token("SHARED01").await.unwrap().unwrap();
        assert_eq!(found.device_id, 1);
        assert!(repo.get_by_token("MISSING0").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_replaces_record() {
        let repo = JsonRepository::in_memory();
        let (mut deployment, _) = repo.get_or_create(1, "A1B2C3D4", Utc::now()).await.unwrap();
        deployment.mark_has_data();
        repo.update(&deployment).await.unwrap();
        let stored = repo.get_by_token("A1B2C3D4").await.unwrap().unwrap();
        assert!(stored.has_data);
        assert!(!stored.is_new);

        let mut ghost = deployment.clone();
        ghost.id = 99;
        assert!(repo.update(&ghost).await.is_err());
    }
}
