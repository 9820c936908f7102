use chrono::{DateTime, Utc};
use domain_sampler::model::{entity::Deployment, vo::DeploymentStatus};
use num_traits::ToPrimitive;
use serde::Serialize;

/// Answer to a device asking whether a tag was scanned.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct DeploymentStatusDto {
    pub status: u8,
    #[serde(rename = "eDNA_UID", skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl From<DeploymentStatus> for DeploymentStatusDto {
    fn from(value: DeploymentStatus) -> Self {
        Self {
            status: value.status.to_u8().unwrap_or_default(),
            token: value.token,
        }
    }
}

#[derive(Serialize)]
pub struct DeploymentDto {
    pub id: u64,
    pub device_id: u64,
    #[serde(rename = "eDNA_UID")]
    pub token: String,
    pub deployment_date: DateTime<Utc>,
    pub is_new: bool,
    pub has_data: bool,
}

impl From<Deployment> for DeploymentDto {
    fn from(value: Deployment) -> Self {
        Self {
            id: value.id,
            device_id: value.device_id,
            token: value.token,
            deployment_date: value.deployment_date,
            is_new: value.is_new,
            has_data: value.has_data,
        }
    }
}

#[derive(Serialize)]
pub struct NowDto {
    /// Unix seconds, UTC.
    pub now: i64,
}
