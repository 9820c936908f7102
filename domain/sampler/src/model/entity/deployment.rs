use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::vo::DeploymentConfig;

/// One tagged deployment of a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    /// Sequential id, assigned in creation order.
    pub id: u64,
    /// Owning device.
    pub device_id: u64,
    /// Token read from the RFID tag.
    #[serde(rename = "eDNA_UID")]
    pub token: String,
    /// When the tag was scanned.
    pub deployment_date: DateTime<Utc>,
    /// True until the deployment has delivered its data.
    pub is_new: bool,
    /// True once the data artifact has been reassembled.
    pub has_data: bool,
    #[serde(default)]
    pub config: DeploymentConfig,
}

impl Deployment {
    pub fn new(id: u64, device_id: u64, token: &str, deployment_date: DateTime<Utc>) -> Self {
        Self {
            id,
            device_id,
            token: token.to_owned(),
            deployment_date,
            is_new: true,
            has_data: false,
            config: DeploymentConfig::default(),
        }
    }

    /// Retires the deployment after its data upload completed.
    pub fn mark_has_data(&mut self) {
        self.has_data = true;
        self.is_new = false;
    }
}
