use serde::{Deserialize, Serialize};

/// A sampler unit, identified by the id flashed into its firmware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_id: u64,
}
