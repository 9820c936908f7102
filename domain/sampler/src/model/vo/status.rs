use num_derive::{FromPrimitive, ToPrimitive};

/// Whether a device has a tagged deployment still waiting for configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum PendingStatus {
    NotPending = 0,
    Pending = 1,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentStatus {
    pub status: PendingStatus,
    /// Token of the pending deployment.
    pub token: Option<String>,
}

impl DeploymentStatus {
    pub fn not_pending() -> Self {
        Self {
            status: PendingStatus::NotPending,
            token: None,
        }
    }

    pub fn pending(token: String) -> Self {
        Self {
            status: PendingStatus::Pending,
            token: Some(token),
        }
    }
}
