use std::fmt;

/// The logical entity an upload is reassembled for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UploadTarget {
    /// Measurement data of the deployment with this token.
    Data { token: String },
    /// A log file sent by the unit identified by `uid`.
    Log { uid: String },
}

impl UploadTarget {
    pub fn is_data(&self) -> bool {
        matches!(self, UploadTarget::Data { .. })
    }

    /// Key of the chunks and of the per-target lock.
    pub fn session_key(&self) -> String {
        match self {
            UploadTarget::Data { token } => format!("data_{token}"),
            UploadTarget::Log { uid } => format!("log_{uid}"),
        }
    }
}

impl fmt::Display for UploadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadTarget::Data { token } => write!(f, "deployment {token}"),
            UploadTarget::Log { uid } => write!(f, "log of {uid}"),
        }
    }
}
