use crate::exception::{SamplerException, SamplerResult};
use crate::model::vo::UploadTarget;

/// One chunk request as sent by the device.
#[derive(Debug, Clone)]
pub struct ChunkUploadCommand {
    pub target: UploadTarget,
    /// `Chunks` header, total number of chunks of the upload.
    pub chunks: u32,
    /// `Data-Bytes` header, length of this chunk's payload.
    pub data_bytes: usize,
    /// `Nth` header, 1-based index of this chunk.
    pub nth: u32,
    /// Raw request body.
    pub body: Vec<u8>,
}

impl ChunkUploadCommand {
    /// The declared payload. Trailing bytes past `data_bytes` are dropped.
    pub fn payload(&self) -> SamplerResult<&[u8]> {
        self.body.get(..self.data_bytes).ok_or(SamplerException::PayloadTooShort {
            declared: self.data_bytes,
            actual: self.body.len(),
        })
    }
}

/// A device reporting a freshly scanned tag.
#[derive(Debug, Clone)]
pub struct TagDeploymentCommand {
    pub device_id: u64,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(data_bytes: usize, body: &[u8]) -> ChunkUploadCommand {
        ChunkUploadCommand {
            target: UploadTarget::Log {
                uid: "A1B2C3D4".to_string(),
            },
            chunks: 1,
            data_bytes,
            nth: 1,
            body: body.to_vec(),
        }
    }

    #[test]
    fn payload_is_truncated_to_declared_length() {
        assert_eq!(command(3, b"abcdef").payload().unwrap(), b"abc");
        assert_eq!(command(0, b"abc").payload().unwrap(), b"");
    }

    #[test]
    fn short_payload_is_rejected() {
        assert!(matches!(
            command(5, b"abc").payload(),
            Err(SamplerException::PayloadTooShort {
                declared: 5,
                actual: 3
            })
        ));
    }
}
