use actix_http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use domain_sampler::exception::SamplerException;
use serde::Serialize;

pub type ApiResult<T> = Result<T, ApiError>;

/// A domain failure on its way to the device.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub SamplerException);

#[derive(Serialize)]
struct ErrorBody {
    status: i32,
    message: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        use SamplerException::*;
        match &self.0 {
            MissingChunk { .. } => StatusCode::CONFLICT,
            UnexpectedChunkIndex { .. }
            | PayloadTooShort { .. }
            | InvalidHeader { .. }
            | InvalidIdentifier { .. } => StatusCode::BAD_REQUEST,
            TargetNotFound { .. } | ArtifactNotFound { .. } => StatusCode::NOT_FOUND,
            InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            status: self.0.status(),
            message: self.0.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        let missing = ApiError(SamplerException::MissingChunk {
            session_key: "data_A1B2C3D4".to_string(),
            nth: 2,
        });
        assert_eq!(missing.status_code(), StatusCode::CONFLICT);
        let index = ApiError(SamplerException::UnexpectedChunkIndex { nth: 4, chunks: 3 });
        assert_eq!(index.status_code(), StatusCode::BAD_REQUEST);
        let unknown = ApiError(SamplerException::TargetNotFound {
            target: "deployment A1B2C3D4".to_string(),
        });
        assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);
        let internal = ApiError(anyhow::anyhow!("disk full").into());
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
