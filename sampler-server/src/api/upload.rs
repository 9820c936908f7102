use std::str::FromStr;

use actix_web::{post, web, HttpRequest, HttpResponse};
use domain_sampler::{
    command::ChunkUploadCommand,
    exception::{SamplerException, SamplerResult},
    model::vo::{parse_slug, UploadTarget},
    service::UploadSessionService,
};

use super::response::ApiResult;

const CHUNKS: &str = "Chunks";
const DATA_BYTES: &str = "Data-Bytes";
const NTH: &str = "Nth";

fn header<T>(req: &HttpRequest, name: &str) -> SamplerResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let invalid = |reason: String| SamplerException::InvalidHeader {
        header: name.to_string(),
        reason,
    };
    let value = req
        .headers()
        .get(name)
        .ok_or_else(|| invalid("missing".to_string()))?
        .to_str()
        .map_err(|e| invalid(e.to_string()))?;
    value.trim().parse::<T>().map_err(|e| invalid(format!("\"{value}\": {e}")))
}

async fn upload(
    service: &dyn UploadSessionService,
    target: UploadTarget,
    req: &HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let cmd = ChunkUploadCommand {
        target,
        chunks: header(req, CHUNKS)?,
        data_bytes: header(req, DATA_BYTES)?,
        nth: header(req, NTH)?,
        body: body.to_vec(),
    };
    service.upload_chunk(cmd).await?;
    Ok(HttpResponse::Ok().finish())
}

/// One chunk of a deployment's measurement data.
#[post("/deployment/upload/{uid}")]
pub async fn upload_data(
    service: web::Data<dyn UploadSessionService>,
    uid: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let target = UploadTarget::Data {
        token: parse_slug(&uid)?,
    };
    upload(service.get_ref(), target, &req, body).await
}

/// One chunk of a device log.
#[post("/deployment/upload-log/{uid}")]
pub async fn upload_log(
    service: web::Data<dyn UploadSessionService>,
    uid: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let target = UploadTarget::Log {
        uid: parse_slug(&uid)?,
    };
    upload(service.get_ref(), target, &req, body).await
}
