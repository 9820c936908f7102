use actix_web::{get, post, web, HttpResponse};
use chrono::Utc;
use domain_sampler::{
    command::TagDeploymentCommand,
    exception::{SamplerException, SamplerResult},
    model::vo::{parse_slug, parse_token},
    service::{ArtifactService, DirectoryService, TaggingService},
};

use super::dtos::{DeploymentDto, DeploymentStatusDto, NowDto};
use super::response::ApiResult;

fn parse_device_id(value: &str) -> SamplerResult<u64> {
    value.parse().map_err(|_| SamplerException::InvalidIdentifier {
        value: value.to_string(),
    })
}

/// The device scanned a tag; the token is the first bytes of the body.
#[post("/deployment/create/{device_id}")]
pub async fn create_deployment(
    service: web::Data<dyn TaggingService>,
    device_id: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let cmd = TagDeploymentCommand {
        device_id: parse_device_id(&device_id)?,
        token: parse_token(&body)?,
    };
    service.create_deployment(cmd).await?;
    Ok(HttpResponse::Ok().finish())
}

#[get("/deployment/has_deployment/{device_id}")]
pub async fn has_deployment(
    service: web::Data<dyn TaggingService>,
    device_id: web::Path<String>,
) -> ApiResult<web::Json<DeploymentStatusDto>> {
    let status = service.check_deployment_status(parse_device_id(&device_id)?).await?;
    Ok(web::Json(status.into()))
}

#[get("/deployment/get_config/{uid}")]
pub async fn get_config(
    service: web::Data<dyn DirectoryService>,
    uid: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let deployment = service.get_deployment(&parse_slug(&uid)?).await?;
    Ok(HttpResponse::Ok().json(deployment.config))
}

#[get("/deployment/datetime/now")]
pub async fn now() -> web::Json<NowDto> {
    web::Json(NowDto {
        now: Utc::now().timestamp(),
    })
}

#[get("/deployment/")]
pub async fn list_deployments(
    service: web::Data<dyn DirectoryService>,
) -> ApiResult<web::Json<Vec<DeploymentDto>>> {
    let deployments = service.list_deployments().await?;
    Ok(web::Json(deployments.into_iter().map(DeploymentDto::from).collect()))
}

#[get("/deployment/data/{uid}")]
pub async fn download_data(
    directory_service: web::Data<dyn DirectoryService>,
    artifact_service: web::Data<dyn ArtifactService>,
    uid: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let deployment = directory_service.get_deployment(&parse_slug(&uid)?).await?;
    let location = artifact_service.data_location(&deployment.token);
    if !deployment.has_data {
        return Err(SamplerException::ArtifactNotFound {
            name: location.name,
        }
        .into());
    }
    let content = artifact_service.read_data(&deployment.token).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", location.name),
        ))
        .body(content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_id_must_be_numeric() {
        assert_eq!(parse_device_id("17").unwrap(), 17);
        assert!(matches!(
            parse_device_id("-1"),
            Err(SamplerException::InvalidIdentifier { .. })
        ));
    }
}
