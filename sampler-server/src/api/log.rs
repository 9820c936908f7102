use actix_web::{get, web, HttpResponse};
use domain_sampler::service::ArtifactService;

use super::response::ApiResult;

#[get("/deployment/logs")]
pub async fn list_logs(
    service: web::Data<dyn ArtifactService>,
) -> ApiResult<web::Json<Vec<String>>> {
    Ok(web::Json(service.list_logs().await?))
}

#[get("/deployment/get_log/{name}")]
pub async fn get_log(
    service: web::Data<dyn ArtifactService>,
    name: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let content = service.read_log(&name).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{name}.txt\""),
        ))
        .body(content))
}
