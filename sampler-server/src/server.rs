use std::sync::Arc;

use actix_web::web;
use colored::Colorize;
use tracing::{error, info};

use crate::api;
use crate::infrastructure::{
    config::{build_config, SamplerConfig},
    telemetry::initialize_telemetry,
    ServiceProvider,
};

pub fn run() {
    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(x) => x,
        Err(e) => return eprintln!("{}: {}", "Cannot start runtime".red(), e),
    };
    runtime.block_on(async_run());
}

pub async fn async_run() {
    let config = match build_config().and_then(|c| Ok(c.try_deserialize::<SamplerConfig>()?)) {
        Ok(x) => x,
        Err(e) => {
            return eprintln!("{}: {}", "Cannot build config".red(), e);
        }
    };
    if let Err(e) = initialize_telemetry(config.common().telemetry()) {
        return eprintln!("{}: {}", "Cannot build logger".red(), e);
    };
    let service_provider = match ServiceProvider::build(config).await {
        Ok(x) => Arc::new(x),
        Err(e) => {
            return eprintln!("{}: {}", "Cannot build Service Provider".red(), e);
        }
    };
    tokio::select! {
        _ = initialize_web_host(service_provider) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Stopping services (ctrl-c handling).");
        }
    }
}

/// Registers services and routes. Shared by the server and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig, sp: &ServiceProvider) {
    cfg.app_data(web::PayloadConfig::new(*sp.config().upload().max_payload_bytes()))
        .app_data(web::Data::from(sp.tagging_service().clone()))
        .app_data(web::Data::from(sp.upload_session_service().clone()))
        .app_data(web::Data::from(sp.directory_service().clone()))
        .app_data(web::Data::from(sp.artifact_service().clone()))
        .service(api::deployment::list_deployments)
        .service(api::deployment::create_deployment)
        .service(api::deployment::has_deployment)
        .service(api::deployment::get_config)
        .service(api::deployment::now)
        .service(api::deployment::download_data)
        .service(api::upload::upload_data)
        .service(api::upload::upload_log)
        .service(api::log::list_logs)
        .service(api::log::get_log);
}

pub async fn initialize_web_host(sp: Arc<ServiceProvider>) {
    let host = sp.config().common().host().clone();
    let server = actix_web::HttpServer::new(move || {
        let sp = sp.clone();
        actix_web::App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(move |cfg| configure(cfg, &sp))
    })
    .bind((host.bind_address().to_owned(), *host.bind_port()));
    let server = match server {
        Ok(x) => x,
        Err(e) => return error!("Cannot bind {}:{}: {}", host.bind_address(), host.bind_port(), e),
    };
    info!("Listening on {}:{}.", host.bind_address(), host.bind_port());
    match server.disable_signals().run().await {
        Ok(_) => info!("Web server stopped successfully."),
        Err(e) => error!("Web server into error: {}", e),
    }
}
