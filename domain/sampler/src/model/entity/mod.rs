pub mod deployment;
mod device;
pub mod upload_session;

#[rustfmt::skip]
pub use {
    deployment::Deployment,
    device::Device,
    upload_session::UploadSession,
};
