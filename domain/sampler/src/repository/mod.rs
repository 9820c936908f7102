mod deployment;
mod device;

#[rustfmt::skip]
pub use {
    deployment::DeploymentRepo,
    device::DeviceRepo,
};
