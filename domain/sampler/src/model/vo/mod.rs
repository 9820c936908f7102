mod artifact;
mod chunk;
mod deployment_config;
mod identifier;
mod outcome;
mod status;
mod upload_target;

#[rustfmt::skip]
pub use {
    artifact::*,
    chunk::*,
    deployment_config::*,
    identifier::*,
    outcome::*,
    status::*,
    upload_target::*,
};
