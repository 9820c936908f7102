pub mod deployment;
pub mod dtos;
pub mod log;
pub mod response;
pub mod upload;
