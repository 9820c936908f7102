mod deployment;
mod device;
