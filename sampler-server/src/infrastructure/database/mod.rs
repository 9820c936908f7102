mod json;

pub use json::JsonRepository;
