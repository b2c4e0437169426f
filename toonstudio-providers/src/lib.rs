pub mod parse;
pub mod request;
pub mod runtime;
pub mod studio_api;
