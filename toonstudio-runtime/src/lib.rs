pub mod config_store;
pub mod defaults;
pub mod env;
pub mod gateway;
pub mod studio;
