pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod pricing;
pub mod text;
pub mod types;

// Keep the public surface small and intentional.
pub use api::*;
pub use config::*;
pub use error::*;
pub use metrics::*;
pub use pricing::*;
pub use text::*;
pub use types::*;
