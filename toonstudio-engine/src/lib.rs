pub mod conversion;
pub mod copy;
pub mod error;
pub mod job;
pub mod query;
pub mod status;
pub mod studio;
pub mod token_count;
pub mod traits;

mod util;

#[cfg(test)]
mod testing;
