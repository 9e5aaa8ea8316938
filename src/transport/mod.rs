pub mod cache;
pub mod error;
pub mod fetch;
pub(crate) mod gate;
