//! Stats

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::StatsServiceError;
pub use service::*;
