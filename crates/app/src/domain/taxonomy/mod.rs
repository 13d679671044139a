//! Brands and categories: the product taxonomy.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::TaxonomyServiceError;
pub use service::*;
