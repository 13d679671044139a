//! Identity and access: password hashing, session tokens, register/login.

pub mod errors;
pub mod models;
pub mod password;
pub mod service;
pub mod token;

pub use errors::AuthServiceError;
pub use models::Actor;
pub use service::*;
pub use token::{TokenError, TokenSigner};
