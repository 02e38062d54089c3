//! Authentication

mod errors;
mod models;
mod password;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use password::{PasswordError, hash_password, verify_dummy_password, verify_password};
pub use service::*;
pub use token::*;
