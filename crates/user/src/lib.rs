mod command;
mod error;
pub mod jwt;
pub mod password;
mod repository;
mod store;
mod types;

pub use command::*;
pub use error::*;
pub use jwt::{Claims, TokenService};
pub use password::{hash_password, verify_password};
pub use store::*;
pub use types::*;
