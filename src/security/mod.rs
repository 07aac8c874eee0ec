pub mod password;

pub use password::{PasswordError, PasswordHasher};
