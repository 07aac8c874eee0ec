pub mod error;
pub mod login;
pub mod session;
