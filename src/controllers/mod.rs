pub mod health;
pub mod login;
pub mod metrics;
pub mod session;
