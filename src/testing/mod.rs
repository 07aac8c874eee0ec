//! Test fixtures shared by unit and integration tests

pub mod instance;
pub mod setup;
