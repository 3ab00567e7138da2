//! Application layer
//!
//! Use cases that turn plain commands into calls on domain services and
//! shape the results for the adapters.

pub mod auth;
pub mod recipe;
