//! Recipe management REST API
//!
//! Users own recipes, tags and ingredients; every query is filtered by owner.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
