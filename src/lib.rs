//! Spectro — assistant service backing the Spectro landing page.

pub mod api;
pub mod assistant;
pub mod config;
pub mod error;
