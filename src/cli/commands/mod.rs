//! Command handlers.

pub mod personas;
pub mod serve;
