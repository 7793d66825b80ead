//! Progress display for agent runs

pub mod reporter;
