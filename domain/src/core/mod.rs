//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — chat model identifier

pub mod model;
