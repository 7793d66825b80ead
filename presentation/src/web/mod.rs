//! Web chat UI
//!
//! A single page with the conversation and one text input, served by axum.

mod page;
mod server;

pub use page::{PendingTurn, html_escape, render_page};
pub use server::{router, serve};
