//! axum server for the web chat
//!
//! ```text
//! GET  /        → page with the remembered conversation
//! POST /chat    → run one turn (form field `message`), render the page
//! GET  /health  → 200 "ok"
//! ```
//!
//! Turns run through [`BlockingConversation`] inside `spawn_blocking`, so a
//! request returns only once its turn is complete. All visitors share one
//! conversation.

use super::page::{PendingTurn, render_page};
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use travel_application::BlockingConversation;

#[derive(Clone)]
struct WebState {
    conversation: BlockingConversation,
    title: Arc<str>,
}

#[derive(Debug, Deserialize)]
struct ChatForm {
    #[serde(default)]
    message: String,
}

type HandlerResult = Result<Html<String>, (StatusCode, String)>;

/// Build the chat router.
pub fn router(conversation: BlockingConversation, title: &str) -> Router {
    let state = WebState {
        conversation,
        title: Arc::from(title),
    };
    Router::new()
        .route("/", get(index))
        .route("/chat", post(chat).get(index))
        .route("/health", get(health))
        .with_state(state)
}

/// Serve the chat UI on `addr` until Ctrl-C.
pub async fn serve(
    addr: SocketAddr,
    conversation: BlockingConversation,
    title: &str,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Web chat listening on http://{}", listener.local_addr()?);
    println!("Web chat running at http://{} (Ctrl-C to stop)", addr);

    axum::serve(listener, router(conversation, title))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down web chat");
}

async fn index(State(state): State<WebState>) -> HandlerResult {
    let conversation = state.conversation.clone();
    let history = tokio::task::spawn_blocking(move || conversation.history())
        .await
        .map_err(internal_error)?;
    Ok(Html(render_page(&state.title, &history, None)))
}

async fn chat(State(state): State<WebState>, Form(form): Form<ChatForm>) -> HandlerResult {
    let message = form.message.trim().to_string();
    let conversation = state.conversation.clone();

    if message.is_empty() {
        let history = tokio::task::spawn_blocking(move || conversation.history())
            .await
            .map_err(internal_error)?;
        return Ok(Html(render_page(&state.title, &history, None)));
    }

    let input = message.clone();
    let (outcome, history) = tokio::task::spawn_blocking(move || {
        let outcome = conversation.submit(&input);
        (outcome, conversation.history())
    })
    .await
    .map_err(internal_error)?;

    info!("Web turn finished: {}", outcome.kind());
    Ok(Html(render_page(
        &state.title,
        &history,
        Some(PendingTurn {
            input: &message,
            outcome: &outcome,
        }),
    )))
}

async fn health() -> &'static str {
    "ok"
}

fn internal_error(e: tokio::task::JoinError) -> (StatusCode, String) {
    error!("Chat turn task failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Error. Please try again.".to_string(),
    )
}
