//! HTML rendering for the web chat

use travel_domain::conversation::{Exchange, TurnOutcome};

/// Escape text for HTML element content and attribute values.
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// A turn that did not make it into the history, shown once below it.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTurn<'a> {
    pub input: &'a str,
    pub outcome: &'a TurnOutcome,
}

fn message(role: &str, label: &str, text: &str) -> String {
    format!(
        "<div class=\"msg {role}\"><span class=\"who\">{label}</span><div class=\"text\">{}</div></div>\n",
        html_escape(text)
    )
}

/// Render the full chat page.
///
/// `history` holds the remembered exchanges. `pending` is the latest turn
/// when it was blocked or failed; those are never stored, so they are
/// rendered separately.
pub fn render_page(title: &str, history: &[Exchange], pending: Option<PendingTurn<'_>>) -> String {
    let mut messages = String::new();
    for exchange in history {
        messages.push_str(&message("user", "You", &exchange.user));
        messages.push_str(&message("assistant", "Assistant", &exchange.assistant));
    }
    if let Some(turn) = pending
        && !turn.outcome.is_answered()
    {
        messages.push_str(&message("user", "You", turn.input));
        messages.push_str(&message(
            &format!("notice {}", turn.outcome.kind()),
            "Assistant",
            turn.outcome.message(),
        ));
    }
    if messages.is_empty() {
        messages.push_str(
            "<p class=\"empty\">Ask about flights, hotels or the cost of living anywhere.</p>\n",
        );
    }

    let title = html_escape(title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ font-family: system-ui, sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }}
.msg {{ margin: 0.75rem 0; padding: 0.6rem 0.8rem; border-radius: 0.5rem; }}
.msg .who {{ font-weight: 600; display: block; margin-bottom: 0.25rem; }}
.msg .text {{ white-space: pre-wrap; }}
.user {{ background: #eef4ff; }}
.assistant {{ background: #f4f4f4; }}
.notice.blocked {{ background: #fff6e0; }}
.notice.failed {{ background: #ffe9e9; }}
.empty {{ color: #777; }}
form {{ display: flex; gap: 0.5rem; margin-top: 1rem; }}
input[name=message] {{ flex: 1; padding: 0.5rem; }}
#thinking {{ color: #555; font-style: italic; }}
</style>
</head>
<body>
<h1>{title}</h1>
<div id="messages">
{messages}</div>
<p id="thinking" hidden>Thinking...</p>
<form method="post" action="/chat" onsubmit="document.getElementById('thinking').hidden = false; this.querySelector('button').disabled = true;">
<input name="message" autocomplete="off" autofocus required placeholder="Where do you want to go?">
<button type="submit">Send</button>
</form>
</body>
</html>
"#
    )
}
