//! Message sending helpers.
//!
//! Telegram's message limit is 4096 characters; we use 4090 for safety.
//! Everything is sent as HTML with link previews disabled. If Telegram
//! rejects the HTML (malformed markup from upstream data), the chunk is
//! retried as plain text so the user still gets the content.

use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, LinkPreviewOptions, ParseMode, Recipient};
use tracing::warn;

/// Maximum characters per Telegram message (limit is 4096; we use 4090 for safety).
const CHUNK_MAX: usize = 4090;

/// Split `text` into chunks of at most [`CHUNK_MAX`] characters, preferring
/// line boundaries. A single line longer than the limit is force-split.
pub fn split_chunks(text: &str) -> Vec<String> {
    if text.len() <= CHUNK_MAX {
        return vec![text.to_string()];
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in text.split('\n') {
        let cost = if current.is_empty() {
            line.len()
        } else {
            1 + line.len()
        };
        if !current.is_empty() && current.len() + cost > CHUNK_MAX {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    // Safety net for single lines longer than the limit.
    let mut result = Vec::new();
    for chunk in chunks {
        if chunk.len() <= CHUNK_MAX {
            result.push(chunk);
            continue;
        }
        let mut remaining = chunk.as_str();
        while remaining.len() > CHUNK_MAX {
            // Byte offset CHUNK_MAX may land inside a multibyte character;
            // walk back to the nearest char boundary before splitting.
            let mut end = CHUNK_MAX;
            while !remaining.is_char_boundary(end) {
                end -= 1;
            }
            let split_at = remaining[..end]
                .rfind(' ')
                .filter(|&i| i > 0)
                .unwrap_or(end);
            result.push(remaining[..split_at].to_string());
            remaining = remaining[split_at..].trim_start();
        }
        if !remaining.is_empty() {
            result.push(remaining.to_string());
        }
    }
    result
}

fn no_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

/// Send `text` to `to` as HTML in chunked messages.
///
/// An optional keyboard is attached to the final chunk. Returns the first
/// unrecoverable send error so callers can apply their own skip/continue
/// policy (the daily push must not abort the whole batch on one failure).
pub async fn send_html(
    bot: &Bot,
    to: Recipient,
    text: &str,
    markup: Option<InlineKeyboardMarkup>,
) -> Result<(), teloxide::RequestError> {
    let chunks = split_chunks(text);
    let last = chunks.len().saturating_sub(1);

    for (i, chunk) in chunks.iter().enumerate() {
        let mut request = bot
            .send_message(to.clone(), chunk)
            .parse_mode(ParseMode::Html)
            .link_preview_options(no_preview());
        if i == last {
            if let Some(ref kb) = markup {
                request = request.reply_markup(kb.clone());
            }
        }

        if let Err(e) = request.await {
            // Bad HTML from upstream data — retry the chunk as plain text.
            warn!(error = %e, chunk_index = i, "HTML send rejected; retrying as plain text");
            bot.send_message(to.clone(), chunk)
                .link_preview_options(no_preview())
                .await?;
        }

        if i < last {
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }
    Ok(())
}
