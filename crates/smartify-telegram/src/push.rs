//! Daily digest fan-out and the channel broadcast.

use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::keyboard::channel_keyboard;
use crate::send::send_html;
use smartify_digest::{assemble_channel_digest, assemble_user_digest};

/// One full push cycle: every subscriber, then the channel broadcast.
/// Used by both the daily schedule loop and `/pushnow`.
pub async fn run_push_cycle(bot: &Bot, ctx: &AppContext) {
    run_daily_push(bot, ctx).await;
    post_channel_summary(bot, ctx).await;
}

/// Send the personalised digest to every subscribed user.
///
/// One failed delivery (user blocked the bot, chat gone) is logged and
/// skipped; it never aborts the rest of the batch.
pub async fn run_daily_push(bot: &Bot, ctx: &AppContext) {
    let users = match ctx.store.all() {
        Ok(users) => users,
        Err(e) => {
            warn!(error = %e, "daily push aborted: preference list unavailable");
            return;
        }
    };

    let mut sent = 0usize;
    let mut skipped = 0usize;
    for prefs in users {
        if !prefs.flags.any() {
            continue;
        }
        let Some(text) = assemble_user_digest(prefs.flags, &ctx.digest).await else {
            skipped += 1;
            continue;
        };
        let to = Recipient::Id(ChatId(prefs.user_id));
        match send_html(bot, to, &text, None).await {
            Ok(()) => sent += 1,
            Err(e) => {
                warn!(user_id = prefs.user_id, error = %e, "digest delivery failed; skipping user");
                skipped += 1;
            }
        }
    }
    info!(sent, skipped, "daily push complete");
}

/// Post the all-sections summary to the broadcast channel, if configured.
pub async fn post_channel_summary(bot: &Bot, ctx: &AppContext) {
    let Some(channel_id) = ctx.config.telegram.channel_id.as_deref() else {
        info!("no broadcast channel configured; skipping channel summary");
        return;
    };

    let Some(text) = assemble_channel_digest(&ctx.digest).await else {
        info!("all channel sections empty today; nothing to post");
        return;
    };

    let to = channel_recipient(channel_id);
    let kb = channel_keyboard(channel_id);
    if let Err(e) = send_html(bot, to, &text, kb).await {
        warn!(channel_id, error = %e, "channel post failed");
    } else {
        info!(channel_id, "channel summary posted");
    }
}

/// Numeric IDs (including -100… supergroup IDs) address the chat directly;
/// anything else is treated as a public @username.
fn channel_recipient(channel_id: &str) -> Recipient {
    match channel_id.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => {
            let name = channel_id.strip_prefix('@').unwrap_or(channel_id);
            Recipient::ChannelUsername(format!("@{name}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_channel_id_is_a_chat_id() {
        assert_eq!(
            channel_recipient("-1001234567890"),
            Recipient::Id(ChatId(-1001234567890))
        );
    }

    #[test]
    fn username_is_normalised_with_at() {
        assert_eq!(
            channel_recipient("smartify_jobs"),
            Recipient::ChannelUsername("@smartify_jobs".to_string())
        );
        assert_eq!(
            channel_recipient("@smartify_jobs"),
            Recipient::ChannelUsername("@smartify_jobs".to_string())
        );
    }
}
