//! Slash-command handlers.

use std::sync::Arc;

use smartify_core::types::Query;
use smartify_feeds::format::escape_html;
use smartify_feeds::{format_jobs, format_tools};
use smartify_prefs::{PrefFlags, PrefUpdate, ToggleKey};
use smartify_query::parse_args;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use teloxide::utils::command::BotCommands;
use tracing::warn;

use crate::context::AppContext;
use crate::keyboard::{start_keyboard, subscribe_keyboard};
use crate::push;
use crate::send::send_html;

const WELCOME: &str = "👋 Welcome to <b>Smartify Jobs</b>!\n\n\
I can find you jobs and trending AI tools:\n\
/jobs &lt;keyword&gt; [au|in] [loc=City] — search job listings\n\
/jobs_au — today's AU jobs\n\
/jobs_in — today's India jobs\n\
/aitools — trending AI tools\n\
/both — AU jobs + AI tools\n\
/subscribe — pick your daily digest\n\
/unsubscribe — stop all daily pushes\n\
/prefs — show your settings\n\
/settz &lt;zone&gt; — set your timezone\n\n\
Or just type what you're looking for, e.g.\n\
“data engineer jobs in India loc=Bangalore”.";

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    Start,
    Jobs(String),
    #[command(rename = "jobs_au")]
    JobsAu,
    #[command(rename = "jobs_in")]
    JobsIn,
    Aitools,
    Both,
    Subscribe(String),
    Unsubscribe,
    Prefs,
    Settz(String),
    Pushnow,
    Postchannel,
}

/// `🔎 <b>Jobs for “{kw}” — {cc}</b>[ — {loc}]` — shared with free-text search.
pub fn jobs_header(query: &Query) -> String {
    let mut header = format!(
        "🔎 <b>Jobs for “{}” — {}</b>",
        escape_html(&query.keyword),
        query.country
    );
    if let Some(ref location) = query.location {
        header.push_str(&format!(" — {}", escape_html(location)));
    }
    header
}

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    ctx: Arc<AppContext>,
) -> ResponseResult<()> {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    if from.is_bot {
        return Ok(());
    }
    let user_id = from.id.0 as i64;
    let to = Recipient::Id(msg.chat.id);

    match cmd {
        Command::Start => {
            if let Err(e) = ctx.store.upsert(user_id, PrefUpdate::none()) {
                warn!(user_id, error = %e, "first-contact upsert failed");
            }
            let kb = start_keyboard(ctx.config.telegram.channel_id.as_deref());
            send_html(&bot, to, WELCOME, Some(kb)).await?;
        }

        Command::Jobs(args) => {
            let query = parse_args(args.split_whitespace());
            reply_with_search(&bot, to, &ctx, &query).await?;
        }

        Command::JobsAu => {
            implicit_subscribe(&ctx, user_id, ToggleKey::JobsAu);
            let body = fetch_jobs(&ctx, Query::daily(smartify_core::types::Country::Au)).await;
            send_html(&bot, to, &format!("🔥 <b>Today's AU jobs</b>:\n\n{body}"), None).await?;
        }

        Command::JobsIn => {
            implicit_subscribe(&ctx, user_id, ToggleKey::JobsIn);
            let body = fetch_jobs(&ctx, Query::daily(smartify_core::types::Country::In)).await;
            send_html(
                &bot,
                to,
                &format!("🔥 <b>Today's India jobs</b>:\n\n{body}"),
                None,
            )
            .await?;
        }

        Command::Aitools => {
            implicit_subscribe(&ctx, user_id, ToggleKey::AiTools);
            let body = fetch_tools(&ctx).await;
            send_html(
                &bot,
                to,
                &format!("🤖 <b>Trending AI tools</b>:\n\n{body}"),
                None,
            )
            .await?;
        }

        Command::Both => {
            let update = PrefUpdate {
                jobs_au: Some(true),
                ai_tools: Some(true),
                ..PrefUpdate::default()
            };
            if let Err(e) = ctx.store.upsert(user_id, update) {
                warn!(user_id, error = %e, "implicit subscribe failed");
            }
            let jobs = fetch_jobs(&ctx, Query::daily(smartify_core::types::Country::Au)).await;
            let tools = fetch_tools(&ctx).await;
            let text = format!(
                "🔥 <b>AU Jobs</b>:\n\n{jobs}{}🤖 <b>AI Tools</b>:\n\n{tools}",
                smartify_digest::SECTION_SEPARATOR
            );
            send_html(&bot, to, &text, None).await?;
        }

        Command::Subscribe(args) => {
            let args: Vec<String> = args
                .split_whitespace()
                .map(|a| a.to_ascii_lowercase())
                .collect();
            if args.is_empty() {
                // Interactive path: open the toggle keyboard on the stored flags.
                let flags = ctx
                    .store
                    .get(user_id)
                    .map(|p| p.flags)
                    .unwrap_or_default();
                let kb = subscribe_keyboard(flags, &ctx.daily_label());
                send_html(&bot, to, "Choose what you want daily:", Some(kb)).await?;
            } else {
                // Non-interactive path: the named flags replace the stored set.
                let flags = PrefFlags {
                    jobs_au: args.iter().any(|a| a == "jobs_au"),
                    jobs_in: args.iter().any(|a| a == "jobs_in"),
                    ai_tools: args.iter().any(|a| a == "ai_tools"),
                };
                if let Err(e) = ctx.store.upsert(user_id, PrefUpdate::flags(flags)) {
                    warn!(user_id, error = %e, "subscribe failed");
                }
                send_html(
                    &bot,
                    to,
                    &format!("Subscribed to: {}.", flags.summary()),
                    None,
                )
                .await?;
            }
        }

        Command::Unsubscribe => {
            if let Err(e) = ctx
                .store
                .upsert(user_id, PrefUpdate::flags(PrefFlags::default()))
            {
                warn!(user_id, error = %e, "unsubscribe failed");
            }
            send_html(&bot, to, "Unsubscribed from all daily pushes.", None).await?;
        }

        Command::Prefs => {
            let prefs = ctx.store.get(user_id).unwrap_or_else(|e| {
                warn!(user_id, error = %e, "preference load failed");
                smartify_prefs::UserPreferences {
                    user_id,
                    flags: PrefFlags::default(),
                    timezone: ctx.config.digest.timezone.clone(),
                }
            });
            let text = format!(
                "Your preferences:\n\
                 • jobs_au: {}\n\
                 • jobs_in: {}\n\
                 • ai_tools: {}\n\
                 • timezone: {}\n\
                 Daily: {}",
                prefs.flags.jobs_au,
                prefs.flags.jobs_in,
                prefs.flags.ai_tools,
                prefs.timezone,
                ctx.daily_label()
            );
            send_html(&bot, to, &text, None).await?;
        }

        Command::Settz(arg) => {
            let zone = arg.trim();
            if zone.is_empty() {
                send_html(
                    &bot,
                    to,
                    "Send a valid timezone, e.g. /settz Asia/Kolkata",
                    None,
                )
                .await?;
                return Ok(());
            }
            if zone.parse::<chrono_tz::Tz>().is_err() {
                // Invalid name: reject visibly, leave the stored record alone.
                send_html(
                    &bot,
                    to,
                    "Invalid timezone. Try Asia/Kolkata or Australia/Melbourne.",
                    None,
                )
                .await?;
                return Ok(());
            }
            if let Err(e) = ctx.store.upsert(user_id, PrefUpdate::timezone(zone)) {
                warn!(user_id, error = %e, "timezone update failed");
            }
            send_html(&bot, to, &format!("Timezone set to {zone}."), None).await?;
        }

        Command::Pushnow => {
            push::run_push_cycle(&bot, &ctx).await;
            send_html(&bot, to, "Pushed now.", None).await?;
        }

        Command::Postchannel => {
            if ctx.config.telegram.channel_id.is_none() {
                send_html(&bot, to, "telegram.channel_id is not configured.", None).await?;
                return Ok(());
            }
            push::post_channel_summary(&bot, &ctx).await;
            send_html(&bot, to, "Posted to channel.", None).await?;
        }
    }

    Ok(())
}

/// Run a search and reply with header + results (or a no-results notice).
pub async fn reply_with_search(
    bot: &Bot,
    to: Recipient,
    ctx: &AppContext,
    query: &Query,
) -> ResponseResult<()> {
    let header = jobs_header(query);
    let body = match ctx.jobs.search(query).await {
        Ok(listings) if listings.is_empty() => "No results found.".to_string(),
        Ok(listings) => format_jobs(&listings),
        Err(e) => {
            warn!(error = %e, "job search failed");
            "No results found.".to_string()
        }
    };
    send_html(bot, to, &format!("{header}\n\n{body}"), None).await
}

/// The quick commands double as a subscription: using /jobs_au opts the
/// user into that digest section.
fn implicit_subscribe(ctx: &AppContext, user_id: i64, key: ToggleKey) {
    if let Err(e) = ctx.store.upsert(user_id, PrefUpdate::flag(key, true)) {
        warn!(user_id, error = %e, "implicit subscribe failed");
    }
}

async fn fetch_jobs(ctx: &AppContext, query: Query) -> String {
    match ctx.jobs.search(&query).await {
        Ok(listings) if listings.is_empty() => "No results found.".to_string(),
        Ok(listings) => format_jobs(&listings),
        Err(e) => {
            warn!(error = %e, "job fetch failed");
            "No results found.".to_string()
        }
    }
}

async fn fetch_tools(ctx: &AppContext) -> String {
    match ctx.tools.list().await {
        Ok(entries) if entries.is_empty() => "No tools today.".to_string(),
        Ok(entries) => format_tools(&entries),
        Err(e) => {
            warn!(error = %e, "tools fetch failed");
            "No tools today.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartify_core::types::Country;

    #[test]
    fn header_includes_country_and_location() {
        let query = Query {
            keyword: "data engineer".into(),
            country: Country::In,
            location: Some("Bangalore".into()),
        };
        let header = jobs_header(&query);
        assert!(header.contains("data engineer"));
        assert!(header.contains("— IN"));
        assert!(header.ends_with("— Bangalore"));
    }

    #[test]
    fn header_escapes_user_input() {
        let query = Query {
            keyword: "c<b>++".into(),
            country: Country::Au,
            location: None,
        };
        assert!(jobs_header(&query).contains("c&lt;b&gt;++"));
    }

    #[test]
    fn command_names_match_the_bot_surface() {
        use teloxide::utils::command::BotCommands;
        let names: Vec<String> = Command::bot_commands()
            .iter()
            .map(|c| c.command.trim_start_matches('/').to_string())
            .collect();
        for expected in [
            "start",
            "jobs",
            "jobs_au",
            "jobs_in",
            "aitools",
            "both",
            "subscribe",
            "unsubscribe",
            "prefs",
            "settz",
            "pushnow",
            "postchannel",
        ] {
            assert!(names.contains(&expected.to_string()), "missing {expected}");
        }
    }
}
