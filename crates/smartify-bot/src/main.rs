use std::sync::Arc;

use teloxide::prelude::*;
use tracing::{info, warn};

use smartify_core::config::SmartifyConfig;
use smartify_digest::schedule::until_next_run;
use smartify_feeds::{JobsClient, ToolsClient};
use smartify_prefs::PrefStore;
use smartify_telegram::{push, AppContext, TelegramAdapter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smartify=info,smartify_bot=info".into()),
        )
        .init();

    // load config: SMARTIFY_CONFIG env > ~/.smartify/smartify.toml
    let config_path = std::env::var("SMARTIFY_CONFIG").ok();
    let config = SmartifyConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        warn!("Config load failed ({}), using defaults", e);
        SmartifyConfig::default()
    });

    if config.telegram.bot_token.is_empty() {
        anyhow::bail!(
            "telegram.bot_token is not set — add it to smartify.toml \
             or export SMARTIFY_TELEGRAM__BOT_TOKEN"
        );
    }

    let db_path = &config.database.path;
    ensure_parent_dir(db_path);
    info!(path = %db_path, "opening SQLite database");

    let db = rusqlite::Connection::open(db_path)?;
    db.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    let store = PrefStore::new(db, &config.digest.timezone)?;
    let jobs = JobsClient::new(&config.feeds)?;
    let tools = ToolsClient::new(&config.feeds)?;

    let bot = Bot::new(&config.telegram.bot_token);
    let ctx = Arc::new(AppContext::new(config, store, jobs, tools));

    // Daily digest loop: sleep until the configured local time, push, repeat.
    let push_bot = bot.clone();
    let push_ctx = Arc::clone(&ctx);
    tokio::spawn(async move {
        run_daily_loop(push_bot, push_ctx).await;
    });

    TelegramAdapter::new(bot, ctx).run().await;
    Ok(())
}

async fn run_daily_loop(bot: Bot, ctx: Arc<AppContext>) {
    let hour = ctx.config.digest.hour;
    let minute = ctx.config.digest.minute;
    let tz = ctx.config.digest.tz();

    loop {
        let now = chrono::Utc::now();
        let Some(wait) = until_next_run(hour, minute, tz, now) else {
            warn!(hour, minute, "digest time out of range; daily push disabled");
            return;
        };
        let wait = wait
            .to_std()
            .unwrap_or(std::time::Duration::from_secs(60));
        info!(seconds = wait.as_secs(), "next daily push scheduled");
        tokio::time::sleep(wait).await;

        push::run_push_cycle(&bot, &ctx).await;
    }
}

/// Ensure the parent directory for a file path exists.
fn ensure_parent_dir(path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
}
