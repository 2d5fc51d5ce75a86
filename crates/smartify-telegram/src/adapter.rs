//! Telegram adapter.
//!
//! Wraps a teloxide `Bot` + `Dispatcher` and drives the long-polling event
//! loop until the process exits. Reconnects automatically on transport
//! errors.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use crate::callback::handle_callback;
use crate::commands::{handle_command, Command};
use crate::context::AppContext;
use crate::text::handle_text;

pub struct TelegramAdapter {
    bot: Bot,
    ctx: Arc<AppContext>,
}

impl TelegramAdapter {
    pub fn new(bot: Bot, ctx: Arc<AppContext>) -> Self {
        Self { bot, ctx }
    }

    /// Connect to Telegram and drive the long-polling loop.
    ///
    /// Never returns — runs for the lifetime of the process.
    pub async fn run(self) {
        if let Err(e) = self.bot.set_my_commands(Command::bot_commands()).await {
            warn!(error = %e, "failed to register command menu");
        }

        info!("Telegram: starting long-polling dispatcher");

        let handler = dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(handle_command),
            )
            .branch(Update::filter_message().endpoint(handle_text))
            .branch(Update::filter_callback_query().endpoint(handle_callback));

        Dispatcher::builder(self.bot, handler)
            .dependencies(dptree::deps![Arc::clone(&self.ctx)])
            .default_handler(|_upd| async {})
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}
