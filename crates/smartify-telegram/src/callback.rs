//! Callback-query handler: drives the subscription toggle state machine.

use std::sync::Arc;

use smartify_prefs::{step, PrefFlags, PrefUpdate, SubAction, SubEffect, ToggleKey};
use teloxide::prelude::*;
use tracing::warn;

use crate::context::AppContext;
use crate::keyboard::{
    subscribe_keyboard, CB_CLEAR, CB_DONE_PREFIX, CB_NOP, CB_OPEN, CB_TOGGLE_PREFIX,
};

/// A decoded callback: the action plus the working snapshot carried in the
/// button data (absent for actions that don't need one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedCallback {
    pub action: SubAction,
    pub snapshot: Option<PrefFlags>,
}

/// Decode callback data. Unknown data yields `None` and is ignored upstream.
pub fn parse_callback(data: &str) -> Option<ParsedCallback> {
    if data == CB_OPEN {
        return Some(ParsedCallback {
            action: SubAction::Open,
            snapshot: None,
        });
    }
    if data == CB_NOP {
        return Some(ParsedCallback {
            action: SubAction::Noop,
            snapshot: None,
        });
    }
    if data == CB_CLEAR {
        return Some(ParsedCallback {
            action: SubAction::Clear,
            snapshot: None,
        });
    }
    if let Some(bits) = data.strip_prefix(CB_DONE_PREFIX) {
        let bits: u8 = bits.parse().ok()?;
        return Some(ParsedCallback {
            action: SubAction::Done,
            snapshot: Some(PrefFlags::from_bits(bits)),
        });
    }
    if let Some(rest) = data.strip_prefix(CB_TOGGLE_PREFIX) {
        let (key, bits) = rest.split_once(':')?;
        let key: ToggleKey = key.parse().ok()?;
        let bits: u8 = bits.parse().ok()?;
        return Some(ParsedCallback {
            action: SubAction::Toggle(key),
            snapshot: Some(PrefFlags::from_bits(bits)),
        });
    }
    None
}

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    ctx: Arc<AppContext>,
) -> ResponseResult<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(parsed) = q.data.as_deref().and_then(parse_callback) else {
        return Ok(());
    };
    let Some(message) = q.message else {
        return Ok(());
    };
    let user_id = q.from.id.0 as i64;
    let chat_id = message.chat().id;
    let message_id = message.id();

    // Serialize per user: a rapid double-tap must not interleave two
    // read-modify-write sequences on the same snapshot.
    let _guard = ctx.locks.acquire(user_id).await;

    // Open (and any action from a stale keyboard without a snapshot) starts
    // from the stored preferences.
    let flags_in = match parsed.snapshot {
        Some(flags) => flags,
        None => match ctx.store.get(user_id) {
            Ok(prefs) => prefs.flags,
            Err(e) => {
                warn!(user_id, error = %e, "preference load failed; ignoring callback");
                return Ok(());
            }
        },
    };

    let transition = step(flags_in, parsed.action);
    match transition.effect {
        SubEffect::Ignore => {}
        SubEffect::Render => {
            let kb = subscribe_keyboard(transition.flags, &ctx.daily_label());
            if parsed.action == SubAction::Open {
                bot.edit_message_text(chat_id, message_id, "Choose what you want to receive daily:")
                    .reply_markup(kb)
                    .await?;
            } else {
                bot.edit_message_reply_markup(chat_id, message_id)
                    .reply_markup(kb)
                    .await?;
            }
        }
        SubEffect::Persist => {
            if let Err(e) = ctx
                .store
                .upsert(user_id, PrefUpdate::flags(transition.flags))
            {
                warn!(user_id, error = %e, "preference save failed");
                return Ok(());
            }
            let confirmation = if parsed.action == SubAction::Clear {
                "Unsubscribed from all.".to_string()
            } else {
                format!("Saved: {}.", transition.flags.summary())
            };
            bot.edit_message_text(chat_id, message_id, confirmation)
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_actions_parse() {
        assert_eq!(
            parse_callback("sub:open").unwrap().action,
            SubAction::Open
        );
        assert_eq!(parse_callback("sub:nop").unwrap().action, SubAction::Noop);
        assert_eq!(
            parse_callback("sub:clear").unwrap().action,
            SubAction::Clear
        );
    }

    #[test]
    fn toggle_carries_key_and_snapshot() {
        let parsed = parse_callback("sub:toggle:jobs_in:5").unwrap();
        assert_eq!(parsed.action, SubAction::Toggle(ToggleKey::JobsIn));
        assert_eq!(parsed.snapshot, Some(PrefFlags::from_bits(5)));
    }

    #[test]
    fn done_carries_snapshot() {
        let parsed = parse_callback("sub:done:7").unwrap();
        assert_eq!(parsed.action, SubAction::Done);
        assert_eq!(parsed.snapshot, Some(PrefFlags::from_bits(7)));
    }

    #[test]
    fn garbage_is_rejected() {
        for data in [
            "",
            "sub:",
            "sub:toggle:",
            "sub:toggle:jobs_au",
            "sub:toggle:jobs_us:3",
            "sub:done:x",
            "something:else",
        ] {
            assert!(parse_callback(data).is_none(), "accepted: {data:?}");
        }
    }

    #[test]
    fn keyboard_data_round_trips() {
        let flags = PrefFlags {
            jobs_au: true,
            jobs_in: true,
            ai_tools: false,
        };
        let kb = subscribe_keyboard(flags, "09:00 UTC");
        for button in kb.inline_keyboard.iter().flatten() {
            if let teloxide::types::InlineKeyboardButtonKind::CallbackData(data) = &button.kind {
                let parsed = parse_callback(data).expect("keyboard produced unparseable data");
                if let Some(snapshot) = parsed.snapshot {
                    assert_eq!(snapshot, flags);
                }
            }
        }
    }
}
