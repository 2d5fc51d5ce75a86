//! Inline keyboards and their callback-data encoding.
//!
//! The subscribe keyboard carries the working snapshot in every button's
//! callback data (a 3-bit mask), so each tap is a pure transition on
//! explicit state — nothing is stored server-side until Done/Clear.

use smartify_prefs::{PrefFlags, ToggleKey};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use url::Url;

pub const CB_OPEN: &str = "sub:open";
pub const CB_DONE_PREFIX: &str = "sub:done:";
pub const CB_TOGGLE_PREFIX: &str = "sub:toggle:";
pub const CB_CLEAR: &str = "sub:clear";
pub const CB_NOP: &str = "sub:nop";

fn toggle_button(key: ToggleKey, flags: PrefFlags) -> InlineKeyboardButton {
    let marker = if flags.get(key) { "✅" } else { "⭕️" };
    InlineKeyboardButton::callback(
        format!("{marker} {}", key.label()),
        format!("{CB_TOGGLE_PREFIX}{key}:{}", flags.to_bits()),
    )
}

/// The toggle view: one button per flag, save/clear row, and a footer
/// showing the delivery time (a no-op button, informational only).
pub fn subscribe_keyboard(flags: PrefFlags, daily_label: &str) -> InlineKeyboardMarkup {
    let bits = flags.to_bits();
    InlineKeyboardMarkup::new(vec![
        vec![
            toggle_button(ToggleKey::JobsAu, flags),
            toggle_button(ToggleKey::JobsIn, flags),
        ],
        vec![toggle_button(ToggleKey::AiTools, flags)],
        vec![
            InlineKeyboardButton::callback("✅ Done (save)", format!("{CB_DONE_PREFIX}{bits}")),
            InlineKeyboardButton::callback("🛑 Unsubscribe all", CB_CLEAR),
        ],
        vec![InlineKeyboardButton::callback(
            format!("⏰ Daily at {daily_label}"),
            CB_NOP,
        )],
    ])
}

/// Keyboard under the /start welcome message.
pub fn start_keyboard(channel_id: Option<&str>) -> InlineKeyboardMarkup {
    let mut rows = vec![vec![InlineKeyboardButton::callback("✅ Subscribe", CB_OPEN)]];
    if let Some(url) = channel_id.and_then(channel_url) {
        rows.push(vec![InlineKeyboardButton::url("📢 Open Channel", url)]);
    }
    InlineKeyboardMarkup::new(rows)
}

/// Join button attached to the channel broadcast. Only public @usernames
/// have a t.me link; numeric chat IDs get no keyboard.
pub fn channel_keyboard(channel_id: &str) -> Option<InlineKeyboardMarkup> {
    let url = channel_url(channel_id)?;
    Some(InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::url("📢 Join the channel", url),
    ]]))
}

fn channel_url(channel_id: &str) -> Option<Url> {
    let name = channel_id.strip_prefix('@').unwrap_or(channel_id);
    if name.is_empty() || name.chars().all(|c| c.is_ascii_digit() || c == '-') {
        return None;
    }
    Url::parse(&format!("https://t.me/{name}")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_buttons_embed_the_snapshot() {
        let flags = PrefFlags {
            jobs_au: true,
            jobs_in: false,
            ai_tools: true,
        };
        let kb = subscribe_keyboard(flags, "09:00 Australia/Melbourne");
        let all_data: Vec<String> = kb
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|b| match &b.kind {
                teloxide::types::InlineKeyboardButtonKind::CallbackData(d) => Some(d.clone()),
                _ => None,
            })
            .collect();
        assert!(all_data.contains(&"sub:toggle:jobs_au:5".to_string()));
        assert!(all_data.contains(&"sub:done:5".to_string()));
        assert!(all_data.contains(&CB_CLEAR.to_string()));
        assert!(all_data.contains(&CB_NOP.to_string()));
    }

    #[test]
    fn markers_reflect_flag_state() {
        let flags = PrefFlags {
            jobs_au: true,
            ..PrefFlags::default()
        };
        let kb = subscribe_keyboard(flags, "09:00 UTC");
        let labels: Vec<&str> = kb
            .inline_keyboard
            .iter()
            .flatten()
            .map(|b| b.text.as_str())
            .collect();
        assert!(labels.contains(&"✅ Jobs AU"));
        assert!(labels.contains(&"⭕️ Jobs IN"));
    }

    #[test]
    fn footer_shows_delivery_time() {
        let kb = subscribe_keyboard(PrefFlags::default(), "07:30 Asia/Kolkata");
        let footer = &kb.inline_keyboard.last().unwrap()[0];
        assert_eq!(footer.text, "⏰ Daily at 07:30 Asia/Kolkata");
    }

    #[test]
    fn channel_url_only_for_usernames() {
        assert!(channel_url("@smartify_jobs").is_some());
        assert!(channel_url("smartify_jobs").is_some());
        assert!(channel_url("-1001234567890").is_none());
        assert!(channel_url("").is_none());
    }

    #[test]
    fn start_keyboard_channel_row_is_conditional() {
        assert_eq!(start_keyboard(None).inline_keyboard.len(), 1);
        assert_eq!(
            start_keyboard(Some("@smartify_jobs")).inline_keyboard.len(),
            2
        );
        // Numeric chat IDs have no public link.
        assert_eq!(
            start_keyboard(Some("-100123")).inline_keyboard.len(),
            1
        );
    }
}
