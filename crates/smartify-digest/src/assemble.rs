//! Digest message assembly.
//!
//! Sections live in one ordered table iterated exactly once, so the
//! AU-jobs → IN-jobs → AI-tools ordering holds by construction rather
//! than by three hand-written conditionals agreeing with each other.

use smartify_prefs::{PrefFlags, ToggleKey};

use crate::source::DigestSource;

/// Separator between digest sections.
pub const SECTION_SEPARATOR: &str = "\n\n—\n\n";

/// `(flag, section title)` in delivery order.
const SECTIONS: [(ToggleKey, &str); 3] = [
    (ToggleKey::JobsAu, "🔥 <b>AU Jobs</b>"),
    (ToggleKey::JobsIn, "🔥 <b>India Jobs</b>"),
    (ToggleKey::AiTools, "🤖 <b>AI Tools</b>"),
];

/// Build one user's digest.
///
/// Returns `None` when nothing should be sent: no flag enabled, or every
/// enabled section came back empty. A section is included only when its
/// flag is set *and* its fetched body is non-empty.
pub async fn assemble_user_digest<S: DigestSource + ?Sized>(
    flags: PrefFlags,
    source: &S,
) -> Option<String> {
    if !flags.any() {
        return None;
    }

    let mut parts = Vec::new();
    for (key, title) in SECTIONS {
        if !flags.get(key) {
            continue;
        }
        let body = source.section(key).await;
        if body.trim().is_empty() {
            continue;
        }
        parts.push(format!("{title}:\n\n{body}"));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(SECTION_SEPARATOR))
    }
}

/// Build the channel broadcast: all three sections regardless of any user's
/// preferences, same inclusion and ordering rules.
pub async fn assemble_channel_digest<S: DigestSource + ?Sized>(source: &S) -> Option<String> {
    let all = PrefFlags {
        jobs_au: true,
        jobs_in: true,
        ai_tools: true,
    };
    assemble_user_digest(all, source).await
}
