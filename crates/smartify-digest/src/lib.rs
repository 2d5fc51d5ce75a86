//! `smartify-digest` — daily digest content policy and schedule math.
//!
//! Transport-free: this crate decides *what* to send (which sections, in
//! which order, joined how) and *when* the daily run fires. Actually
//! delivering the text is the Telegram layer's job.

pub mod assemble;
pub mod schedule;
pub mod source;

pub use assemble::{assemble_channel_digest, assemble_user_digest, SECTION_SEPARATOR};
pub use schedule::{next_daily_run, until_next_run};
pub use source::{DigestSource, FeedDigestSource};
