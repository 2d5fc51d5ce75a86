//! `smartify-prefs` — per-user notification preferences.
//!
//! Three pieces:
//! - [`types`]: the three digest flags and the [`types::ToggleKey`] enum
//! - [`toggle`]: the pure subscription state machine driven by inline buttons
//! - [`db`]: the SQLite-backed store (get / upsert / all)
//!
//! [`locks::UserLocks`] serializes toggle actions per user so rapid
//! double-taps cannot race on the same working snapshot.

pub mod db;
pub mod error;
pub mod locks;
pub mod toggle;
pub mod types;

pub use db::PrefStore;
pub use error::{PrefsError, Result};
pub use locks::UserLocks;
pub use toggle::{step, SubAction, SubEffect, Transition};
pub use types::{PrefFlags, PrefUpdate, ToggleKey, UserPreferences};
