//! The subscription toggle state machine.
//!
//! Pure transitions over a working snapshot of the three flags. The snapshot
//! is explicit input and output — there is no session object. Nothing is
//! persisted here; the caller persists when the transition asks for it.

use crate::types::{PrefFlags, ToggleKey};

/// An action arriving from the inline keyboard (or the `/subscribe` entry point).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubAction {
    /// Entry point: load stored flags into a fresh working snapshot.
    Open,
    /// Flip one flag in the working snapshot. Not persisted.
    Toggle(ToggleKey),
    /// Persist the working snapshot as the stored preferences.
    Done,
    /// Clear all flags and persist immediately.
    Clear,
    /// The static footer button. No state change, no re-render.
    Noop,
}

/// What the caller must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubEffect {
    /// Re-render the toggle keyboard with the post-transition snapshot.
    Render,
    /// Persist the post-transition snapshot and show a confirmation summary.
    Persist,
    /// Nothing to do.
    Ignore,
}

/// Result of applying one action to a working snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub flags: PrefFlags,
    pub effect: SubEffect,
}

/// Apply `action` to the working snapshot `flags`.
///
/// For [`SubAction::Open`] the caller passes the stored flags (or the
/// all-false default when no record exists).
pub fn step(flags: PrefFlags, action: SubAction) -> Transition {
    match action {
        SubAction::Open => Transition {
            flags,
            effect: SubEffect::Render,
        },
        SubAction::Toggle(key) => Transition {
            flags: flags.with_toggled(key),
            effect: SubEffect::Render,
        },
        SubAction::Done => Transition {
            flags,
            effect: SubEffect::Persist,
        },
        SubAction::Clear => Transition {
            flags: PrefFlags::default(),
            effect: SubEffect::Persist,
        },
        SubAction::Noop => Transition {
            flags,
            effect: SubEffect::Ignore,
        },
    }
}
