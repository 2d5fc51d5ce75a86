//! `smartify-query` — turns raw user input into a normalized job [`Query`].
//!
//! Two entry points:
//!
//! | Function            | Input                                        |
//! |---------------------|----------------------------------------------|
//! | [`parse_args`]      | whitespace-split `/jobs` command arguments   |
//! | [`parse_free_text`] | an arbitrary free-form sentence              |
//!
//! Neither can fail: malformed input degrades to the defaults
//! (keyword "software engineer", country AU, no location).

pub mod args;
pub mod free;

pub use args::parse_args;
pub use free::parse_free_text;

pub use smartify_core::types::Query;
