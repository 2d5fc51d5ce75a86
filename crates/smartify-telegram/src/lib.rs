pub mod adapter;
pub mod callback;
pub mod commands;
pub mod context;
pub mod keyboard;
pub mod push;
pub mod send;
pub mod text;

pub use adapter::TelegramAdapter;
pub use context::AppContext;
