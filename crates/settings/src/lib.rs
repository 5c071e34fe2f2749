//! User settings for the portal shell (nickname, avatar, difficulty, daily GP).
//!
//! Settings are persisted as one JSON document under [`SETTINGS_STORAGE_KEY`].
//! The daily GP value is what the ledger consumes as its allowance, through
//! the [`seri_arcade_core::AllowanceSource`] implementation on
//! [`SettingsService`].

pub mod constants;
pub mod difficulty;
pub mod service;
pub mod settings;

pub use constants::{
    DAILY_GP_OPTIONS, DEFAULT_AVATAR, DEFAULT_DAILY_GP, DEFAULT_DIFFICULTY, DEFAULT_NICKNAME,
    MAX_NICKNAME_LEN, SETTINGS_STORAGE_KEY, is_known_avatar,
};
pub use difficulty::{diff_value, difficulty_label};
pub use service::SettingsService;
pub use settings::{Settings, SettingsError};
