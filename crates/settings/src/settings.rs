use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use seri_arcade_core::Gp;
use seri_arcade_infra::StorageError;

use crate::constants::{
    DEFAULT_AVATAR, DEFAULT_DAILY_GP, DEFAULT_DIFFICULTY, DEFAULT_NICKNAME, MAX_DIFFICULTY,
    MAX_NICKNAME_LEN, MIN_DIFFICULTY, is_daily_gp_option, is_known_avatar,
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unknown avatar: {0}")]
    UnknownAvatar(String),

    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The user's persisted preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub nickname: String,
    pub avatar: String,
    pub difficulty: u8,
    pub daily_gp: Gp,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            nickname: DEFAULT_NICKNAME.to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
            difficulty: DEFAULT_DIFFICULTY,
            daily_gp: DEFAULT_DAILY_GP,
        }
    }
}

impl Settings {
    /// Decode a stored document, normalizing each field independently.
    ///
    /// A field that is missing or of the wrong type falls back to its own
    /// default without affecting the others. A document that is not a JSON
    /// object yields the defaults.
    pub fn from_stored(raw: &str) -> Self {
        let document = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(document)) => document,
            Ok(other) => {
                tracing::warn!(
                    kind = json_kind(&other),
                    "stored settings are not an object; using defaults"
                );
                return Self::default();
            }
            Err(err) => {
                tracing::warn!(error = %err, "stored settings are unreadable; using defaults");
                return Self::default();
            }
        };

        let field = |name: &str| document.get(name);

        Self {
            nickname: field("nickname")
                .and_then(Value::as_str)
                .filter(|n| !n.is_empty())
                .map_or_else(|| DEFAULT_NICKNAME.to_string(), str::to_string),
            avatar: field("avatar")
                .and_then(Value::as_str)
                .filter(|a| is_known_avatar(a))
                .map_or_else(|| DEFAULT_AVATAR.to_string(), str::to_string),
            difficulty: field("difficulty")
                .and_then(Value::as_f64)
                .map(normalize_difficulty)
                .unwrap_or(DEFAULT_DIFFICULTY),
            daily_gp: field("dailyGp")
                .and_then(Value::as_u64)
                .map(Gp::new)
                .map(normalize_daily_gp)
                .unwrap_or(DEFAULT_DAILY_GP),
        }
    }

    pub fn to_stored(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Trim, cap at [`MAX_NICKNAME_LEN`] characters, fall back to the default.
pub fn normalize_nickname(nickname: &str) -> String {
    let trimmed: String = nickname.trim().chars().take(MAX_NICKNAME_LEN).collect();
    if trimmed.is_empty() {
        DEFAULT_NICKNAME.to_string()
    } else {
        trimmed
    }
}

/// Round and clamp to the supported range.
pub fn normalize_difficulty(difficulty: f64) -> u8 {
    if difficulty.is_nan() {
        return DEFAULT_DIFFICULTY;
    }
    difficulty
        .round()
        .clamp(f64::from(MIN_DIFFICULTY), f64::from(MAX_DIFFICULTY)) as u8
}

pub fn normalize_daily_gp(amount: Gp) -> Gp {
    if is_daily_gp_option(amount) {
        amount
    } else {
        DEFAULT_DAILY_GP
    }
}
