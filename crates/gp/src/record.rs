//! Persisted ledger record.

use serde::{Deserialize, Serialize};

use seri_arcade_core::{Gp, PeriodKey};

/// Fixed storage key of the ledger record.
pub const GP_STORAGE_KEY: &str = "seri-arcade-gp";

/// Durable form of the ledger, stored as JSON:
/// `{"balance":300,"periodKey":"2026-10-18"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedLedgerRecord {
    pub balance: Gp,
    pub period_key: PeriodKey,
}

impl PersistedLedgerRecord {
    /// Record for the start of a period.
    pub fn fresh(daily_amount: Gp, period_key: PeriodKey) -> Self {
        Self {
            balance: daily_amount,
            period_key,
        }
    }

    pub fn is_stale(&self, current: &PeriodKey) -> bool {
        &self.period_key != current
    }

    /// Decode a stored payload; anything unparseable (including a negative
    /// balance) is treated as absent.
    pub fn decode(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(error = %err, "stored GP record is corrupt; treating as absent");
                None
            }
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// What the engine hands back after normalizing the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerState {
    pub balance: Gp,
    pub period_key: PeriodKey,
    /// Whether this call replaced the stored record with a fresh one.
    pub was_reset: bool,
}

impl LedgerState {
    pub(crate) fn from_record(record: PersistedLedgerRecord, was_reset: bool) -> Self {
        Self {
            balance: record.balance,
            period_key: record.period_key,
            was_reset,
        }
    }
}
