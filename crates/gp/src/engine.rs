//! Ledger policy: period staleness, reset and debit.
//!
//! The engine owns no process-wide state. Every operation reads the persisted
//! record, normalizes it against the current period and writes back whatever
//! changed before returning. Operations take `&mut self`, which makes the
//! read-normalize-write sequence exclusive for the lifetime of the borrow.
//!
//! Storage failures never reach the caller. The engine keeps the last record it
//! normalized or wrote; that copy stands in for storage when a read fails and
//! takes precedence over storage while a write has not landed. Without it a
//! failed write would leave an already-spent balance on disk.

use seri_arcade_core::{Gp, PeriodClock, PeriodKey};
use seri_arcade_infra::KeyValueStore;

use crate::error::{DeductOutcome, LedgerError};
use crate::record::{GP_STORAGE_KEY, LedgerState, PersistedLedgerRecord};

/// How many times a record write is attempted before giving up.
pub const WRITE_ATTEMPTS: u32 = 3;

#[derive(Debug)]
pub struct LedgerEngine<S, C> {
    storage: S,
    clock: C,
    last_known: Option<PersistedLedgerRecord>,
    unsynced: bool,
}

impl<S, C> LedgerEngine<S, C>
where
    S: KeyValueStore,
    C: PeriodClock,
{
    pub fn new(storage: S, clock: C) -> Self {
        Self {
            storage,
            clock,
            last_known: None,
            unsynced: false,
        }
    }

    /// Read the record, resetting it first if it belongs to an earlier period
    /// (or does not exist yet).
    pub fn load(&mut self, daily_amount: Gp) -> LedgerState {
        let (record, was_reset) = self.normalized(daily_amount);
        LedgerState::from_record(record, was_reset)
    }

    /// Debit `amount` from the current-period balance.
    ///
    /// Negative amounts and amounts above the balance are rejected without a
    /// partial debit.
    pub fn deduct(&mut self, amount: i64, daily_amount: Gp) -> DeductOutcome {
        let (record, _) = self.normalized(daily_amount);

        let requested = match Gp::try_from_signed(amount) {
            Ok(requested) => requested,
            Err(_) => {
                tracing::warn!(amount, "rejected GP debit with invalid amount");
                return DeductOutcome::Rejected {
                    balance: record.balance,
                    reason: LedgerError::InvalidAmount { amount },
                };
            }
        };

        let new_balance = match record.balance.checked_debit(requested) {
            Ok(new_balance) => new_balance,
            Err(_) => {
                tracing::debug!(
                    requested = requested.value(),
                    available = record.balance.value(),
                    "rejected GP debit: insufficient funds"
                );
                return DeductOutcome::Rejected {
                    balance: record.balance,
                    reason: LedgerError::InsufficientFunds {
                        requested,
                        available: record.balance,
                    },
                };
            }
        };

        let updated = PersistedLedgerRecord {
            balance: new_balance,
            period_key: record.period_key,
        };
        self.persist(updated);

        tracing::debug!(
            amount = requested.value(),
            balance = new_balance.value(),
            "debited GP"
        );
        DeductOutcome::Debited { new_balance }
    }

    /// Reset to `daily_amount` for the current period regardless of what is
    /// stored.
    pub fn reset_with(&mut self, daily_amount: Gp) -> LedgerState {
        let current = self.clock.current_period();
        let record = self.reset(daily_amount, current);
        LedgerState::from_record(record, true)
    }

    fn normalized(&mut self, daily_amount: Gp) -> (PersistedLedgerRecord, bool) {
        let current = self.clock.current_period();

        match self.current_record() {
            Some(record) if !record.is_stale(&current) => {
                self.last_known = Some(record.clone());
                (record, false)
            }
            Some(record) => {
                tracing::info!(
                    stored_period = %record.period_key,
                    current_period = %current,
                    "GP record is from an earlier period; resetting"
                );
                (self.reset(daily_amount, current), true)
            }
            None => (self.reset(daily_amount, current), true),
        }
    }

    fn reset(&mut self, daily_amount: Gp, period_key: PeriodKey) -> PersistedLedgerRecord {
        let record = PersistedLedgerRecord::fresh(daily_amount, period_key);
        self.persist(record.clone());
        tracing::info!(
            balance = record.balance.value(),
            period = %record.period_key,
            "GP balance reset"
        );
        record
    }

    /// The record operations start from: the in-memory copy while a write is
    /// pending, otherwise storage, falling back to the in-memory copy when
    /// storage cannot be read.
    fn current_record(&self) -> Option<PersistedLedgerRecord> {
        if self.unsynced {
            return self.last_known.clone();
        }

        match self.storage.get(GP_STORAGE_KEY) {
            Ok(Some(raw)) => PersistedLedgerRecord::decode(&raw),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    cached = self.last_known.is_some(),
                    "failed to read GP record; using last known record"
                );
                self.last_known.clone()
            }
        }
    }

    fn persist(&mut self, record: PersistedLedgerRecord) {
        self.unsynced = !self.write(&record);
        self.last_known = Some(record);
    }

    fn write(&self, record: &PersistedLedgerRecord) -> bool {
        let payload = match record.encode() {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(error = %err, "failed to encode GP record");
                return false;
            }
        };

        for attempt in 1..=WRITE_ATTEMPTS {
            match self.storage.set(GP_STORAGE_KEY, &payload) {
                Ok(()) => return true,
                Err(err) => {
                    tracing::warn!(attempt, error = %err, "failed to write GP record");
                }
            }
        }
        tracing::error!(
            attempts = WRITE_ATTEMPTS,
            "giving up on GP record write; balance is held in memory only"
        );
        false
    }
}
