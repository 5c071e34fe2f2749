//! Allowance periods.
//!
//! A period key marks which allowance period a stored balance belongs to. Keys
//! are opaque: the ledger only ever compares them for equality, it never
//! parses them back into dates.

use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Opaque marker of an allowance period (e.g. `"2026-10-18"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodKey(String);

impl ValueObject for PeriodKey {}

impl PeriodKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Calendar-day key in `YYYY-MM-DD` form.
    pub fn for_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of the current allowance period.
pub trait PeriodClock: Send + Sync {
    fn current_period(&self) -> PeriodKey;
}

impl<C> PeriodClock for Arc<C>
where
    C: PeriodClock + ?Sized,
{
    fn current_period(&self) -> PeriodKey {
        (**self).current_period()
    }
}

/// Calendar day in the machine's local timezone. A new period starts at local
/// midnight.
#[derive(Debug, Copy, Clone, Default)]
pub struct LocalDayClock;

impl PeriodClock for LocalDayClock {
    fn current_period(&self) -> PeriodKey {
        PeriodKey::for_date(Local::now().date_naive())
    }
}

/// Calendar day in UTC. A new period starts at 00:00 UTC.
#[derive(Debug, Copy, Clone, Default)]
pub struct UtcDayClock;

impl PeriodClock for UtcDayClock {
    fn current_period(&self) -> PeriodKey {
        PeriodKey::for_date(Utc::now().date_naive())
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<PeriodKey>,
}

impl ManualClock {
    pub fn new(period: PeriodKey) -> Self {
        Self {
            current: Mutex::new(period),
        }
    }

    pub fn at_date(date: NaiveDate) -> Self {
        Self::new(PeriodKey::for_date(date))
    }

    /// Move the clock to another period.
    pub fn set(&self, period: PeriodKey) {
        if let Ok(mut current) = self.current.lock() {
            *current = period;
        }
    }
}

impl PeriodClock for ManualClock {
    fn current_period(&self) -> PeriodKey {
        match self.current.lock() {
            Ok(current) => current.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
