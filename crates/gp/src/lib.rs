//! GP (Game Points) ledger.
//!
//! - [`engine`]: pure staleness/reset/debit policy over the persisted record.
//! - [`store`]: the live balance + load status the rest of the portal talks to.
//!
//! A balance belongs to one allowance period. When the period changes, the
//! balance is reset to the configured daily allowance before anything else
//! reads or debits it.

pub mod engine;
pub mod error;
pub mod record;
pub mod store;

pub use engine::{LedgerEngine, WRITE_ATTEMPTS};
pub use error::{DeductOutcome, LedgerError};
pub use record::{GP_STORAGE_KEY, LedgerState, PersistedLedgerRecord};
pub use store::{GpSnapshot, GpStore};
