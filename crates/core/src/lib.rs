//! `seri-arcade-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the GP amount type, allowance periods and the seam through which the
//! ledger learns the configured daily allowance.

pub mod allowance;
pub mod amount;
pub mod error;
pub mod period;
pub mod value_object;

pub use allowance::{AllowanceSource, FixedAllowance};
pub use amount::Gp;
pub use error::{DomainError, DomainResult};
pub use period::{LocalDayClock, ManualClock, PeriodClock, PeriodKey, UtcDayClock};
pub use value_object::ValueObject;
