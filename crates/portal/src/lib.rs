//! `seri-arcade-portal`
//!
//! **Responsibility:** composition root of the portal shell.
//!
//! Wires configuration, local storage, user settings and the GP ledger into a
//! single [`Portal`] context, and hosts the two flows that touch the ledger:
//! starting a paid play session and changing the daily allowance.

pub mod context;

pub use context::{Portal, PortalError, PortalLedger, SharedClock, SharedSettings, SharedStorage};
