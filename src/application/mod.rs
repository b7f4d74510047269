//! Application layer orchestrating the ledger store and the settlement engine.
//!
//! This module defines the `SettlementService`, the primary entry point for
//! importing a ledger and settling it.

pub mod engine;
