//! Domain model and the settlement engine.
//!
//! Nothing in this module performs I/O; the ledger store is only described
//! here as a port (`ports::LedgerStore`).

pub mod currency;
pub mod expense;
pub mod format;
pub mod ledger;
pub mod money;
pub mod participant;
pub mod ports;
pub mod settlement;
