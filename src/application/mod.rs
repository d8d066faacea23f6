// Application layer - the ledger operations and their error taxonomy.
// Clients (CLI, export, tests) go through LedgerService; no storage or UI
// types cross this boundary.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
