mod account;
mod expense;
mod ledger;
mod money;
mod receipt;

pub use account::*;
pub use expense::*;
pub use ledger::*;
pub use money::*;
pub use receipt::*;
