use serde::{Deserialize, Serialize};

pub type AccountId = i64;

/// Sentinel id meaning "no account selected". Stored row ids start at 1,
/// so the sentinel can never collide with a real account.
pub const UNSELECTED_ACCOUNT: AccountId = 0;

/// A named account that owns a set of expenses. Accounts are immutable once
/// created; the only mutation is deletion, which also removes every owned
/// expense. Names are not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
}

impl Account {
    /// Create a new account. The id is assigned by the repository on insert.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UNSELECTED_ACCOUNT,
            name: name.into(),
        }
    }
}
