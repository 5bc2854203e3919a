use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ids::CategoryId;

/// Category restriction chosen once per quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionScope {
    All,
    Category(CategoryId),
}

impl SessionScope {
    /// Category id used on the wire; `All` is encoded as `0`.
    #[must_use]
    pub fn wire_id(self) -> u64 {
        match self {
            Self::All => 0,
            Self::Category(id) => id.value(),
        }
    }

    #[must_use]
    pub fn includes(self, category: CategoryId) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => id == category,
        }
    }
}

impl fmt::Display for SessionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Category(id) => write!(f, "category {id}"),
        }
    }
}
