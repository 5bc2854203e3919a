use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::CategoryId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("category name cannot be empty")]
    EmptyName,
}

/// A named bucket of questions, e.g. "Science" or "History".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
}

impl Category {
    /// # Errors
    ///
    /// Returns `CategoryError::EmptyName` if the trimmed name is empty.
    pub fn new(id: CategoryId, name: impl Into<String>) -> Result<Self, CategoryError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        Ok(Self {
            id,
            name: trimmed.to_owned(),
        })
    }

    #[must_use]
    pub fn id(&self) -> CategoryId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_display_name() {
        let category = Category::new(CategoryId::new(1), "  Science ").unwrap();
        assert_eq!(category.name(), "Science");
    }

    #[test]
    fn rejects_blank_name() {
        let err = Category::new(CategoryId::new(1), "   ").unwrap_err();
        assert_eq!(err, CategoryError::EmptyName);
    }
}
