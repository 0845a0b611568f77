use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Plain view of a manager's inventory and outstanding loans
///
/// Used to seed a [`LibraryManager`](crate::LibraryManager) in one step and
/// to inspect its state. Maps are ordered so that serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibrarySnapshot {
    /// Copies on the shelf per book
    pub inventory: BTreeMap<String, u32>,
    /// Current holder per borrowed book
    pub borrowed: BTreeMap<String, String>,
}

impl LibrarySnapshot {
    /// Create an empty snapshot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of copies on the shelf for a book
    #[must_use]
    pub fn with_copies(mut self, book_id: impl Into<String>, copies: u32) -> Self {
        self.inventory.insert(book_id.into(), copies);
        self
    }

    /// Record that `user_id` holds `book_id`
    #[must_use]
    pub fn with_loan(mut self, book_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        self.borrowed.insert(book_id.into(), user_id.into());
        self
    }

    /// Parse a snapshot from JSON
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Config` if the document is not a valid snapshot
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the snapshot as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Config` if serialization fails
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::LibraryError;

    #[test]
    fn test_builder_and_json() {
        let snapshot = LibrarySnapshot::new()
            .with_copies("book1", 5)
            .with_copies("book2", 3)
            .with_loan("book1", "user1");

        let json = snapshot.to_json_pretty().unwrap();
        let parsed = LibrarySnapshot::from_json_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let parsed = LibrarySnapshot::from_json_str(r#"{ "inventory": { "book1": 2 } }"#).unwrap();
        assert_eq!(parsed.inventory.get("book1"), Some(&2));
        assert!(parsed.borrowed.is_empty());
    }

    #[test]
    fn test_negative_copies_rejected() {
        let result = LibrarySnapshot::from_json_str(r#"{ "inventory": { "book1": -1 } }"#);
        assert!(matches!(result, Err(LibraryError::Config(_))));
    }
}
