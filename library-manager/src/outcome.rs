use serde::{Deserialize, Serialize};

/// Result of asking to borrow a book
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum BorrowOutcome {
    /// A copy was handed to the user
    Borrowed,
    /// The user's account is not active
    AccountInactive,
    /// No copies of the book are on the shelf
    OutOfStock,
}

impl BorrowOutcome {
    /// Whether a copy changed hands
    #[must_use]
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Self::Borrowed)
    }

    /// Get a human-readable description of the outcome
    #[must_use]
    pub fn get_description(&self) -> String {
        match self {
            Self::Borrowed => "Book was borrowed".to_string(),
            Self::AccountInactive => "Borrow refused: account is not active".to_string(),
            Self::OutOfStock => "Borrow refused: no copies available".to_string(),
        }
    }
}

/// Result of handing a book back
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ReturnOutcome {
    /// The copy went back on the shelf
    Returned,
    /// Nobody holds this book
    NotBorrowed,
    /// The book is held by someone else
    HeldByOtherUser {
        /// User currently holding the book
        holder: String,
    },
}

impl ReturnOutcome {
    /// Whether the copy went back on the shelf
    #[must_use]
    pub fn is_returned(&self) -> bool {
        matches!(self, Self::Returned)
    }

    /// Get a human-readable description of the outcome
    #[must_use]
    pub fn get_description(&self) -> String {
        match self {
            Self::Returned => "Book was returned".to_string(),
            Self::NotBorrowed => "Return refused: book is not borrowed".to_string(),
            Self::HeldByOtherUser { holder } => {
                format!("Return refused: book is held by {holder}")
            }
        }
    }
}
