use std::{collections::HashMap, fmt};

use log::debug;

use crate::{
    error::Result,
    fee::{Fee, FeePolicy},
    outcome::{BorrowOutcome, ReturnOutcome},
    services::{Notifier, UserStatusChecker},
    snapshot::LibrarySnapshot,
};

/// Message sent when an inactive account tries to borrow
pub const ACCOUNT_INACTIVE_MESSAGE: &str = "Your account is not active.";

/// Message sent after a successful borrow
#[must_use]
pub fn borrowed_message(book_id: &str) -> String {
    format!("You have borrowed the book: {book_id}")
}

/// Message sent after a successful return
#[must_use]
pub fn returned_message(book_id: &str) -> String {
    format!("You have returned the book: {book_id}")
}

/// Library inventory with borrow tracking
///
/// Copies are counted per book, not tracked individually, and each book
/// remembers a single current borrower.
pub struct LibraryManager {
    /// Copies on the shelf per book
    book_inventory: HashMap<String, u32>,
    /// Current holder per borrowed book
    borrowed_books: HashMap<String, String>,
    /// Pricing rules for late returns
    fee_policy: FeePolicy,
    /// Account status lookup, consulted on every borrow
    user_service: Box<dyn UserStatusChecker>,
    /// Outbound channel for user messages
    notifier: Box<dyn Notifier>,
}

// Manual implementation of Debug for LibraryManager
impl fmt::Debug for LibraryManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryManager")
            .field("book_inventory", &self.book_inventory)
            .field("borrowed_books", &self.borrowed_books)
            .field("fee_policy", &self.fee_policy)
            .finish_non_exhaustive()
    }
}

impl LibraryManager {
    /// Create an empty library using the given collaborators
    #[must_use]
    pub fn new(user_service: Box<dyn UserStatusChecker>, notifier: Box<dyn Notifier>) -> Self {
        Self::from_snapshot(LibrarySnapshot::default(), user_service, notifier)
    }

    /// Create a library pre-seeded with inventory and loans
    #[must_use]
    pub fn from_snapshot(
        snapshot: LibrarySnapshot,
        user_service: Box<dyn UserStatusChecker>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            book_inventory: snapshot.inventory.into_iter().collect(),
            borrowed_books: snapshot.borrowed.into_iter().collect(),
            fee_policy: FeePolicy::default(),
            user_service,
            notifier,
        }
    }

    /// Replace the late fee pricing rules
    #[must_use]
    pub fn with_fee_policy(mut self, fee_policy: FeePolicy) -> Self {
        self.fee_policy = fee_policy;
        self
    }

    /// The late fee pricing rules in use
    #[must_use]
    pub fn fee_policy(&self) -> &FeePolicy {
        &self.fee_policy
    }

    /// Put `quantity` more copies of a book on the shelf
    pub fn add_book(&mut self, book_id: &str, quantity: u32) {
        let copies = self.book_inventory.entry(book_id.to_string()).or_insert(0);
        *copies = copies.saturating_add(quantity);
        debug!("added {quantity} copies of {book_id}, {copies} now available");
    }

    /// Number of copies of a book on the shelf, zero if it was never added
    #[must_use]
    pub fn available_copies(&self, book_id: &str) -> u32 {
        self.book_inventory.get(book_id).copied().unwrap_or(0)
    }

    /// Lend a copy of `book_id` to `user_id`, returning whether it succeeded
    pub fn borrow_book(&mut self, book_id: &str, user_id: &str) -> bool {
        self.checkout(book_id, user_id).is_borrowed()
    }

    /// Lend a copy of `book_id` to `user_id`
    ///
    /// The account status is checked first. Inactive accounts are told so;
    /// an empty shelf is refused without a message. On success the user is
    /// recorded as the book's holder and notified.
    pub fn checkout(&mut self, book_id: &str, user_id: &str) -> BorrowOutcome {
        if !self.user_service.is_user_active(user_id) {
            self.notifier.notify_user(user_id, ACCOUNT_INACTIVE_MESSAGE);
            debug!("{user_id} cannot borrow {book_id}: account is not active");
            return BorrowOutcome::AccountInactive;
        }

        let Some(copies) = self.book_inventory.get_mut(book_id).filter(|copies| **copies > 0)
        else {
            debug!("{user_id} cannot borrow {book_id}: no copies available");
            return BorrowOutcome::OutOfStock;
        };
        *copies = copies.saturating_sub(1);

        self.borrowed_books.insert(book_id.to_string(), user_id.to_string());
        self.notifier.notify_user(user_id, &borrowed_message(book_id));
        debug!("{user_id} borrowed {book_id}");
        BorrowOutcome::Borrowed
    }

    /// Take `book_id` back from `user_id`, returning whether it succeeded
    pub fn return_book(&mut self, book_id: &str, user_id: &str) -> bool {
        self.check_in(book_id, user_id).is_returned()
    }

    /// Take `book_id` back from `user_id`
    ///
    /// Only the recorded holder can return a book. Refusals change nothing
    /// and send no message.
    pub fn check_in(&mut self, book_id: &str, user_id: &str) -> ReturnOutcome {
        let outcome = match self.borrowed_books.get(book_id) {
            None => ReturnOutcome::NotBorrowed,
            Some(holder) if holder != user_id => {
                ReturnOutcome::HeldByOtherUser { holder: holder.clone() }
            }
            Some(_) => ReturnOutcome::Returned,
        };
        if !outcome.is_returned() {
            debug!("{user_id} cannot return {book_id}: {}", outcome.get_description());
            return outcome;
        }

        self.borrowed_books.remove(book_id);
        let copies = self.book_inventory.entry(book_id.to_string()).or_insert(0);
        *copies = copies.saturating_add(1);
        self.notifier.notify_user(user_id, &returned_message(book_id));
        debug!("{user_id} returned {book_id}");
        outcome
    }

    /// Price a late return
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidArgument` with the message
    /// "Overdue days cannot be negative." when `overdue_days` is negative, and
    /// `LibraryError::FeeOverflow` when the amount cannot be represented
    pub fn calculate_dynamic_late_fee(
        &self,
        overdue_days: i64,
        is_bestseller: bool,
        is_premium_member: bool,
    ) -> Result<Fee> {
        self.fee_policy.late_fee(overdue_days, is_bestseller, is_premium_member)
    }

    /// The user currently holding a book, if any
    #[must_use]
    pub fn borrower_of(&self, book_id: &str) -> Option<&str> {
        self.borrowed_books.get(book_id).map(String::as_str)
    }

    /// Whether someone currently holds a book
    #[must_use]
    pub fn is_borrowed(&self, book_id: &str) -> bool {
        self.borrowed_books.contains_key(book_id)
    }

    /// All known books with their shelf counts, ordered by id
    #[must_use]
    pub fn titles(&self) -> Vec<(&str, u32)> {
        let mut titles: Vec<_> =
            self.book_inventory.iter().map(|(book, copies)| (book.as_str(), *copies)).collect();
        titles.sort_unstable();
        titles
    }

    /// All outstanding loans as `(book, holder)`, ordered by book id
    #[must_use]
    pub fn outstanding_loans(&self) -> Vec<(&str, &str)> {
        let mut loans: Vec<_> = self
            .borrowed_books
            .iter()
            .map(|(book, holder)| (book.as_str(), holder.as_str()))
            .collect();
        loans.sort_unstable();
        loans
    }

    /// Total copies on the shelf across all books
    #[must_use]
    pub fn total_available(&self) -> u64 {
        self.book_inventory.values().fold(0_u64, |total, copies| total.saturating_add(u64::from(*copies)))
    }

    /// Copy the current inventory and loans
    #[must_use]
    pub fn snapshot(&self) -> LibrarySnapshot {
        LibrarySnapshot {
            inventory: self.book_inventory.clone().into_iter().collect(),
            borrowed: self.borrowed_books.clone().into_iter().collect(),
        }
    }
}

// Implementing display for nicer output
impl fmt::Display for LibraryManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} titles, {} copies on the shelf, {} on loan",
            self.book_inventory.len(),
            self.total_available(),
            self.borrowed_books.len()
        )
    }
}
