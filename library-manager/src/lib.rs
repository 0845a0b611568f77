//! In-memory library inventory with borrow tracking and dynamic late fees.
//!
//! This crate provides a [`LibraryManager`] that keeps per-title copy counts,
//! records who holds each borrowed title, and prices late returns. Account
//! lookups and user notifications are injected through the [`UserStatusChecker`]
//! and [`Notifier`] capabilities.

pub mod error;
pub mod fee;
pub mod manager;
pub mod outcome;
pub mod services;
pub mod snapshot;

pub use error::{LibraryError, Result};
pub use fee::{Fee, FeePolicy, Multiplier};
pub use manager::LibraryManager;
pub use outcome::{BorrowOutcome, ReturnOutcome};
pub use services::{LogNotifier, Notifier, UserDirectory, UserStatusChecker};
pub use snapshot::LibrarySnapshot;
