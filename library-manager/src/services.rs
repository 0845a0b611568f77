//! Capabilities the manager consumes from the rest of the system.
//!
//! The manager only needs to know whether an account may borrow and a way to
//! tell a user what happened. Both are synchronous and infallible from the
//! manager's point of view.

use std::collections::HashSet;

/// Answers whether a user account is allowed to borrow
pub trait UserStatusChecker {
    /// Whether the account identified by `user_id` is active
    fn is_user_active(&self, user_id: &str) -> bool;
}

/// Delivers a message to a user, fire-and-forget
pub trait Notifier {
    /// Send `message` to `user_id`
    fn notify_user(&self, user_id: &str, message: &str);
}

/// In-memory set of active accounts
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    /// Identifiers of accounts in good standing
    active: HashSet<String>,
}

impl UserDirectory {
    /// Create an empty directory where nobody is active
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an account as active
    pub fn activate(&mut self, user_id: impl Into<String>) {
        self.active.insert(user_id.into());
    }

    /// Mark an account as inactive, returning whether it was active before
    pub fn deactivate(&mut self, user_id: &str) -> bool {
        self.active.remove(user_id)
    }
}

impl<S: Into<String>> FromIterator<S> for UserDirectory {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { active: iter.into_iter().map(Into::into).collect() }
    }
}

impl UserStatusChecker for UserDirectory {
    fn is_user_active(&self, user_id: &str) -> bool {
        self.active.contains(user_id)
    }
}

/// Notifier that writes every message to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_user(&self, user_id: &str, message: &str) {
        log::info!("NOTIFICATION to {user_id}: {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_membership() {
        let mut directory: UserDirectory = ["alice", "bob"].into_iter().collect();
        assert!(directory.is_user_active("alice"));
        assert!(!directory.is_user_active("carol"));

        directory.activate("carol");
        assert!(directory.is_user_active("carol"));

        assert!(directory.deactivate("bob"));
        assert!(!directory.deactivate("bob"));
        assert!(!directory.is_user_active("bob"));
    }
}
