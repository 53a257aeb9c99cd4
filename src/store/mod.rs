//! Persistence against the MongoDB document store.
//!
//! User records are created by registration elsewhere; this crate reads
//! them, flips the admin flag, and appends conversation messages.

pub mod mock;
pub mod mongo;

pub use mock::{MockConversationStore, MockUserStore};
pub use mongo::{MongoConversationStore, MongoUserStore};

use crate::models::{Billing, ConversationMessage, User};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Set the admin flag on the user with this email. Returns the number
    /// of records modified (0 when the flag was already set or the user is
    /// gone).
    async fn set_admin(&self, email: &str) -> Result<u64>;
}

#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Persist generated image bytes and record a conversation message
    /// referencing them.
    async fn save_image_message(
        &self,
        user_email: &str,
        model: &str,
        prompt: &str,
        image: &[u8],
        billing: Billing,
    ) -> Result<ConversationMessage>;
}

/// Result of one run of the admin promotion procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoteOutcome {
    NotFound,
    AlreadyAdmin,
    /// Promoted, with the literal modified-record count from the store.
    Promoted(u64),
    /// The record matched but nothing was modified.
    Unchanged,
}

/// Ensure the user with this email is an admin.
///
/// A single lookup followed by at most one field update; no partial state
/// to roll back.
pub async fn promote_to_admin(store: &dyn UserStore, email: &str) -> Result<PromoteOutcome> {
    let user = match store.find_by_email(email).await? {
        Some(user) => user,
        None => return Ok(PromoteOutcome::NotFound),
    };

    if user.admin {
        return Ok(PromoteOutcome::AlreadyAdmin);
    }

    let modified = store.set_admin(email).await?;
    if modified > 0 {
        Ok(PromoteOutcome::Promoted(modified))
    } else {
        Ok(PromoteOutcome::Unchanged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn user(email: &str, admin: bool) -> User {
        User {
            email: email.to_string(),
            admin,
            credits: 0,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_promote_unknown_user_mutates_nothing() {
        let store = MockUserStore::new();

        let outcome = promote_to_admin(&store, "ghost@example.com").await.unwrap();

        assert_eq!(outcome, PromoteOutcome::NotFound);
        assert_eq!(store.get_set_admin_count(), 0);
    }

    #[tokio::test]
    async fn test_promote_is_idempotent_for_admins() {
        let store = MockUserStore::new().with_user(user("admin@example.com", true));

        let outcome = promote_to_admin(&store, "admin@example.com").await.unwrap();

        assert_eq!(outcome, PromoteOutcome::AlreadyAdmin);
        assert_eq!(store.get_set_admin_count(), 0);
    }

    #[tokio::test]
    async fn test_promote_sets_flag_once() {
        let store = MockUserStore::new().with_user(user("user@example.com", false));

        let outcome = promote_to_admin(&store, "user@example.com").await.unwrap();

        assert_eq!(outcome, PromoteOutcome::Promoted(1));
        assert!(store.find_by_email("user@example.com").await.unwrap().unwrap().admin);

        // Second run is a no-op.
        let outcome = promote_to_admin(&store, "user@example.com").await.unwrap();
        assert_eq!(outcome, PromoteOutcome::AlreadyAdmin);
        assert_eq!(store.get_set_admin_count(), 1);
    }
}
