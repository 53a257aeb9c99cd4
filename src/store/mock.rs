use super::{ConversationStore, UserStore};
use crate::models::{Billing, ConversationMessage, User};
use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Clone)]
pub struct MockUserStore {
    users: Arc<Mutex<HashMap<String, User>>>,
    set_admin_count: Arc<Mutex<usize>>,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
            set_admin_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_user(self, user: User) -> Self {
        self.users.lock().unwrap().insert(user.email.clone(), user);
        self
    }

    pub fn get_set_admin_count(&self) -> usize {
        *self.set_admin_count.lock().unwrap()
    }
}

impl Default for MockUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(email).cloned())
    }

    async fn set_admin(&self, email: &str) -> Result<u64> {
        let mut count = self.set_admin_count.lock().unwrap();
        *count += 1;

        let mut users = self.users.lock().unwrap();
        match users.get_mut(email) {
            Some(user) if !user.admin => {
                user.admin = true;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[derive(Clone)]
pub struct MockConversationStore {
    messages: Arc<Mutex<Vec<ConversationMessage>>>,
}

impl MockConversationStore {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_messages(&self) -> Vec<ConversationMessage> {
        self.messages.lock().unwrap().clone()
    }
}

impl Default for MockConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationStore for MockConversationStore {
    async fn save_image_message(
        &self,
        user_email: &str,
        model: &str,
        prompt: &str,
        _image: &[u8],
        billing: Billing,
    ) -> Result<ConversationMessage> {
        let message = ConversationMessage {
            id: Uuid::new_v4().to_string(),
            user_email: user_email.to_string(),
            model: model.to_string(),
            prompt: prompt.to_string(),
            image_path: format!("/uploads/generated/{}.png", Uuid::new_v4()),
            billing,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
        };

        self.messages.lock().unwrap().push(message.clone());
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, admin: bool) -> User {
        User {
            email: email.to_string(),
            admin,
            credits: 5,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_mock_user_store_lookup() {
        let store = MockUserStore::new().with_user(user("a@b.c", false));

        assert!(store.find_by_email("a@b.c").await.unwrap().is_some());
        assert!(store.find_by_email("missing@b.c").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mock_set_admin_reports_modified_count() {
        let store = MockUserStore::new().with_user(user("a@b.c", false));

        assert_eq!(store.set_admin("a@b.c").await.unwrap(), 1);
        assert_eq!(store.set_admin("a@b.c").await.unwrap(), 0);
        assert_eq!(store.set_admin("missing@b.c").await.unwrap(), 0);
        assert_eq!(store.get_set_admin_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_conversation_store_records_messages() {
        let store = MockConversationStore::new();
        let billing = Billing {
            input_units: 10,
            output_units: 1,
        };

        let message = store
            .save_image_message("a@b.c", "some/model", "a fox", &[1, 2, 3], billing)
            .await
            .unwrap();

        assert_eq!(message.user_email, "a@b.c");
        assert_eq!(message.billing, billing);
        assert_eq!(store.get_messages().len(), 1);
    }
}
