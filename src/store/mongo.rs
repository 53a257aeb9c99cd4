use super::{ConversationStore, UserStore};
use crate::models::{Billing, ConversationMessage, User};
use crate::Result;
use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::doc;
use mongodb::{Collection, Database};
use std::path::PathBuf;
use uuid::Uuid;

pub struct MongoUserStore {
    users: Collection<User>,
}

impl MongoUserStore {
    pub fn new(db: &Database) -> Self {
        Self {
            users: db.collection("users"),
        }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.find_one(doc! { "email": email }).await?)
    }

    async fn set_admin(&self, email: &str) -> Result<u64> {
        let result = self
            .users
            .update_one(doc! { "email": email }, doc! { "$set": { "admin": true } })
            .await?;
        Ok(result.modified_count)
    }
}

pub struct MongoConversationStore {
    conversations: Collection<ConversationMessage>,
    upload_dir: PathBuf,
}

impl MongoConversationStore {
    pub fn new(db: &Database, upload_dir: PathBuf) -> Self {
        Self {
            conversations: db.collection("conversations"),
            upload_dir,
        }
    }
}

#[async_trait]
impl ConversationStore for MongoConversationStore {
    async fn save_image_message(
        &self,
        user_email: &str,
        model: &str,
        prompt: &str,
        image: &[u8],
        billing: Billing,
    ) -> Result<ConversationMessage> {
        let filename = format!("{}.png", Uuid::new_v4());
        let generated_dir = self.upload_dir.join("generated");
        tokio::fs::create_dir_all(&generated_dir).await?;
        tokio::fs::write(generated_dir.join(&filename), image).await?;

        let message = ConversationMessage {
            id: Uuid::new_v4().to_string(),
            user_email: user_email.to_string(),
            model: model.to_string(),
            prompt: prompt.to_string(),
            image_path: format!("/uploads/generated/{}", filename),
            billing,
            created_at: Utc::now().to_rfc3339(),
        };

        self.conversations.insert_one(&message).await?;
        tracing::info!(
            "Saved image message {} for {} ({} bytes)",
            message.id,
            user_email,
            image.len()
        );

        Ok(message)
    }
}
