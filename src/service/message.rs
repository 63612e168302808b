use chrono::Utc;
use tracing::instrument;

use super::ServiceError;
use crate::models::{Message, MessagePatch, NewMessage};
use crate::repository::account::AccountRepository;
use crate::repository::message::MessageRepository;

pub const MAX_MESSAGE_LENGTH: usize = 255;

#[derive(Debug, Clone)]
#[must_use]
pub struct MessageService {
    messages: MessageRepository,
    accounts: AccountRepository,
}

fn validate_text(text: Option<&str>) -> Result<&str, ServiceError> {
    let Some(text) = text.filter(|text| !text.trim().is_empty()) else {
        let reason = "Message text cannot be empty.".to_owned();
        return Err(ServiceError::Validation(reason));
    };

    if text.chars().count() > MAX_MESSAGE_LENGTH {
        let reason = format!("Message text cannot exceed {MAX_MESSAGE_LENGTH} characters.");
        return Err(ServiceError::Validation(reason));
    }

    Ok(text)
}

impl MessageService {
    pub const fn new(messages: MessageRepository, accounts: AccountRepository) -> Self {
        Self { messages, accounts }
    }

    #[instrument(skip_all, fields(posted_by = new_message.posted_by))]
    pub async fn create_message(&self, new_message: &NewMessage) -> Result<Message, ServiceError> {
        let text = validate_text(new_message.message_text.as_deref())
            .inspect_err(|error| tracing::debug!(%error, "Rejecting message"))?;

        if !self.accounts.exists_by_id(new_message.posted_by).await? {
            tracing::debug!("Rejecting message: posting account does not exist");
            return Err(ServiceError::Validation("User not found.".to_owned()));
        }

        let time_posted_epoch = new_message
            .time_posted_epoch
            .unwrap_or_else(|| Utc::now().timestamp());
        let message = self
            .messages
            .insert(new_message.posted_by, text, time_posted_epoch)
            .await?;
        Ok(message)
    }

    #[instrument(skip(self))]
    pub async fn get_all_messages(&self) -> Result<Vec<Message>, ServiceError> {
        Ok(self.messages.find_all().await?)
    }

    #[instrument(skip(self))]
    pub async fn get_message_by_id(&self, message_id: i64) -> Result<Option<Message>, ServiceError> {
        Ok(self.messages.find_by_id(message_id).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_messages_by_account_id(
        &self,
        account_id: i64,
    ) -> Result<Vec<Message>, ServiceError> {
        Ok(self.messages.find_by_posted_by(account_id).await?)
    }

    /// Overwrites whichever of text and timestamp the patch carries.
    /// `None` when the message does not exist.
    #[instrument(skip(self, patch))]
    pub async fn update_message(
        &self,
        message_id: i64,
        patch: &MessagePatch,
    ) -> Result<Option<Message>, ServiceError> {
        let text = match patch.message_text.as_deref() {
            Some(text) => Some(validate_text(Some(text))?),
            None => None,
        };

        let Some(mut message) = self.messages.find_by_id(message_id).await? else {
            tracing::debug!("No message to update");
            return Ok(None);
        };

        if let Some(text) = text {
            text.clone_into(&mut message.message_text);
        }
        if let Some(time_posted_epoch) = patch.time_posted_epoch {
            message.time_posted_epoch = time_posted_epoch;
        }

        let saved = self.messages.save(&message).await?;
        Ok(Some(saved))
    }

    /// `false` when nothing matched; deleting a missing message is not an error.
    #[instrument(skip(self))]
    pub async fn delete_message_by_id(&self, message_id: i64) -> Result<bool, ServiceError> {
        if !self.messages.exists_by_id(message_id).await? {
            tracing::debug!("No message to delete");
            return Ok(false);
        }
        Ok(self.messages.delete_by_id(message_id).await?)
    }
}
