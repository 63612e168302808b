use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, debug_handler};
use tracing::instrument;

use super::ApiError;
use crate::models::{Message, MessagePatch, NewMessage};
use crate::state::SharedState;

#[instrument(skip(state))]
#[debug_handler]
pub async fn create(
    State(state): State<SharedState>,
    Json(new_message): Json<NewMessage>,
) -> Result<Json<Message>, ApiError> {
    let message = state
        .messages
        .create_message(&new_message)
        .await
        .inspect(|message| tracing::debug!(message_id = message.id, "Created new message"))?;
    Ok(Json(message))
}

#[instrument(skip_all)]
#[debug_handler]
pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = state.messages.get_all_messages().await?;
    Ok(Json(messages))
}

#[instrument(skip(state))]
#[debug_handler]
pub async fn find(
    State(state): State<SharedState>,
    Path(message_id): Path<i64>,
) -> Result<Json<Message>, ApiError> {
    state
        .messages
        .get_message_by_id(message_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

#[instrument(skip(state))]
#[debug_handler]
pub async fn list_by_account(
    State(state): State<SharedState>,
    Path(account_id): Path<i64>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = state
        .messages
        .get_messages_by_account_id(account_id)
        .await
        .inspect(|messages| tracing::debug!(count = messages.len(), "Returning messages"))?;
    Ok(Json(messages))
}

#[instrument(skip(state))]
#[debug_handler]
pub async fn update(
    State(state): State<SharedState>,
    Path(message_id): Path<i64>,
    Json(patch): Json<MessagePatch>,
) -> Result<Json<Message>, ApiError> {
    state
        .messages
        .update_message(message_id, &patch)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// Answers `1` when a row was removed and an empty body when nothing matched.
#[instrument(skip(state))]
#[debug_handler]
pub async fn delete(
    State(state): State<SharedState>,
    Path(message_id): Path<i64>,
) -> Result<Response, ApiError> {
    let response = match state.messages.delete_message_by_id(message_id).await? {
        true => Json(1).into_response(),
        false => StatusCode::OK.into_response(),
    };
    Ok(response)
}
