use axum::extract::{Path, State};
use axum::{Json, debug_handler};
use axum_valid::Valid;
use tracing::instrument;

use super::ApiError;
use crate::models::{Account, Credentials};
use crate::state::SharedState;

#[instrument(skip_all, fields(username = credentials.username))]
#[debug_handler]
pub async fn register(
    State(state): State<SharedState>,
    Valid(Json(credentials)): Valid<Json<Credentials>>,
) -> Result<Json<Account>, ApiError> {
    let account = state.accounts.create_account(&credentials).await?;
    Ok(Json(account))
}

#[instrument(skip_all, fields(username = credentials.username))]
#[debug_handler]
pub async fn login(
    State(state): State<SharedState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Account>, ApiError> {
    let account = state.accounts.login(&credentials).await?;
    Ok(Json(account))
}

#[instrument(skip_all)]
#[debug_handler]
pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Account>>, ApiError> {
    let accounts = state
        .accounts
        .get_all_accounts()
        .await
        .inspect(|accounts| tracing::debug!(count = accounts.len(), "Returning accounts"))?;
    Ok(Json(accounts))
}

#[instrument(skip(state))]
#[debug_handler]
pub async fn find(
    State(state): State<SharedState>,
    Path(account_id): Path<i64>,
) -> Result<Json<Account>, ApiError> {
    state
        .accounts
        .get_account_by_id(account_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

#[instrument(skip(state, credentials), fields(username = credentials.username))]
#[debug_handler]
pub async fn update(
    State(state): State<SharedState>,
    Path(account_id): Path<i64>,
    Valid(Json(credentials)): Valid<Json<Credentials>>,
) -> Result<Json<Account>, ApiError> {
    state
        .accounts
        .update_account(account_id, &credentials)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}
