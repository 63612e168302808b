use tracing::instrument;

use super::ServiceError;
use crate::models::{Account, Credentials};
use crate::repository::account::AccountRepository;

#[derive(Debug, Clone)]
#[must_use]
pub struct AccountService {
    accounts: AccountRepository,
}

impl AccountService {
    pub const fn new(accounts: AccountRepository) -> Self {
        Self { accounts }
    }

    #[instrument(skip_all, fields(username = credentials.username))]
    pub async fn create_account(&self, credentials: &Credentials) -> Result<Account, ServiceError> {
        if self.accounts.exists_by_username(&credentials.username).await? {
            tracing::debug!("Rejecting registration: username is taken");
            return Err(ServiceError::Conflict);
        }

        // The UNIQUE constraint still catches a concurrent registration.
        let account = self
            .accounts
            .insert(&credentials.username, &credentials.password)
            .await?;
        tracing::debug!(account_id = account.id, "Successfully registered new account");
        Ok(account)
    }

    /// Passwords are stored and compared as plaintext.
    #[instrument(skip_all, fields(username = credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Account, ServiceError> {
        self.accounts
            .find_by_username(&credentials.username)
            .await?
            .filter(|account| account.password == credentials.password)
            .inspect(|account| tracing::debug!(account_id = account.id, "Login successful"))
            .ok_or_else(|| {
                tracing::debug!("Rejecting login attempt: invalid credentials");
                ServiceError::Unauthorized
            })
    }

    #[instrument(skip(self))]
    pub async fn get_all_accounts(&self) -> Result<Vec<Account>, ServiceError> {
        Ok(self.accounts.find_all().await?)
    }

    #[instrument(skip(self))]
    pub async fn get_account_by_id(&self, account_id: i64) -> Result<Option<Account>, ServiceError> {
        Ok(self.accounts.find_by_id(account_id).await?)
    }

    /// Replaces both username and password. `None` when the account does not exist.
    #[instrument(skip(self, credentials), fields(username = credentials.username))]
    pub async fn update_account(
        &self,
        account_id: i64,
        credentials: &Credentials,
    ) -> Result<Option<Account>, ServiceError> {
        let Some(mut account) = self.accounts.find_by_id(account_id).await? else {
            tracing::debug!("No account to update");
            return Ok(None);
        };

        account.username.clone_from(&credentials.username);
        account.password.clone_from(&credentials.password);
        let saved = self.accounts.save(&account).await?;
        Ok(Some(saved))
    }

    #[instrument(skip(self))]
    pub async fn delete_account_by_id(&self, account_id: i64) -> Result<bool, ServiceError> {
        Ok(self.accounts.delete_by_id(account_id).await?)
    }
}
