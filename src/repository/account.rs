use sqlx::SqlitePool;
use tracing::instrument;

use crate::models::Account;

#[derive(Debug, Clone)]
#[must_use]
pub struct AccountRepository {
    pub(super) connection: SqlitePool,
}

impl AccountRepository {
    #[instrument(skip(self, password), err(Debug))]
    pub async fn insert(&self, username: &str, password: &str) -> Result<Account, sqlx::Error> {
        let query = sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (username, password) VALUES (?, ?) RETURNING id, username, password",
        );

        query
            .bind(username)
            .bind(password)
            .fetch_one(&self.connection)
            .await
            .inspect(|account| tracing::debug!(account_id = account.id, "Inserted new account"))
    }

    /// Inserts the account, or overwrites the row that already carries its id.
    #[instrument(skip_all, fields(account.id = account.id), err(Debug))]
    pub async fn save(&self, account: &Account) -> Result<Account, sqlx::Error> {
        let query = sqlx::query_as::<_, Account>(
            r"
                INSERT INTO accounts (id, username, password) VALUES (?, ?, ?)
                ON CONFLICT (id) DO UPDATE
                SET username = excluded.username, password = excluded.password
                RETURNING id, username, password
            ",
        );

        query
            .bind(account.id)
            .bind(&account.username)
            .bind(&account.password)
            .fetch_one(&self.connection)
            .await
    }

    #[instrument(skip(self), err(Debug))]
    pub async fn find_all(&self) -> Result<Vec<Account>, sqlx::Error> {
        sqlx::query_as::<_, Account>("SELECT id, username, password FROM accounts ORDER BY id")
            .fetch_all(&self.connection)
            .await
    }

    #[instrument(skip(self), err(Debug))]
    pub async fn find_by_id(&self, account_id: i64) -> Result<Option<Account>, sqlx::Error> {
        tracing::trace!("Searching for account in the repository");
        sqlx::query_as::<_, Account>("SELECT id, username, password FROM accounts WHERE id = ?")
            .bind(account_id)
            .fetch_optional(&self.connection)
            .await
    }

    #[instrument(skip(self), err(Debug))]
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Account>, sqlx::Error> {
        sqlx::query_as::<_, Account>(
            "SELECT id, username, password FROM accounts WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.connection)
        .await
    }

    #[instrument(skip(self), err(Debug))]
    pub async fn exists_by_id(&self, account_id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT EXISTS (SELECT 1 FROM accounts WHERE id = ?)")
            .bind(account_id)
            .fetch_one(&self.connection)
            .await
            .map(|found| found != 0)
    }

    #[instrument(skip(self), err(Debug))]
    pub async fn exists_by_username(&self, username: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT EXISTS (SELECT 1 FROM accounts WHERE username = ?)")
            .bind(username)
            .fetch_one(&self.connection)
            .await
            .map(|found| found != 0)
    }

    /// Returns `false` when no row carried `account_id`.
    #[instrument(skip(self), err(Debug))]
    pub async fn delete_by_id(&self, account_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(account_id)
            .execute(&self.connection)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::{in_memory, is_unique_violation};

    #[tokio::test]
    async fn insert_assigns_ids() {
        let repository = in_memory().await;
        let first = repository.accounts.insert("alice", "pw1").await.unwrap();
        let second = repository.accounts.insert("bob", "pw2").await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.username, "alice");
        assert_eq!(second.password, "pw2");
    }

    #[tokio::test]
    async fn duplicate_username_is_a_unique_violation() {
        let repository = in_memory().await;
        repository.accounts.insert("alice", "pw").await.unwrap();

        let error = repository
            .accounts
            .insert("alice", "other")
            .await
            .unwrap_err();
        assert!(is_unique_violation(&error));
    }

    #[tokio::test]
    async fn lookups_by_id_and_username() {
        let repository = in_memory().await;
        let account = repository.accounts.insert("alice", "pw").await.unwrap();

        let by_id = repository.accounts.find_by_id(account.id).await.unwrap();
        assert_eq!(by_id.as_ref(), Some(&account));
        let by_name = repository.accounts.find_by_username("alice").await.unwrap();
        assert_eq!(by_name, Some(account.clone()));

        assert!(repository.accounts.exists_by_id(account.id).await.unwrap());
        assert!(repository.accounts.exists_by_username("alice").await.unwrap());
        assert!(!repository.accounts.exists_by_id(account.id + 1).await.unwrap());
        assert!(!repository.accounts.exists_by_username("bob").await.unwrap());
        assert!(
            repository
                .accounts
                .find_by_username("bob")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn save_overwrites_existing_row() {
        let repository = in_memory().await;
        let mut account = repository.accounts.insert("alice", "pw").await.unwrap();
        account.username = "alicia".to_owned();
        account.password = "new-pw".to_owned();

        let saved = repository.accounts.save(&account).await.unwrap();
        assert_eq!(saved, account);
        assert_eq!(repository.accounts.find_all().await.unwrap(), vec![account]);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let repository = in_memory().await;
        let account = repository.accounts.insert("alice", "pw").await.unwrap();

        assert!(repository.accounts.delete_by_id(account.id).await.unwrap());
        assert!(!repository.accounts.delete_by_id(account.id).await.unwrap());
        assert!(repository.accounts.find_all().await.unwrap().is_empty());
    }
}
