use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use sqlx::{FromRow, Pool, Postgres};
use uuid::Uuid;
use vigil_core::{
    Account, AccountId, AccountName, AccountStatus, AccountStore, AccountStoreError, Email,
    NewAccount,
};

/// Account store backed by PostgreSQL.
///
/// Email uniqueness lives in the database (unique index on `email`); a
/// violated insert surfaces as [`AccountStoreError::EmailTaken`]. Every bulk
/// mutation is a single statement, so per-record atomicity is the row-level
/// guarantee of the database itself.
#[derive(Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresAccountStore { pool }
    }
}

#[derive(FromRow)]
struct AccountRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    status: String,
    last_login_at: Option<DateTime<Utc>>,
    registered_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountStoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId::from(row.id),
            name: AccountName::parse(&row.name)
                .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?,
            email: Email::parse(&row.email)
                .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?,
            password_hash: row.password_hash,
            status: row
                .status
                .parse::<AccountStatus>()
                .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?,
            last_login_at: row.last_login_at,
            registered_at: row.registered_at,
        })
    }
}

const SELECT_ACCOUNT: &str =
    "SELECT id, name, email, password_hash, status, last_login_at, registered_at FROM accounts";

#[async_trait::async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Inserting account into PostgreSQL", skip_all)]
    async fn insert(&self, account: NewAccount) -> Result<Account, AccountStoreError> {
        let id = AccountId::new();
        let status = AccountStatus::Unverified;
        let registered_at = Utc::now();

        sqlx::query(
            r#"
                INSERT INTO accounts (id, name, email, password_hash, status, registered_at)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id.as_uuid())
        .bind(account.name.as_str())
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(status.as_str())
        .bind(registered_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AccountStoreError::EmailTaken;
                }
            }
            AccountStoreError::Unexpected(e.to_string())
        })?;

        Ok(Account {
            id,
            name: account.name,
            email: account.email,
            password_hash: account.password_hash,
            status,
            last_login_at: None,
            registered_at,
        })
    }

    #[tracing::instrument(name = "Retrieving account by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!("{SELECT_ACCOUNT} WHERE email = $1"))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    #[tracing::instrument(name = "Retrieving account by id from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountStoreError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!("{SELECT_ACCOUNT} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    #[tracing::instrument(name = "Listing accounts from PostgreSQL", skip_all)]
    async fn all_by_last_login(&self) -> Result<Vec<Account>, AccountStoreError> {
        let rows = sqlx::query_as::<_, AccountRow>(&format!(
            "{SELECT_ACCOUNT} ORDER BY last_login_at DESC NULLS LAST, registered_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        rows.into_iter().map(Account::try_from).collect()
    }

    #[tracing::instrument(name = "Recording login time in PostgreSQL", skip_all)]
    async fn record_login(
        &self,
        id: AccountId,
        at: DateTime<Utc>,
    ) -> Result<(), AccountStoreError> {
        let result = sqlx::query("UPDATE accounts SET last_login_at = $1 WHERE id = $2")
            .bind(at)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::NotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Bulk status update in PostgreSQL", skip_all)]
    async fn set_status(
        &self,
        ids: &[AccountId],
        status: AccountStatus,
    ) -> Result<u64, AccountStoreError> {
        let ids: Vec<Uuid> = ids.iter().map(AccountId::as_uuid).collect();

        let result = sqlx::query("UPDATE accounts SET status = $1 WHERE id = ANY($2)")
            .bind(status.as_str())
            .bind(&ids)
            .execute(&self.pool)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(name = "Bulk delete in PostgreSQL", skip_all)]
    async fn delete(&self, ids: &[AccountId]) -> Result<u64, AccountStoreError> {
        let ids: Vec<Uuid> = ids.iter().map(AccountId::as_uuid).collect();

        let result = sqlx::query("DELETE FROM accounts WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&self.pool)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(name = "Deleting unverified accounts in PostgreSQL", skip_all)]
    async fn delete_unverified(&self) -> Result<u64, AccountStoreError> {
        let result = sqlx::query("DELETE FROM accounts WHERE status = $1")
            .bind(AccountStatus::Unverified.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
