use anyhow::Context;
use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::config::DatabaseConfig;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::User;
use crate::domain::account::models::UserId;
use crate::domain::account::ports::UserRepository;

const USER_COLUMNS: &str = "id, email, password_hash, is_active, role, created_at";

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    is_active: bool,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AccountError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(row.email)
            .map_err(|e| AccountError::DatabaseError(format!("Stored email is invalid: {}", e)))?;

        Ok(User {
            id: UserId(row.id),
            email,
            password_hash: row.password_hash,
            is_active: row.is_active,
            role: row.role.parse()?,
            created_at: row.created_at,
        })
    }
}

fn map_write_error(e: sqlx::Error, user: &User) -> AccountError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
            return AccountError::EmailAlreadyExists(user.email.as_str().to_string());
        }
    }
    AccountError::DatabaseError(e.to_string())
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool from configuration and apply pending migrations.
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .context("Failed to connect to PostgreSQL")?;
        tracing::info!(
            max_connections = config.max_connections,
            "Database connection pool created"
        );

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;
        tracing::info!(database = "postgresql", "Database migrations completed");

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, is_active, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id.0)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn update(&self, user: User) -> Result<User, AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, password_hash = $3, is_active = $4, role = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(user.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(user.id.to_string()));
        }

        Ok(user)
    }
}
