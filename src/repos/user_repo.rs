/*
 * Responsibility
 * - users テーブル向けの操作を UserRepo trait として定義
 * - PgUserRepo: SQLx (Postgres) 実装
 * - DB エラーは RepoError に変換して返す (NotFound / Conflict は型で表現する)
 */
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};

/// Stored account as returned to callers. The password digest never leaves the repo.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

/// Updatable fields only. `None` leaves the column untouched.
///
/// There is deliberately no `username` or `id` here: neither can be changed
/// through an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// `Conflict` when the username or email is already taken.
    async fn create(&self, user: NewUser) -> RepoResult<UserRow>;
    async fn get(&self, id: i64) -> RepoResult<UserRow>;
    /// `Conflict` when the new email belongs to another account.
    async fn update(&self, id: i64, changes: UserChanges) -> RepoResult<UserRow>;
    async fn delete(&self, id: i64) -> RepoResult<()>;
    /// Look up the account matching both email and password.
    async fn login(&self, email: &str, password: &str) -> RepoResult<UserRow>;
}

pub(crate) fn password_digest(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn create(&self, user: NewUser) -> RepoResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, name, email, password_hash, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, name, email, phone, gender
            "#,
        )
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.email)
        .bind(password_digest(&user.password))
        .bind(&user.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn get(&self, id: i64) -> RepoResult<UserRow> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, name, email, phone, gender
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepoError::NotFound)
    }

    async fn update(&self, id: i64, changes: UserChanges) -> RepoResult<UserRow> {
        let password_hash = changes.password.as_deref().map(password_digest);

        sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET
                email = COALESCE($2, email),
                name = COALESCE($3, name),
                password_hash = COALESCE($4, password_hash),
                phone = COALESCE($5, phone)
            WHERE id = $1
            RETURNING id, username, name, email, phone, gender
            "#,
        )
        .bind(id)
        .bind(changes.email.as_deref())
        .bind(changes.name.as_deref())
        .bind(password_hash.as_deref())
        .bind(changes.phone.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?
        .ok_or(RepoError::NotFound)
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> RepoResult<UserRow> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, name, email, phone, gender
            FROM users
            WHERE email = $1 AND password_hash = $2
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(password_digest(password))
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepoError::NotFound)
    }
}
