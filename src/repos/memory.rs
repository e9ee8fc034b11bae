/*
 * Responsibility
 * - DATABASE_URL 未設定時 (開発用) と tests で使う in-memory UserRepo
 * - PgUserRepo と同じ意味 (NotFound / Conflict / COALESCE 相当の部分更新) を保つ
 *   - username, email は UNIQUE (migrations/0001_create_users.sql)
 */
use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::user_repo::{NewUser, UserChanges, UserRepo, UserRow, password_digest};

#[derive(Debug)]
struct StoredUser {
    row: UserRow,
    password_hash: String,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    users: BTreeMap<i64, StoredUser>,
}

impl Inner {
    fn taken(&self, except: Option<i64>, pred: impl Fn(&UserRow) -> bool) -> bool {
        self.users
            .values()
            .any(|u| Some(u.row.id) != except && pred(&u.row))
    }
}

#[derive(Debug, Default)]
pub struct MemoryUserRepo {
    inner: RwLock<Inner>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn create(&self, user: NewUser) -> RepoResult<UserRow> {
        let mut inner = self.inner.write().await;
        if inner.taken(None, |row| {
            row.username == user.username || row.email == user.email
        }) {
            return Err(RepoError::Conflict);
        }

        inner.next_id += 1;
        let id = inner.next_id;

        let row = UserRow {
            id,
            username: user.username,
            name: user.name,
            email: user.email,
            phone: user.phone,
            gender: None,
        };
        inner.users.insert(
            id,
            StoredUser {
                row: row.clone(),
                password_hash: password_digest(&user.password),
            },
        );

        Ok(row)
    }

    async fn get(&self, id: i64) -> RepoResult<UserRow> {
        self.inner
            .read()
            .await
            .users
            .get(&id)
            .map(|u| u.row.clone())
            .ok_or(RepoError::NotFound)
    }

    async fn update(&self, id: i64, changes: UserChanges) -> RepoResult<UserRow> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&id) {
            return Err(RepoError::NotFound);
        }
        if let Some(email) = &changes.email
            && inner.taken(Some(id), |row| &row.email == email)
        {
            return Err(RepoError::Conflict);
        }
        let stored = inner.users.get_mut(&id).ok_or(RepoError::NotFound)?;

        if let Some(email) = changes.email {
            stored.row.email = email;
        }
        if let Some(name) = changes.name {
            stored.row.name = name;
        }
        if let Some(password) = changes.password {
            stored.password_hash = password_digest(&password);
        }
        if let Some(phone) = changes.phone {
            stored.row.phone = phone;
        }

        Ok(stored.row.clone())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        self.inner
            .write()
            .await
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }

    async fn login(&self, email: &str, password: &str) -> RepoResult<UserRow> {
        let digest = password_digest(password);
        self.inner
            .read()
            .await
            .users
            .values()
            .find(|u| u.row.email == email && u.password_hash == digest)
            .map(|u| u.row.clone())
            .ok_or(RepoError::NotFound)
    }
}
