//! In-memory account and post store - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Account, Post};
use quill_core::error::RepoError;
use quill_core::ports::{AccountRepository, BaseRepository, PostRepository};

#[derive(Default)]
struct Tables {
    accounts: HashMap<Uuid, Account>,
    posts: HashMap<Uuid, Post>,
}

/// Both tables live behind one lock so an account delete and the removal of
/// its posts happen atomically.
///
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<'a>(posts: impl Iterator<Item = &'a Post>) -> Vec<Post> {
    let mut posts: Vec<Post> = posts.cloned().collect();
    posts.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    posts
}

#[async_trait]
impl BaseRepository<Account, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, RepoError> {
        Ok(self.tables.read().await.accounts.get(&id).cloned())
    }

    async fn insert(&self, account: Account) -> Result<Account, RepoError> {
        let mut tables = self.tables.write().await;
        if tables
            .accounts
            .values()
            .any(|a| a.username == account.username)
        {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                account.username
            )));
        }
        tables.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, RepoError> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .accounts
            .get_mut(&account.id)
            .ok_or(RepoError::NotFound)?;
        *slot = account.clone();
        Ok(account)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.accounts.remove(&id).ok_or(RepoError::NotFound)?;

        let before = tables.posts.len();
        tables.posts.retain(|_, post| post.author_id != id);
        tracing::debug!(
            account_id = %id,
            removed_posts = before - tables.posts.len(),
            "Cascaded account delete"
        );
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Account>, RepoError> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.accounts.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.accounts.contains_key(&post.author_id) {
            return Err(RepoError::ForeignKey(format!(
                "author {} does not exist",
                post.author_id
            )));
        }
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let slot = tables.posts.get_mut(&post.id).ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.posts.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(newest_first(self.tables.read().await.posts.values()))
    }

    async fn search(&self, term: &str) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables.posts.values().filter(|post| post.matches(term)),
        ))
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables.posts.values().filter(|post| post.author_id == author_id),
        ))
    }
}
