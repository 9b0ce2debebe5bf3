use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Account, Post};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with [`RepoError::NotFound`] if absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Account repository.
///
/// Deleting an account must also delete every post it authored.
#[async_trait]
pub trait AccountRepository: BaseRepository<Account, Uuid> {
    /// Find an account by its username.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepoError>;

    /// Fetch several accounts at once. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Account>, RepoError>;
}

/// Post repository. Every listing is ordered newest first.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Posts whose title or content contains `term`, case-insensitively.
    async fn search(&self, term: &str) -> Result<Vec<Post>, RepoError>;

    /// Posts written by one author.
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;
}
