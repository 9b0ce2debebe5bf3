//! Minimal in-process repository used by the service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Account, Post};
use crate::error::RepoError;
use crate::ports::{AccountRepository, BaseRepository, PostRepository};

#[derive(Default)]
pub struct FakeStore {
    accounts: Mutex<Vec<Account>>,
    posts: Mutex<Vec<Post>>,
    check_authors: bool,
}

impl FakeStore {
    /// A store that rejects posts whose author is not a stored account.
    pub fn with_author_check() -> Self {
        Self {
            check_authors: true,
            ..Self::default()
        }
    }

    fn sorted(mut posts: Vec<Post>) -> Vec<Post> {
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for FakeStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let author_known = self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .any(|a| a.id == post.author_id);
        if self.check_authors && !author_known {
            return Err(RepoError::ForeignKey(format!("author {}", post.author_id)));
        }
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let slot = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for FakeStore {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(Self::sorted(self.posts.lock().unwrap().clone()))
    }

    async fn search(&self, term: &str) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.lock().unwrap();
        Ok(Self::sorted(
            posts.iter().filter(|p| p.matches(term)).cloned().collect(),
        ))
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.lock().unwrap();
        Ok(Self::sorted(
            posts
                .iter()
                .filter(|p| p.author_id == author_id)
                .cloned()
                .collect(),
        ))
    }
}

#[async_trait]
impl BaseRepository<Account, Uuid> for FakeStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, RepoError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn insert(&self, account: Account) -> Result<Account, RepoError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.username == account.username) {
            return Err(RepoError::Constraint("username already taken".to_string()));
        }
        accounts.push(account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, RepoError> {
        let mut accounts = self.accounts.lock().unwrap();
        let slot = accounts
            .iter_mut()
            .find(|a| a.id == account.id)
            .ok_or(RepoError::NotFound)?;
        *slot = account.clone();
        Ok(account)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut accounts = self.accounts.lock().unwrap();
        let before = accounts.len();
        accounts.retain(|a| a.id != id);
        if accounts.len() == before {
            return Err(RepoError::NotFound);
        }
        self.posts.lock().unwrap().retain(|p| p.author_id != id);
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for FakeStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepoError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Account>, RepoError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| ids.contains(&a.id))
            .cloned()
            .collect())
    }
}
