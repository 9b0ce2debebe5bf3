use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{AuthoredPost, Post, PostChanges, PostDraft, Principal};
use crate::error::{DomainError, RepoError};
use crate::policy;
use crate::ports::{AccountRepository, BaseRepository, PostRepository};

/// Post lifecycle operations.
///
/// Every mutation checks, in order: existence, authorization, field
/// validation. Nothing is written unless all checks pass.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    accounts: Arc<dyn AccountRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, accounts: Arc<dyn AccountRepository>) -> Self {
        Self { posts, accounts }
    }

    /// All posts, newest first. `search` narrows to posts whose title or
    /// content contains the term.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Post>, DomainError> {
        let posts = match search.map(str::trim).filter(|term| !term.is_empty()) {
            Some(term) => self.posts.search(term).await?,
            None => self.posts.list_all().await?,
        };
        Ok(posts)
    }

    /// Posts authored by the calling principal, newest first.
    pub async fn list_mine(&self, principal: &Principal) -> Result<Vec<Post>, DomainError> {
        let author_id = principal.account_id().ok_or(DomainError::Unauthorized)?;
        Ok(self.posts.find_by_author(author_id).await?)
    }

    /// A single post by id.
    pub async fn get(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    /// Create a post owned by `principal`.
    pub async fn create(
        &self,
        principal: &Principal,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        if !policy::can_create(principal) {
            return Err(DomainError::Unauthorized);
        }
        let author_id = principal.account_id().ok_or(DomainError::Unauthorized)?;
        draft.validate().map_err(DomainError::Validation)?;

        let post = self
            .posts
            .insert(Post::new(author_id, draft.title, draft.content))
            .await
            .map_err(|e| match e {
                // The token outlived its account.
                RepoError::ForeignKey(_) => {
                    tracing::debug!(author_id = %author_id, "Create by unknown account");
                    DomainError::Unauthorized
                }
                other => other.into(),
            })?;

        tracing::info!(post_id = %post.id, author_id = %author_id, "Post created");
        Ok(post)
    }

    /// Apply `changes` to a post. Author and creation time never change.
    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        changes: PostChanges,
    ) -> Result<Post, DomainError> {
        let mut post = self.authorized_post(principal, id).await?;
        changes.validate().map_err(DomainError::Validation)?;
        changes.apply_to(&mut post);

        let post = self
            .posts
            .update(post)
            .await
            .map_err(|e| not_found_or(e, id))?;

        tracing::info!(post_id = %id, "Post updated");
        Ok(post)
    }

    /// Permanently delete a post.
    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<(), DomainError> {
        self.authorized_post(principal, id).await?;
        self.posts.delete(id).await.map_err(|e| not_found_or(e, id))?;

        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    /// Attach author display names, looking every author up in one call.
    pub async fn with_authors(&self, posts: Vec<Post>) -> Result<Vec<AuthoredPost>, DomainError> {
        let mut ids: Vec<Uuid> = posts.iter().map(|p| p.author_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let names: HashMap<Uuid, String> = self
            .accounts
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|account| (account.id, account.display_name()))
            .collect();

        Ok(posts
            .into_iter()
            .map(|post| AuthoredPost {
                author_name: names.get(&post.author_id).cloned().unwrap_or_default(),
                post,
            })
            .collect())
    }

    async fn authorized_post(&self, principal: &Principal, id: Uuid) -> Result<Post, DomainError> {
        let post = self.get(id).await?;
        if !policy::can_modify(principal, &post) {
            tracing::debug!(post_id = %id, "Modification denied");
            return Err(DomainError::Unauthorized);
        }
        Ok(post)
    }
}

fn not_found_or(err: RepoError, id: Uuid) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::post_not_found(id),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Account;
    use crate::service::fakes::FakeStore;
    use crate::validation::{Field, ValidationError};
    use chrono::{Duration, Utc};

    fn setup() -> (Arc<FakeStore>, PostService) {
        let store = Arc::new(FakeStore::default());
        let service = PostService::new(store.clone(), store.clone());
        (store, service)
    }

    fn draft(title: &str, content: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    fn user() -> Principal {
        Principal::account(Uuid::new_v4(), "alice")
    }

    #[tokio::test]
    async fn test_create_sets_author_and_timestamp() {
        let (_, service) = setup();
        let principal = user();
        let before = Utc::now();

        let post = service
            .create(&principal, draft("Hello World", "Some content here"))
            .await
            .unwrap();

        assert_eq!(Some(post.author_id), principal.account_id());
        assert_eq!(post.title, "Hello World");
        assert!(post.created_at >= before && post.created_at <= Utc::now());

        let fetched = service.get(post.id).await.unwrap();
        assert_eq!(fetched, post);
    }

    #[tokio::test]
    async fn test_anonymous_create_persists_nothing() {
        let (store, service) = setup();

        let result = service
            .create(&Principal::Anonymous, draft("Hello World", "Some content here"))
            .await;

        assert!(matches!(result, Err(DomainError::Unauthorized)));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_by_deleted_account_is_unauthorized() {
        let store = Arc::new(FakeStore::with_author_check());
        let service = PostService::new(store.clone(), store.clone());
        let principal = user();

        let result = service
            .create(&principal, draft("Hello World", "Some content here"))
            .await;

        assert!(matches!(result, Err(DomainError::Unauthorized)));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_create_reports_fields() {
        let (store, service) = setup();

        let result = service.create(&user(), draft("abcd", "")).await;

        match result {
            Err(DomainError::Validation(errors)) => {
                let fields: Vec<_> = errors.iter().map(ValidationError::field).collect();
                assert_eq!(fields, vec![Field::Title, Field::Content]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_by_other_account_is_rejected() {
        let (_, service) = setup();
        let owner = user();
        let post = service
            .create(&owner, draft("Original title", "Original content"))
            .await
            .unwrap();

        let changes = PostChanges {
            title: Some("Hijacked title".to_string()),
            content: None,
        };
        let result = service
            .update(&Principal::account(Uuid::new_v4(), "mallory"), post.id, changes)
            .await;

        assert!(matches!(result, Err(DomainError::Unauthorized)));
        assert_eq!(service.get(post.id).await.unwrap(), post);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let (_, service) = setup();
        let owner = user();
        let post = service
            .create(&owner, draft("Original title", "Original content"))
            .await
            .unwrap();

        let updated = service
            .update(
                &owner,
                post.id,
                PostChanges {
                    title: None,
                    content: Some("Rewritten content".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Original title");
        assert_eq!(updated.content, "Rewritten content");
        assert_eq!(updated.author_id, post.author_id);
        assert_eq!(updated.created_at, post.created_at);
    }

    #[tokio::test]
    async fn test_invalid_update_changes_nothing() {
        let (_, service) = setup();
        let owner = user();
        let post = service
            .create(&owner, draft("Original title", "Original content"))
            .await
            .unwrap();

        let result = service
            .update(
                &owner,
                post.id,
                PostChanges {
                    title: Some("abc".to_string()),
                    content: Some("Valid new content".to_string()),
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(service.get(post.id).await.unwrap(), post);
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let (_, service) = setup();
        let result = service
            .update(&user(), Uuid::new_v4(), PostChanges::default())
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_then_delete_again_is_not_found() {
        let (_, service) = setup();
        let owner = user();
        let post = service
            .create(&owner, draft("Short lived", "Gone in a moment"))
            .await
            .unwrap();

        service.delete(&owner, post.id).await.unwrap();

        let again = service.delete(&owner, post.id).await;
        assert!(matches!(again, Err(DomainError::NotFound { .. })));
        assert!(matches!(
            service.get(post.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_by_other_account_is_rejected() {
        let (_, service) = setup();
        let post = service
            .create(&user(), draft("Keep me around", "Still here after"))
            .await
            .unwrap();

        let result = service.delete(&Principal::Anonymous, post.id).await;
        assert!(matches!(result, Err(DomainError::Unauthorized)));
        assert!(service.get(post.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_is_newest_first_regardless_of_insertion_order() {
        let (store, service) = setup();
        let author = Uuid::new_v4();
        let now = Utc::now();

        for (title, age) in [("Middle post", 5), ("Newest post", 1), ("Oldest post", 10)] {
            let mut post = Post::new(author, title.to_string(), "Body text here".to_string());
            post.created_at = now - Duration::minutes(age);
            store.insert(post).await.unwrap();
        }

        let titles: Vec<_> = service
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Newest post", "Middle post", "Oldest post"]);
    }

    #[tokio::test]
    async fn test_list_with_search_term() {
        let (_, service) = setup();
        let owner = user();
        service
            .create(&owner, draft("Rust ownership", "Borrowing explained"))
            .await
            .unwrap();
        service
            .create(&owner, draft("Gardening tips", "Tomatoes need sun"))
            .await
            .unwrap();

        let found = service.list(Some("RUST")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Rust ownership");

        assert_eq!(service.list(Some("  ")).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_mine() {
        let (_, service) = setup();
        let alice = user();
        let bob = Principal::account(Uuid::new_v4(), "bob");
        service
            .create(&alice, draft("Alice writes", "Alice's first post"))
            .await
            .unwrap();
        service
            .create(&bob, draft("Bob writes", "Bob's first post"))
            .await
            .unwrap();

        let mine = service.list_mine(&alice).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "Alice writes");

        assert!(matches!(
            service.list_mine(&Principal::Anonymous).await,
            Err(DomainError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_with_authors_attaches_display_name() {
        let (store, service) = setup();
        let account = store
            .insert(Account::new(
                "jdoe".to_string(),
                "Jane".to_string(),
                "Doe".to_string(),
                "hash".to_string(),
            ))
            .await
            .unwrap();
        let principal = Principal::account(account.id, "jdoe");
        service
            .create(&principal, draft("Named author", "Post with a byline"))
            .await
            .unwrap();

        let posts = service.list(None).await.unwrap();
        let authored = service.with_authors(posts).await.unwrap();
        assert_eq!(authored[0].author_name, "Jane Doe");
    }
}
