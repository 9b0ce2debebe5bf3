//! Authorization policy for the post lifecycle.
//!
//! Reads are public. Creating requires an authenticated principal, and only
//! a post's author may update or delete it. There is no admin override.

use crate::domain::{Post, Principal};

/// Whether `principal` may create a post.
pub fn can_create(principal: &Principal) -> bool {
    principal.is_authenticated()
}

/// Whether `principal` may update or delete `post`.
pub fn can_modify(principal: &Principal, post: &Post) -> bool {
    principal.account_id() == Some(post.author_id)
}

/// Whether `principal` may read `post`. Always true.
pub fn can_read(_principal: &Principal, _post: &Post) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn post_by(author_id: Uuid) -> Post {
        Post::new(
            author_id,
            "A title".to_string(),
            "Some content here".to_string(),
        )
    }

    #[test]
    fn test_create_requires_authentication() {
        assert!(!can_create(&Principal::Anonymous));
        assert!(can_create(&Principal::account(Uuid::new_v4(), "alice")));
    }

    #[test]
    fn test_only_author_may_modify() {
        let author = Uuid::new_v4();
        let post = post_by(author);

        assert!(can_modify(&Principal::account(author, "alice"), &post));
        assert!(!can_modify(&Principal::account(Uuid::new_v4(), "bob"), &post));
        assert!(!can_modify(&Principal::Anonymous, &post));
    }

    #[test]
    fn test_reads_are_public() {
        let post = post_by(Uuid::new_v4());
        assert!(can_read(&Principal::Anonymous, &post));
        assert!(can_read(&Principal::account(Uuid::new_v4(), "bob"), &post));
    }
}
