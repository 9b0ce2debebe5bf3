use uuid::Uuid;

/// Reference to the authenticated account behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRef {
    pub id: Uuid,
    pub username: String,
}

/// The identity making a request.
///
/// Produced upstream from a verified token; the core never inspects
/// credentials itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Principal {
    #[default]
    Anonymous,
    Account(AccountRef),
}

impl Principal {
    pub fn account(id: Uuid, username: impl Into<String>) -> Self {
        Self::Account(AccountRef {
            id,
            username: username.into(),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Account(_))
    }

    /// Account id of an authenticated principal.
    pub fn account_id(&self) -> Option<Uuid> {
        match self {
            Self::Account(account) => Some(account.id),
            Self::Anonymous => None,
        }
    }
}
