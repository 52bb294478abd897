use crate::error::CoreError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// The authenticated user behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: String,
    pub username: String,
}

/// Resolves a bearer credential to the calling user.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<Caller, CoreError>;
}

/// One `[[auth.tokens]]` entry of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenEntry {
    pub token: String,
    pub user_id: String,
    pub username: String,
}

/// Fixed token-to-user table loaded from configuration.
#[derive(Debug, Default, Clone)]
pub struct TokenTable {
    callers: HashMap<String, Caller>,
}

impl TokenTable {
    pub fn new(entries: impl IntoIterator<Item = TokenEntry>) -> Self {
        let callers = entries
            .into_iter()
            .map(|entry| {
                (
                    entry.token,
                    Caller {
                        user_id: entry.user_id,
                        username: entry.username,
                    },
                )
            })
            .collect();
        Self { callers }
    }

    pub fn len(&self) -> usize {
        self.callers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callers.is_empty()
    }
}

#[async_trait]
impl IdentityProvider for TokenTable {
    async fn resolve(&self, token: &str) -> Result<Caller, CoreError> {
        self.callers
            .get(token)
            .cloned()
            .ok_or_else(|| CoreError::Authorization("Invalid or expired token".to_string()))
    }
}
