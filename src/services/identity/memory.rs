/*
 * Responsibility
 * - In-memory IdentityResolver for development and tests
 * - Seeded from AUTH_USERS entries ("email:ROLE1|ROLE2")
 */
use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::{Identity, IdentityError, IdentityResolver};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("malformed AUTH_USERS entry: {0:?}")]
    MalformedEntry(String),
}

#[derive(Debug, Default)]
pub struct InMemoryIdentityResolver {
    users: HashMap<String, Identity>,
}

impl InMemoryIdentityResolver {
    pub fn new(identities: impl IntoIterator<Item = Identity>) -> Self {
        Self {
            users: identities
                .into_iter()
                .map(|identity| (identity.subject.clone(), identity))
                .collect(),
        }
    }

    /// Build a resolver from seed entries of the form `email:ROLE1|ROLE2`.
    ///
    /// Each entry becomes one identity with a fresh id. Role order in the
    /// entry is the grant order. An entry without `:` is a config mistake
    /// and fails the boot rather than silently seeding nothing.
    pub fn from_seed_entries(entries: &[String]) -> Result<Self, SeedError> {
        let mut identities = Vec::with_capacity(entries.len());

        for entry in entries {
            let (subject, roles) = entry
                .split_once(':')
                .ok_or_else(|| SeedError::MalformedEntry(entry.clone()))?;

            let subject = subject.trim();
            if subject.is_empty() {
                return Err(SeedError::MalformedEntry(entry.clone()));
            }

            let authorities = roles
                .split('|')
                .map(str::trim)
                .filter(|role| !role.is_empty())
                .map(String::from)
                .collect();

            identities.push(Identity {
                id: Uuid::new_v4(),
                subject: subject.to_string(),
                authorities,
            });
        }

        Ok(Self::new(identities))
    }
}

#[async_trait]
impl IdentityResolver for InMemoryIdentityResolver {
    async fn load_by_subject(&self, subject: &str) -> Result<Identity, IdentityError> {
        self.users
            .get(subject)
            .cloned()
            .ok_or(IdentityError::NotFound)
    }
}
