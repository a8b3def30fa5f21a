//! Trait abstraction for the users API to enable mocking in tests

use super::error::ApiError;
use crate::state::FormState;
use async_trait::async_trait;

/// Trait for users API operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Register a new user. Any 2xx response counts as success.
    async fn create_user(&self, user: &FormState) -> Result<(), ApiError>;
}
