//! Server dependencies for the resolution engine (using traits for testability)
//!
//! Every domain action receives `&ServerDeps`. Storage goes through the
//! `BaseRepository` trait so actions run unchanged against Postgres or the
//! in-memory store used by tests.

use std::sync::Arc;

use crate::domains::auth::{JwtService, PasswordHasher};
use crate::kernel::BaseRepository;

/// Server dependencies accessible to actions
#[derive(Clone)]
pub struct ServerDeps {
    pub repository: Arc<dyn BaseRepository>,
    /// JWT service for token creation and verification
    pub jwt_service: Arc<JwtService>,
    pub password_hasher: Arc<PasswordHasher>,
}

impl ServerDeps {
    pub fn new(
        repository: Arc<dyn BaseRepository>,
        jwt_service: Arc<JwtService>,
        password_hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            repository,
            jwt_service,
            password_hasher,
        }
    }

    pub fn repo(&self) -> &dyn BaseRepository {
        self.repository.as_ref()
    }
}
