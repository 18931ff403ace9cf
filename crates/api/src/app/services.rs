//! Shared service handles for request handlers.

use std::sync::Arc;

use keyward_auth::Hs256TokenService;
use keyward_infra::DirectoryStore;

/// Request-scoped collaborators. Cheap to clone behind `Arc`; no shared
/// mutable state lives here; the store is the only shared resource and
/// guards itself.
pub struct AppServices {
    pub store: Arc<dyn DirectoryStore>,
    pub tokens: Hs256TokenService,
}

impl AppServices {
    pub fn new(store: Arc<dyn DirectoryStore>, tokens: Hs256TokenService) -> Self {
        Self { store, tokens }
    }
}
