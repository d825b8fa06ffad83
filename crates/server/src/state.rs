use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::repository::{mock::MockAuthRepository, AuthRepository};
use service::auth::service::{AuthConfig, AuthService};
use service::entry::repo::seaorm::SeaOrmEntryRepository;
use service::entry::repository::{mock::MockEntryRepository, EntryRepository, UserLookup};
use service::entry::EntryService;

pub type SharedEntryService = EntryService<dyn EntryRepository, dyn UserLookup>;
pub type SharedAuthService = AuthService<dyn AuthRepository>;

/// Services shared by every handler.
#[derive(Clone)]
pub struct ServerState {
    pub entries: Arc<SharedEntryService>,
    pub auth: Arc<SharedAuthService>,
}

impl ServerState {
    /// Wire the services; the auth service also resolves entry owners.
    pub fn new(entry_repo: Arc<dyn EntryRepository>, auth_repo: Arc<dyn AuthRepository>, cfg: AuthConfig) -> Self {
        let auth: Arc<SharedAuthService> = Arc::new(AuthService::new(auth_repo, cfg));
        let users: Arc<dyn UserLookup> = auth.clone();
        let entries = Arc::new(EntryService::new(entry_repo, users));
        Self { entries, auth }
    }

    pub fn with_database(db: DatabaseConnection, cfg: AuthConfig) -> Self {
        Self::new(
            Arc::new(SeaOrmEntryRepository { db: db.clone() }),
            Arc::new(SeaOrmAuthRepository { db }),
            cfg,
        )
    }

    /// Backed by in-memory repositories; nothing survives the process.
    pub fn in_memory(cfg: AuthConfig) -> Self {
        Self::new(Arc::new(MockEntryRepository::default()), Arc::new(MockAuthRepository::default()), cfg)
    }
}
