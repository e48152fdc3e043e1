//! Browser sessions kept in a bounded in-process cache.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tower_sessions::{
    Expiry, SessionManagerLayer, SessionStore,
    cookie::SameSite,
    session::{Id, Record},
    session_store,
};

pub const SESSION_COOKIE_NAME: &str = "portfolio_session";

/// Sessions untouched for this long are dropped together with their flashes.
pub const SESSION_IDLE_SECS: u64 = 30 * 60;

/// Upper bound on live sessions; the least valuable entries are evicted past it.
pub const SESSION_MAX_CAPACITY: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct SessionCache {
    records: Cache<Id, Record>,
    idle: Duration,
}

impl SessionCache {
    pub fn new(max_capacity: u64, idle: Duration) -> Self {
        let records = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_idle(idle)
            .build();

        Self { records, idle }
    }

    /// Cookie-backed layer storing session records in this cache.
    pub fn layer(&self) -> SessionManagerLayer<SessionCache> {
        let idle = tower_sessions::cookie::time::Duration::seconds(self.idle.as_secs() as i64);

        SessionManagerLayer::new(self.clone())
            .with_name(SESSION_COOKIE_NAME)
            .with_secure(false)
            .with_http_only(true)
            .with_same_site(SameSite::Lax)
            .with_expiry(Expiry::OnInactivity(idle))
    }

    /// Number of stored sessions, exact once pending maintenance has run.
    pub async fn len(&self) -> u64 {
        self.records.run_pending_tasks().await;
        self.records.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new(SESSION_MAX_CAPACITY, Duration::from_secs(SESSION_IDLE_SECS))
    }
}

#[async_trait]
impl SessionStore for SessionCache {
    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.records.insert(record.id, record.clone()).await;

        Ok(())
    }

    async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self.records.get(id).await)
    }

    async fn delete(&self, id: &Id) -> session_store::Result<()> {
        self.records.invalidate(id).await;

        Ok(())
    }
}
