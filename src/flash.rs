//! One-shot status messages queued against a browser session.

use serde::{Deserialize, Serialize};
use tower_sessions::{Session, session};

/// Session key holding the ordered queue of pending flashes.
pub const FLASHES_KEY: &str = "_flashes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for FlashLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

/// Appends `flashes` after any already pending in `session`.
pub async fn push(
    session: &Session,
    flashes: impl IntoIterator<Item = Flash>,
) -> Result<(), session::Error> {
    let mut pending: Vec<Flash> = session.get(FLASHES_KEY).await?.unwrap_or_default();
    pending.extend(flashes);

    if pending.is_empty() {
        return Ok(());
    }

    session.insert(FLASHES_KEY, pending).await
}

/// Drains the pending flashes of `session`, oldest first.
///
/// A session left with no data is deleted from the store.
pub async fn take(session: &Session) -> Result<Vec<Flash>, session::Error> {
    let pending: Option<Vec<Flash>> = session.get(FLASHES_KEY).await?;
    if pending.is_some() {
        session.remove::<Vec<Flash>>(FLASHES_KEY).await?;

        if session.is_empty().await {
            session.flush().await?;
        }
    }

    Ok(pending.unwrap_or_default())
}
