//! Observable current-user store backed by the session cache.

use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::db::Database;
use crate::models::CurrentUser;

use super::SessionResult;

/// Callback invoked with the new user (or `None` after sign-out).
pub type SessionListener = Arc<dyn Fn(Option<&CurrentUser>) + Send + Sync>;

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for SubscriptionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Current-user store with explicit subscribe/notify.
pub struct SessionStore {
    /// Held across store + notify so listeners observe changes in commit order
    updates: Mutex<()>,
    db: Mutex<Database>,
    current: Mutex<Option<CurrentUser>>,
    listeners: Mutex<Vec<(SubscriptionId, SessionListener)>>,
}

impl SessionStore {
    /// Open a store whose cache lives at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> SessionResult<Self> {
        Self::with_database(Database::open(path)?)
    }

    /// Open a store with an in-memory cache (for testing).
    pub fn open_in_memory() -> SessionResult<Self> {
        Self::with_database(Database::open_in_memory()?)
    }

    /// Wrap an existing database, restoring any cached user.
    pub fn with_database(db: Database) -> SessionResult<Self> {
        let current = match db.load_session_user() {
            Ok(cached) => cached.map(|c| c.user),
            Err(e) => {
                // The cache is disposable: drop an unreadable row and start signed out.
                tracing::warn!("discarding unreadable session cache: {}", e);
                db.clear_session_user()?;
                None
            }
        };

        if let Some(user) = &current {
            tracing::info!(uid = %user.uid, "restored cached session");
        }

        Ok(Self {
            updates: Mutex::new(()),
            db: Mutex::new(db),
            current: Mutex::new(current),
            listeners: Mutex::new(Vec::new()),
        })
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> SessionResult<Option<CurrentUser>> {
        Ok(self.current.lock()?.clone())
    }

    /// Replace the signed-in user. Returns whether anything changed.
    ///
    /// Subscribers are notified only on change, in subscription order.
    /// Concurrent updates are serialised, so the last notification always
    /// carries the stored user. Listeners must not call back into
    /// `set_current_user` or `clear`.
    pub fn set_current_user(&self, user: Option<CurrentUser>) -> SessionResult<bool> {
        let _update = self.updates.lock()?;
        {
            let mut current = self.current.lock()?;
            if *current == user {
                return Ok(false);
            }

            let db = self.db.lock()?;
            match &user {
                Some(u) => {
                    db.save_session_user(u)?;
                }
                None => {
                    db.clear_session_user()?;
                }
            }
            *current = user.clone();
        }

        match &user {
            Some(u) => tracing::info!(uid = %u.uid, "session user changed"),
            None => tracing::info!("session cleared"),
        }

        self.notify(user.as_ref())?;
        Ok(true)
    }

    /// Sign out. Equivalent to `set_current_user(None)`.
    pub fn clear(&self) -> SessionResult<bool> {
        self.set_current_user(None)
    }

    /// Register a listener for user changes.
    pub fn subscribe<F>(&self, listener: F) -> SessionResult<SubscriptionId>
    where
        F: Fn(Option<&CurrentUser>) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.listeners.lock()?.push((id, Arc::new(listener)));
        tracing::debug!(subscription = %id, "session listener added");
        Ok(id)
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> SessionResult<bool> {
        let mut listeners = self.listeners.lock()?;
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        Ok(listeners.len() != before)
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> SessionResult<usize> {
        Ok(self.listeners.lock()?.len())
    }

    fn notify(&self, user: Option<&CurrentUser>) -> SessionResult<()> {
        // Snapshot so listeners may (un)subscribe without deadlocking.
        let listeners: Vec<SessionListener> = self
            .listeners
            .lock()?
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(user);
        }
        Ok(())
    }
}
