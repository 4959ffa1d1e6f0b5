//! Session context and the in-memory session registry.
//!
//! A session is created at login, handed read-only to every guarded handler,
//! and invalidated at logout together with the filter views it owns.

mod token;

pub use token::role_from_token;
#[cfg(test)]
pub(crate) use token::encode_test_token;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::filter::{EmployeeFilterView, Screen};

/// Role granted by the organization API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Admin" => Some(Role::Admin),
            "Employee" => Some(Role::Employee),
            _ => None,
        }
    }

    /// Console route a freshly signed-in user lands on.
    pub fn landing(&self) -> &'static str {
        match self {
            Role::Admin => "/admin/employees",
            Role::Employee => "/employee/profile",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("Admin"),
            Role::Employee => f.write_str("Employee"),
        }
    }
}

/// Authentication state of one signed-in user.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub id: Uuid,
    /// Bearer token issued by the organization API
    pub token: String,
    pub role: Role,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl SessionContext {
    pub fn new(token: String, role: Role, email: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            token,
            role,
            email,
            created_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.id,
            role: self.role,
            email: self.email.clone(),
            landing: self.role.landing().to_string(),
            created_at: self.created_at,
        }
    }
}

/// Client-facing description of a session. The upstream token is never exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub role: Role,
    pub email: String,
    pub landing: String,
    pub created_at: DateTime<Utc>,
}

/// How often the idle sweeper wakes up.
const SWEEP_INTERVAL_SECS: u64 = 60;

struct SessionEntry {
    context: SessionContext,
    last_seen: Instant,
}

/// Registry of live sessions and the filter views mounted under them.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    views: Mutex<HashMap<(Uuid, Screen), EmployeeFilterView>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: SessionContext) {
        let entry = SessionEntry {
            context: session,
            last_seen: Instant::now(),
        };
        self.sessions.write().await.insert(entry.context.id, entry);
    }

    /// Look up a session and mark it as seen.
    pub async fn get(&self, id: &Uuid) -> Option<SessionContext> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(id)?;
        entry.last_seen = Instant::now();
        Some(entry.context.clone())
    }

    /// Remove a session and every view it owns. Returns whether it existed.
    pub async fn invalidate(&self, id: &Uuid) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        self.views
            .lock()
            .await
            .retain(|(session_id, _), _| session_id != id);
        removed
    }

    /// Install a freshly loaded view, replacing any previous mount.
    ///
    /// A load that finishes after the session was invalidated is dropped.
    pub async fn mount_view(&self, session_id: Uuid, view: EmployeeFilterView) -> bool {
        // Hold the session read lock so a concurrent logout cannot slip in between.
        let sessions = self.sessions.read().await;
        if !sessions.contains_key(&session_id) {
            return false;
        }
        let screen = view.screen();
        self.views.lock().await.insert((session_id, screen), view);
        true
    }

    pub async fn unmount_view(&self, session_id: Uuid, screen: Screen) -> bool {
        self.views.lock().await.remove(&(session_id, screen)).is_some()
    }

    /// Run `f` against a mounted view. Returns `None` when no view is mounted.
    pub async fn with_view<R>(
        &self,
        session_id: Uuid,
        screen: Screen,
        f: impl FnOnce(&mut EmployeeFilterView) -> R,
    ) -> Option<R> {
        let mut views = self.views.lock().await;
        views.get_mut(&(session_id, screen)).map(f)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop every session unseen for at least `max_idle`, with its views.
    /// Returns how many sessions were removed.
    pub async fn sweep_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) < max_idle);
        let removed = before - sessions.len();

        if removed > 0 {
            self.views
                .lock()
                .await
                .retain(|(session_id, _), _| sessions.contains_key(session_id));
        }
        removed
    }

    /// Spawn the background task that expires idle sessions.
    pub fn start_idle_sweeper(self: &Arc<Self>, max_idle: Duration) {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(SWEEP_INTERVAL_SECS));
            loop {
                interval.tick().await;
                let expired = store.sweep_idle(max_idle).await;
                if expired > 0 {
                    let active_sessions = store.len().await;
                    tracing::info!(expired, active_sessions, "Expired idle sessions");
                }
            }
        });
    }
}
