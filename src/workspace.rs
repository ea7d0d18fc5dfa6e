//! Per-browser client state.
//!
//! Each browser session gets one [`Workspace`] holding its own stores and
//! page state. Workspaces live only in memory and are dropped on logout,
//! after a period of inactivity, or when the process exits.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::pages::{AuthPage, TablePage};
use crate::store::{AuthState, TableState};

/// Workspaces untouched for this long are discarded by [`SessionRegistry::sweep_idle`].
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(2 * 60 * 60);

#[derive(Debug, Default)]
pub struct Workspace {
    pub auth: AuthState,
    pub table: TableState,
    pub auth_page: AuthPage,
    pub table_page: TablePage,
}

impl Workspace {
    /// Start a fresh table page, as when it is first shown after login.
    pub fn mount_table_page(&mut self) {
        self.table = TableState::default();
        self.table_page = TablePage::default();
    }

    /// Clear the session and every piece of state that belonged to it.
    pub fn logout(&mut self) {
        *self = Workspace::default();
    }
}

pub type SharedWorkspace = Arc<tokio::sync::Mutex<Workspace>>;

struct Entry {
    workspace: SharedWorkspace,
    last_seen: Instant,
}

#[derive(Clone, Default)]
pub struct SessionRegistry {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<SharedWorkspace> {
        let mut map = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        map.get_mut(id).map(|entry| {
            entry.last_seen = Instant::now();
            Arc::clone(&entry.workspace)
        })
    }

    pub fn get_or_create(&self, id: &str) -> SharedWorkspace {
        let mut map = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let entry = map.entry(id.to_string()).or_insert_with(|| {
            log::debug!("Creating workspace");
            Entry {
                workspace: Arc::new(tokio::sync::Mutex::new(Workspace::default())),
                last_seen: Instant::now(),
            }
        });
        entry.last_seen = Instant::now();
        Arc::clone(&entry.workspace)
    }

    pub fn remove(&self, id: &str) {
        let mut map = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(id);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop workspaces not used since `now - max_idle`. Returns how many were dropped.
    pub fn sweep_idle(&self, now: Instant, max_idle: Duration) -> usize {
        let mut map = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let before = map.len();
        map.retain(|_, entry| now.saturating_duration_since(entry.last_seen) < max_idle);
        before - map.len()
    }
}

/// Periodically drop idle workspaces.
pub fn spawn_sweeper(registry: SessionRegistry) {
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            let dropped = registry.sweep_idle(Instant::now(), IDLE_TIMEOUT);
            if dropped > 0 {
                log::info!("Dropped {dropped} idle workspaces");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_id_yields_same_workspace() {
        let registry = SessionRegistry::new();
        let a = registry.get_or_create("s1");
        let b = registry.get_or_create("s1");
        assert!(Arc::ptr_eq(&a, &b));
        assert!(registry.get("s2").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn sessions_do_not_share_state() {
        let registry = SessionRegistry::new();
        let a = registry.get_or_create("s1");
        let b = registry.get_or_create("s2");
        a.try_lock().unwrap().auth.login_success("tok");
        assert!(!b.try_lock().unwrap().auth.is_authenticated());
    }

    #[test]
    fn sweep_drops_entries_past_idle_limit() {
        let registry = SessionRegistry::new();
        registry.get_or_create("a");
        registry.get_or_create("b");
        let later = Instant::now() + Duration::from_secs(60);

        assert_eq!(registry.sweep_idle(later, Duration::from_secs(30)), 2);
        assert!(registry.is_empty());

        registry.get_or_create("again");
        assert_eq!(registry.sweep_idle(Instant::now(), Duration::from_secs(30)), 0);
    }

    #[test]
    fn logout_resets_the_workspace() {
        let mut ws = Workspace::default();
        ws.auth.login_success("tok");
        ws.table.replace_all(vec![crate::models::DocumentRow::empty("r1")]);
        ws.logout();
        assert!(!ws.auth.is_authenticated());
        assert!(ws.table.is_empty());
    }
}
