use std::sync::{Arc, Mutex, PoisonError, RwLock};

use super::UserRole;
use crate::cache::{Broadcaster, SubscriptionId};
use crate::storage::DurableStore;

/// Durable store key the selected role is persisted under.
pub const ROLE_STORAGE_KEY: &str = "user-role";

/// Current user role, persisted best-effort and broadcast on change.
///
/// Changes are serialized, so the stored label and the last broadcast role
/// always match the current selection.
///
/// Clone-friendly (cloning shares the selection and its listeners).
#[derive(Clone)]
pub struct RoleSelector {
    role: Arc<RwLock<UserRole>>,
    changes: Arc<Mutex<()>>,
    broadcaster: Broadcaster<UserRole>,
    store: Option<Arc<dyn DurableStore>>,
}

impl Default for RoleSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleSelector {
    /// Memory-only selector starting at the default role.
    pub fn new() -> Self {
        Self {
            role: Arc::new(RwLock::new(UserRole::default())),
            changes: Arc::new(Mutex::new(())),
            broadcaster: Broadcaster::new(),
            store: None,
        }
    }

    /// Selector restored from `store`; a missing or unknown label yields the default role.
    pub fn with_store<S>(store: S) -> Self
    where
        S: DurableStore + 'static,
    {
        let stored = match store.get(ROLE_STORAGE_KEY) {
            Ok(Some(label)) => label.parse::<UserRole>().unwrap_or_else(|e| {
                tracing::debug!(error = %e, "ignoring stored role");
                UserRole::default()
            }),
            Ok(None) => UserRole::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored role");
                UserRole::default()
            }
        };

        let mut selector = Self::new();
        selector.role = Arc::new(RwLock::new(stored));
        selector.store = Some(Arc::new(store));
        selector
    }

    pub fn role(&self) -> UserRole {
        *self.role.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Select `role`, persist it and notify listeners.
    pub fn set_role(&self, role: UserRole) {
        let _change = self.changes.lock().unwrap_or_else(PoisonError::into_inner);
        *self.role.write().unwrap_or_else(PoisonError::into_inner) = role;

        if let Some(store) = &self.store {
            if let Err(e) = store.set(ROLE_STORAGE_KEY, role.as_str()) {
                tracing::warn!(%role, error = %e, "failed to persist role");
            }
        }

        self.broadcaster.publish(&role);
    }

    /// Subscribe to role changes; the listener first receives the current role.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&UserRole) + Send + Sync + 'static,
    {
        let (id, listener) = self.broadcaster.register(Arc::new(listener));
        listener(&self.role());
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.broadcaster.unsubscribe(id)
    }

    pub fn is_admin_full(&self) -> bool {
        self.role() == UserRole::AdminFull
    }

    pub fn is_admin_consulta(&self) -> bool {
        self.role() == UserRole::AdminConsulta
    }

    pub fn is_admin_solicitacao(&self) -> bool {
        self.role() == UserRole::AdminSolicitacao
    }
}
