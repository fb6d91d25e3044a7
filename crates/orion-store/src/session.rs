//! # Session / Demo Auth Gate
//!
//! Checks an email and password against the fixed demo accounts and keeps
//! the signed-in user in memory and in the [`SESSION_KEY`] slot, so a
//! restart restores the session without signing in again.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  restore() ──► read slot ──► valid User JSON? ──► current user          │
//! │                                  │ no                                   │
//! │                                  └──► warn, drop slot, signed out       │
//! │                                                                         │
//! │  login(email, pw) ──► demo user + "demo123"? ──► memory + slot ──► true │
//! │  logout()         ──► clear memory + slot                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Demo only: no hashing, no tokens, no expiry.

use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use orion_core::User;

use crate::kv::{get_json, set_json, KeyValueStore, SESSION_KEY};
use crate::seed::demo_users;

/// The shared demo password.
pub const DEMO_PASSWORD: &str = "demo123";

/// The signed-in user, shareable across tasks (`Arc<SessionStore>`).
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
    users: Vec<User>,
    current: RwLock<Option<User>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("current", &self.current_user().map(|u| u.email))
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Restores the session persisted in `kv`, if any.
    pub fn restore(kv: Arc<dyn KeyValueStore>) -> Self {
        let current = match get_json::<User>(kv.as_ref(), SESSION_KEY) {
            Ok(Some(user)) => {
                info!(email = %user.email, "Restored session");
                Some(user)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session slot");
                if let Err(e) = kv.remove(SESSION_KEY) {
                    warn!(error = %e, "Failed to clear session slot");
                }
                None
            }
        };

        SessionStore {
            kv,
            users: demo_users(),
            current: RwLock::new(current),
        }
    }

    /// Signs in a demo account. Returns false for an unknown email or a
    /// wrong password, leaving any existing session untouched.
    ///
    /// A failed slot write is logged; the in-memory session still starts.
    pub fn login(&self, email: &str, password: &str) -> bool {
        let Some(user) = self.users.iter().find(|u| u.email == email) else {
            info!(email = %email, "Login rejected: unknown account");
            return false;
        };
        if password != DEMO_PASSWORD {
            info!(email = %email, "Login rejected: wrong password");
            return false;
        }

        if let Err(e) = set_json(self.kv.as_ref(), SESSION_KEY, user) {
            warn!(error = %e, "Failed to persist session");
        }
        *self.write() = Some(user.clone());
        info!(email = %email, role = ?user.role, "Signed in");
        true
    }

    pub fn logout(&self) {
        if let Err(e) = self.kv.remove(SESSION_KEY) {
            warn!(error = %e, "Failed to clear session slot");
        }
        if let Some(user) = self.write().take() {
            info!(email = %user.email, "Signed out");
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// The demo accounts accepted by [`login`](Self::login).
    pub fn accounts(&self) -> &[User] {
        &self.users
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<User>> {
        self.current.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<User>> {
        self.current.write().unwrap_or_else(|p| p.into_inner())
    }
}
