//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards and user-aware components subscribe here. The store starts
//! empty and learns the user from a one-shot `GET /user` check issued when
//! the store is bootstrapped; later checks (e.g. after login) are caller-driven.
//!
//! ERROR HANDLING
//! ==============
//! A failed check is silent: whatever the cause, the current user is left
//! untouched and nothing is returned to the caller.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::store::{Store, Subscription};
use crate::net::api::ApiClient;
use crate::net::types::User;

/// Holds the authenticated user, if any.
#[derive(Clone, Debug)]
pub struct SessionStore {
    user: Store<Option<User>>,
    api: ApiClient,
}

impl SessionStore {
    /// An empty session with no check issued.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { user: Store::new(None), api }
    }

    /// Create the store and immediately spawn the initial auth check.
    ///
    /// Must be called inside a tokio runtime. Await the returned handle to
    /// observe the post-check state.
    #[must_use]
    pub fn bootstrap(api: ApiClient) -> (Self, JoinHandle<()>) {
        let store = Self::new(api);
        let checker = store.clone();
        let handle = tokio::spawn(async move { checker.check_auth().await });
        (store, handle)
    }

    /// Ask the server who is logged in and record the answer.
    ///
    /// Concurrent calls are allowed; each one that succeeds sets the user and
    /// the last to finish wins.
    pub async fn check_auth(&self) {
        match self.api.fetch_current_user().await {
            Ok(user) => {
                info!(user_id = %user.id, "session authenticated");
                self.user.set(Some(user));
            }
            Err(e) => {
                debug!(error = %e, "auth check did not yield a user");
            }
        }
    }

    /// Drop the current user (logout).
    pub fn clear(&self) {
        let cleared = self.user.update_if(|user| user.take().is_some());
        if cleared {
            info!("session cleared");
        }
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.user.get()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.with(Option::is_some)
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Option<User>) + Send + Sync + 'static,
    {
        self.user.subscribe(callback)
    }
}
