//! Shared client-side state.
//!
//! DESIGN
//! ======
//! State is split by domain (`session`, `toast`) so components depend on
//! small focused models. `AppState` bundles one instance of each and is
//! constructed once per running application, then cloned into whichever
//! component needs read or subscribe access.


pub mod session;
pub mod store;
pub mod toast;

use tokio::task::JoinHandle;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::net::api::ApiClient;
use session::SessionStore;
use toast::ToastQueue;

/// Application-wide state handed to UI components.
///
/// Clone is cheap; clones share the same session and toast queue.
#[derive(Clone, Debug)]
pub struct AppState {
    pub session: SessionStore,
    pub toasts: ToastQueue,
}

impl AppState {
    /// Build the state without contacting the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the API client cannot be built from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let api = ApiClient::new(config)?;
        Ok(Self { session: SessionStore::new(api), toasts: ToastQueue::new() })
    }

    /// Build the state and kick off the initial auth check.
    ///
    /// Must be called inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the API client cannot be built from `config`.
    pub fn bootstrap(config: &ClientConfig) -> Result<(Self, JoinHandle<()>), ClientError> {
        let api = ApiClient::new(config)?;
        let (session, auth_check) = SessionStore::bootstrap(api);
        Ok((Self { session, toasts: ToastQueue::new() }, auth_check))
    }
}
