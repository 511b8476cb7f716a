//! Session store: the single owner of authentication state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Built once by the composition root, shared by handle (`Rc`), and mirrored
//! into Leptos through [`super::context`]. Login and register go through the
//! [`AuthGateway`]; every change to `user`/`token` is written through to the
//! [`PersistenceAdapter`] and the constructor hydrates from it.
//!
//! CONCURRENCY
//! ===========
//! Single-threaded. The only suspension point is the gateway call inside
//! `login`/`register`, and no `RefCell` borrow is held across it. Overlapping
//! calls are not serialized: whichever settles last wins, and a login that
//! succeeds after a `logout` re-authenticates the store.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::snapshot::{self, Snapshot};
use crate::config::SessionConfig;
use crate::net::api::{AuthGateway, HttpAuthGateway};
use crate::net::error::AuthError;
use crate::net::types::{AuthSession, LoginRequest, RegisterRequest, Role, User};
use crate::util::persistence::{LocalStorageAdapter, PersistenceAdapter};

/// Authentication state visible to the UI.
///
/// `user` and `token` are either both present or both absent, so
/// [`Session::is_authenticated`] is derived rather than stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
    token: Option<String>,
    loading: bool,
}

impl Session {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    /// True while a login or register call is in flight, or when set explicitly.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// `Authorization` header value for downstream API calls.
    #[must_use]
    pub fn bearer_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.user.as_ref().is_some_and(|u| u.role == role)
    }

    pub(crate) fn authenticated(user: User, token: String) -> Self {
        Self { user: Some(user), token: Some(token), loading: false }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot { user: self.user.clone(), token: self.token.clone(), is_authenticated: self.is_authenticated() }
    }

    fn from_snapshot(snapshot: Snapshot) -> Self {
        match (snapshot.user, snapshot.token) {
            (Some(user), Some(token)) if snapshot.is_authenticated => Self::authenticated(user, token),
            _ => Self::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no authenticated session")]
    NotAuthenticated,
}

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&Session)>;

/// What a mutation does to the persisted snapshot.
#[derive(Clone, Copy)]
enum Persist {
    Skip,
    Write,
    Delete,
}

struct Inner {
    session: RefCell<Session>,
    gateway: Rc<dyn AuthGateway>,
    persistence: Rc<dyn PersistenceAdapter>,
    storage_key: String,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_subscription: Cell<u64>,
}

/// Shared handle to the page's session state. Clones refer to the same store.
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<Inner>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &*self.inner.session.borrow())
            .field("storage_key", &self.inner.storage_key)
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Build the store and hydrate it from `persistence`.
    ///
    /// A missing, unreadable, or malformed snapshot leaves the store empty.
    /// The gateway is not contacted during hydration.
    pub fn create(
        config: &SessionConfig,
        gateway: Rc<dyn AuthGateway>,
        persistence: Rc<dyn PersistenceAdapter>,
    ) -> Self {
        let session = restore(persistence.as_ref(), &config.storage_key);
        Self {
            inner: Rc::new(Inner {
                session: RefCell::new(session),
                gateway,
                persistence,
                storage_key: config.storage_key.clone(),
                listeners: RefCell::new(Vec::new()),
                next_subscription: Cell::new(0),
            }),
        }
    }

    /// Store wired to the REST gateway and browser `localStorage`.
    #[must_use]
    pub fn for_browser(config: &SessionConfig) -> Self {
        Self::create(config, Rc::new(HttpAuthGateway::new(config)), Rc::new(LocalStorageAdapter))
    }

    /// Current state, cloned.
    #[must_use]
    pub fn session(&self) -> Session {
        self.inner.session.borrow().clone()
    }

    /// Authenticate with the gateway and persist the resulting session.
    ///
    /// # Errors
    ///
    /// Returns the gateway's [`AuthError`] unchanged. `loading` is reset and
    /// the previous `user`/`token` are kept.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthSession, AuthError> {
        self.set_loading(true);
        let outcome = self.inner.gateway.login(credentials).await;
        self.settle("login", outcome)
    }

    /// Create an account; a successful registration signs the user in.
    ///
    /// # Errors
    ///
    /// Same as [`SessionStore::login`].
    pub async fn register(&self, user_data: &RegisterRequest) -> Result<AuthSession, AuthError> {
        self.set_loading(true);
        let outcome = self.inner.gateway.register(user_data).await;
        self.settle("register", outcome)
    }

    /// Clear the session and delete the persisted snapshot. Idempotent.
    pub fn logout(&self) {
        log::info!("session: logout");
        self.apply(Persist::Delete, |s| *s = Session::default());
    }

    /// Replace the profile of the signed-in user, keeping the token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] when there is no session to
    /// update; the store is left unchanged.
    pub fn set_user(&self, user: User) -> Result<(), SessionError> {
        if !self.inner.session.borrow().is_authenticated() {
            return Err(SessionError::NotAuthenticated);
        }
        self.apply(Persist::Write, |s| s.user = Some(user));
        Ok(())
    }

    pub fn set_loading(&self, loading: bool) {
        self.apply(Persist::Skip, |s| s.loading = loading);
    }

    /// Register `listener` to receive the full session after every mutation.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Session) + 'static,
    {
        let id = SubscriptionId(self.inner.next_subscription.get());
        self.inner.next_subscription.set(id.0 + 1);
        self.inner.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Drop every listener. The store stays readable and mutable.
    pub fn dispose(&self) {
        let dropped = std::mem::take(&mut *self.inner.listeners.borrow_mut());
        log::debug!("session: disposed {} listener(s)", dropped.len());
    }

    fn settle(&self, operation: &str, outcome: Result<AuthSession, AuthError>) -> Result<AuthSession, AuthError> {
        match outcome {
            Ok(auth) => {
                log::info!("session: {operation} succeeded");
                self.apply(Persist::Write, |s| *s = Session::authenticated(auth.user.clone(), auth.token.clone()));
                Ok(auth)
            }
            Err(err) => {
                log::warn!("session: {operation} failed: {err}");
                self.apply(Persist::Skip, |s| s.loading = false);
                Err(err)
            }
        }
    }

    fn apply(&self, persist: Persist, mutate: impl FnOnce(&mut Session)) {
        mutate(&mut *self.inner.session.borrow_mut());
        match persist {
            Persist::Skip => {}
            Persist::Write => self.write_snapshot(),
            Persist::Delete => {
                if let Err(e) = self.inner.persistence.delete(&self.inner.storage_key) {
                    log::warn!("session: snapshot delete failed: {e}");
                }
            }
        }
        self.notify();
    }

    fn write_snapshot(&self) {
        let snapshot = self.inner.session.borrow().snapshot();
        let raw = match snapshot::encode(&snapshot) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("session: snapshot encode failed: {e}");
                return;
            }
        };
        if let Err(e) = self.inner.persistence.write(&self.inner.storage_key, &raw) {
            log::warn!("session: snapshot write failed: {e}");
        }
    }

    fn notify(&self) {
        let session = self.session();
        // Snapshot the list so listeners may subscribe or mutate re-entrantly.
        let listeners: Vec<Listener> = self.inner.listeners.borrow().iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in listeners {
            listener(&session);
        }
    }
}

fn restore(persistence: &dyn PersistenceAdapter, key: &str) -> Session {
    let raw = match persistence.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Session::default(),
        Err(e) => {
            log::warn!("session: snapshot read failed, starting empty: {e}");
            return Session::default();
        }
    };
    match snapshot::decode(&raw) {
        Ok(snapshot) => {
            let session = Session::from_snapshot(snapshot);
            if session.is_authenticated() {
                log::info!("session: restored from storage");
            }
            session
        }
        Err(e) => {
            log::warn!("session: discarding stored snapshot: {e}");
            Session::default()
        }
    }
}
