//! Leptos context bridge for the session store.
//!
//! DESIGN
//! ======
//! The store is `Rc`-based and `!Send`, so it lives in a local `StoredValue`;
//! components read the mirrored `RwSignal<Session>` reactively and reach the
//! store only to call its mutators.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use leptos::prelude::*;

use super::session::{Session, SessionStore};

/// Handles provided to the component tree by [`provide_session_context`].
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub store: StoredValue<SessionStore, LocalStorage>,
    pub session: RwSignal<Session>,
}

impl SessionContext {
    /// Clone of the store handle, for use inside `spawn_local` tasks.
    #[must_use]
    pub fn store(&self) -> SessionStore {
        self.store.get_value()
    }
}

/// Mirror `store` into a signal and provide both via context.
///
/// The mirroring subscription is removed when the current owner is cleaned up.
pub fn provide_session_context(store: SessionStore) -> SessionContext {
    let session = RwSignal::new(store.session());
    let subscription = store.subscribe(move |next| {
        let _ = session.try_set(next.clone());
    });
    let ctx = SessionContext { store: StoredValue::new_local(store), session };

    let handle = ctx.store;
    on_cleanup(move || {
        let _ = handle.try_with_value(|s| s.unsubscribe(subscription));
    });

    provide_context(ctx);
    ctx
}

/// Fetch the context installed by [`provide_session_context`], if any.
pub fn use_session_context() -> Option<SessionContext> {
    use_context::<SessionContext>()
}
