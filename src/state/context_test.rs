use super::*;
use crate::config::SessionConfig;
use crate::net::api::HttpAuthGateway;
use crate::net::types::{Role, User};
use crate::util::persistence::MemoryAdapter;
use std::rc::Rc;

fn user() -> User {
    User {
        id: "u1".to_owned(),
        student_id: "20230001".to_owned(),
        name: "Kim Minji".to_owned(),
        email: "minji@campus.example".to_owned(),
        school: "Seoul Tech".to_owned(),
        department: "Computer Science".to_owned(),
        phone: "010-1234-5678".to_owned(),
        role: Role::Student,
        created_at: "2024-03-02T09:00:00Z".to_owned(),
        grade: None,
        admission_year: None,
    }
}

fn store() -> SessionStore {
    let cfg = SessionConfig::default();
    SessionStore::create(&cfg, Rc::new(HttpAuthGateway::new(&cfg)), Rc::new(MemoryAdapter::new()))
}

fn signed_in_store() -> SessionStore {
    let cfg = SessionConfig::default();
    let adapter = MemoryAdapter::new();
    let snapshot = crate::state::snapshot::Snapshot {
        user: Some(user()),
        token: Some("tok-abc".to_owned()),
        is_authenticated: true,
    };
    let raw = crate::state::snapshot::encode(&snapshot).unwrap();
    adapter.insert(&cfg.storage_key, &raw);
    SessionStore::create(&cfg, Rc::new(HttpAuthGateway::new(&cfg)), Rc::new(adapter))
}

// =============================================================
// provide_session_context
// =============================================================

#[test]
fn provide_seeds_signal_from_current_store_state() {
    let store = signed_in_store();
    let owner = Owner::new();
    let ctx = owner.with(|| provide_session_context(store.clone()));

    let session = ctx.session.get_untracked();
    assert!(session.is_authenticated());
    assert_eq!(session.token(), Some("tok-abc"));
    owner.cleanup();
}

#[test]
fn signal_follows_store_mutations() {
    let store = store();
    let owner = Owner::new();
    let ctx = owner.with(|| provide_session_context(store.clone()));
    assert_eq!(store.listener_count(), 1);

    store.set_loading(true);
    assert!(ctx.session.get_untracked().loading());

    store.set_loading(false);
    assert!(!ctx.session.get_untracked().loading());
    owner.cleanup();
}

#[test]
fn signal_follows_logout() {
    let store = signed_in_store();
    let owner = Owner::new();
    let ctx = owner.with(|| provide_session_context(store.clone()));

    store.logout();

    assert!(!ctx.session.get_untracked().is_authenticated());
    assert_eq!(ctx.session.get_untracked(), store.session());
    owner.cleanup();
}

#[test]
fn stored_handle_refers_to_same_store() {
    let store = store();
    let owner = Owner::new();
    let ctx = owner.with(|| provide_session_context(store.clone()));

    ctx.store().set_loading(true);

    assert!(store.session().loading());
    assert!(ctx.session.get_untracked().loading());
    owner.cleanup();
}

// =============================================================
// cleanup
// =============================================================

#[test]
fn owner_cleanup_removes_mirroring_listener() {
    let store = store();
    let owner = Owner::new();
    let _ctx = owner.with(|| provide_session_context(store.clone()));
    assert_eq!(store.listener_count(), 1);

    owner.cleanup();

    assert_eq!(store.listener_count(), 0);
}

#[test]
fn store_stays_usable_after_owner_cleanup() {
    let store = store();
    let owner = Owner::new();
    let _ctx = owner.with(|| provide_session_context(store.clone()));
    owner.cleanup();

    store.set_loading(true);

    assert!(store.session().loading());
}

#[test]
fn remounting_does_not_accumulate_listeners() {
    let store = store();
    for _ in 0..3 {
        let owner = Owner::new();
        let _ctx = owner.with(|| provide_session_context(store.clone()));
        owner.cleanup();
    }
    assert_eq!(store.listener_count(), 0);
}

// =============================================================
// use_session_context
// =============================================================

#[test]
fn use_session_context_finds_provided_handles() {
    let store = store();
    let owner = Owner::new();
    let found = owner.with(|| {
        provide_session_context(store.clone());
        use_session_context()
    });

    let ctx = found.expect("context should be provided");
    store.set_loading(true);
    assert!(ctx.session.get_untracked().loading());
    owner.cleanup();
}

#[test]
fn use_session_context_is_none_without_provider() {
    let owner = Owner::new();
    assert!(owner.with(use_session_context).is_none());
}
