use std::sync::Arc;

use super::common::*;
use crate::registry::cart::{Cart, CART_SESSION_KEY};
use crate::registry::domain::{CartItem, ProjectId, UserRole};
use crate::registry::session::{
    AuthError, AuthSession, MemorySessionStore, SessionStore, USER_SESSION_KEY,
};

fn line(project: &str, quantity: u64, price: u32) -> CartItem {
    CartItem {
        project_id: ProjectId(project.to_string()),
        project_name: format!("Project {project}"),
        quantity,
        price_per_credit: price,
    }
}

#[test]
fn login_persists_user_and_hydrates_in_new_session() {
    let store = Arc::new(MemorySessionStore::default());
    let mut session = AuthSession::new(store.clone());

    let user = session
        .login(&directory(), "buyer@bcx.in", "buyer123")
        .expect("login succeeds");
    assert_eq!(user.id, "buyer-001");
    assert!(store.get(USER_SESSION_KEY).is_some());

    let mut restored = AuthSession::new(store);
    let hydrated = restored.hydrate().expect("user restored");
    assert_eq!(hydrated, &buyer());
}

#[test]
fn login_rejects_bad_password_and_orphaned_credentials() {
    let store = Arc::new(MemorySessionStore::default());
    let mut session = AuthSession::new(store.clone());

    let err = session
        .login(&directory(), "buyer@bcx.in", "wrong")
        .expect_err("bad password");
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(err.to_string(), "Invalid email or password.");

    let err = session
        .login(&directory(), "ghost@bcx.in", "ghost123")
        .expect_err("no user record");
    assert!(matches!(err, AuthError::UnknownUser));
    assert!(session.current_user().is_none());
    assert!(store.get(USER_SESSION_KEY).is_none());
}

#[test]
fn logout_clears_stored_user() {
    let store = Arc::new(MemorySessionStore::default());
    let mut session = AuthSession::new(store.clone());
    session
        .login(&directory(), "buyer@bcx.in", "buyer123")
        .expect("login succeeds");

    session.logout();

    assert!(session.current_user().is_none());
    assert!(store.get(USER_SESSION_KEY).is_none());
}

#[test]
fn malformed_session_entry_is_ignored() {
    let store = Arc::new(MemorySessionStore::default());
    store.set(USER_SESSION_KEY, "{not json".to_string());
    let mut session = AuthSession::new(store);

    assert!(session.hydrate().is_none());
}

#[test]
fn role_guard_requires_matching_role() {
    let store = Arc::new(MemorySessionStore::default());
    let mut session = AuthSession::new(store);
    assert!(matches!(
        session.require_role(UserRole::Buyer),
        Err(AuthError::NotSignedIn)
    ));

    session
        .login(&directory(), "buyer@bcx.in", "buyer123")
        .expect("login succeeds");

    assert!(session.require_role(UserRole::Buyer).is_ok());
    assert!(matches!(
        session.require_role(UserRole::Admin),
        Err(AuthError::Forbidden {
            required: UserRole::Admin
        })
    ));
}

#[test]
fn cart_merges_lines_and_totals() {
    let mut cart = Cart::default();
    cart.add_item(line("prj-a", 10, 800));
    cart.add_item(line("prj-b", 2, 1150));
    cart.add_item(line("prj-a", 5, 800));

    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.items()[0].quantity, 15);
    assert_eq!(cart.total_items(), 17);
    assert_eq!(cart.total_value(), 15 * 800 + 2 * 1150);
}

#[test]
fn cart_quantity_updates_and_removals() {
    let mut cart = Cart::default();
    cart.add_item(line("prj-a", 10, 800));
    cart.add_item(line("prj-b", 2, 1150));

    cart.update_quantity(&ProjectId("prj-a".to_string()), 3);
    assert_eq!(cart.items()[0].quantity, 3);

    cart.update_quantity(&ProjectId("prj-unknown".to_string()), 7);
    assert_eq!(cart.items().len(), 2);

    cart.update_quantity(&ProjectId("prj-b".to_string()), 0);
    assert_eq!(cart.items().len(), 1);

    cart.update_quantity(&ProjectId("prj-a".to_string()), -4);
    assert!(cart.is_empty());
}

#[test]
fn cart_round_trips_through_session_store() {
    let store = MemorySessionStore::default();
    let mut cart = Cart::default();
    cart.add_item(line("prj-a", 10, 800));

    cart.save(&store).expect("cart saved");
    assert_eq!(Cart::load(&store).expect("cart loaded"), cart);

    cart.clear();
    cart.save(&store).expect("cart saved");
    assert!(store.get(CART_SESSION_KEY).is_none());
    assert!(Cart::load(&store).expect("cart loaded").is_empty());
}

#[test]
fn cart_totals_saturate_instead_of_overflowing() {
    let mut cart = Cart::default();
    cart.add_item(line("prj-a", u64::MAX, 800));
    cart.add_item(line("prj-a", 10, 800));
    cart.add_item(line("prj-b", 5, 1150));

    assert_eq!(cart.items()[0].quantity, u64::MAX);
    assert_eq!(cart.total_items(), u64::MAX);
    assert_eq!(cart.total_value(), u64::MAX);
}
