use serde_json::json;

use super::*;
use crate::error::ErrorCode;
use crate::access::test_helpers::test_boundary;
use crate::store::DesignStore;

fn den_with_chair() -> DesignSession {
    let mut session = DesignSession::new("Den", Mode::Plan, &Config::default());
    session.engine_mut().add_object("chair1blue").unwrap();
    session
}

fn chair_id(session: &DesignSession) -> i64 {
    session.engine().scene().objects()[0].id
}

#[tokio::test]
async fn create_stores_and_records_source() {
    let owner = Uuid::new_v4();
    let t = test_boundary(Some(owner));
    let mut session = den_with_chair();

    let doc = session.save(SaveIntent::Create, &t.boundary).await.unwrap();

    assert_eq!(doc.owner_id, owner);
    assert_eq!(doc.name, "Den");
    assert_eq!(doc.kind, Mode::Plan);
    assert_eq!(session.source(), Some(doc.id));
    assert_eq!(t.store.len().await, 1);
}

#[tokio::test]
async fn create_requires_identity() {
    let t = test_boundary(None);
    let mut session = den_with_chair();
    let err = session.save(SaveIntent::Create, &t.boundary).await.unwrap_err();
    assert!(matches!(err, DesignError::Unauthenticated));
    assert_eq!(session.source(), None);
    assert!(t.store.is_empty().await);
}

#[test]
fn update_in_place_without_source_is_not_persisted() {
    let session = den_with_chair();
    let err = session.prepare_save(SaveIntent::UpdateInPlace).unwrap_err();
    assert!(matches!(err, DesignError::NotPersisted));
}

#[tokio::test]
async fn update_in_place_overwrites_source() {
    let t = test_boundary(Some(Uuid::new_v4()));
    let mut session = den_with_chair();
    let first = session.save(SaveIntent::Create, &t.boundary).await.unwrap();

    let id = chair_id(&session);
    session.engine_mut().update_field(id, "x", "120").unwrap();
    session.rename("Den v2");
    let second = session.save(SaveIntent::UpdateInPlace, &t.boundary).await.unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.name, "Den v2");
    assert_eq!(second.design_data["objects"][0]["x"], json!(120.0));
    assert_eq!(t.store.len().await, 1);
}

#[tokio::test]
async fn save_as_new_across_owners_leaves_source_alone() {
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let t = test_boundary(Some(alice));

    let mut original = den_with_chair();
    original.set_public(true);
    let source = original.save(SaveIntent::Create, &t.boundary).await.unwrap();

    t.identity.sign_in(bob);
    let fetched = t.boundary.fetch(source.id).await.unwrap();
    let (mut copy, recovered) = DesignSession::open(&fetched, &Config::default());
    assert!(recovered.is_empty());

    // Bob may not overwrite Alice's design.
    let err = copy.save(SaveIntent::UpdateInPlace, &t.boundary).await.unwrap_err();
    assert!(matches!(err, DesignError::Forbidden));

    let saved = copy.save(SaveIntent::SaveAsNew, &t.boundary).await.unwrap();
    assert_ne!(saved.id, source.id);
    assert_eq!(saved.owner_id, bob);
    assert_eq!(saved.name, "Den (Edited)");
    assert_eq!(copy.source(), Some(saved.id));
    assert_eq!(copy.meta().name, "Den (Edited)");

    let untouched = t.store.fetch(source.id).await.unwrap();
    assert_eq!(untouched, source);
}

#[tokio::test]
async fn save_as_new_uses_suffix_from_environment() {
    let config = Config::from_lookup(|key| (key == "SAVE_AS_NEW_SUFFIX").then(|| " copy".to_owned()));
    let t = test_boundary(Some(Uuid::new_v4()));

    let mut fresh = DesignSession::new("Den", Mode::Plan, &config);
    fresh.engine_mut().add_object("chair1blue").unwrap();
    let stored = fresh.save(SaveIntent::Create, &t.boundary).await.unwrap();
    assert_eq!(stored.name, "Den");

    let (mut reopened, _) = DesignSession::open(&stored, &config);
    let saved = reopened.save(SaveIntent::SaveAsNew, &t.boundary).await.unwrap();
    assert_eq!(saved.name, "Den copy");
    assert_eq!(t.store.fetch(saved.id).await.unwrap().name, "Den copy");
}

#[tokio::test]
async fn create_on_stored_session_is_already_persisted() {
    let t = test_boundary(Some(Uuid::new_v4()));
    let mut session = den_with_chair();
    let first = session.save(SaveIntent::Create, &t.boundary).await.unwrap();

    let err = session.save(SaveIntent::Create, &t.boundary).await.unwrap_err();
    assert!(matches!(err, DesignError::AlreadyPersisted(id) if id == first.id));
    assert_eq!(err.error_code(), "E_ALREADY_PERSISTED");

    let (opened, _) = DesignSession::open(&first, &Config::default());
    assert!(matches!(opened.prepare_save(SaveIntent::Create), Err(DesignError::AlreadyPersisted(_))));
    assert_eq!(t.store.len().await, 1);
}

#[tokio::test]
async fn import_creates_a_separate_design() {
    let t = test_boundary(Some(Uuid::new_v4()));
    let mut session = den_with_chair();
    let original = session.save(SaveIntent::Create, &t.boundary).await.unwrap();

    let (mut imported, recovered) = DesignSession::import(&original, &Config::default());
    assert!(recovered.is_empty());
    assert_eq!(imported.source(), None);

    let copy = imported.save(SaveIntent::Create, &t.boundary).await.unwrap();
    assert_ne!(copy.id, original.id);
    assert_eq!(copy.name, "Den");
    assert_eq!(imported.source(), Some(copy.id));
    assert_eq!(t.store.len().await, 2);
    assert_eq!(t.store.fetch(original.id).await.unwrap(), original);
}

#[tokio::test]
async fn edits_during_inflight_save_survive_completion() {
    let t = test_boundary(Some(Uuid::new_v4()));
    let mut session = den_with_chair();
    let id = chair_id(&session);

    let pending = session.prepare_save(SaveIntent::Create).unwrap();

    session.engine_mut().update_field(id, "x", "300").unwrap();
    session.rename("Renamed meanwhile");

    let saved = pending.commit(&t.boundary).await.unwrap();
    session.finish_save(&saved);

    assert_eq!(saved.document.design_data["objects"][0]["x"], json!(0.0));
    assert_eq!(saved.document.name, "Den");
    let t2 = session.engine().object(id).unwrap().transform.as_plan().unwrap().clone();
    assert!((t2.x - 300.0).abs() < f64::EPSILON);
    assert_eq!(session.meta().name, "Renamed meanwhile");
    assert_eq!(session.source(), Some(saved.document.id));
}

#[tokio::test]
async fn failed_commit_leaves_session_untouched() {
    let t = test_boundary(Some(Uuid::new_v4()));
    let mut session = DesignSession::new("Empty", Mode::Plan, &Config::default());

    let err = session.save(SaveIntent::Create, &t.boundary).await.unwrap_err();

    assert!(matches!(err, DesignError::Incomplete("objects")));
    assert_eq!(session.source(), None);
    assert_eq!(session.meta(), &DesignMeta::new("Empty", Mode::Plan));
    assert!(t.store.is_empty().await);
}

#[tokio::test]
async fn save_as_new_with_blank_name_is_incomplete() {
    let t = test_boundary(Some(Uuid::new_v4()));
    let mut session = den_with_chair();
    session.rename(" ");
    let err = session.save(SaveIntent::SaveAsNew, &t.boundary).await.unwrap_err();
    assert!(matches!(err, DesignError::Incomplete("name")));
}

#[tokio::test]
async fn reopened_design_keeps_ids_and_selection_is_clear() {
    let t = test_boundary(Some(Uuid::new_v4()));
    let mut session = den_with_chair();
    let id = chair_id(&session);
    let saved = session.save(SaveIntent::Create, &t.boundary).await.unwrap();

    let (reopened, recovered) = DesignSession::open(&saved, &Config::default());
    assert!(recovered.is_empty());
    assert_eq!(reopened.engine().scene(), session.engine().scene());
    assert!(reopened.engine().object(id).is_some());
    assert_eq!(reopened.engine().selection(), None);
    assert_eq!(reopened.source(), Some(saved.id));
}
