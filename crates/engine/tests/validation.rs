mod common;

use common::{assert_nested_set, create, engine_with_db, names};
use engine::{
    EngineError, NewCategory,
    tree::TreeStore,
    validate::{CategoryForm, validate_edit, validate_parent, validate_slug},
};
use uuid::Uuid;

#[tokio::test]
async fn duplicate_slug_in_the_same_tree_is_refused() {
    let (engine, db) = engine_with_db().await;

    let root = create(&engine, "Categories", None).await;
    let defense = create(&engine, "Defense", Some(root.id)).await;
    let health = create(&engine, "Health", Some(root.id)).await;
    create(&engine, "Navy", Some(defense.id)).await;

    let store = TreeStore::new(&db);
    let err = validate_slug(&store, "navy", None, Some(health.id))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::DuplicateSlug("navy".to_string()));

    let err = engine
        .create_category(NewCategory::new("Navy Health").parent(health.id).slug("navy"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::DuplicateSlug("navy".to_string()));
    assert!(engine.children(health.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn same_slug_is_fine_in_another_tree() {
    let (engine, db) = engine_with_db().await;

    let news = create(&engine, "News", None).await;
    create(&engine, "Local", Some(news.id)).await;
    let magazine = create(&engine, "Magazine", None).await;

    let store = TreeStore::new(&db);
    validate_slug(&store, "local", None, Some(magazine.id))
        .await
        .unwrap();

    let local = create(&engine, "Local", Some(magazine.id)).await;
    assert_eq!(local.slug, "local");
    assert_nested_set(&engine).await;
}

#[tokio::test]
async fn slug_check_ignores_the_edited_category() {
    let (engine, db) = engine_with_db().await;

    let root = create(&engine, "Categories", None).await;
    let defense = create(&engine, "Defense", Some(root.id)).await;

    let store = TreeStore::new(&db);
    validate_slug(&store, "defense", Some(defense.id), Some(root.id))
        .await
        .unwrap();
    let err = validate_slug(&store, "defense", None, Some(root.id))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::DuplicateSlug("defense".to_string()));
}

#[tokio::test]
async fn slug_check_is_skipped_for_roots() {
    let (engine, db) = engine_with_db().await;

    let news = create(&engine, "News", None).await;

    let store = TreeStore::new(&db);
    validate_slug(&store, "news", None, None).await.unwrap();

    let second = engine
        .create_category(NewCategory::new("Other News").slug("news"))
        .await
        .unwrap();
    assert_eq!(second.slug, "news");
    assert_ne!(second.tree_id, news.tree_id);
}

#[tokio::test]
async fn parent_check_refuses_descendants_and_self() {
    let (engine, db) = engine_with_db().await;

    let a = create(&engine, "A", None).await;
    let b = create(&engine, "B", Some(a.id)).await;
    let c = create(&engine, "C", Some(b.id)).await;
    let other = create(&engine, "Other", None).await;

    let store = TreeStore::new(&db);
    assert_eq!(
        validate_parent(&store, Some(c.id), Some(a.id)).await,
        Err(EngineError::CyclicParent)
    );
    assert_eq!(
        validate_parent(&store, Some(a.id), Some(a.id)).await,
        Err(EngineError::SelfParent)
    );
    validate_parent(&store, Some(other.id), Some(a.id))
        .await
        .unwrap();
    validate_parent(&store, Some(a.id), Some(c.id)).await.unwrap();
    validate_parent(&store, None, Some(b.id)).await.unwrap();
    validate_parent(&store, Some(c.id), None).await.unwrap();
    validate_parent(&store, Some(c.id), Some(Uuid::new_v4()))
        .await
        .unwrap();
}

#[tokio::test]
async fn edit_validation_reports_field_errors() {
    let (_engine, db) = engine_with_db().await;
    let store = TreeStore::new(&db);

    let form = CategoryForm {
        name: "   ".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        validate_edit(&store, &form, false).await,
        Err(EngineError::InvalidName(_))
    ));

    let form = CategoryForm {
        name: "Science".to_string(),
        alternate_url: "x".repeat(201),
        ..Default::default()
    };
    assert!(matches!(
        validate_edit(&store, &form, false).await,
        Err(EngineError::InvalidField(_))
    ));

    let form = CategoryForm {
        name: "  Science  ".to_string(),
        slug: "ignored".to_string(),
        ..Default::default()
    };
    let cleaned = validate_edit(&store, &form, false).await.unwrap();
    assert_eq!(cleaned.name, "Science");
    assert_eq!(cleaned.slug, "science");
}

#[tokio::test]
async fn update_refuses_a_cycle_and_leaves_the_tree_alone() {
    let (engine, _db) = engine_with_db().await;

    let a = create(&engine, "A", None).await;
    let b = create(&engine, "B", Some(a.id)).await;
    let c = create(&engine, "C", Some(b.id)).await;

    let mut edited = engine.category(a.id).await.unwrap();
    edited.parent_id = Some(c.id);
    edited.description = Some("should not be stored".to_string());
    let err = engine.update_category(edited).await.unwrap_err();
    assert_eq!(err, EngineError::CyclicParent);

    let stored = engine.category(a.id).await.unwrap();
    assert!(stored.is_root());
    assert_eq!(stored.description, None);
    let lineage = engine.ancestors(c.id, true).await.unwrap();
    assert_eq!(names(&lineage), vec!["A", "B", "C"]);
    assert_nested_set(&engine).await;
}

#[tokio::test]
async fn update_moves_and_renames() {
    let (engine, _db) = engine_with_db().await;

    let root = create(&engine, "Categories", None).await;
    let defense = create(&engine, "Defense", Some(root.id)).await;
    let health = create(&engine, "Health", Some(root.id)).await;
    let navy = create(&engine, "Navy", Some(defense.id)).await;

    let mut edited = engine.category(navy.id).await.unwrap();
    edited.name = "Naval Medicine".to_string();
    edited.parent_id = Some(health.id);
    let updated = engine.update_category(edited).await.unwrap();

    assert_eq!(updated.slug, "naval-medicine");
    assert_eq!(updated.parent_id, Some(health.id));
    assert_eq!(updated.level, 2);
    assert!(engine.children(defense.id).await.unwrap().is_empty());
    let moved = engine.children(health.id).await.unwrap();
    assert_eq!(names(&moved), vec!["Naval Medicine"]);
    assert_nested_set(&engine).await;
}

#[tokio::test]
async fn update_rejects_an_empty_name() {
    let (engine, _db) = engine_with_db().await;

    let news = create(&engine, "News", None).await;
    let mut edited = engine.category(news.id).await.unwrap();
    edited.name = String::new();

    let err = engine.update_category(edited).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));
    assert_eq!(engine.category(news.id).await.unwrap().name, "News");
}

#[tokio::test]
async fn create_keeps_an_explicit_slug_when_slug_changes_are_locked() {
    let (engine, _db) = engine_with_db().await;
    assert!(!engine.settings().allow_slug_change);

    let created = engine
        .create_category(NewCategory::new("Federal News").slug("fednews"))
        .await
        .unwrap();
    assert_eq!(created.slug, "fednews");

    let mut edited = engine.category(created.id).await.unwrap();
    edited.description = Some("edited".to_string());
    let updated = engine.update_category(edited).await.unwrap();
    assert_eq!(updated.slug, "federal-news");
}
