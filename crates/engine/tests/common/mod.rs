#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};

use sea_orm::{Database, DatabaseConnection};

use engine::{Category, Engine, EngineSettings, NewCategory};
use migration::MigratorTrait;
use uuid::Uuid;

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    engine_with_settings(EngineSettings::default()).await
}

pub async fn engine_with_settings(settings: EngineSettings) -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .settings(settings)
        .build()
        .await
        .unwrap();
    (engine, db)
}

pub async fn create(engine: &Engine, name: &str, parent: Option<Uuid>) -> Category {
    let mut new = NewCategory::new(name);
    if let Some(parent) = parent {
        new = new.parent(parent);
    }
    engine.create_category(new).await.unwrap()
}

pub fn names(categories: &[Category]) -> Vec<&str> {
    categories.iter().map(|c| c.name.as_str()).collect()
}

/// Check the nested-set numbering of every stored tree.
pub async fn assert_nested_set(engine: &Engine) {
    let all = engine.categories().await.unwrap();
    let by_id: HashMap<Uuid, &Category> = all.iter().map(|c| (c.id, c)).collect();
    let mut trees: BTreeMap<i32, Vec<&Category>> = BTreeMap::new();
    for category in &all {
        trees.entry(category.tree_id).or_default().push(category);
    }

    for (tree_id, nodes) in trees {
        let roots: Vec<_> = nodes.iter().filter(|c| c.parent_id.is_none()).collect();
        assert_eq!(roots.len(), 1, "tree {tree_id} must have exactly one root");
        let root = roots[0];
        assert_eq!(root.lft, 1);
        assert_eq!(root.level, 0);
        assert_eq!(root.rght, 2 * nodes.len() as i32);

        let mut bounds: Vec<i32> = nodes.iter().flat_map(|c| [c.lft, c.rght]).collect();
        bounds.sort_unstable();
        let expected: Vec<i32> = (1..=2 * nodes.len() as i32).collect();
        assert_eq!(bounds, expected, "tree {tree_id} bounds must be contiguous");

        for node in &nodes {
            assert!(node.lft < node.rght);
            if let Some(parent_id) = node.parent_id {
                let parent = by_id[&parent_id];
                assert_eq!(parent.tree_id, node.tree_id);
                assert!(parent.lft < node.lft && node.rght < parent.rght);
                assert_eq!(node.level, parent.level + 1);
            }
        }
    }
}
