use sea_orm::TransactionTrait;
use uuid::Uuid;

use crate::{
    Category, CategoryForm, NewCategory, ResultEngine, cascade, tree::TreeStore,
    validate::{validate_edit, validate_parent, validate_slug},
};

use super::{Engine, with_tx};

impl Engine {
    /// Store a new category.
    ///
    /// The slug is derived from the name when left blank and must be unique
    /// in the tree of the parent. Siblings stay ordered by name.
    /// An explicit slug is kept even when `allow_slug_change` is off.
    pub async fn create_category(&self, new: NewCategory) -> ResultEngine<Category> {
        let mut category = new.into_category();
        let form = form_for(&category, None);
        with_tx!(self, |db_tx| {
            let store = TreeStore::new(&db_tx);
            let cleaned = validate_edit(&store, &form, true).await?;
            category.name = cleaned.name;
            category.slug = cleaned.slug;
            cascade::prepare(&mut category);
            store.insert_node(&mut category).await?;
            Ok(category)
        })
    }

    /// Return a category by id.
    pub async fn category(&self, id: Uuid) -> ResultEngine<Category> {
        TreeStore::new(&self.database).require(id).await
    }

    /// Return the first category, in tree order, using `slug`.
    pub async fn category_by_slug(&self, slug: &str) -> ResultEngine<Option<Category>> {
        TreeStore::new(&self.database).find_by_slug(slug).await
    }

    /// Every category, tree by tree, in depth-first order.
    pub async fn categories(&self) -> ResultEngine<Vec<Category>> {
        TreeStore::new(&self.database).all().await
    }

    /// The root of every tree, by `tree_id`.
    pub async fn roots(&self) -> ResultEngine<Vec<Category>> {
        TreeStore::new(&self.database).roots().await
    }

    pub async fn children(&self, id: Uuid) -> ResultEngine<Vec<Category>> {
        let store = TreeStore::new(&self.database);
        let node = store.require(id).await?;
        store.children(&node).await
    }

    pub async fn ancestors(&self, id: Uuid, include_self: bool) -> ResultEngine<Vec<Category>> {
        let store = TreeStore::new(&self.database);
        let node = store.require(id).await?;
        store.get_ancestors(&node, include_self).await
    }

    pub async fn descendants(&self, id: Uuid, include_self: bool) -> ResultEngine<Vec<Category>> {
        let store = TreeStore::new(&self.database);
        let node = store.require(id).await?;
        store.get_descendants(&node, include_self).await
    }

    /// Save `category` as edited by an administrator.
    ///
    /// Runs the edit validation first, then moves the category when its
    /// `parent_id` or its name changed, then saves it (cascading
    /// deactivation). The slug is re-derived from the name unless slug
    /// changes are allowed.
    pub async fn update_category(&self, edited: Category) -> ResultEngine<Category> {
        let mut category = edited;
        let form = form_for(&category, Some(category.id));
        let allow_slug_change = self.settings.allow_slug_change;
        with_tx!(self, |db_tx| {
            let store = TreeStore::new(&db_tx);
            let stored = store.require(category.id).await?;
            let cleaned = validate_edit(&store, &form, allow_slug_change).await?;
            category.name = cleaned.name;
            category.slug = cleaned.slug;

            if stored.parent_id != category.parent_id || stored.name != category.name {
                store.move_node(&category, category.parent_id).await?;
            }
            cascade::save(&store, &mut category).await?;
            Ok(category)
        })
    }

    /// Persist `category` and cascade deactivation to its descendants.
    ///
    /// Returns the number of descendants that were switched off.
    pub async fn save(&self, category: &mut Category) -> ResultEngine<usize> {
        with_tx!(self, |db_tx| {
            let store = TreeStore::new(&db_tx);
            cascade::save(&store, category).await
        })
    }

    /// Set the active flag of a category and save it.
    ///
    /// Deactivating cascades to every descendant, activating touches only
    /// the category itself.
    pub async fn set_active(&self, id: Uuid, active: bool) -> ResultEngine<usize> {
        with_tx!(self, |db_tx| {
            let store = TreeStore::new(&db_tx);
            let mut category = store.require(id).await?;
            category.active = active;
            cascade::save(&store, &mut category).await
        })
    }

    pub async fn activate(&self, id: Uuid) -> ResultEngine<usize> {
        self.set_active(id, true).await
    }

    pub async fn deactivate(&self, id: Uuid) -> ResultEngine<usize> {
        self.set_active(id, false).await
    }

    /// Move a category, and its subtree, below `new_parent` or to a tree of
    /// its own.
    pub async fn move_category(
        &self,
        id: Uuid,
        new_parent: Option<Uuid>,
    ) -> ResultEngine<Category> {
        with_tx!(self, |db_tx| {
            let store = TreeStore::new(&db_tx);
            let node = store.require(id).await?;
            validate_parent(&store, new_parent, Some(id)).await?;
            validate_slug(&store, &node.slug, Some(id), new_parent).await?;
            store.move_node(&node, new_parent).await
        })
    }

    /// Delete a category together with its subtree.
    ///
    /// Returns the number of deleted categories.
    pub async fn delete_category(&self, id: Uuid) -> ResultEngine<u64> {
        with_tx!(self, |db_tx| {
            let store = TreeStore::new(&db_tx);
            let node = store.require(id).await?;
            store.delete_subtree(&node).await
        })
    }
}

fn form_for(category: &Category, instance_id: Option<Uuid>) -> CategoryForm {
    CategoryForm {
        instance_id,
        name: category.name.clone(),
        slug: category.slug.clone(),
        parent_id: category.parent_id,
        unicode_name: category.unicode_name.clone(),
        alternate_title: category.alternate_title.clone(),
        alternate_url: category.alternate_url.clone(),
        meta_keywords: category.meta_keywords.clone(),
        thumbnail: category.thumbnail.clone(),
    }
}
