//! Nested-set storage of the category forest.
//!
//! Every tree of the forest is identified by `tree_id` and numbered with
//! `lft`/`rght` bounds so that a subtree is the contiguous range
//! `lft..=rght` of its root. Range queries answer ancestor and descendant
//! lookups in one statement; structural changes (insert, move, delete) shift
//! the bounds of everything to the right of the edited range.
//!
//! [`TreeStore`] works on any sea-orm connection, so the same code runs on a
//! bare [`DatabaseConnection`] or inside a [`DatabaseTransaction`].
//!
//! [`DatabaseConnection`]: sea_orm::DatabaseConnection
//! [`DatabaseTransaction`]: sea_orm::DatabaseTransaction

use sea_orm::{
    ConnectionTrait, QueryFilter, QueryOrder, QuerySelect, prelude::*, sea_query::Expr,
};
use uuid::Uuid;

use crate::{Category, EngineError, ResultEngine, categories};

/// Tree id used to park a subtree while it is being moved.
const DETACHED_TREE_ID: i32 = 0;

/// Query and structural access to the stored categories.
pub struct TreeStore<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TreeStore<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: Uuid) -> ResultEngine<Option<Category>> {
        let model = categories::Entity::find_by_id(id).one(self.db).await?;
        Ok(model.map(Category::from))
    }

    pub async fn require(&self, id: Uuid) -> ResultEngine<Category> {
        self.get(id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))
    }

    /// First category with `slug`, in tree order.
    pub async fn find_by_slug(&self, slug: &str) -> ResultEngine<Option<Category>> {
        let model = categories::Entity::find()
            .filter(categories::Column::Slug.eq(slug))
            .order_by_asc(categories::Column::TreeId)
            .order_by_asc(categories::Column::Lft)
            .one(self.db)
            .await?;
        Ok(model.map(Category::from))
    }

    /// Every category, ordered by tree and then by position in the tree.
    pub async fn all(&self) -> ResultEngine<Vec<Category>> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::TreeId)
            .order_by_asc(categories::Column::Lft)
            .all(self.db)
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }

    /// Nodes without parent, one per tree.
    pub async fn roots(&self) -> ResultEngine<Vec<Category>> {
        let models = categories::Entity::find()
            .filter(categories::Column::ParentId.is_null())
            .order_by_asc(categories::Column::TreeId)
            .all(self.db)
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }

    /// Ancestors of `node`, root first.
    pub async fn get_ancestors(
        &self,
        node: &Category,
        include_self: bool,
    ) -> ResultEngine<Vec<Category>> {
        let (lft_bound, rght_bound) = if include_self {
            (node.lft, node.rght)
        } else {
            (node.lft - 1, node.rght + 1)
        };
        let models = categories::Entity::find()
            .filter(categories::Column::TreeId.eq(node.tree_id))
            .filter(categories::Column::Lft.lte(lft_bound))
            .filter(categories::Column::Rght.gte(rght_bound))
            .order_by_asc(categories::Column::Lft)
            .all(self.db)
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }

    /// Descendants of `node` in depth-first order.
    pub async fn get_descendants(
        &self,
        node: &Category,
        include_self: bool,
    ) -> ResultEngine<Vec<Category>> {
        let start = if include_self { node.lft } else { node.lft + 1 };
        let models = categories::Entity::find()
            .filter(categories::Column::TreeId.eq(node.tree_id))
            .filter(categories::Column::Lft.between(start, node.rght - 1))
            .order_by_asc(categories::Column::Lft)
            .all(self.db)
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }

    pub async fn descendant_ids(&self, node: &Category) -> ResultEngine<Vec<Uuid>> {
        let ids = categories::Entity::find()
            .select_only()
            .column(categories::Column::Id)
            .filter(categories::Column::TreeId.eq(node.tree_id))
            .filter(categories::Column::Lft.between(node.lft + 1, node.rght - 1))
            .into_tuple::<Uuid>()
            .all(self.db)
            .await?;
        Ok(ids)
    }

    /// Direct children of `node`, in tree order.
    pub async fn children(&self, node: &Category) -> ResultEngine<Vec<Category>> {
        let models = categories::Entity::find()
            .filter(categories::Column::ParentId.eq(node.id))
            .order_by_asc(categories::Column::Lft)
            .all(self.db)
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }

    /// `(id, slug)` of every category of `tree_id` using `slug`.
    pub async fn query_by_tree_and_slug(
        &self,
        tree_id: i32,
        slug: &str,
    ) -> ResultEngine<Vec<(Uuid, String)>> {
        let rows = categories::Entity::find()
            .select_only()
            .column(categories::Column::Id)
            .column(categories::Column::Slug)
            .filter(categories::Column::TreeId.eq(tree_id))
            .filter(categories::Column::Slug.eq(slug))
            .into_tuple::<(Uuid, String)>()
            .all(self.db)
            .await?;
        Ok(rows)
    }

    /// Write the payload columns of `category`.
    ///
    /// The parent and the nested-set coordinates are not written; use
    /// [`TreeStore::move_node`] to change them.
    pub async fn persist(&self, category: &Category) -> ResultEngine<()> {
        category.payload_model().update(self.db).await?;
        Ok(())
    }

    /// Store a new category, as a new tree when it has no parent or as a
    /// child of `category.parent_id` otherwise.
    ///
    /// Siblings are kept ordered by name. The coordinates of `category` are
    /// overwritten with the assigned ones.
    pub async fn insert_node(&self, category: &mut Category) -> ResultEngine<()> {
        match category.parent_id {
            None => {
                category.tree_id = self.next_tree_id().await?;
                category.lft = 1;
                category.rght = 2;
                category.level = 0;
            }
            Some(parent_id) => {
                let parent = self.require(parent_id).await?;
                let position = self.insertion_point(&parent, &category.name, None).await?;
                self.open_gap(parent.tree_id, position, 2).await?;
                category.tree_id = parent.tree_id;
                category.lft = position;
                category.rght = position + 1;
                category.level = parent.level + 1;
            }
        }

        let model: categories::ActiveModel = (&*category).into();
        model.insert(self.db).await?;
        tracing::info!(
            "inserted category {} in tree {} at [{}, {}]",
            category.id,
            category.tree_id,
            category.lft,
            category.rght
        );
        Ok(())
    }

    /// Re-home the subtree rooted at `node` below `new_parent`, or make it a
    /// tree of its own when `new_parent` is `None`.
    ///
    /// The position among the new siblings follows `node.name`, so a renamed
    /// category passed with its current parent is re-sorted in place.
    /// Moving a category below itself or below one of its descendants is
    /// refused. Returns the moved category with its new coordinates.
    pub async fn move_node(
        &self,
        node: &Category,
        new_parent: Option<Uuid>,
    ) -> ResultEngine<Category> {
        let name = node.name.clone();
        // Always work on the stored coordinates, `node` may be stale.
        let node = self.require(node.id).await?;
        let renamed = new_parent.is_some() && node.name != name;
        if node.parent_id == new_parent && !renamed {
            return Ok(node);
        }

        let parent = match new_parent {
            Some(parent_id) => {
                if parent_id == node.id {
                    return Err(EngineError::SelfParent);
                }
                let parent = self.require(parent_id).await?;
                if node.is_ancestor_of(&parent) {
                    return Err(EngineError::CyclicParent);
                }
                Some(parent)
            }
            None => None,
        };

        let width = node.rght - node.lft + 1;
        self.detach_subtree(&node).await?;
        self.close_gap(node.tree_id, node.rght, width).await?;

        let (tree_id, offset, level_delta) = match &parent {
            Some(parent) => {
                // The gap closed above may have shifted the parent.
                let parent = self.require(parent.id).await?;
                let position = self
                    .insertion_point(&parent, &name, Some(node.id))
                    .await?;
                self.open_gap(parent.tree_id, position, width).await?;
                (parent.tree_id, position - 1, parent.level + 1)
            }
            None => (self.next_tree_id().await?, 0, 0),
        };

        categories::Entity::update_many()
            .col_expr(categories::Column::TreeId, Expr::value(tree_id))
            .col_expr(
                categories::Column::Lft,
                Expr::col(categories::Column::Lft).add(offset),
            )
            .col_expr(
                categories::Column::Rght,
                Expr::col(categories::Column::Rght).add(offset),
            )
            .col_expr(
                categories::Column::Level,
                Expr::col(categories::Column::Level).add(level_delta),
            )
            .filter(categories::Column::TreeId.eq(DETACHED_TREE_ID))
            .exec(self.db)
            .await?;

        categories::Entity::update_many()
            .col_expr(categories::Column::ParentId, Expr::value(new_parent))
            .filter(categories::Column::Id.eq(node.id))
            .exec(self.db)
            .await?;

        let moved = self.require(node.id).await?;
        tracing::info!(
            "moved category {} to tree {} at [{}, {}]",
            moved.id,
            moved.tree_id,
            moved.lft,
            moved.rght
        );
        Ok(moved)
    }

    /// Delete `node` and all of its descendants. Returns the number of
    /// deleted categories.
    pub async fn delete_subtree(&self, node: &Category) -> ResultEngine<u64> {
        let node = self.require(node.id).await?;
        let width = node.rght - node.lft + 1;
        // Rows removed through the parent_id cascade are not reported in
        // `rows_affected`, so count from the bounds.
        let deleted = u64::try_from(node.descendant_count() + 1).unwrap_or_default();
        categories::Entity::delete_many()
            .filter(categories::Column::TreeId.eq(node.tree_id))
            .filter(categories::Column::Lft.between(node.lft, node.rght))
            .exec(self.db)
            .await?;
        self.close_gap(node.tree_id, node.rght, width).await?;
        tracing::info!("deleted {deleted} categories below {}", node.id);
        Ok(deleted)
    }

    async fn next_tree_id(&self) -> ResultEngine<i32> {
        let last = categories::Entity::find()
            .order_by_desc(categories::Column::TreeId)
            .one(self.db)
            .await?;
        Ok(last.map_or(1, |model| model.tree_id + 1))
    }

    /// `lft` the new child `name` takes below `parent`, keeping siblings
    /// ordered by name.
    async fn insertion_point(
        &self,
        parent: &Category,
        name: &str,
        skip: Option<Uuid>,
    ) -> ResultEngine<i32> {
        let siblings = self.children(parent).await?;
        let next = siblings
            .iter()
            .filter(|sibling| Some(sibling.id) != skip)
            .find(|sibling| sibling.name.as_str() > name);
        Ok(next.map_or(parent.rght, |sibling| sibling.lft))
    }

    /// Make room for `width` positions starting at `position`.
    async fn open_gap(&self, tree_id: i32, position: i32, width: i32) -> ResultEngine<()> {
        categories::Entity::update_many()
            .col_expr(
                categories::Column::Lft,
                Expr::col(categories::Column::Lft).add(width),
            )
            .filter(categories::Column::TreeId.eq(tree_id))
            .filter(categories::Column::Lft.gte(position))
            .exec(self.db)
            .await?;
        categories::Entity::update_many()
            .col_expr(
                categories::Column::Rght,
                Expr::col(categories::Column::Rght).add(width),
            )
            .filter(categories::Column::TreeId.eq(tree_id))
            .filter(categories::Column::Rght.gte(position))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Pull everything right of `rght` back by `width` positions.
    async fn close_gap(&self, tree_id: i32, rght: i32, width: i32) -> ResultEngine<()> {
        categories::Entity::update_many()
            .col_expr(
                categories::Column::Lft,
                Expr::col(categories::Column::Lft).sub(width),
            )
            .filter(categories::Column::TreeId.eq(tree_id))
            .filter(categories::Column::Lft.gt(rght))
            .exec(self.db)
            .await?;
        categories::Entity::update_many()
            .col_expr(
                categories::Column::Rght,
                Expr::col(categories::Column::Rght).sub(width),
            )
            .filter(categories::Column::TreeId.eq(tree_id))
            .filter(categories::Column::Rght.gt(rght))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Park the subtree of `node` in the detached tree, renumbered from 1
    /// with `node` at level 0.
    async fn detach_subtree(&self, node: &Category) -> ResultEngine<()> {
        let shift = node.lft - 1;
        categories::Entity::update_many()
            .col_expr(categories::Column::TreeId, Expr::value(DETACHED_TREE_ID))
            .col_expr(
                categories::Column::Lft,
                Expr::col(categories::Column::Lft).sub(shift),
            )
            .col_expr(
                categories::Column::Rght,
                Expr::col(categories::Column::Rght).sub(shift),
            )
            .col_expr(
                categories::Column::Level,
                Expr::col(categories::Column::Level).sub(node.level),
            )
            .filter(categories::Column::TreeId.eq(node.tree_id))
            .filter(categories::Column::Lft.between(node.lft, node.rght))
            .exec(self.db)
            .await?;
        Ok(())
    }
}
