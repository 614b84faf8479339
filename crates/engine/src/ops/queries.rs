use sea_orm::{Condition, QueryFilter, QueryOrder, prelude::*};

use crate::{Category, EngineError, ResultEngine, categories, tree::TreeStore};

use super::Engine;

impl Engine {
    /// Only categories that are active, in tree order.
    pub async fn active_categories(&self) -> ResultEngine<Vec<Category>> {
        let models = categories::Entity::find()
            .filter(categories::Column::Active.eq(true))
            .order_by_asc(categories::Column::TreeId)
            .order_by_asc(categories::Column::Lft)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }

    /// The subtree of the category `root_slug`, root included, plus the
    /// categories whose slug is one of `extra_slugs` wherever they live.
    pub async fn section_categories(
        &self,
        root_slug: &str,
        extra_slugs: &[String],
    ) -> ResultEngine<Vec<Category>> {
        let root = TreeStore::new(&self.database)
            .find_by_slug(root_slug)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(root_slug.to_string()))?;

        let subtree = Condition::all()
            .add(categories::Column::TreeId.eq(root.tree_id))
            .add(categories::Column::Lft.between(root.lft, root.rght));
        let mut condition = Condition::any().add(subtree);
        if !extra_slugs.is_empty() {
            condition = condition.add(categories::Column::Slug.is_in(extra_slugs.iter().cloned()));
        }

        let models = categories::Entity::find()
            .filter(condition)
            .order_by_asc(categories::Column::TreeId)
            .order_by_asc(categories::Column::Lft)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }

    /// [`Engine::section_categories`] with the configured root and extras.
    pub async fn default_section_categories(&self) -> ResultEngine<Vec<Category>> {
        self.section_categories(
            &self.settings.section_root_slug,
            &self.settings.section_extra_slugs,
        )
        .await
    }
}
