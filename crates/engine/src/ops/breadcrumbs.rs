use sea_orm::{ActiveValue, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    CategoryPaths, ResultEngine,
    breadcrumb::{self, DEFAULT_PATH_DELIMITER},
    categories,
    tree::TreeStore,
};

use super::{Engine, with_tx};

impl Engine {
    /// Breadcrumb display name, e.g. `Defense > Navy`.
    pub async fn display_name(&self, id: Uuid) -> ResultEngine<String> {
        let store = TreeStore::new(&self.database);
        let node = store.require(id).await?;
        breadcrumb::load_display_name(&store, &node, &self.settings.display_root_slugs).await
    }

    /// URL path of a category, or its alternate URL when set.
    pub async fn absolute_url(&self, id: Uuid) -> ResultEngine<String> {
        let store = TreeStore::new(&self.database);
        let node = store.require(id).await?;
        breadcrumb::load_absolute_url(&store, &node, &self.settings.base_path).await
    }

    /// Cumulative name paths from the root down to the category.
    ///
    /// Computed from the current ancestry on every call; `delimiter`
    /// defaults to `::`.
    pub async fn all_category_paths(
        &self,
        id: Uuid,
        delimiter: Option<&str>,
    ) -> ResultEngine<CategoryPaths> {
        let store = TreeStore::new(&self.database);
        let node = store.require(id).await?;
        let lineage = store.get_ancestors(&node, true).await?;
        Ok(CategoryPaths::new(
            &lineage,
            delimiter.unwrap_or(DEFAULT_PATH_DELIMITER),
        ))
    }

    /// Recompute and store the cached display name of a category.
    ///
    /// Needed after an ancestor is renamed or the category is moved, the
    /// cached value is never refreshed on its own.
    pub async fn refresh_unicode_name(&self, id: Uuid) -> ResultEngine<String> {
        with_tx!(self, |db_tx| {
            let store = TreeStore::new(&db_tx);
            let node = store.require(id).await?;
            let ancestors = store.get_ancestors(&node, false).await?;
            let name = breadcrumb::compute_display_name(
                &node,
                &ancestors,
                &self.settings.display_root_slugs,
            );
            write_unicode_name(&db_tx, id, Some(name.clone())).await?;
            Ok(name)
        })
    }

    /// Drop the cached display name so it is computed again on demand.
    pub async fn clear_unicode_name(&self, id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            TreeStore::new(&db_tx).require(id).await?;
            write_unicode_name(&db_tx, id, None).await
        })
    }
}

async fn write_unicode_name<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    name: Option<String>,
) -> ResultEngine<()> {
    let active = categories::ActiveModel {
        id: ActiveValue::Set(id),
        unicode_name: ActiveValue::Set(name),
        ..Default::default()
    };
    active.update(db).await?;
    Ok(())
}
