use sea_orm::{QueryFilter, TransactionTrait, prelude::*, sea_query::Expr};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, breadcrumb, cascade, categories, tree::TreeStore};

use super::{Engine, with_tx};

/// A category whose alternate URL was filled by the backfill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackfillEntry {
    pub id: Uuid,
    pub name: String,
    pub url: String,
}

impl Engine {
    /// Deactivate the selected categories and, through the cascade, their
    /// subtrees. Categories already inactive are skipped.
    ///
    /// Returns the number of selected categories that were deactivated.
    pub async fn deactivate_selected(&self, ids: &[Uuid]) -> ResultEngine<usize> {
        with_tx!(self, |db_tx| {
            let store = TreeStore::new(&db_tx);
            let mut deactivated = 0;
            for id in ids {
                let mut category = store.require(*id).await?;
                if !category.active {
                    continue;
                }
                category.active = false;
                cascade::save(&store, &mut category).await?;
                deactivated += 1;
            }
            Ok(deactivated)
        })
    }

    /// Activate the selected categories and their direct children.
    ///
    /// Grandchildren keep their flag: reactivation never cascades further.
    /// Returns the number of selected categories processed.
    pub async fn activate_selected(&self, ids: &[Uuid]) -> ResultEngine<usize> {
        with_tx!(self, |db_tx| {
            let store = TreeStore::new(&db_tx);
            for id in ids {
                let mut category = store.require(*id).await?;
                category.active = true;
                cascade::save(&store, &mut category).await?;
                categories::Entity::update_many()
                    .col_expr(categories::Column::Active, Expr::value(true))
                    .filter(categories::Column::ParentId.eq(*id))
                    .exec(&db_tx)
                    .await?;
            }
            Ok(ids.len())
        })
    }

    /// Store the computed URL as alternate URL of every category below the
    /// root `root_slug` that has none yet.
    ///
    /// The root itself is left out. Running it again only fills categories
    /// added since.
    pub async fn backfill_alternate_urls(
        &self,
        root_slug: Option<&str>,
    ) -> ResultEngine<Vec<BackfillEntry>> {
        let root_slug = root_slug.unwrap_or(self.settings.backfill_root_slug.as_str());
        with_tx!(self, |db_tx| {
            let store = TreeStore::new(&db_tx);
            let root = store
                .find_by_slug(root_slug)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(root_slug.to_string()))?;

            let mut written = Vec::new();
            for mut category in store.get_descendants(&root, false).await? {
                if !category.alternate_url.is_empty() {
                    continue;
                }
                let url =
                    breadcrumb::load_absolute_url(&store, &category, &self.settings.base_path)
                        .await?;
                tracing::info!("{}=[{}]", category.name, url);
                category.alternate_url = url.clone();
                cascade::save(&store, &mut category).await?;
                written.push(BackfillEntry {
                    id: category.id,
                    name: category.name.clone(),
                    url,
                });
            }
            Ok(written)
        })
    }
}
