//! Saving a category and propagating deactivation to its subtree.
//!
//! Deactivating a category forces all of its descendants inactive; activating
//! it leaves them alone. The category's own row is always written before any
//! descendant, and descendants whose flag already matches are not rewritten.

use sea_orm::ConnectionTrait;

use crate::{Category, ResultEngine, tree::TreeStore, util::derive_slug};

/// Fill the derived fields of `category` before it is written.
pub(crate) fn prepare(category: &mut Category) {
    if category.slug.trim().is_empty() {
        category.slug = derive_slug(&category.name);
    }
    if category.thumbnail.is_none() {
        category.thumbnail_width = None;
        category.thumbnail_height = None;
    }
}

/// Persist `category` and cascade an inactive flag down its subtree.
///
/// The coordinates of `category` are refreshed from the store. Returns the
/// number of descendants that were switched off.
pub async fn save<C: ConnectionTrait>(
    store: &TreeStore<'_, C>,
    category: &mut Category,
) -> ResultEngine<usize> {
    prepare(category);
    store.persist(category).await?;

    let stored = store.require(category.id).await?;
    category.sync_coordinates(&stored);

    if category.active {
        return Ok(0);
    }

    let mut changed = 0;
    for mut descendant in store.get_descendants(category, false).await? {
        if descendant.active == category.active {
            continue;
        }
        descendant.active = category.active;
        prepare(&mut descendant);
        store.persist(&descendant).await?;
        tracing::debug!(
            "deactivated {} ({}) below {}",
            descendant.id,
            descendant.slug,
            category.id
        );
        changed += 1;
    }

    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_derives_blank_slug() {
        let mut category = Category {
            name: "Hello World".to_string(),
            ..Default::default()
        };
        prepare(&mut category);
        assert_eq!(category.slug, "hello-world");
    }

    #[test]
    fn prepare_keeps_explicit_slug() {
        let mut category = Category {
            name: "Hello World".to_string(),
            slug: "greetings".to_string(),
            ..Default::default()
        };
        prepare(&mut category);
        assert_eq!(category.slug, "greetings");
    }

    #[test]
    fn prepare_clears_dimensions_without_thumbnail() {
        let mut category = Category {
            name: "Photos".to_string(),
            thumbnail_width: Some(640),
            thumbnail_height: Some(480),
            ..Default::default()
        };
        prepare(&mut category);
        assert_eq!(category.thumbnail_width, None);
        assert_eq!(category.thumbnail_height, None);

        let mut with_thumb = Category {
            name: "Photos".to_string(),
            thumbnail: Some("thumbs/photos.png".to_string()),
            thumbnail_width: Some(640),
            thumbnail_height: Some(480),
            ..Default::default()
        };
        prepare(&mut with_thumb);
        assert_eq!(with_thumb.thumbnail_width, Some(640));
    }
}
