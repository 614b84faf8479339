//! Edit-time validation of categories.
//!
//! The checks only read from the store; nothing is written when one fails.

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    categories::{
        ALTERNATE_TITLE_MAX_LEN, ALTERNATE_URL_MAX_LEN, META_KEYWORDS_MAX_LEN, SLUG_MAX_LEN,
        THUMBNAIL_MAX_LEN, UNICODE_NAME_MAX_LEN,
    },
    tree::TreeStore,
    util::{derive_slug, ensure_max_len, is_valid_slug, normalize_required_name, truncate_chars},
};

/// The values of an edit submitted for validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryForm {
    /// `None` while the category is not stored yet.
    pub instance_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<Uuid>,
    pub unicode_name: Option<String>,
    pub alternate_title: String,
    pub alternate_url: String,
    pub meta_keywords: String,
    pub thumbnail: Option<String>,
}

/// Cleaned values of a [`CategoryForm`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CleanedCategory {
    pub name: String,
    pub slug: String,
}

/// Fail with [`EngineError::DuplicateSlug`] when another category of the
/// tree `parent_id` belongs to already uses `candidate`.
///
/// A category without parent is the root of a tree that does not exist yet,
/// so there is nothing to compare against and the check is skipped.
pub async fn validate_slug<C: ConnectionTrait>(
    store: &TreeStore<'_, C>,
    candidate: &str,
    instance_id: Option<Uuid>,
    parent_id: Option<Uuid>,
) -> ResultEngine<()> {
    let Some(parent_id) = parent_id else {
        tracing::warn!(
            "slug '{candidate}' not checked for duplicates: category {} has no parent",
            instance_id.map_or_else(|| "<new>".to_string(), |id| id.to_string())
        );
        return Ok(());
    };

    let parent = store.require(parent_id).await?;
    let taken = store
        .query_by_tree_and_slug(parent.tree_id, candidate)
        .await?
        .into_iter()
        .any(|(id, slug)| Some(id) != instance_id && slug == candidate);
    if taken {
        return Err(EngineError::DuplicateSlug(candidate.to_string()));
    }
    Ok(())
}

/// Refuse a parent that would put the category below itself.
pub async fn validate_parent<C: ConnectionTrait>(
    store: &TreeStore<'_, C>,
    candidate_parent_id: Option<Uuid>,
    instance_id: Option<Uuid>,
) -> ResultEngine<()> {
    let (Some(parent_id), Some(instance_id)) = (candidate_parent_id, instance_id) else {
        return Ok(());
    };
    if parent_id == instance_id {
        return Err(EngineError::SelfParent);
    }

    let Some(instance) = store.get(instance_id).await? else {
        return Ok(());
    };
    if store.descendant_ids(&instance).await?.contains(&parent_id) {
        return Err(EngineError::CyclicParent);
    }
    Ok(())
}

/// The slug an edit ends up with.
///
/// When slug edits are not allowed, or no slug was submitted, the slug is
/// derived from the name. A submitted slug must only use slug characters.
pub fn clean_slug(name: &str, submitted: &str, allow_slug_change: bool) -> ResultEngine<String> {
    let submitted = submitted.trim();
    if !allow_slug_change || submitted.is_empty() {
        return Ok(derive_slug(name));
    }
    if !is_valid_slug(submitted) {
        return Err(EngineError::InvalidField(format!(
            "slug '{submitted}' may only contain letters, numbers, underscores or hyphens"
        )));
    }
    Ok(truncate_chars(submitted, SLUG_MAX_LEN))
}

/// Run every edit check in order: field limits, slug, tree-scoped slug
/// uniqueness, parent.
pub async fn validate_edit<C: ConnectionTrait>(
    store: &TreeStore<'_, C>,
    form: &CategoryForm,
    allow_slug_change: bool,
) -> ResultEngine<CleanedCategory> {
    let name = normalize_required_name(&form.name)?;
    if let Some(unicode_name) = &form.unicode_name {
        ensure_max_len("unicode name", unicode_name, UNICODE_NAME_MAX_LEN)?;
    }
    ensure_max_len("alternate title", &form.alternate_title, ALTERNATE_TITLE_MAX_LEN)?;
    ensure_max_len("alternate url", &form.alternate_url, ALTERNATE_URL_MAX_LEN)?;
    ensure_max_len("meta keywords", &form.meta_keywords, META_KEYWORDS_MAX_LEN)?;
    if let Some(thumbnail) = &form.thumbnail {
        ensure_max_len("thumbnail", thumbnail, THUMBNAIL_MAX_LEN)?;
    }

    let slug = clean_slug(&name, &form.slug, allow_slug_change)?;
    validate_slug(store, &slug, form.instance_id, form.parent_id).await?;
    validate_parent(store, form.parent_id, form.instance_id).await?;

    Ok(CleanedCategory { name, slug })
}
