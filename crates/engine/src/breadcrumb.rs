//! Human readable names and URL paths derived from a category's ancestry.

use sea_orm::ConnectionTrait;

use crate::{Category, ResultEngine, tree::TreeStore};

pub const DISPLAY_DELIMITER: &str = " > ";
pub const DEFAULT_PATH_DELIMITER: &str = "::";

/// Breadcrumb string such as `News > World > Europe`.
///
/// `ancestors` are the strict ancestors of `node`, root first. The top-level
/// category is hidden unless its slug is listed in `root_slugs`. A non-empty
/// `unicode_name` wins over the computed value.
pub fn display_name(node: &Category, ancestors: &[Category], root_slugs: &[String]) -> String {
    if let Some(name) = node.unicode_name.as_deref().filter(|name| !name.is_empty()) {
        return name.to_string();
    }
    compute_display_name(node, ancestors, root_slugs)
}

/// Same as [`display_name`] but ignores the `unicode_name` override.
pub fn compute_display_name(
    node: &Category,
    ancestors: &[Category],
    root_slugs: &[String],
) -> String {
    let visible = match ancestors.first() {
        Some(first) if !root_slugs.iter().any(|slug| *slug == first.slug) => &ancestors[1..],
        _ => ancestors,
    };
    visible
        .iter()
        .map(|ancestor| ancestor.name.as_str())
        .chain(std::iter::once(node.name.as_str()))
        .collect::<Vec<_>>()
        .join(DISPLAY_DELIMITER)
}

/// Path of `node` below `base_path`, built from slugs.
///
/// `lineage` runs from the root to `node` inclusive. The top-level category
/// never shows up in the path, so a root maps to `base_path` followed by a
/// lone `/`. A non-empty `alternate_url` is returned as is.
pub fn absolute_url(node: &Category, lineage: &[Category], base_path: &str) -> String {
    if !node.alternate_url.is_empty() {
        return node.alternate_url.clone();
    }
    let slugs: Vec<&str> = lineage
        .iter()
        .skip(1)
        .map(|category| category.slug.as_str())
        .collect();
    format!("{base_path}{}/", slugs.join("/"))
}

/// Cumulative name paths from the root down to a category.
///
/// For `News > World > Europe` and `::` it yields `News`, `News::World` and
/// `News::World::Europe`.
#[derive(Clone, Debug)]
pub struct CategoryPaths {
    names: Vec<String>,
    delimiter: String,
    next: usize,
}

impl CategoryPaths {
    pub fn new(lineage: &[Category], delimiter: &str) -> Self {
        Self {
            names: lineage.iter().map(|category| category.name.clone()).collect(),
            delimiter: delimiter.to_string(),
            next: 0,
        }
    }
}

impl Iterator for CategoryPaths {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.names.len() {
            return None;
        }
        self.next += 1;
        Some(self.names[..self.next].join(&self.delimiter))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.names.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CategoryPaths {}

/// Loads the ancestry from the store and applies [`display_name`].
pub async fn load_display_name<C: ConnectionTrait>(
    store: &TreeStore<'_, C>,
    node: &Category,
    root_slugs: &[String],
) -> ResultEngine<String> {
    if let Some(name) = node.unicode_name.as_deref().filter(|name| !name.is_empty()) {
        return Ok(name.to_string());
    }
    let ancestors = store.get_ancestors(node, false).await?;
    Ok(compute_display_name(node, &ancestors, root_slugs))
}

/// Loads the ancestry from the store and applies [`absolute_url`].
pub async fn load_absolute_url<C: ConnectionTrait>(
    store: &TreeStore<'_, C>,
    node: &Category,
    base_path: &str,
) -> ResultEngine<String> {
    if !node.alternate_url.is_empty() {
        return Ok(node.alternate_url.clone());
    }
    let lineage = store.get_ancestors(node, true).await?;
    Ok(absolute_url(node, &lineage, base_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, slug: &str) -> Category {
        Category {
            name: name.to_string(),
            slug: slug.to_string(),
            active: true,
            ..Default::default()
        }
    }

    fn root_slugs() -> Vec<String> {
        vec!["magazine".to_string(), "nextgov-categories".to_string()]
    }

    #[test]
    fn display_name_hides_plain_root() {
        let ancestors = vec![node("Categories", "categories"), node("Defense", "defense")];
        let leaf = node("Navy", "navy");
        assert_eq!(
            display_name(&leaf, &ancestors, &root_slugs()),
            "Defense > Navy"
        );
    }

    #[test]
    fn display_name_keeps_allowed_root() {
        let ancestors = vec![node("Magazine", "magazine"), node("Features", "features")];
        let leaf = node("Interviews", "interviews");
        assert_eq!(
            display_name(&leaf, &ancestors, &root_slugs()),
            "Magazine > Features > Interviews"
        );
    }

    #[test]
    fn display_name_of_root_is_its_name() {
        let root = node("Categories", "categories");
        assert_eq!(display_name(&root, &[], &root_slugs()), "Categories");
    }

    #[test]
    fn unicode_name_overrides() {
        let mut leaf = node("Navy", "navy");
        leaf.unicode_name = Some("Sea Power".to_string());
        let ancestors = vec![node("Categories", "categories")];
        assert_eq!(display_name(&leaf, &ancestors, &root_slugs()), "Sea Power");

        leaf.unicode_name = Some(String::new());
        assert_eq!(display_name(&leaf, &ancestors, &root_slugs()), "Navy");
    }

    #[test]
    fn absolute_url_skips_top_level() {
        let lineage = vec![
            node("Categories", "categories"),
            node("Defense", "defense"),
            node("Navy", "navy"),
        ];
        assert_eq!(
            absolute_url(&lineage[2], &lineage, "/categories/"),
            "/categories/defense/navy/"
        );
        assert_eq!(
            absolute_url(&lineage[0], &lineage[..1], "/categories/"),
            "/categories//"
        );
    }

    #[test]
    fn absolute_url_prefers_alternate_url() {
        let mut leaf = node("Navy", "navy");
        leaf.alternate_url = "https://example.com/navy".to_string();
        let lineage = vec![node("Categories", "categories"), leaf.clone()];
        assert_eq!(
            absolute_url(&leaf, &lineage, "/categories/"),
            "https://example.com/navy"
        );
    }

    #[test]
    fn category_paths_accumulate() {
        let lineage = vec![node("News", "news"), node("World", "world"), node("Europe", "europe")];
        let paths: Vec<String> = CategoryPaths::new(&lineage, DEFAULT_PATH_DELIMITER).collect();
        assert_eq!(paths, vec!["News", "News::World", "News::World::Europe"]);

        let mut iter = CategoryPaths::new(&lineage, "/");
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
    }
}
