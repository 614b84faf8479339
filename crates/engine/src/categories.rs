//! The module contains the `Category` node and its table mapping.

use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

pub const NAME_MAX_LEN: usize = 100;
pub const SLUG_MAX_LEN: usize = 50;
pub const UNICODE_NAME_MAX_LEN: usize = 255;
pub const ALTERNATE_TITLE_MAX_LEN: usize = 100;
pub const ALTERNATE_URL_MAX_LEN: usize = 200;
pub const META_KEYWORDS_MAX_LEN: usize = 255;
pub const THUMBNAIL_MAX_LEN: usize = 100;

/// A category of the hierarchy.
///
/// Every category belongs to exactly one tree (`tree_id`) and carries its
/// nested-set coordinates: `lft` and `rght` bound the range that contains all
/// of its descendants, `level` is the depth below the root (roots are `0`).
/// The coordinates are owned by the tree store; editing them on a `Category`
/// value has no effect when the category is saved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub tree_id: i32,
    pub lft: i32,
    pub rght: i32,
    pub level: i32,
    pub name: String,
    pub slug: String,
    pub active: bool,
    /// Manual override of the breadcrumb display name.
    pub unicode_name: Option<String>,
    pub alternate_title: String,
    /// Overrides the URL derived from the hierarchy when not empty.
    pub alternate_url: String,
    pub description: Option<String>,
    pub meta_keywords: String,
    pub meta_extra: String,
    pub thumbnail: Option<String>,
    pub thumbnail_width: Option<i32>,
    pub thumbnail_height: Option<i32>,
    pub order: Option<i32>,
    pub is_blog: bool,
    pub show_converser_ad: bool,
}

impl Category {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.rght - self.lft == 1
    }

    /// Number of descendants, derived from the nested-set bounds.
    pub fn descendant_count(&self) -> i32 {
        (self.rght - self.lft - 1) / 2
    }

    /// Whether `other` sits strictly inside this category's subtree.
    pub fn is_ancestor_of(&self, other: &Category) -> bool {
        self.tree_id == other.tree_id && self.lft < other.lft && other.rght < self.rght
    }

    pub(crate) fn sync_coordinates(&mut self, stored: &Category) {
        self.parent_id = stored.parent_id;
        self.tree_id = stored.tree_id;
        self.lft = stored.lft;
        self.rght = stored.rght;
        self.level = stored.level;
    }

    /// The active model carrying only the payload columns.
    ///
    /// `parent_id` and the nested-set coordinates are left untouched, they
    /// change only through the structural operations of the tree store.
    pub(crate) fn payload_model(&self) -> ActiveModel {
        ActiveModel {
            id: ActiveValue::Set(self.id),
            name: ActiveValue::Set(self.name.clone()),
            slug: ActiveValue::Set(self.slug.clone()),
            active: ActiveValue::Set(self.active),
            unicode_name: ActiveValue::Set(self.unicode_name.clone()),
            alternate_title: ActiveValue::Set(self.alternate_title.clone()),
            alternate_url: ActiveValue::Set(self.alternate_url.clone()),
            description: ActiveValue::Set(self.description.clone()),
            meta_keywords: ActiveValue::Set(self.meta_keywords.clone()),
            meta_extra: ActiveValue::Set(self.meta_extra.clone()),
            thumbnail: ActiveValue::Set(self.thumbnail.clone()),
            thumbnail_width: ActiveValue::Set(self.thumbnail_width),
            thumbnail_height: ActiveValue::Set(self.thumbnail_height),
            order: ActiveValue::Set(self.order),
            is_blog: ActiveValue::Set(self.is_blog),
            show_converser_ad: ActiveValue::Set(self.show_converser_ad),
            ..Default::default()
        }
    }
}

/// A category that is not stored yet.
///
/// Only the name is required; the slug is derived from it when left blank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCategory {
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub active: bool,
    pub alternate_title: String,
    pub alternate_url: String,
    pub description: Option<String>,
    pub meta_keywords: String,
    pub meta_extra: String,
    pub thumbnail: Option<String>,
    pub thumbnail_width: Option<i32>,
    pub thumbnail_height: Option<i32>,
    pub order: Option<i32>,
    pub is_blog: bool,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            parent_id: None,
            name: name.into(),
            slug: String::new(),
            active: true,
            alternate_title: String::new(),
            alternate_url: String::new(),
            description: None,
            meta_keywords: String::new(),
            meta_extra: String::new(),
            thumbnail: None,
            thumbnail_width: None,
            thumbnail_height: None,
            order: None,
            is_blog: false,
        }
    }

    pub fn parent(mut self, parent_id: Uuid) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn alternate_url(mut self, url: impl Into<String>) -> Self {
        self.alternate_url = url.into();
        self
    }

    pub fn alternate_title(mut self, title: impl Into<String>) -> Self {
        self.alternate_title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn thumbnail(mut self, path: impl Into<String>, width: i32, height: i32) -> Self {
        self.thumbnail = Some(path.into());
        self.thumbnail_width = Some(width);
        self.thumbnail_height = Some(height);
        self
    }

    /// Build the unsaved node; coordinates are assigned on insert.
    pub(crate) fn into_category(self) -> Category {
        Category {
            id: Uuid::new_v4(),
            parent_id: self.parent_id,
            tree_id: 0,
            lft: 0,
            rght: 0,
            level: 0,
            name: self.name,
            slug: self.slug,
            active: self.active,
            unicode_name: None,
            alternate_title: self.alternate_title,
            alternate_url: self.alternate_url,
            description: self.description,
            meta_keywords: self.meta_keywords,
            meta_extra: self.meta_extra,
            thumbnail: self.thumbnail,
            thumbnail_width: self.thumbnail_width,
            thumbnail_height: self.thumbnail_height,
            order: self.order,
            is_blog: self.is_blog,
            show_converser_ad: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub tree_id: i32,
    pub lft: i32,
    pub rght: i32,
    pub level: i32,
    pub name: String,
    pub slug: String,
    pub active: bool,
    pub unicode_name: Option<String>,
    pub alternate_title: String,
    pub alternate_url: String,
    pub description: Option<String>,
    pub meta_keywords: String,
    pub meta_extra: String,
    pub thumbnail: Option<String>,
    pub thumbnail_width: Option<i32>,
    pub thumbnail_height: Option<i32>,
    pub order: Option<i32>,
    pub is_blog: bool,
    pub show_converser_ad: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Parent,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Category {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            parent_id: model.parent_id,
            tree_id: model.tree_id,
            lft: model.lft,
            rght: model.rght,
            level: model.level,
            name: model.name,
            slug: model.slug,
            active: model.active,
            unicode_name: model.unicode_name,
            alternate_title: model.alternate_title,
            alternate_url: model.alternate_url,
            description: model.description,
            meta_keywords: model.meta_keywords,
            meta_extra: model.meta_extra,
            thumbnail: model.thumbnail,
            thumbnail_width: model.thumbnail_width,
            thumbnail_height: model.thumbnail_height,
            order: model.order,
            is_blog: model.is_blog,
            show_converser_ad: model.show_converser_ad,
        }
    }
}

impl From<&Category> for ActiveModel {
    fn from(category: &Category) -> Self {
        let mut model = category.payload_model();
        model.parent_id = ActiveValue::Set(category.parent_id);
        model.tree_id = ActiveValue::Set(category.tree_id);
        model.lft = ActiveValue::Set(category.lft);
        model.rght = ActiveValue::Set(category.rght);
        model.level = ActiveValue::Set(category.level);
        model
    }
}
