//! Hierarchical categories stored as nested-set trees.
//!
//! [`Engine`] is the entry point: it creates, edits, moves and deletes
//! categories, cascades deactivation to subtrees and derives breadcrumb names
//! and URLs. The lower level modules are public so callers can compose them
//! inside their own transactions.

pub use breadcrumb::CategoryPaths;
pub use categories::{Category, NewCategory};
pub use error::EngineError;
pub use ops::{BackfillEntry, Engine, EngineBuilder};
pub use settings::EngineSettings;
pub use util::slugify;
pub use validate::{CategoryForm, CleanedCategory};

pub mod breadcrumb;
pub mod cascade;
pub mod categories;
mod error;
mod ops;
mod settings;
pub mod tree;
mod util;
pub mod validate;

pub type ResultEngine<T> = Result<T, EngineError>;
