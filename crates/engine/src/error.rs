//! The module contains the error the engine can throw.
//!
//! Validation errors are recoverable and are raised before anything is
//! written:
//!
//! - [`DuplicateSlug`] thrown when another category of the same tree already
//!   uses the slug.
//! - [`SelfParent`] thrown when a category is asked to become its own parent.
//! - [`CyclicParent`] thrown when a category is asked to hang below one of its
//!   own descendants.
//!
//! Store failures surface as [`Database`] and are never retried here.
//!
//!  [`DuplicateSlug`]: EngineError::DuplicateSlug
//!  [`SelfParent`]: EngineError::SelfParent
//!  [`CyclicParent`]: EngineError::CyclicParent
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("The slug \"{0}\" must be unique among items in the same tree.")]
    DuplicateSlug(String),
    #[error("You can't set the parent of the item to itself.")]
    SelfParent,
    #[error("You can't set the parent of the item to a descendant.")]
    CyclicParent,
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid field: {0}")]
    InvalidField(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::DuplicateSlug(a), Self::DuplicateSlug(b)) => a == b,
            (Self::SelfParent, Self::SelfParent) => true,
            (Self::CyclicParent, Self::CyclicParent) => true,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidField(a), Self::InvalidField(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
