use thiserror::Error;

use crate::ClassId;

/// Failure categories a [`crate::DetailLoader`] may report.
///
/// The scope absorbs all of them: the class is marked missing and the failure is logged, with
/// a severity that depends on the category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Neither the program nor the platform defines the class.
    #[error("class `{name}` not found")]
    ClassNotFound { name: String },

    /// A definition exists but could not be turned into class detail.
    #[error("failed to initialize class `{name}`: {reason}")]
    InitializationFailed { name: String, reason: String },

    /// The class is referenced but its definition is not available to the loader.
    #[error("definition of class `{name}` is unavailable: {reason}")]
    DefinitionUnavailable { name: String, reason: String },
}

impl LoadError {
    pub fn class_not_found(name: impl Into<String>) -> Self {
        LoadError::ClassNotFound { name: name.into() }
    }

    pub fn initialization_failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        LoadError::InitializationFailed {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn definition_unavailable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        LoadError::DefinitionUnavailable {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    #[error("class `{name}` already has detail attached")]
    DetailAlreadyAttached { name: String },

    /// The detail refers to a class id minted by another scope.
    #[error("detail for class `{name}` references {id:?}, which this scope never registered")]
    ForeignClass { name: String, id: ClassId },
}
