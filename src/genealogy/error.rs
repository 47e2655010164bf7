//! Errors raised by genealogy operations

/// Failure of a genealogy operation
///
/// A failed call never leaves a partial mutation behind. Ids are kept in
/// their `Debug` rendering so the error stays independent of the id type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenealogyError {
    #[error("variant not found: {0}")]
    NotFound(String),

    #[error("variant already created: {0}")]
    AlreadyExists(String),

    #[error("tried to remove the stem variant: {0}")]
    ForbiddenRemoval(String),

    #[error("edge {parent} -> {child} would give the stem a parent")]
    ForbiddenEdge { child: String, parent: String },

    #[error("edge {parent} -> {child} would create a cycle")]
    CycleDetected { child: String, parent: String },
}

impl GenealogyError {
    pub(crate) fn not_found(id: &impl std::fmt::Debug) -> Self {
        Self::NotFound(format!("{:?}", id))
    }

    pub(crate) fn already_exists(id: &impl std::fmt::Debug) -> Self {
        Self::AlreadyExists(format!("{:?}", id))
    }

    pub(crate) fn forbidden_removal(id: &impl std::fmt::Debug) -> Self {
        Self::ForbiddenRemoval(format!("{:?}", id))
    }

    pub(crate) fn forbidden_edge(child: &impl std::fmt::Debug, parent: &impl std::fmt::Debug) -> Self {
        Self::ForbiddenEdge {
            child: format!("{:?}", child),
            parent: format!("{:?}", parent),
        }
    }

    pub(crate) fn cycle(child: &impl std::fmt::Debug, parent: &impl std::fmt::Debug) -> Self {
        Self::CycleDetected {
            child: format!("{:?}", child),
            parent: format!("{:?}", parent),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenealogyError>;
