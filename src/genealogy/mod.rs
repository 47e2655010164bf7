//! Genealogy: a mutable DAG of descent between variants
//!
//! One stem variant roots the graph and can never be removed or given a
//! parent. Every other variant descends from one or more existing variants.

mod error;
mod graph;
mod node;
mod variant;

pub use error::{GenealogyError, Result};
pub use graph::{Children, VirusGenealogy};
pub use variant::Variant;

#[cfg(test)]
mod properties;
