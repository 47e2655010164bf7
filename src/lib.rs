//! Variant Genealogy
//!
//! An in-memory DAG tracking which variants descend from which. A single
//! stem variant roots the graph; every mutation either succeeds completely
//! or leaves the graph untouched.

pub mod genealogy;
pub mod session;
pub mod snapshot;

pub use genealogy::{Children, GenealogyError, Variant, VirusGenealogy};
pub use session::{Session, SessionConfig, Strain};
pub use snapshot::GenealogySnapshot;
