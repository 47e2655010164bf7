//! Strain: the string-keyed variant driven by sessions and the CLI

use crate::genealogy::Variant;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strain {
    pub name: String,
}

impl Variant for Strain {
    type Id = String;

    fn new(id: &String) -> Self {
        Self { name: id.clone() }
    }

    fn id(&self) -> &String {
        &self.name
    }
}

impl fmt::Display for Strain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "strain {}", self.name)
    }
}
