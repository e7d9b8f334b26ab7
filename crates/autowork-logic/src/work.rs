//! Work types - the categories of labor priorities are assigned for.

use serde::{Deserialize, Serialize};

use crate::defs::{DefRegistry, NamedDef};

/// Index of a work type in its [`WorkCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkTypeId(pub u16);

impl WorkTypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Immutable reference data for one category of labor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkType {
    pub name: String,
    /// Host's built-in ordering weight; larger means more important.
    pub natural_priority: i32,
    /// Skill names whose levels feed this work type.
    pub relevant_skills: Vec<String>,
    /// Hidden work types are never managed.
    pub visible: bool,
}

impl WorkType {
    pub fn new(name: &str, natural_priority: i32, relevant_skills: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            natural_priority,
            relevant_skills: relevant_skills.iter().map(|s| s.to_string()).collect(),
            visible: true,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

impl NamedDef for WorkType {
    fn def_name(&self) -> &str {
        &self.name
    }
}

pub type WorkCatalog = DefRegistry<WorkType>;

/// Typed lookups over the catalog.
pub trait WorkCatalogExt {
    fn id_of(&self, name: &str) -> Option<WorkTypeId>;
    fn work_type(&self, id: WorkTypeId) -> Option<&WorkType>;
    fn ids(&self) -> Vec<WorkTypeId>;
}

impl WorkCatalogExt for WorkCatalog {
    fn id_of(&self, name: &str) -> Option<WorkTypeId> {
        self.index_of(name).map(|idx| WorkTypeId(idx as u16))
    }

    fn work_type(&self, id: WorkTypeId) -> Option<&WorkType> {
        self.by_index(id.index())
    }

    fn ids(&self) -> Vec<WorkTypeId> {
        (0..self.len()).map(|idx| WorkTypeId(idx as u16)).collect()
    }
}
