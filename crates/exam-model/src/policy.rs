use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::category::SectionCategory;
use crate::ids::ClassId;

/// Per-class composition rules: which section categories a class may use and
/// an optional ceiling on total MCQ marks (younger classes cap objective
/// sections).
///
/// Read-only reference data. Resolved per (tenant, class); never mutated by
/// the engine, and re-checked at submit time rather than trusted from an
/// earlier fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassPolicy {
    pub class_id: ClassId,
    pub allowed_categories: BTreeSet<SectionCategory>,
    pub mcq_max_marks: Option<u32>,
}

impl ClassPolicy {
    /// A policy allowing every category with no MCQ ceiling.
    pub fn permissive(class_id: ClassId) -> Self {
        Self {
            class_id,
            allowed_categories: SectionCategory::ALL.into_iter().collect(),
            mcq_max_marks: None,
        }
    }

    pub fn allows(&self, category: SectionCategory) -> bool {
        self.allowed_categories.contains(&category)
    }
}
