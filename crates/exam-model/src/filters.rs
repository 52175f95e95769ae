//! Dependency-ordered selection filters.
//!
//! The composer UI narrows choices through class -> subject -> chapter ->
//! topic. Changing a parent level invalidates everything downstream of it, so
//! the cascade is modeled as an explicitly ordered dependency list rather
//! than ad hoc reset calls sprinkled at each call site.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Filter levels in dependency order. Each level depends on every level
/// declared before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterLevel {
    Class,
    Subject,
    Chapter,
    Topic,
}

impl FilterLevel {
    pub const ORDER: [FilterLevel; 4] = [
        FilterLevel::Class,
        FilterLevel::Subject,
        FilterLevel::Chapter,
        FilterLevel::Topic,
    ];

    /// Levels that must be cleared when this level changes.
    pub fn dependents(&self) -> &'static [FilterLevel] {
        let position = FilterLevel::ORDER
            .iter()
            .position(|level| level == self)
            .expect("level is in ORDER");
        &FilterLevel::ORDER[position + 1..]
    }
}

/// Current filter selections with cascade-on-change semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCascade {
    selections: BTreeMap<FilterLevel, String>,
}

impl FilterCascade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, level: FilterLevel) -> Option<&str> {
        self.selections.get(&level).map(String::as_str)
    }

    /// Set a selection, clearing every dependent level. Returns the levels
    /// that were cleared so a UI can refresh them.
    pub fn select(&mut self, level: FilterLevel, value: impl Into<String>) -> Vec<FilterLevel> {
        self.selections.insert(level, value.into());
        self.clear_dependents(level)
    }

    /// Clear a selection and its dependents.
    pub fn clear(&mut self, level: FilterLevel) -> Vec<FilterLevel> {
        self.selections.remove(&level);
        self.clear_dependents(level)
    }

    fn clear_dependents(&mut self, level: FilterLevel) -> Vec<FilterLevel> {
        let mut cleared = Vec::new();
        for dependent in level.dependents() {
            if self.selections.remove(dependent).is_some() {
                cleared.push(*dependent);
            }
        }
        cleared
    }
}
