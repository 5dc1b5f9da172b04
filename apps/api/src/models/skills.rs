use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A case-insensitive set of skill names.
///
/// Membership and equality use the lowercased name; the first casing seen is
/// kept for display. Iteration order is the lowercased sort order, so
/// serialized output is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet {
    entries: BTreeMap<String, String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a skill. Blank names are ignored; an existing entry keeps its casing.
    pub fn insert(&mut self, skill: impl Into<String>) -> bool {
        let skill = skill.into();
        let trimmed = skill.trim();
        if trimmed.is_empty() {
            return false;
        }
        let key = trimmed.to_lowercase();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, trimmed.to_string());
        true
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.entries.contains_key(&skill.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    /// Lowercased comparison keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.values().cloned().collect()
    }

    pub fn union(&self, other: &SkillSet) -> SkillSet {
        let mut merged = self.clone();
        for skill in other.iter() {
            merged.insert(skill);
        }
        merged
    }

    pub fn is_disjoint(&self, other: &SkillSet) -> bool {
        self.keys().all(|k| !other.entries.contains_key(k))
    }
}

impl From<Vec<String>> for SkillSet {
    fn from(skills: Vec<String>) -> Self {
        skills.into_iter().collect()
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(set: SkillSet) -> Self {
        set.entries.into_values().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            set.insert(skill);
        }
        set
    }
}
