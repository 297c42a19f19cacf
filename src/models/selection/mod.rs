// Selection module
// Ids of the items the user has picked, independent of any gesture in flight

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    /// Replace the selection with a single id.
    pub fn select_only(&mut self, id: impl Into<String>) {
        self.ids.clear();
        self.ids.insert(id.into());
    }

    /// Flip membership of `id`. Returns true if it is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn deselect(&mut self, id: &str) {
        self.ids.remove(id);
    }

    /// Replace (or, with `additive`, extend) the selection with `ids`.
    pub fn select_many<I, S>(&mut self, ids: I, additive: bool)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !additive {
            self.ids.clear();
        }
        self.ids.extend(ids.into_iter().map(Into::into));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
