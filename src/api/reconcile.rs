use crate::api::models::{CatalogId, MediaItem};
use std::collections::HashSet;

/// Catalog ids known to exist in one library service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceSet(HashSet<CatalogId>);

impl PresenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: CatalogId) -> bool {
        self.0.contains(&id)
    }

    pub fn insert(&mut self, id: CatalogId) -> bool {
        self.0.insert(id)
    }
}

#[cfg(test)]
impl PresenceSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<CatalogId> for PresenceSet {
    fn from_iter<I: IntoIterator<Item = CatalogId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Stamps each item's presence flag from `presence`.
pub fn reconcile(items: Vec<MediaItem>, presence: &PresenceSet) -> Vec<MediaItem> {
    items
        .into_iter()
        .map(|mut item| {
            item.in_library = presence.contains(item.catalog_id());
            item
        })
        .collect()
}
