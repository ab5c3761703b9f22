//! Cache of the last-fetched list, shared by the SDK state services.
//!
//! Readers take an `Arc` snapshot and never block a concurrent refresh;
//! a refresh replaces the whole snapshot atomically.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::paging::{ListResultDto, PagedResultDto};

/// Immutable view of a cached list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSnapshot<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

impl<T> Default for ListSnapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}

pub struct ListState<T> {
    current: ArcSwap<ListSnapshot<T>>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListState<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(ListSnapshot::default()),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<ListSnapshot<T>> {
        self.current.load_full()
    }

    pub fn replace(&self, items: Vec<T>, total_count: u64) {
        self.current
            .store(Arc::new(ListSnapshot { items, total_count }));
    }

    pub fn replace_page(&self, page: PagedResultDto<T>) {
        self.replace(page.items, page.total_count);
    }

    pub fn replace_list(&self, list: ListResultDto<T>) {
        let total = list.items.len() as u64;
        self.replace(list.items, total);
    }

    pub fn clear(&self) {
        self.current.store(Arc::new(ListSnapshot::default()));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.load().items.is_empty()
    }

    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.current.load().total_count
    }
}

impl<T: Clone> ListState<T> {
    /// Owned copy of the cached items.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.current.load().items.clone()
    }

    /// First cached item matching `predicate`.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.current.load().items.iter().find(|item| predicate(item)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let state: ListState<u32> = ListState::new();
        assert!(state.is_empty());
        assert_eq!(state.total_count(), 0);
    }

    #[test]
    fn old_snapshots_survive_replace() {
        let state = ListState::new();
        state.replace(vec![1, 2], 10);
        let before = state.snapshot();

        state.replace_page(PagedResultDto {
            items: vec![3],
            total_count: 11,
        });

        assert_eq!(before.items, vec![1, 2]);
        assert_eq!(state.items(), vec![3]);
        assert_eq!(state.total_count(), 11);
    }

    #[test]
    fn list_total_is_item_count() {
        let state = ListState::new();
        state.replace_list(ListResultDto {
            items: vec!["a", "b", "c"],
        });
        assert_eq!(state.total_count(), 3);
        assert_eq!(state.find(|s| *s == "b"), Some("b"));

        state.clear();
        assert!(state.is_empty());
    }
}
