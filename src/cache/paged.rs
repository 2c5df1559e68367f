//! Paginated Category Cache Module
//!
//! Accumulates fetched page slices per category and exposes a merged view
//! plus the next-page cursor. Used for the per-category RSS source
//! browser.
//!
//! Invalidation is coarse: validity of a whole category is judged solely
//! by its first slice's timestamp, and the only other way out is an
//! explicit per-category clear. Later slices are never checked on their
//! own, so a category can serve stale later pages while reporting valid.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::cache::TtlClass;

// == Page Slice ==
/// One fetched page of a category, kept in arrival order.
#[derive(Debug, Clone)]
pub struct PageSlice<T> {
    /// Items of this page, in server order
    pub data: Vec<T>,
    /// Server page number this slice answers
    pub page: u32,
    /// Whether the server reported this as the final page
    pub last: bool,
    /// When the slice was stored
    pub stored_at: DateTime<Utc>,
}

// == Merged View ==
/// The concatenated view of every cached slice of a category.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedPages<T> {
    /// All slices' items concatenated in storage order
    pub items: Vec<T>,
    /// Page number to request next, last slice's page + 1
    pub next_page: u32,
    /// Final-page flag of the last stored slice
    pub last: bool,
}

// == Paginated Category Cache ==
/// Per-category accumulation of page slices.
#[derive(Debug)]
pub struct PagedCategoryCache<T> {
    class: TtlClass,
    categories: HashMap<String, Vec<PageSlice<T>>>,
}

impl<T> PagedCategoryCache<T> {
    /// Creates an empty cache whose categories expire under `class`.
    pub fn new(class: TtlClass) -> Self {
        Self {
            class,
            categories: HashMap::new(),
        }
    }

    // == Add Page ==
    /// Upserts the slice answering `page` within `category`.
    ///
    /// A slice with the same page number is replaced in place (fresh
    /// timestamp included); otherwise the slice is appended in arrival
    /// order. The category is created when missing. At most one slice per
    /// page number per category.
    pub fn add_page(&mut self, category: &str, data: Vec<T>, page: u32, last: bool) {
        let slice = PageSlice {
            data,
            page,
            last,
            stored_at: Utc::now(),
        };

        let slices = self.categories.entry(category.to_string()).or_default();
        match slices.iter_mut().find(|existing| existing.page == page) {
            Some(existing) => *existing = slice,
            None => slices.push(slice),
        }
    }

    // == Merged ==
    /// Returns the merged view of `category`, or `None` when the category
    /// is missing or its first slice has expired.
    ///
    /// Expiry of the first slice evicts the whole category; a fresh
    /// paging sequence then starts from scratch.
    pub fn merged(&mut self, category: &str) -> Option<MergedPages<T>>
    where
        T: Clone,
    {
        let now = Utc::now();
        let expired = self
            .categories
            .get(category)
            .and_then(|slices| slices.first())
            .map_or(false, |first| !self.class.is_valid(first.stored_at, now));
        if expired {
            self.categories.remove(category);
            return None;
        }

        let slices = self.categories.get(category)?;
        let latest = slices.last()?;

        Some(MergedPages {
            items: slices
                .iter()
                .flat_map(|slice| slice.data.iter().cloned())
                .collect(),
            next_page: latest.page + 1,
            last: latest.last,
        })
    }

    // == Clear ==
    /// Drops one category wholesale.
    pub fn clear(&mut self, category: &str) {
        self.categories.remove(category);
    }

    /// Drops every category.
    pub fn clear_all(&mut self) {
        self.categories.clear();
    }

    // == Patch All ==
    /// Rewrites matching items in place across every page of every
    /// category.
    ///
    /// Page numbers, final-page flags and slice timestamps are left
    /// untouched; this is a payload patch, not a revalidation.
    pub fn patch_all(
        &mut self,
        mut predicate: impl FnMut(&T) -> bool,
        mut patch: impl FnMut(&mut T),
    ) {
        for slices in self.categories.values_mut() {
            for slice in slices.iter_mut() {
                for item in slice.data.iter_mut() {
                    if predicate(item) {
                        patch(item);
                    }
                }
            }
        }
    }

    /// Number of cached categories.
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.categories.len()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn cache() -> PagedCategoryCache<u32> {
        PagedCategoryCache::new(TtlClass::Short)
    }

    #[test]
    fn test_merged_concatenates_in_storage_order() {
        let mut paged = cache();

        paged.add_page("tech", vec![1, 2], 0, false);
        paged.add_page("tech", vec![3, 4], 1, true);

        let merged = paged.merged("tech").unwrap();
        assert_eq!(merged.items, vec![1, 2, 3, 4]);
        assert_eq!(merged.next_page, 2);
        assert!(merged.last);
    }

    #[test]
    fn test_merged_missing_category() {
        let mut paged = cache();
        assert!(paged.merged("news").is_none());
    }

    #[test]
    fn test_add_page_replaces_same_page() {
        let mut paged = cache();

        paged.add_page("tech", vec![1, 2], 0, false);
        paged.add_page("tech", vec![9, 8], 0, false);

        let merged = paged.merged("tech").unwrap();
        assert_eq!(merged.items, vec![9, 8]);
        assert_eq!(merged.next_page, 1);
    }

    #[test]
    fn test_arrival_order_is_not_resorted() {
        let mut paged = cache();

        // Pages arriving out of numeric order stay in arrival order
        paged.add_page("tech", vec![3, 4], 1, true);
        paged.add_page("tech", vec![1, 2], 0, false);

        let merged = paged.merged("tech").unwrap();
        assert_eq!(merged.items, vec![3, 4, 1, 2]);
        // Cursor follows the last stored slice, not the numeric maximum
        assert_eq!(merged.next_page, 1);
        assert!(!merged.last);
    }

    #[test]
    fn test_first_slice_expiry_evicts_category() {
        let mut paged = cache();
        paged.add_page("tech", vec![1], 0, false);
        paged.add_page("tech", vec![2], 1, true);
        paged.categories.get_mut("tech").unwrap()[0].stored_at =
            Utc::now() - Duration::minutes(6);

        assert!(paged.merged("tech").is_none());
        assert_eq!(paged.len(), 0);
        // Second read observes plain absence
        assert!(paged.merged("tech").is_none());
    }

    #[test]
    fn test_later_slices_are_not_checked() {
        let mut paged = cache();
        paged.add_page("tech", vec![1], 0, false);
        paged.add_page("tech", vec![2], 1, true);
        // Only the later slice goes stale
        paged.categories.get_mut("tech").unwrap()[1].stored_at =
            Utc::now() - Duration::minutes(6);

        let merged = paged.merged("tech").unwrap();
        assert_eq!(merged.items, vec![1, 2]);
    }

    #[test]
    fn test_clear_drops_single_category() {
        let mut paged = cache();
        paged.add_page("tech", vec![1], 0, true);
        paged.add_page("news", vec![2], 0, true);

        paged.clear("tech");

        assert!(paged.merged("tech").is_none());
        assert!(paged.merged("news").is_some());
    }

    #[test]
    fn test_patch_all_rewrites_across_categories() {
        let mut paged = cache();
        paged.add_page("tech", vec![1, 5], 0, false);
        paged.add_page("tech", vec![5, 2], 1, true);
        paged.add_page("news", vec![5], 0, true);

        paged.patch_all(|item| *item == 5, |item| *item = 50);

        assert_eq!(paged.merged("tech").unwrap().items, vec![1, 50, 50, 2]);
        assert_eq!(paged.merged("news").unwrap().items, vec![50]);
    }

    #[test]
    fn test_patch_all_keeps_metadata_and_timestamps() {
        let mut paged = cache();
        paged.add_page("tech", vec![1], 3, true);
        let before = paged.categories["tech"][0].stored_at;

        paged.patch_all(|_| true, |item| *item += 1);

        let slice = &paged.categories["tech"][0];
        assert_eq!(slice.page, 3);
        assert!(slice.last);
        assert_eq!(slice.stored_at, before);
    }
}
