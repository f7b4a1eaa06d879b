//! 1-based paging of the analysis table

/// Rows per page of the analysis table
pub const DEFAULT_PER_PAGE: usize = 4;

/// Slice out a 1-based page
///
/// Page 0, a zero page size, and pages past the end yield an empty slice.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if page == 0 || per_page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `len` items
pub fn page_count(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=10).collect();
        assert_eq!(paginate(&items, 1, 4), &[1, 2, 3, 4]);
        assert_eq!(paginate(&items, 3, 4), &[9, 10]);
        assert!(paginate(&items, 4, 4).is_empty());
        assert!(paginate(&items, 0, 4).is_empty());
        assert!(paginate(&items, 1, 0).is_empty());
        assert!(paginate(&items, usize::MAX, 4).is_empty());
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 4), 0);
        assert_eq!(page_count(4, 4), 1);
        assert_eq!(page_count(5, 4), 2);
        assert_eq!(page_count(10, DEFAULT_PER_PAGE), 3);
        assert_eq!(page_count(3, 0), 0);
    }
}
