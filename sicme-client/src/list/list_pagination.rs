//! Client-side pagination over an in-memory list

/// Pages an already fetched, already filtered list.
///
/// The list does not observe filter inputs: callers reset to the first
/// page whenever their filter criteria change.
#[derive(Debug, Clone)]
pub struct ListPagination<T> {
    items: Vec<T>,
    page_size: usize,
    page: usize,
}

impl<T> ListPagination<T> {
    pub fn new(page_size: usize) -> Self {
        Self::with_items(Vec::new(), page_size)
    }

    pub fn with_items(items: Vec<T>, page_size: usize) -> Self {
        Self {
            items,
            page_size: page_size.max(1),
            page: 1,
        }
    }

    /// Replace the source list, clamping the current page if it shrank.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        let total_pages = self.total_pages();
        if self.page > total_pages {
            self.page = total_pages;
        }
    }

    /// Jump to `page`, kept within `1..=total_pages`.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    pub fn next_page(&mut self) -> bool {
        if self.page < self.total_pages() {
            self.page += 1;
            return true;
        }
        false
    }

    pub fn previous_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            return true;
        }
        false
    }

    pub fn reset_to_first_page(&mut self) {
        self.page = 1;
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Always at least one page, even for an empty list
    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size).max(1)
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Slice shown on the current page
    pub fn paginated_items(&self) -> &[T] {
        let start = (self.page - 1) * self.page_size;
        if start >= self.items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(self.items.len());
        &self.items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_formula() {
        for n in [0usize, 1, 9, 10, 11, 25, 100] {
            for page_size in [1usize, 3, 10] {
                let pagination = ListPagination::with_items(vec![0; n], page_size);
                let expected = n.div_ceil(page_size).max(1);
                assert_eq!(pagination.total_pages(), expected, "n={n} page_size={page_size}");
                assert!(pagination.paginated_items().len() <= page_size);
            }
        }
    }

    #[test]
    fn test_paginated_slice() {
        let mut pagination = ListPagination::with_items((1..=23).collect(), 10);
        assert_eq!(pagination.paginated_items(), &(1..=10).collect::<Vec<_>>()[..]);

        pagination.set_page(3);
        assert_eq!(pagination.paginated_items(), &[21, 22, 23]);
        assert_eq!(pagination.total_items(), 23);
    }

    #[test]
    fn test_clamps_when_list_shrinks() {
        let mut pagination = ListPagination::with_items((0..40).collect(), 10);
        pagination.set_page(4);
        assert_eq!(pagination.page(), 4);

        pagination.set_items(vec![1, 2, 3]);
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.paginated_items(), &[1, 2, 3]);
    }

    #[test]
    fn test_page_kept_when_still_in_range() {
        let mut pagination = ListPagination::with_items((0..40).collect(), 10);
        pagination.set_page(2);
        pagination.set_items((0..35).collect());
        assert_eq!(pagination.page(), 2);
    }

    #[test]
    fn test_navigation_bounds() {
        let mut pagination = ListPagination::with_items((0..15).collect::<Vec<i32>>(), 10);
        assert!(!pagination.previous_page());
        assert!(pagination.next_page());
        assert!(!pagination.next_page());
        assert_eq!(pagination.page(), 2);

        pagination.set_page(99);
        assert_eq!(pagination.page(), 2);
        pagination.set_page(0);
        assert_eq!(pagination.page(), 1);

        pagination.set_page(2);
        pagination.reset_to_first_page();
        assert_eq!(pagination.page(), 1);
    }

    #[test]
    fn test_zero_page_size_is_coerced() {
        let pagination = ListPagination::with_items(vec!['a', 'b'], 0);
        assert_eq!(pagination.page_size(), 1);
        assert_eq!(pagination.total_pages(), 2);
    }
}
