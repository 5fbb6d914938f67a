//! Page arithmetic shared by the paginated tables.
//!
//! Pages are numbered from 1. In [`visible_pages`] a `0` stands for an
//! ellipsis.

pub const DEFAULT_PAGE_SIZE: usize = 10;
/// The evaluation table is shorter so the chart stays in view.
pub const EVALUATE_PAGE_SIZE: usize = 8;

const MAX_VISIBLE: usize = 5;

pub fn page_count(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Items of `page`, empty when the page is out of range.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// Page buttons to show: all of them when few, otherwise first, last and
/// the neighbours of `current`.
pub fn visible_pages(current: usize, total_pages: usize) -> Vec<usize> {
    if total_pages <= MAX_VISIBLE {
        return (1..=total_pages).collect();
    }

    let mut pages = vec![1];
    let start = current.saturating_sub(1).max(2);
    let end = (current + 1).min(total_pages - 1);

    if start > 2 {
        pages.push(0);
    }
    pages.extend(start..=end);
    if end < total_pages - 1 {
        pages.push(0);
    }
    pages.push(total_pages);
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(17, EVALUATE_PAGE_SIZE), 3);
        assert_eq!(page_count(5, 0), 0);
    }

    #[test]
    fn test_page_slice_bounds() {
        let items: Vec<u32> = (1..=23).collect();
        assert_eq!(page_slice(&items, 1, 10), &items[0..10]);
        assert_eq!(page_slice(&items, 3, 10), &[21, 22, 23]);
        assert!(page_slice(&items, 4, 10).is_empty());
        assert!(page_slice(&items, 0, 10).is_empty());
    }

    #[test]
    fn test_visible_pages_with_gaps() {
        assert_eq!(visible_pages(1, 4), vec![1, 2, 3, 4]);
        assert_eq!(visible_pages(1, 10), vec![1, 2, 0, 10]);
        assert_eq!(visible_pages(5, 10), vec![1, 0, 4, 5, 6, 0, 10]);
        assert_eq!(visible_pages(10, 10), vec![1, 0, 9, 10]);
    }
}
