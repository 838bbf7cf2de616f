use std::ops::RangeInclusive;

/// Ventana de paginación: hasta 5 enlaces alrededor de la página actual
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
}

const WINDOW_SPAN: usize = 4;

impl Pagination {
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            current_page: current_page.clamp(1, total_pages),
            total_pages,
        }
    }

    pub fn for_items(item_count: usize, page_size: usize, current_page: usize) -> Self {
        Self::new(current_page, total_pages(item_count, page_size))
    }

    /// Con una sola página no se dibuja el control
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    pub fn window(&self) -> RangeInclusive<usize> {
        let mut start = self.current_page.saturating_sub(2).max(1);
        let end = (start + WINDOW_SPAN).min(self.total_pages);
        if end - start < WINDOW_SPAN {
            start = end.saturating_sub(WINDOW_SPAN).max(1);
        }
        start..=end
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn show_first_link(&self) -> bool {
        *self.window().start() > 1
    }

    pub fn leading_ellipsis(&self) -> bool {
        *self.window().start() > 2
    }

    pub fn show_last_link(&self) -> bool {
        *self.window().end() < self.total_pages
    }

    pub fn trailing_ellipsis(&self) -> bool {
        *self.window().end() + 1 < self.total_pages
    }
}

pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    item_count.div_ceil(page_size).max(1)
}

/// Filas de la página `page` (base 1)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_is_centered_and_clamped() {
        assert_eq!(Pagination::new(1, 10).window(), 1..=5);
        assert_eq!(Pagination::new(5, 10).window(), 3..=7);
        assert_eq!(Pagination::new(10, 10).window(), 6..=10);
        assert_eq!(Pagination::new(2, 3).window(), 1..=3);
    }

    #[test]
    fn test_first_last_links_and_ellipses() {
        let p = Pagination::new(6, 12);
        assert_eq!(p.window(), 4..=8);
        assert!(p.show_first_link());
        assert!(p.leading_ellipsis());
        assert!(p.show_last_link());
        assert!(p.trailing_ellipsis());

        let p = Pagination::new(1, 6);
        assert!(!p.show_first_link());
        assert!(p.show_last_link());
        assert!(!p.trailing_ellipsis());
        assert!(!p.has_prev());
        assert!(p.has_next());
    }

    #[test]
    fn test_single_page_is_hidden() {
        let p = Pagination::for_items(7, 10, 3);
        assert_eq!(p.current_page, 1);
        assert!(!p.is_visible());
    }

    #[test]
    fn test_page_slice() {
        let items: Vec<u32> = (1..=25).collect();
        assert_eq!(total_pages(items.len(), 10), 3);
        assert_eq!(page_slice(&items, 1, 10), &items[0..10]);
        assert_eq!(page_slice(&items, 3, 10), &[21, 22, 23, 24, 25]);
        assert!(page_slice(&items, 4, 10).is_empty());
        assert!(page_slice(&items, 0, 10).is_empty());
    }
}
