use anyhow::{Result, bail};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages needed for `count` items; zero items means zero pages.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// 1-indexed window `[(index-1)*size, index*size)` clipped to `items`.
/// Index 0 and indices past the end give an empty slice.
pub fn page<T>(items: &[T], index: usize, page_size: usize) -> &[T] {
    if index == 0 || page_size == 0 {
        return &[];
    }
    let start = (index - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Active page of a filtered view.
///
/// The index is independent state: it is not reset when the search term
/// changes, so a narrowed result set can leave it pointing past the last
/// page. `clamp` pulls it back only when asked to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    current_page: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            bail!("page size must be a positive integer");
        }
        Ok(Self {
            page_size,
            current_page: 1,
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn go_to(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Moves forward one page, staying put on the last of `total` pages
    pub fn next(&mut self, total: usize) {
        if self.current_page < total {
            self.current_page += 1;
        }
    }

    pub fn previous(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    pub fn clamp(&mut self, total: usize) {
        self.current_page = self.current_page.clamp(1, total.max(1));
    }

    pub fn total_pages(&self, count: usize) -> usize {
        total_pages(count, self.page_size)
    }

    pub fn current<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        page(items, self.current_page, self.page_size)
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_items_means_zero_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
    }

    #[test]
    fn twelve_records_split_into_ten_and_two() {
        let records: Vec<u32> = (1..=12).collect();

        assert_eq!(total_pages(records.len(), 10), 2);
        assert_eq!(page(&records, 1, 10), &records[..10]);
        assert_eq!(page(&records, 2, 10), &[11, 12]);
        assert!(page(&records, 3, 10).is_empty());
    }

    #[test]
    fn out_of_range_indices_are_empty() {
        let records: Vec<u32> = (1..=5).collect();

        assert!(page(&records, 0, 10).is_empty());
        assert!(page(&records, usize::MAX, 10).is_empty());
        assert!(page::<u32>(&[], 1, 10).is_empty());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(Paginator::new(0).is_err());
        assert_eq!(Paginator::new(3).unwrap().page_size(), 3);
    }

    #[test]
    fn go_to_does_not_clamp() {
        let mut paginator = Paginator::default();
        paginator.go_to(7);

        assert_eq!(paginator.current_page(), 7);
        assert!(paginator.current(&[1, 2, 3]).is_empty());
    }

    #[test]
    fn next_and_previous_stay_in_bounds() {
        let mut paginator = Paginator::default();
        paginator.previous();
        assert_eq!(paginator.current_page(), 1);

        paginator.next(2);
        paginator.next(2);
        assert_eq!(paginator.current_page(), 2);
    }

    #[test]
    fn clamp_pulls_a_stale_index_back() {
        let mut paginator = Paginator::default();
        paginator.go_to(4);
        paginator.clamp(2);
        assert_eq!(paginator.current_page(), 2);

        paginator.clamp(0);
        assert_eq!(paginator.current_page(), 1);
    }
}
