use crate::CoreError;

/// One page of a longer, already sorted list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served.
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Slices `items` into the requested page. Page 0 is treated as page 1.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Result<Page<T>, CoreError> {
    if per_page == 0 {
        return Err(CoreError::Validation("page size must be at least 1".into()));
    }
    let page = page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page);
    let items = items
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .collect();
    Ok(Page {
        items,
        page,
        per_page,
        total,
        total_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_into_pages() {
        let page = paginate((1..=25).collect::<Vec<_>>(), 3, 10).unwrap();
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn past_the_end_is_empty_with_totals() {
        let page = paginate(vec!['a', 'b'], 5, 10).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn page_zero_is_first_page() {
        let page = paginate(vec![1, 2, 3], 0, 2).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.items, vec![1, 2]);
    }

    #[test]
    fn rejects_zero_page_size() {
        assert!(paginate(vec![1], 1, 0).is_err());
    }

    #[test]
    fn empty_list_has_no_pages() {
        let page = paginate(Vec::<u8>::new(), 1, 10).unwrap();
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
    }
}
