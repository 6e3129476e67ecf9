use crate::error::{Result, SearchError};

/// Splits a result slice into consecutive pages of at most `page_size` items.
#[derive(Debug, Clone)]
pub struct Paginator<'a, T> {
    pages: Vec<&'a [T]>,
}

impl<'a, T> Paginator<'a, T> {
    pub fn new(items: &'a [T], page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(SearchError::invalid("page size must be positive"));
        }
        Ok(Self { pages: items.chunks(page_size).collect() })
    }

    pub fn len(&self) -> usize { self.pages.len() }

    pub fn is_empty(&self) -> bool { self.pages.is_empty() }

    pub fn page(&self, n: usize) -> Option<&'a [T]> { self.pages.get(n).copied() }

    pub fn iter(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        self.pages.iter().copied()
    }
}

impl<'a, T> IntoIterator for Paginator<'a, T> {
    type Item = &'a [T];
    type IntoIter = std::vec::IntoIter<&'a [T]>;

    fn into_iter(self) -> Self::IntoIter { self.pages.into_iter() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_may_be_short() {
        let items = [1, 2, 3, 4, 5];
        let pages = Paginator::new(&items, 2).unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages.page(2), Some(&[5][..]));
        assert_eq!(pages.into_iter().flatten().copied().collect::<Vec<_>>(), items.to_vec());
    }

    #[test]
    fn empty_input_has_no_pages() {
        let items: [u8; 0] = [];
        assert!(Paginator::new(&items, 3).unwrap().is_empty());
        assert!(Paginator::new(&items, 0).is_err());
    }
}
