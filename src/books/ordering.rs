//! Catalog ordering for books.
//!
//! Directory listings come back in whatever order the filesystem likes, but the catalog and the
//! reference index should be identical from one run to the next. Books are therefore sorted:
//! 1. books with an explicit `order` in their metadata, ascending
//! 2. books without one
//!
//! with the directory name breaking every tie. Directory names are unique inside the books root,
//! so this is a total order.

use super::Book;
use std::cmp::Ordering;

/// Compare two books by catalog position.
pub fn compare_books(a: &Book, b: &Book) -> Ordering {
    match (a.meta.order(), b.meta.order()) {
        (Some(a_order), Some(b_order)) => a_order.cmp(&b_order),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.name.cmp(&b.name))
}

/// Sort books into catalog order.
pub fn sort_books(books: &mut [Book]) {
    books.sort_by(compare_books);
}
