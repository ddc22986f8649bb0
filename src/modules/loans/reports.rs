use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use biblio_store::model::Book;
use biblio_store::RecordStore;

/// Read-only projections over the active-loan rows.
///
/// Stateless: every report is recomputed from the store on each call.
#[derive(Clone)]
pub struct LoanReports {
    store: Arc<dyn RecordStore>,
}

impl LoanReports {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Books currently on loan to members with this exact name, in loan
    /// insertion order; one entry per loan.
    pub fn borrowed_by_member_name(&self, member_name: &str) -> Vec<Book> {
        let tx = self.store.read();
        tx.loans_by_member_name(member_name)
            .into_iter()
            .filter_map(|loan| tx.book(loan.book_id))
            .collect()
    }

    /// Unique titles across all active loans.
    pub fn distinct_borrowed_titles(&self) -> BTreeSet<String> {
        let tx = self.store.read();
        tx.loans()
            .into_iter()
            .filter_map(|loan| tx.book(loan.book_id))
            .map(|book| book.title)
            .collect()
    }

    /// Active-loan count per title, summed across members and editions
    /// sharing the title string.
    pub fn borrowed_title_counts(&self) -> BTreeMap<String, u64> {
        let tx = self.store.read();
        let mut counts = BTreeMap::new();
        for loan in tx.loans() {
            if let Some(book) = tx.book(loan.book_id) {
                *counts.entry(book.title).or_insert(0) += 1;
            }
        }
        counts
    }
}
