use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use biblio_store::model::{Book, NewBook};
use biblio_store::RecordStore;

use super::models::UpdateBook;

/// Why a catalog mutation was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("book not found")]
    NotFound,
    #[error("book has active loans")]
    HasActiveLoans,
}

/// Owns `Book` rows and their stock-count arithmetic.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn RecordStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Insert a new title, or add one copy to the stock of an existing row
    /// with the same exact (title, author) pair instead of creating a
    /// duplicate.
    pub fn upsert(&self, candidate: NewBook) -> Book {
        let mut tx = self.store.write();
        match tx.book_by_title_author(&candidate.title, &candidate.author) {
            Some(mut existing) => {
                existing.amount += 1;
                tx.update_book(&existing);
                existing
            }
            None => tx.insert_book(candidate),
        }
    }

    pub fn get(&self, id: Uuid) -> Option<Book> {
        self.store.read().book(id)
    }

    /// Overwrite title, author and amount wholesale.
    pub fn replace(&self, id: Uuid, details: UpdateBook) -> Option<Book> {
        let mut tx = self.store.write();
        let mut book = tx.book(id)?;
        book.title = details.title;
        book.author = details.author;
        book.amount = details.amount;
        tx.update_book(&book);
        Some(book)
    }

    /// Delete a book that has no active loans. The loan-count check and the
    /// delete share one write transaction, so a concurrent borrow cannot
    /// slip between them.
    pub fn remove(&self, id: Uuid) -> Result<(), CatalogError> {
        let mut tx = self.store.write();
        if tx.book(id).is_none() {
            return Err(CatalogError::NotFound);
        }
        if tx.loan_count_for_book(id) > 0 {
            return Err(CatalogError::HasActiveLoans);
        }
        tx.delete_book(id);
        Ok(())
    }
}
