use std::sync::Arc;

use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use biblio_store::model::{BorrowedBook, NewLoan};
use biblio_store::RecordStore;

/// Why a borrow or return was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LendingError {
    #[error("member not found")]
    MemberNotFound,
    #[error("book not found")]
    BookNotFound,
    #[error("book already on loan to this member")]
    AlreadyBorrowed,
    #[error("borrow limit exceeded")]
    LimitExceeded,
    #[error("no copies available")]
    NoCopiesAvailable,
    #[error("no active loan for this member and book")]
    LoanNotFound,
}

/// Orchestrates borrow/return transactions over the record store.
///
/// The borrow limit is injected at construction so tests can override it
/// per instance.
#[derive(Clone)]
pub struct LendingEngine {
    store: Arc<dyn RecordStore>,
    borrow_limit: u32,
}

impl LendingEngine {
    pub fn new(store: Arc<dyn RecordStore>, borrow_limit: u32) -> Self {
        Self {
            store,
            borrow_limit,
        }
    }

    /// Lend one copy of `book_id` to `member_id`.
    ///
    /// Preconditions are checked in order and short-circuit on the first
    /// failure; the stock decrement and the loan insert commit inside the
    /// same write transaction, so concurrent borrows of the last copy
    /// serialize and exactly one succeeds.
    pub fn borrow(&self, member_id: Uuid, book_id: Uuid) -> Result<BorrowedBook, LendingError> {
        let mut tx = self.store.write();

        if !tx.member_exists(member_id) {
            return Err(LendingError::MemberNotFound);
        }
        let Some(mut book) = tx.book(book_id) else {
            return Err(LendingError::BookNotFound);
        };
        // One active loan per (member, book) pair; return resolves by the
        // unique matching row.
        if tx.loan_for(member_id, book_id).is_some() {
            return Err(LendingError::AlreadyBorrowed);
        }
        if tx.loan_count_for_member(member_id) as u32 >= self.borrow_limit {
            return Err(LendingError::LimitExceeded);
        }
        if book.amount == 0 {
            return Err(LendingError::NoCopiesAvailable);
        }

        book.amount -= 1;
        tx.update_book(&book);

        Ok(tx.insert_loan(NewLoan {
            book_id,
            member_id,
            borrowed_date: OffsetDateTime::now_utc().date(),
        }))
    }

    /// Resolve the active loan for the pair and put the copy back on the
    /// shelf. Stock increment and row deletion commit as one unit.
    pub fn return_book(&self, member_id: Uuid, book_id: Uuid) -> Result<(), LendingError> {
        let mut tx = self.store.write();

        let Some(loan) = tx.loan_for(member_id, book_id) else {
            return Err(LendingError::LoanNotFound);
        };

        if let Some(mut book) = tx.book(loan.book_id) {
            book.amount += 1;
            tx.update_book(&book);
        }
        tx.delete_loan(loan.id);

        Ok(())
    }
}
