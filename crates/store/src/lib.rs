//! Record store boundary for the lending tracker.
//!
//! The domain services reach durable storage only through the traits in
//! this crate. Access is transaction-scoped: [`RecordStore::read`] hands
//! out a shared snapshot view, [`RecordStore::write`] an exclusive handle,
//! and every multi-record mutation performed through a single [`WriteTx`]
//! commits as one atomic unit with respect to all other transactions.
//!
//! [`MemoryStore`] is the in-process implementation; a SQL-backed store
//! would satisfy the same traits with row-level locking transactions.

pub mod memory;
pub mod model;

use uuid::Uuid;

use model::{Book, BorrowedBook, Member, NewBook, NewLoan, NewMember};

pub use memory::MemoryStore;

/// Read operations available inside any transaction.
pub trait ReadTx {
    fn book(&self, id: Uuid) -> Option<Book>;
    /// Exact-match lookup on the catalog's natural key.
    fn book_by_title_author(&self, title: &str, author: &str) -> Option<Book>;
    fn member(&self, id: Uuid) -> Option<Member>;
    fn member_exists(&self, id: Uuid) -> bool;
    /// The unique active loan for a (member, book) pair, if any.
    fn loan_for(&self, member_id: Uuid, book_id: Uuid) -> Option<BorrowedBook>;
    /// All active loans in insertion order.
    fn loans(&self) -> Vec<BorrowedBook>;
    /// Active loans held by members with this exact name, in insertion order.
    fn loans_by_member_name(&self, member_name: &str) -> Vec<BorrowedBook>;
    fn loan_count_for_book(&self, book_id: Uuid) -> usize;
    fn loan_count_for_member(&self, member_id: Uuid) -> usize;
}

/// Write operations. A `WriteTx` holds exclusive access to the store for
/// its whole lifetime, so a check-then-mutate sequence against one handle
/// is a single atomic unit.
pub trait WriteTx: ReadTx {
    fn insert_book(&mut self, book: NewBook) -> Book;
    /// Overwrite the row with this book's id. `false` when the row is gone.
    fn update_book(&mut self, book: &Book) -> bool;
    fn delete_book(&mut self, id: Uuid) -> bool;
    fn insert_member(&mut self, member: NewMember) -> Member;
    fn update_member(&mut self, member: &Member) -> bool;
    fn delete_member(&mut self, id: Uuid) -> bool;
    fn insert_loan(&mut self, loan: NewLoan) -> BorrowedBook;
    fn delete_loan(&mut self, id: Uuid) -> bool;
}

/// Storage handle shared by the domain services.
pub trait RecordStore: Send + Sync {
    fn read(&self) -> Box<dyn ReadTx + '_>;
    fn write(&self) -> Box<dyn WriteTx + '_>;
}
