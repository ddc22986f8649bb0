//! In-memory record store.
//!
//! Backs the store traits with a single `RwLock` over the three tables. A
//! write transaction owns the write guard until it is dropped, which
//! serializes every multi-record mutation against all concurrent readers
//! and writers; intermediate state is never observable outside the
//! transaction that produced it.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use time::OffsetDateTime;
use uuid::Uuid;

use crate::model::{Book, BorrowedBook, Member, NewBook, NewLoan, NewMember};
use crate::{ReadTx, RecordStore, WriteTx};

#[derive(Debug, Default)]
struct Tables {
    books: HashMap<Uuid, Book>,
    members: HashMap<Uuid, Member>,
    // Insertion order here is the natural order the reporting queries expose.
    loans: Vec<BorrowedBook>,
}

impl Tables {
    fn book(&self, id: Uuid) -> Option<Book> {
        self.books.get(&id).cloned()
    }

    fn book_by_title_author(&self, title: &str, author: &str) -> Option<Book> {
        self.books
            .values()
            .find(|book| book.title == title && book.author == author)
            .cloned()
    }

    fn member(&self, id: Uuid) -> Option<Member> {
        self.members.get(&id).cloned()
    }

    fn loan_for(&self, member_id: Uuid, book_id: Uuid) -> Option<BorrowedBook> {
        self.loans
            .iter()
            .find(|loan| loan.member_id == member_id && loan.book_id == book_id)
            .cloned()
    }

    fn loans_by_member_name(&self, member_name: &str) -> Vec<BorrowedBook> {
        let holders: Vec<Uuid> = self
            .members
            .values()
            .filter(|member| member.member_name == member_name)
            .map(|member| member.id)
            .collect();
        self.loans
            .iter()
            .filter(|loan| holders.contains(&loan.member_id))
            .cloned()
            .collect()
    }
}

/// Shared-memory implementation of [`RecordStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn read(&self) -> Box<dyn ReadTx + '_> {
        let guard = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        Box::new(ReadGuard { tables: guard })
    }

    fn write(&self) -> Box<dyn WriteTx + '_> {
        let guard = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        Box::new(WriteGuard { tables: guard })
    }
}

struct ReadGuard<'a> {
    tables: RwLockReadGuard<'a, Tables>,
}

struct WriteGuard<'a> {
    tables: RwLockWriteGuard<'a, Tables>,
}

macro_rules! impl_read_tx {
    ($guard:ident) => {
        impl ReadTx for $guard<'_> {
            fn book(&self, id: Uuid) -> Option<Book> {
                self.tables.book(id)
            }

            fn book_by_title_author(&self, title: &str, author: &str) -> Option<Book> {
                self.tables.book_by_title_author(title, author)
            }

            fn member(&self, id: Uuid) -> Option<Member> {
                self.tables.member(id)
            }

            fn member_exists(&self, id: Uuid) -> bool {
                self.tables.members.contains_key(&id)
            }

            fn loan_for(&self, member_id: Uuid, book_id: Uuid) -> Option<BorrowedBook> {
                self.tables.loan_for(member_id, book_id)
            }

            fn loans(&self) -> Vec<BorrowedBook> {
                self.tables.loans.clone()
            }

            fn loans_by_member_name(&self, member_name: &str) -> Vec<BorrowedBook> {
                self.tables.loans_by_member_name(member_name)
            }

            fn loan_count_for_book(&self, book_id: Uuid) -> usize {
                self.tables
                    .loans
                    .iter()
                    .filter(|loan| loan.book_id == book_id)
                    .count()
            }

            fn loan_count_for_member(&self, member_id: Uuid) -> usize {
                self.tables
                    .loans
                    .iter()
                    .filter(|loan| loan.member_id == member_id)
                    .count()
            }
        }
    };
}

impl_read_tx!(ReadGuard);
impl_read_tx!(WriteGuard);

impl WriteTx for WriteGuard<'_> {
    fn insert_book(&mut self, book: NewBook) -> Book {
        let book = Book {
            id: Uuid::now_v7(),
            title: book.title,
            author: book.author,
            amount: book.amount,
        };
        self.tables.books.insert(book.id, book.clone());
        book
    }

    fn update_book(&mut self, book: &Book) -> bool {
        match self.tables.books.get_mut(&book.id) {
            Some(row) => {
                *row = book.clone();
                true
            }
            None => false,
        }
    }

    fn delete_book(&mut self, id: Uuid) -> bool {
        self.tables.books.remove(&id).is_some()
    }

    fn insert_member(&mut self, member: NewMember) -> Member {
        let member = Member {
            id: Uuid::now_v7(),
            member_name: member.member_name,
            membership_date: member
                .membership_date
                .unwrap_or_else(|| OffsetDateTime::now_utc().date()),
        };
        self.tables.members.insert(member.id, member.clone());
        member
    }

    fn update_member(&mut self, member: &Member) -> bool {
        match self.tables.members.get_mut(&member.id) {
            Some(row) => {
                *row = member.clone();
                true
            }
            None => false,
        }
    }

    fn delete_member(&mut self, id: Uuid) -> bool {
        self.tables.members.remove(&id).is_some()
    }

    fn insert_loan(&mut self, loan: NewLoan) -> BorrowedBook {
        let loan = BorrowedBook {
            id: Uuid::now_v7(),
            book_id: loan.book_id,
            member_id: loan.member_id,
            borrowed_date: loan.borrowed_date,
        };
        self.tables.loans.push(loan.clone());
        loan
    }

    fn delete_loan(&mut self, id: Uuid) -> bool {
        let before = self.tables.loans.len();
        self.tables.loans.retain(|loan| loan.id != id);
        self.tables.loans.len() < before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn seed_book(store: &MemoryStore, title: &str, author: &str, amount: u64) -> Book {
        store.write().insert_book(NewBook {
            title: title.to_string(),
            author: author.to_string(),
            amount,
        })
    }

    fn seed_member(store: &MemoryStore, name: &str) -> Member {
        store.write().insert_member(NewMember {
            member_name: name.to_string(),
            membership_date: Some(date!(2024-01-15)),
        })
    }

    fn seed_loan(store: &MemoryStore, member: &Member, book: &Book) -> BorrowedBook {
        store.write().insert_loan(NewLoan {
            book_id: book.id,
            member_id: member.id,
            borrowed_date: date!(2024-02-01),
        })
    }

    #[test]
    fn insert_and_fetch_book() {
        let store = MemoryStore::new();
        let book = seed_book(&store, "Dune", "Frank Herbert", 3);

        assert_eq!(store.read().book(book.id), Some(book));
    }

    #[test]
    fn title_author_lookup_is_exact() {
        let store = MemoryStore::new();
        let book = seed_book(&store, "Dune", "Frank Herbert", 1);

        let tx = store.read();
        assert_eq!(tx.book_by_title_author("Dune", "Frank Herbert"), Some(book));
        assert_eq!(tx.book_by_title_author("Dune", "Brian Herbert"), None);
        assert_eq!(tx.book_by_title_author("dune", "Frank Herbert"), None);
    }

    #[test]
    fn update_book_reports_missing_row() {
        let store = MemoryStore::new();
        let mut book = seed_book(&store, "Dune", "Frank Herbert", 1);
        book.amount = 7;

        assert!(store.write().update_book(&book));
        assert_eq!(store.read().book(book.id).map(|b| b.amount), Some(7));

        let mut tx = store.write();
        tx.delete_book(book.id);
        assert!(!tx.update_book(&book));
    }

    #[test]
    fn member_default_membership_date_is_today() {
        let store = MemoryStore::new();
        let member = store.write().insert_member(NewMember {
            member_name: "John Doe".to_string(),
            membership_date: None,
        });

        assert_eq!(member.membership_date, OffsetDateTime::now_utc().date());
        assert!(store.read().member_exists(member.id));
    }

    #[test]
    fn loan_queries_resolve_pair_and_counts() {
        let store = MemoryStore::new();
        let dune = seed_book(&store, "Dune", "Frank Herbert", 2);
        let foundation = seed_book(&store, "Foundation", "Isaac Asimov", 1);
        let john = seed_member(&store, "John Doe");
        let jane = seed_member(&store, "Jane Doe");

        seed_loan(&store, &john, &dune);
        seed_loan(&store, &jane, &dune);
        seed_loan(&store, &john, &foundation);

        let tx = store.read();
        assert!(tx.loan_for(john.id, dune.id).is_some());
        assert!(tx.loan_for(jane.id, foundation.id).is_none());
        assert_eq!(tx.loan_count_for_book(dune.id), 2);
        assert_eq!(tx.loan_count_for_member(john.id), 2);
        assert_eq!(tx.loan_count_for_member(jane.id), 1);
    }

    #[test]
    fn loans_by_member_name_joins_through_members() {
        let store = MemoryStore::new();
        let dune = seed_book(&store, "Dune", "Frank Herbert", 2);
        let foundation = seed_book(&store, "Foundation", "Isaac Asimov", 1);
        let john = seed_member(&store, "John Doe");
        let jane = seed_member(&store, "Jane Doe");

        let first = seed_loan(&store, &john, &dune);
        seed_loan(&store, &jane, &dune);
        let second = seed_loan(&store, &john, &foundation);

        let loans = store.read().loans_by_member_name("John Doe");
        assert_eq!(loans, vec![first, second]);
        assert!(store.read().loans_by_member_name("Nobody").is_empty());
    }

    #[test]
    fn loans_keep_insertion_order() {
        let store = MemoryStore::new();
        let dune = seed_book(&store, "Dune", "Frank Herbert", 3);
        let john = seed_member(&store, "John Doe");
        let jane = seed_member(&store, "Jane Doe");

        let ids: Vec<Uuid> = [&john, &jane, &john]
            .into_iter()
            .map(|member| seed_loan(&store, member, &dune).id)
            .collect();

        let listed: Vec<Uuid> = store.read().loans().into_iter().map(|l| l.id).collect();
        assert_eq!(listed, ids);
    }

    #[test]
    fn delete_loan_removes_only_that_row() {
        let store = MemoryStore::new();
        let dune = seed_book(&store, "Dune", "Frank Herbert", 2);
        let john = seed_member(&store, "John Doe");
        let jane = seed_member(&store, "Jane Doe");

        let kept = seed_loan(&store, &john, &dune);
        let gone = seed_loan(&store, &jane, &dune);

        assert!(store.write().delete_loan(gone.id));
        assert!(!store.write().delete_loan(gone.id));
        assert_eq!(store.read().loans(), vec![kept]);
    }
}
