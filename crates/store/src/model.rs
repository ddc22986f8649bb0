use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

/// A catalog entry together with its stock of loanable copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    /// Copies currently on the shelf. Borrowing decrements, returning
    /// increments; the count cannot go negative.
    pub amount: u64,
}

/// Payload for inserting a book row; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub amount: u64,
}

/// A registered library member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub member_name: String,
    pub membership_date: Date,
}

/// Payload for inserting a member row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMember {
    pub member_name: String,
    /// Defaults to the current UTC date when omitted.
    pub membership_date: Option<Date>,
}

/// One active loan: the association between a member and a book. A row
/// exists only while the loan is open; returning the book deletes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowedBook {
    pub id: Uuid,
    pub book_id: Uuid,
    pub member_id: Uuid,
    pub borrowed_date: Date,
}

/// Payload for inserting a loan row.
#[derive(Debug, Clone)]
pub struct NewLoan {
    pub book_id: Uuid,
    pub member_id: Uuid,
    pub borrowed_date: Date,
}
