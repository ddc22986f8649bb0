use serde::{Deserialize, Serialize};

/// Request model for adding a book (or another copy of an existing one).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    /// Initial stock when the (title, author) pair is new.
    pub amount: u64,
}

/// Request model for replacing a book's details wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBook {
    pub title: String,
    pub author: String,
    pub amount: u64,
}
