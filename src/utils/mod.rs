//! Request-field validation helpers shared by the HTTP handlers.
//!
//! Field formats are checked at the transport boundary; the domain
//! services assume well-formed values and enforce only existence and
//! quantity invariants themselves.

use serde_json::{json, Value};

/// Author must read "Name Surname": exactly two capitalized, letters-only
/// words.
pub fn validate_author(author: &str) -> Option<Value> {
    let mut words = author.split(' ');
    let valid = matches!(
        (words.next(), words.next(), words.next()),
        (Some(first), Some(last), None)
            if is_capitalized_word(first) && is_capitalized_word(last)
    );
    (!valid).then(|| {
        json!({
            "field": "author",
            "error": "must be in the format 'Name Surname' with capital letters",
        })
    })
}

/// Title must be at least three characters, capitalized, letters only.
pub fn validate_title(title: &str) -> Option<Value> {
    let valid = title.chars().count() >= 3 && is_capitalized_word(title);
    (!valid).then(|| {
        json!({
            "field": "title",
            "error": "must be at least 3 letters, starting with a capital",
        })
    })
}

/// Member name only needs to be non-blank.
pub fn validate_member_name(member_name: &str) -> Option<Value> {
    member_name.trim().is_empty().then(|| {
        json!({
            "field": "member_name",
            "error": "name is required",
        })
    })
}

fn is_capitalized_word(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.is_ascii_uppercase() && chars.all(|c| c.is_ascii_alphabetic()),
        None => false,
    }
}
