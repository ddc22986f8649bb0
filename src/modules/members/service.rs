use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use biblio_store::model::{Member, NewMember};
use biblio_store::RecordStore;

use super::models::UpdateMember;

/// Why a registry mutation was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemberError {
    #[error("member not found")]
    NotFound,
    #[error("member has active loans")]
    HasActiveLoans,
}

/// Owns `Member` rows.
#[derive(Clone)]
pub struct MemberRegistry {
    store: Arc<dyn RecordStore>,
}

impl MemberRegistry {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn create(&self, member: NewMember) -> Member {
        self.store.write().insert_member(member)
    }

    pub fn get(&self, id: Uuid) -> Option<Member> {
        self.store.read().member(id)
    }

    /// Fetch the current row, apply only the provided fields, persist the
    /// merged value.
    pub fn update(&self, id: Uuid, details: UpdateMember) -> Option<Member> {
        let mut tx = self.store.write();
        let mut member = tx.member(id)?;
        if let Some(name) = details.member_name {
            member.member_name = name;
        }
        if let Some(date) = details.membership_date {
            member.membership_date = date;
        }
        tx.update_member(&member);
        Some(member)
    }

    /// Delete a member who holds no books. The loan-count check and the
    /// delete share one write transaction, so a concurrent borrow cannot
    /// slip between them.
    pub fn remove(&self, id: Uuid) -> Result<(), MemberError> {
        let mut tx = self.store.write();
        if !tx.member_exists(id) {
            return Err(MemberError::NotFound);
        }
        if tx.loan_count_for_member(id) > 0 {
            return Err(MemberError::HasActiveLoans);
        }
        tx.delete_member(id);
        Ok(())
    }
}
