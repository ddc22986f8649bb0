use serde::Deserialize;

/// Query parameters for the borrowed-by-member-name report.
#[derive(Debug, Deserialize)]
pub struct MemberNameQuery {
    pub name: String,
}
