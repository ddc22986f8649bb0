use serde::{Deserialize, Serialize};
use time::Date;

/// Request model for registering a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMember {
    pub member_name: String,
    /// Defaults to the current date when omitted.
    #[serde(default)]
    pub membership_date: Option<Date>,
}

/// Request model for a partial profile update; omitted fields keep their
/// stored value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMember {
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub membership_date: Option<Date>,
}
