use uuid::Uuid;

use crate::{CategoryId, Time, UserId, STUB_UUID};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct ReportId(pub Uuid);

impl ReportId {
    pub fn stub() -> ReportId {
        ReportId(STUB_UUID)
    }
}

/// Report status as reported by the server. The upstream enumeration is not
/// consistent across endpoints, so the value is kept opaque.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct Status(pub String);

impl Status {
    pub fn pending() -> Status {
        Status(String::from("pending"))
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Report {
    pub id: ReportId,
    pub reporter_id: UserId,

    pub title: String,
    pub description: String,
    pub location_name: String,
    pub latitude: f64,
    pub longitude: f64,

    pub category: Option<CategoryId>,
    pub status: Status,
    pub severity: Severity,

    /// Non-public reports are only listed for their reporter and for staff.
    pub is_public: bool,

    pub created_at: Time,
    pub updated_at: Time,
    pub resolved_at: Option<Time>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewReport {
    pub title: String,
    pub description: String,
    pub location_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub category: Option<CategoryId>,
    pub severity: Severity,
    pub is_public: bool,
}
