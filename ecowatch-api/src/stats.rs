use crate::Severity;

/// Aggregate statistics, computed server-side. The client only ever displays
/// these; refreshing fetches a whole new value.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DashboardStats {
    pub total_reports: u64,

    /// Reports created in the last 30 days.
    pub recent_reports: u64,

    /// One entry per category, zero counts included.
    pub reports_by_category: Vec<CategoryCount>,

    /// One entry per severity with at least one report.
    pub reports_by_severity: Vec<SeverityCount>,

    /// Reports filed by the requesting user.
    pub user_reports: u64,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: u64,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct SeverityCount {
    pub severity: Severity,
    pub count: u64,
}
