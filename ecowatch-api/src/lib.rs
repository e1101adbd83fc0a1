mod auth;
mod category;
mod comment;
mod error;
mod remote;
mod report;
mod stats;
mod user;

pub use auth::{AuthToken, NewSession};
pub use category::{Category, CategoryId};
pub use comment::{Comment, CommentId, ModerationAction};
pub use error::Error;
pub use remote::Remote;
pub use report::{NewReport, Report, ReportId, Severity, Status};
pub use stats::{CategoryCount, DashboardStats, SeverityCount};
pub use user::{User, UserId};

pub use uuid::{uuid, Uuid};
pub type Time = chrono::DateTime<chrono::Utc>;

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

/// Returns the trimmed comment text, or `InvalidContent` if nothing remains
/// after trimming. Runs before any request leaves the client.
pub fn validate_content(text: &str) -> Result<String, Error> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidContent);
    }
    Ok(trimmed.to_string())
}
