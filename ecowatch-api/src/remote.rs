use async_trait::async_trait;

use crate::{
    Category, Comment, CommentId, DashboardStats, Error, ModerationAction, NewReport, NewSession,
    Report, ReportId, User,
};

/// The remote side of the reconciliation protocol.
///
/// How requests travel (HTTP, token storage, retries) is the implementor's
/// concern. Every method either returns the server's authoritative payload or
/// a typed [`Error`]; callers are free to retry the same call after a
/// failure.
#[async_trait]
pub trait Remote {
    async fn log_in(&mut self, session: NewSession) -> Result<(), Error>;
    async fn log_out(&mut self) -> Result<(), Error>;
    async fn current_user(&mut self) -> Result<User, Error>;

    async fn fetch_categories(&mut self) -> Result<Vec<Category>, Error>;
    async fn fetch_reports(&mut self) -> Result<Vec<Report>, Error>;
    async fn fetch_report(&mut self, report: ReportId) -> Result<Report, Error>;
    async fn create_report(&mut self, report: NewReport) -> Result<Report, Error>;
    async fn dashboard_stats(&mut self) -> Result<DashboardStats, Error>;

    /// All top-level comments of `report`, newest first, replies attached.
    async fn fetch_comments(&mut self, report: ReportId) -> Result<Vec<Comment>, Error>;
    async fn create_comment(&mut self, report: ReportId, content: String)
        -> Result<Comment, Error>;
    async fn create_reply(&mut self, parent: CommentId, content: String)
        -> Result<Comment, Error>;
    async fn update_comment(&mut self, comment: CommentId, content: String)
        -> Result<Comment, Error>;
    async fn delete_comment(&mut self, comment: CommentId) -> Result<(), Error>;
    async fn toggle_helpful(&mut self, comment: CommentId) -> Result<Comment, Error>;
    async fn moderate_comment(
        &mut self,
        comment: CommentId,
        action: ModerationAction,
    ) -> Result<Comment, Error>;
}
