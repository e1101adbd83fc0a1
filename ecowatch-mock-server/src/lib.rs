use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use ecowatch_api::{
    validate_content, AuthToken, Category, CategoryCount, CategoryId, Comment, CommentId,
    DashboardStats, Error, ModerationAction, NewReport, NewSession, Remote, Report, ReportId,
    Severity, SeverityCount, Status, User, UserId, Uuid,
};

/// In-memory stand-in for the reports service, enforcing the same rules the
/// real backend does. Tests drive the actual client code against it through
/// [`MockClient`] handles.
pub struct MockServer {
    users: BTreeMap<UserId, DbUser>,
    sessions: HashMap<AuthToken, UserId>,
    categories: BTreeMap<CategoryId, Category>,
    reports: BTreeMap<ReportId, Report>,
    comments: BTreeMap<CommentId, DbComment>,

    /// Monotonic insertion counter, so comment ordering stays stable even
    /// when timestamps collide.
    next_seq: u64,
}

#[derive(Debug)]
struct DbUser {
    user: User,
    // the mock only ever holds test data, passwords stay in the clear
    password: String,
}

/// One comment row. The tree shape is assembled at fetch time from the
/// parent pointers; `comment.replies` stays empty in storage.
#[derive(Clone, Debug)]
struct DbComment {
    report_id: ReportId,
    parent_id: Option<CommentId>,
    seq: u64,
    comment: Comment,
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer {
            users: BTreeMap::new(),
            sessions: HashMap::new(),
            categories: BTreeMap::new(),
            reports: BTreeMap::new(),
            comments: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Wraps the server for sharing between several [`MockClient`]s.
    pub fn shared(self) -> Arc<Mutex<MockServer>> {
        Arc::new(Mutex::new(self))
    }

    pub fn admin_create_user(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
        is_staff: bool,
    ) -> Result<UserId, Error> {
        if self
            .users
            .values()
            .any(|u| u.user.username == username || u.user.email == email)
        {
            return Err(Error::NameAlreadyUsed(username.to_string()));
        }
        let id = UserId(Uuid::new_v4());
        self.users.insert(
            id,
            DbUser {
                user: User {
                    id,
                    username: username.to_string(),
                    email: email.to_string(),
                    is_staff,
                },
                password: password.to_string(),
            },
        );
        Ok(id)
    }

    pub fn admin_create_category(&mut self, name: &str, color: &str) -> CategoryId {
        let id = CategoryId(Uuid::new_v4());
        self.categories.insert(
            id,
            Category {
                id,
                name: name.to_string(),
                color: color.to_string(),
            },
        );
        id
    }

    fn auth(&mut self, session: &NewSession) -> Result<AuthToken, Error> {
        for u in self.users.values() {
            if u.user.email == session.email {
                if u.password != session.password {
                    return Err(Error::PermissionDenied);
                }
                let tok = AuthToken(Uuid::new_v4());
                self.sessions.insert(tok, u.user.id);
                return Ok(tok);
            }
        }
        Err(Error::PermissionDenied)
    }

    fn unauth(&mut self, tok: Option<AuthToken>) -> Result<(), Error> {
        let tok = tok.ok_or(Error::PermissionDenied)?;
        match self.sessions.remove(&tok) {
            Some(_) => Ok(()),
            None => Err(Error::PermissionDenied),
        }
    }

    fn resolve(&self, tok: Option<AuthToken>) -> Result<User, Error> {
        let tok = tok.ok_or(Error::PermissionDenied)?;
        let uid = self.sessions.get(&tok).ok_or(Error::PermissionDenied)?;
        let u = self.users.get(uid).ok_or(Error::PermissionDenied)?;
        Ok(u.user.clone())
    }

    fn whoami(&self, tok: Option<AuthToken>) -> Result<User, Error> {
        self.resolve(tok)
    }

    fn fetch_categories(&self, tok: Option<AuthToken>) -> Result<Vec<Category>, Error> {
        self.resolve(tok)?;
        Ok(self.categories.values().cloned().collect())
    }

    fn fetch_reports(&self, tok: Option<AuthToken>) -> Result<Vec<Report>, Error> {
        let user = self.resolve(tok)?;
        let mut reports: Vec<Report> = self
            .reports
            .values()
            .filter(|r| r.is_public || r.reporter_id == user.id || user.is_staff)
            .cloned()
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }

    fn fetch_report(&self, tok: Option<AuthToken>, report: ReportId) -> Result<Report, Error> {
        let user = self.resolve(tok)?;
        let r = self
            .reports
            .get(&report)
            .ok_or(Error::ReportNotFound(report))?;
        if !r.is_public && r.reporter_id != user.id && !user.is_staff {
            // non-public reports are invisible, not forbidden
            return Err(Error::ReportNotFound(report));
        }
        Ok(r.clone())
    }

    fn create_report(&mut self, tok: Option<AuthToken>, new: NewReport) -> Result<Report, Error> {
        let user = self.resolve(tok)?;
        let now = Utc::now();
        let report = Report {
            id: ReportId(Uuid::new_v4()),
            reporter_id: user.id,
            title: new.title,
            description: new.description,
            location_name: new.location_name,
            latitude: new.latitude,
            longitude: new.longitude,
            category: new.category,
            status: Status::pending(),
            severity: new.severity,
            is_public: new.is_public,
            created_at: now,
            updated_at: now,
            resolved_at: None,
        };
        self.reports.insert(report.id, report.clone());
        Ok(report)
    }

    fn dashboard_stats(&self, tok: Option<AuthToken>) -> Result<DashboardStats, Error> {
        let user = self.resolve(tok)?;
        let thirty_days_ago = Utc::now() - Duration::days(30);
        let reports_by_category = self
            .categories
            .values()
            .map(|c| CategoryCount {
                name: c.name.clone(),
                count: self
                    .reports
                    .values()
                    .filter(|r| r.category == Some(c.id))
                    .count() as u64,
            })
            .collect();
        let reports_by_severity = [
            Severity::Low,
            Severity::Medium,
            Severity::High,
            Severity::Critical,
        ]
        .into_iter()
        .map(|severity| SeverityCount {
            severity,
            count: self
                .reports
                .values()
                .filter(|r| r.severity == severity)
                .count() as u64,
        })
        .filter(|c| c.count > 0)
        .collect();
        Ok(DashboardStats {
            total_reports: self.reports.len() as u64,
            recent_reports: self
                .reports
                .values()
                .filter(|r| r.created_at >= thirty_days_ago)
                .count() as u64,
            reports_by_category,
            reports_by_severity,
            user_reports: self
                .reports
                .values()
                .filter(|r| r.reporter_id == user.id)
                .count() as u64,
        })
    }

    /// Replies of `parent`, insertion order, newest last.
    fn replies_of(&self, parent: CommentId) -> Vec<Comment> {
        let mut replies: Vec<&DbComment> = self
            .comments
            .values()
            .filter(|c| c.parent_id == Some(parent))
            .collect();
        replies.sort_by_key(|c| c.seq);
        replies.into_iter().map(|c| c.comment.clone()).collect()
    }

    fn view(&self, row: &DbComment) -> Comment {
        let mut view = row.comment.clone();
        if row.parent_id.is_none() {
            view.replies = self.replies_of(view.id);
        }
        view
    }

    fn fetch_comments(
        &self,
        tok: Option<AuthToken>,
        report: ReportId,
    ) -> Result<Vec<Comment>, Error> {
        self.resolve(tok)?;
        if !self.reports.contains_key(&report) {
            return Err(Error::ReportNotFound(report));
        }
        let mut top_level: Vec<&DbComment> = self
            .comments
            .values()
            .filter(|c| c.report_id == report && c.parent_id.is_none())
            .collect();
        top_level.sort_by(|a, b| b.seq.cmp(&a.seq));
        Ok(top_level.into_iter().map(|c| self.view(c)).collect())
    }

    fn insert_comment(
        &mut self,
        report_id: ReportId,
        parent_id: Option<CommentId>,
        author: &User,
        content: String,
    ) -> Comment {
        let now = Utc::now();
        let comment = Comment {
            id: CommentId(Uuid::new_v4()),
            author_id: author.id,
            content,
            created_at: now,
            updated_at: now,
            edited: false,
            is_staff_response: author.is_staff,
            is_hidden: false,
            helpful_voters: HashSet::new(),
            replies: Vec::new(),
        };
        let seq = self.next_seq;
        self.next_seq += 1;
        self.comments.insert(
            comment.id,
            DbComment {
                report_id,
                parent_id,
                seq,
                comment: comment.clone(),
            },
        );
        comment
    }

    fn create_comment(
        &mut self,
        tok: Option<AuthToken>,
        report: ReportId,
        content: String,
    ) -> Result<Comment, Error> {
        let user = self.resolve(tok)?;
        let content = validate_content(&content)?;
        if !self.reports.contains_key(&report) {
            return Err(Error::ReportNotFound(report));
        }
        Ok(self.insert_comment(report, None, &user, content))
    }

    fn create_reply(
        &mut self,
        tok: Option<AuthToken>,
        parent: CommentId,
        content: String,
    ) -> Result<Comment, Error> {
        let user = self.resolve(tok)?;
        let content = validate_content(&content)?;
        let row = self
            .comments
            .get(&parent)
            .ok_or(Error::ParentNotFound(parent))?;
        if row.parent_id.is_some() {
            // only top-level comments accept replies
            return Err(Error::ParentNotFound(parent));
        }
        let report_id = row.report_id;
        Ok(self.insert_comment(report_id, Some(parent), &user, content))
    }

    fn update_comment(
        &mut self,
        tok: Option<AuthToken>,
        comment: CommentId,
        content: String,
    ) -> Result<Comment, Error> {
        let user = self.resolve(tok)?;
        let content = validate_content(&content)?;
        let row = self
            .comments
            .get_mut(&comment)
            .ok_or(Error::CommentNotFound(comment))?;
        if row.comment.author_id != user.id && !user.is_staff {
            return Err(Error::PermissionDenied);
        }
        row.comment.content = content;
        row.comment.edited = true;
        row.comment.updated_at = Utc::now();
        let row = self
            .comments
            .get(&comment)
            .ok_or(Error::CommentNotFound(comment))?;
        Ok(self.view(row))
    }

    fn delete_comment(&mut self, tok: Option<AuthToken>, comment: CommentId) -> Result<(), Error> {
        let user = self.resolve(tok)?;
        let row = self
            .comments
            .get(&comment)
            .ok_or(Error::CommentNotFound(comment))?;
        if row.comment.author_id != user.id && !user.is_staff {
            return Err(Error::PermissionDenied);
        }
        self.comments
            .retain(|id, c| *id != comment && c.parent_id != Some(comment));
        Ok(())
    }

    fn toggle_helpful(
        &mut self,
        tok: Option<AuthToken>,
        comment: CommentId,
    ) -> Result<Comment, Error> {
        let user = self.resolve(tok)?;
        let row = self
            .comments
            .get_mut(&comment)
            .ok_or(Error::CommentNotFound(comment))?;
        if row.comment.author_id == user.id {
            return Err(Error::SelfVoteRejected);
        }
        if !row.comment.helpful_voters.remove(&user.id) {
            row.comment.helpful_voters.insert(user.id);
        }
        let row = self
            .comments
            .get(&comment)
            .ok_or(Error::CommentNotFound(comment))?;
        Ok(self.view(row))
    }

    fn moderate_comment(
        &mut self,
        tok: Option<AuthToken>,
        comment: CommentId,
        action: ModerationAction,
    ) -> Result<Comment, Error> {
        let user = self.resolve(tok)?;
        if !user.is_staff {
            return Err(Error::PermissionDenied);
        }
        let row = self
            .comments
            .get_mut(&comment)
            .ok_or(Error::CommentNotFound(comment))?;
        row.comment.is_hidden = match action {
            ModerationAction::Hide => true,
            ModerationAction::Show => false,
        };
        let row = self
            .comments
            .get(&comment)
            .ok_or(Error::CommentNotFound(comment))?;
        Ok(self.view(row))
    }
}

/// A per-session handle onto a shared [`MockServer`]: the test double for an
/// HTTP client holding a bearer token. Cloning yields another handle with
/// the same (or no) session, so several authenticated clients can target the
/// same server state.
#[derive(Clone)]
pub struct MockClient {
    server: Arc<Mutex<MockServer>>,
    token: Option<AuthToken>,
}

impl MockClient {
    pub fn new(server: Arc<Mutex<MockServer>>) -> MockClient {
        MockClient {
            server,
            token: None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockServer> {
        self.server.lock().expect("mock server lock poisoned")
    }
}

#[async_trait]
impl Remote for MockClient {
    async fn log_in(&mut self, session: NewSession) -> Result<(), Error> {
        let tok = self.lock().auth(&session)?;
        self.token = Some(tok);
        Ok(())
    }

    async fn log_out(&mut self) -> Result<(), Error> {
        let tok = self.token.take();
        self.lock().unauth(tok)
    }

    async fn current_user(&mut self) -> Result<User, Error> {
        self.lock().whoami(self.token)
    }

    async fn fetch_categories(&mut self) -> Result<Vec<Category>, Error> {
        self.lock().fetch_categories(self.token)
    }

    async fn fetch_reports(&mut self) -> Result<Vec<Report>, Error> {
        self.lock().fetch_reports(self.token)
    }

    async fn fetch_report(&mut self, report: ReportId) -> Result<Report, Error> {
        self.lock().fetch_report(self.token, report)
    }

    async fn create_report(&mut self, report: NewReport) -> Result<Report, Error> {
        self.lock().create_report(self.token, report)
    }

    async fn dashboard_stats(&mut self) -> Result<DashboardStats, Error> {
        self.lock().dashboard_stats(self.token)
    }

    async fn fetch_comments(&mut self, report: ReportId) -> Result<Vec<Comment>, Error> {
        self.lock().fetch_comments(self.token, report)
    }

    async fn create_comment(
        &mut self,
        report: ReportId,
        content: String,
    ) -> Result<Comment, Error> {
        self.lock().create_comment(self.token, report, content)
    }

    async fn create_reply(
        &mut self,
        parent: CommentId,
        content: String,
    ) -> Result<Comment, Error> {
        self.lock().create_reply(self.token, parent, content)
    }

    async fn update_comment(
        &mut self,
        comment: CommentId,
        content: String,
    ) -> Result<Comment, Error> {
        self.lock().update_comment(self.token, comment, content)
    }

    async fn delete_comment(&mut self, comment: CommentId) -> Result<(), Error> {
        self.lock().delete_comment(self.token, comment)
    }

    async fn toggle_helpful(&mut self, comment: CommentId) -> Result<Comment, Error> {
        self.lock().toggle_helpful(self.token, comment)
    }

    async fn moderate_comment(
        &mut self,
        comment: CommentId,
        action: ModerationAction,
    ) -> Result<Comment, Error> {
        self.lock().moderate_comment(self.token, comment, action)
    }
}
