use crate::{
    api::{
        validate_content, Comment, CommentId, Error, ModerationAction, Remote, ReportId, UserId,
    },
    CommentThread,
};

/// Drives one report's [`CommentThread`] through the confirm-then-apply
/// protocol: every mutation goes to the server first, and the local tree is
/// only ever updated from the server's response. On any error the tree is
/// exactly as it was before the call, so the caller may retry or refresh.
pub struct ThreadManager<S> {
    server: S,
    user: UserId,
    thread: CommentThread,
}

impl<S: Remote> ThreadManager<S> {
    pub fn new(server: S, user: UserId, report: ReportId) -> ThreadManager<S> {
        ThreadManager {
            server,
            user,
            thread: CommentThread::new(report),
        }
    }

    /// Fetches the report's comments and returns a manager holding them.
    pub async fn open(server: S, user: UserId, report: ReportId) -> Result<ThreadManager<S>, Error> {
        let mut this = ThreadManager::new(server, user, report);
        this.refresh().await?;
        Ok(this)
    }

    pub fn thread(&self) -> &CommentThread {
        &self.thread
    }

    pub fn user(&self) -> UserId {
        self.user
    }

    /// Re-fetches the full listing, dropping whatever was held locally.
    pub async fn refresh(&mut self) -> Result<(), Error> {
        let comments = self.server.fetch_comments(self.thread.report_id()).await?;
        self.thread.load(comments);
        Ok(())
    }

    /// Posts a top-level comment and prepends the server's version of it.
    pub async fn post_comment(&mut self, content: &str) -> Result<Comment, Error> {
        let content = validate_content(content)?;
        let comment = self
            .server
            .create_comment(self.thread.report_id(), content)
            .await?;
        self.thread.add_top_level(comment.clone());
        Ok(comment)
    }

    /// Posts a reply to a top-level comment and appends the server's version.
    pub async fn post_reply(&mut self, parent: CommentId, content: &str) -> Result<Comment, Error> {
        let content = validate_content(content)?;
        let reply = self.server.create_reply(parent, content).await?;
        self.thread.add_reply(parent, reply.clone())?;
        Ok(reply)
    }

    /// Edits a comment's text. The server's updated comment (with `edited`
    /// set) replaces the local entry; the locally-entered draft never does.
    pub async fn edit(&mut self, comment: CommentId, content: &str) -> Result<Comment, Error> {
        let content = validate_content(content)?;
        let updated = self.server.update_comment(comment, content).await?;
        self.thread.replace(comment, updated.clone())?;
        Ok(updated)
    }

    /// Deletes a comment; for a top-level comment the replies go with it.
    pub async fn delete(&mut self, comment: CommentId) -> Result<(), Error> {
        self.server.delete_comment(comment).await?;
        self.thread.remove(comment);
        Ok(())
    }

    /// Toggles the acting user's helpful vote. Votes on own comments are
    /// rejected before any request is made; the server's comment object is
    /// the only thing that ever changes the local vote set.
    pub async fn toggle_helpful(&mut self, comment: CommentId) -> Result<Comment, Error> {
        let target = self
            .thread
            .find(comment)
            .ok_or(Error::CommentNotFound(comment))?;
        if !target.can_vote(self.user) {
            return Err(Error::SelfVoteRejected);
        }
        let updated = self.server.toggle_helpful(comment).await?;
        self.thread.replace(comment, updated.clone())?;
        Ok(updated)
    }

    /// Staff only: hides or shows a comment.
    pub async fn moderate(
        &mut self,
        comment: CommentId,
        action: ModerationAction,
    ) -> Result<Comment, Error> {
        let updated = self.server.moderate_comment(comment, action).await?;
        self.thread.replace(comment, updated.clone())?;
        Ok(updated)
    }
}
