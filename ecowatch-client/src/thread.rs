use crate::api::{Comment, CommentId, Error, ReportId};

/// In-memory mirror of one report's comment tree.
///
/// Top-level comments are newest-first; replies hang off their parent in
/// insertion order and never nest further. The collection lives in a
/// persistent vector, so cloning the store (or the vector) is an immutable
/// snapshot. Every mutating operation either fully applies or leaves the
/// collection exactly as it was.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommentThread {
    report_id: ReportId,
    comments: im::Vector<Comment>,
}

impl CommentThread {
    pub fn new(report_id: ReportId) -> CommentThread {
        CommentThread {
            report_id,
            comments: im::Vector::new(),
        }
    }

    pub fn report_id(&self) -> ReportId {
        self.report_id
    }

    /// The current ordered snapshot of top-level comments.
    pub fn comments(&self) -> &im::Vector<Comment> {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Looks a comment up at either level. For checks that need to see reply
    /// authors too; the mutations below only ever target the top level.
    pub fn find(&self, id: CommentId) -> Option<&Comment> {
        for c in self.comments.iter() {
            if c.id == id {
                return Some(c);
            }
            if let Some(r) = c.replies.iter().find(|r| r.id == id) {
                return Some(r);
            }
        }
        None
    }

    /// Replaces the whole collection with a server-provided listing. This is
    /// the single refresh point; nothing is merged with prior local state.
    pub fn load(&mut self, comments: Vec<Comment>) {
        self.comments = comments.into_iter().collect();
    }

    /// Prepends a server-confirmed top-level comment. Call order decides the
    /// position, not the comment's timestamp.
    pub fn add_top_level(&mut self, comment: Comment) {
        self.comments.push_front(comment);
    }

    /// Appends a server-confirmed reply to the named top-level comment.
    pub fn add_reply(&mut self, parent: CommentId, reply: Comment) -> Result<(), Error> {
        match self.comments.iter_mut().find(|c| c.id == parent) {
            Some(c) => {
                c.replies.push(reply);
                Ok(())
            }
            None => Err(Error::ParentNotFound(parent)),
        }
    }

    /// Replaces a top-level comment wholesale with the server's updated
    /// version (after an edit, a vote toggle or a moderation action).
    ///
    /// Reply lists are not searched: a reply updated elsewhere only comes
    /// back with the next full [`load`](Self::load).
    pub fn replace(&mut self, id: CommentId, updated: Comment) -> Result<(), Error> {
        match self.comments.iter_mut().find(|c| c.id == id) {
            Some(c) => {
                *c = updated;
                Ok(())
            }
            None => Err(Error::CommentNotFound(id)),
        }
    }

    /// Removes the matching top-level comment along with its replies.
    /// Removing an id that is not present is a no-op.
    pub fn remove(&mut self, id: CommentId) {
        self.comments.retain(|c| c.id != id);
    }
}
