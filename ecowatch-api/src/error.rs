use std::str::FromStr;

use anyhow::{anyhow, Context};
use serde_json::json;
use uuid::Uuid;

use crate::{CommentId, ReportId};

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The remote call itself failed (network, auth backend, unclassified
    /// server error). Carries the server's message when one was available.
    #[error("Remote request failed: {0}")]
    RemoteRequestFailed(String),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Comment text is empty")]
    InvalidContent,

    #[error("Own comments cannot be voted on")]
    SelfVoteRejected,

    #[error("No top-level comment {0:?} to attach the reply to")]
    ParentNotFound(CommentId),

    #[error("No top-level comment {0:?}")]
    CommentNotFound(CommentId),

    #[error("No report {0:?}")]
    ReportNotFound(ReportId),

    #[error("Name already used {0}")]
    NameAlreadyUsed(String),
}

impl Error {
    pub fn status_code(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Error::RemoteRequestFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::PermissionDenied => StatusCode::FORBIDDEN,
            Error::InvalidContent => StatusCode::BAD_REQUEST,
            Error::SelfVoteRejected => StatusCode::BAD_REQUEST,
            Error::ParentNotFound(_) => StatusCode::NOT_FOUND,
            Error::CommentNotFound(_) => StatusCode::NOT_FOUND,
            Error::ReportNotFound(_) => StatusCode::NOT_FOUND,
            Error::NameAlreadyUsed(_) => StatusCode::CONFLICT,
        }
    }

    pub fn contents(&self) -> Vec<u8> {
        serde_json::to_vec(&match self {
            Error::RemoteRequestFailed(msg) => json!({
                "message": msg,
                "type": "remote-failed",
            }),
            Error::PermissionDenied => json!({
                "message": "permission denied",
                "type": "permission-denied",
            }),
            Error::InvalidContent => json!({
                "message": "comment text is empty",
                "type": "invalid-content",
            }),
            Error::SelfVoteRejected => json!({
                "message": "you cannot vote on your own comment",
                "type": "self-vote",
            }),
            Error::ParentNotFound(c) => json!({
                "message": "reply target not found",
                "type": "parent-not-found",
                "comment": c.0,
            }),
            Error::CommentNotFound(c) => json!({
                "message": "comment not found",
                "type": "comment-not-found",
                "comment": c.0,
            }),
            Error::ReportNotFound(r) => json!({
                "message": "report not found",
                "type": "report-not-found",
                "report": r.0,
            }),
            Error::NameAlreadyUsed(n) => json!({
                "message": "name already used",
                "type": "conflict-name",
                "name": n,
            }),
        })
        .expect("serializing error contents")
    }

    pub fn parse(body: &[u8]) -> anyhow::Result<Error> {
        let data: serde_json::Value =
            serde_json::from_slice(body).context("parsing error contents")?;
        let uuid_field = |field: &str| -> anyhow::Result<Uuid> {
            data.get(field)
                .and_then(|id| id.as_str())
                .and_then(|id| Uuid::from_str(id).ok())
                .ok_or_else(|| anyhow!("error is missing a proper {field:?} uuid"))
        };
        Ok(
            match data
                .get("type")
                .and_then(|t| t.as_str())
                .ok_or_else(|| anyhow!("error type is not a string"))?
            {
                "remote-failed" => Error::RemoteRequestFailed(String::from(
                    data.get("message")
                        .and_then(|msg| msg.as_str())
                        .unwrap_or(""),
                )),
                "permission-denied" => Error::PermissionDenied,
                "invalid-content" => Error::InvalidContent,
                "self-vote" => Error::SelfVoteRejected,
                "parent-not-found" => Error::ParentNotFound(CommentId(uuid_field("comment")?)),
                "comment-not-found" => Error::CommentNotFound(CommentId(uuid_field("comment")?)),
                "report-not-found" => Error::ReportNotFound(ReportId(uuid_field("report")?)),
                "conflict-name" => Error::NameAlreadyUsed(String::from(
                    data.get("name")
                        .and_then(|n| n.as_str())
                        .ok_or_else(|| anyhow!("error is a name conflict without a name"))?,
                )),
                _ => return Err(anyhow!("error contents has unknown type")),
            },
        )
    }
}
