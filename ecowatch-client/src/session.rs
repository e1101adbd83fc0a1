use crate::api::{Error, NewSession, Remote, User, UserId};

/// Authenticated-user context: created at login, refreshed on demand, torn
/// down on logout.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    user: User,
}

impl Session {
    /// Logs in and fetches the authenticated user.
    pub async fn open<S: Remote>(server: &mut S, session: NewSession) -> Result<Session, Error> {
        server.log_in(session).await?;
        let user = server.current_user().await?;
        Ok(Session { user })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn user_id(&self) -> UserId {
        self.user.id
    }

    pub fn is_staff(&self) -> bool {
        self.user.is_staff
    }

    /// Re-fetches the current user (e.g. after a staff flag change).
    pub async fn refresh<S: Remote>(&mut self, server: &mut S) -> Result<(), Error> {
        self.user = server.current_user().await?;
        Ok(())
    }

    /// Logs out. The local session is torn down either way, so remote
    /// failures are logged rather than propagated.
    pub async fn close<S: Remote>(self, server: &mut S) {
        if let Err(e) = server.log_out().await {
            tracing::error!("failed to log out: {:?}", e);
        }
    }
}
