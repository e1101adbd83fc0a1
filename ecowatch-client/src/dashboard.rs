use chrono::Utc;

use crate::api::{DashboardStats, Error, Remote, Time};

/// Read-only snapshot of the server-computed dashboard aggregates.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Dashboard {
    stats: DashboardStats,
    refreshed_at: Time,
}

impl Dashboard {
    pub async fn fetch<S: Remote>(server: &mut S) -> Result<Dashboard, Error> {
        let stats = server.dashboard_stats().await?;
        Ok(Dashboard {
            stats,
            refreshed_at: Utc::now(),
        })
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    pub fn refreshed_at(&self) -> Time {
        self.refreshed_at
    }

    /// Replaces the snapshot with a freshly fetched one.
    pub async fn refresh<S: Remote>(&mut self, server: &mut S) -> Result<(), Error> {
        self.stats = server.dashboard_stats().await?;
        self.refreshed_at = Utc::now();
        Ok(())
    }
}
