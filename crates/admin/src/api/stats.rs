//! Dashboard statistics.

use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat, Utc};
use leafpress_core::DashboardStats;
use tracing::instrument;

use super::types::StatsResponse;
use super::{ApiClient, ApiError};

impl ApiClient {
    /// Fetch dashboard statistics, optionally restricted to a date range.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn get_dashboard_stats(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<DashboardStats, ApiError> {
        let mut path = "/admin/stats".to_string();
        let mut sep = '?';

        if let Some(start) = start {
            let _ = write!(
                path,
                "{sep}startDate={}",
                start.to_rfc3339_opts(SecondsFormat::Millis, true)
            );
            sep = '&';
        }
        if let Some(end) = end {
            let _ = write!(
                path,
                "{sep}endDate={}",
                end.to_rfc3339_opts(SecondsFormat::Millis, true)
            );
        }

        let response: StatsResponse = self.get(&path).await?;
        Ok(response.stats)
    }
}
