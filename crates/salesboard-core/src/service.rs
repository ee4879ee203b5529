//! Analytics service: fetch policy around the aggregator
//!
//! Computes the comparison window, runs both fetches concurrently and hands
//! the materialized rows to [`compute_analytics`]. Without a repository it
//! serves the sample dataset so every caller keeps working offline.

use chrono::Utc;
use serde::Serialize;

use salesboard_types::{AnalyticsSummary, Customer, Product, Sale};

use crate::analytics::compute_analytics;
use crate::error::{DataFetchError, DataSource};
use crate::period::DateRange;
use crate::repository::{SalesQuery, SalesRepository};
use crate::sample::{sample_sales, sample_summary};

const SAMPLE_REASON: &str = "No sales backend configured; showing sample data";

/// Analytics for one request, with the windows it was computed over
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub range: DateRange,
    pub previous_range: DateRange,
    pub source: DataSource,
    pub summary: AnalyticsSummary,
}

/// Entry point used by the CLI and the web API
#[derive(Debug, Clone)]
pub struct AnalyticsService<R> {
    repository: Option<R>,
}

impl<R: SalesRepository> AnalyticsService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Some(repository),
        }
    }

    /// Service in sample mode (no backend)
    pub fn sample() -> Self {
        Self { repository: None }
    }

    pub fn from_repository(repository: Option<R>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> Option<&R> {
        self.repository.as_ref()
    }

    pub fn source(&self) -> DataSource {
        match self.repository {
            Some(_) => DataSource::Live,
            None => DataSource::Sample {
                reason: SAMPLE_REASON.to_string(),
            },
        }
    }

    /// Analytics for `range`, compared with the equal-length window before it
    ///
    /// # Errors
    /// Repository failures are returned unchanged.
    pub async fn get_analytics(&self, range: DateRange) -> Result<AnalyticsReport, DataFetchError> {
        let previous_range = range.previous();

        let Some(repo) = &self.repository else {
            tracing::warn!("{}", SAMPLE_REASON);
            return Ok(AnalyticsReport {
                range,
                previous_range,
                source: self.source(),
                summary: sample_summary(Utc::now()),
            });
        };

        tracing::info!(%range, previous = %previous_range, "Fetching analytics");

        let (current, previous) = tokio::try_join!(
            repo.fetch_sales(range, SalesQuery::analytics()),
            repo.fetch_sales(previous_range, SalesQuery::comparison()),
        )
        .inspect_err(|e| tracing::error!("Error fetching analytics: {}", e))?;

        tracing::debug!(
            current = current.len(),
            previous = previous.len(),
            "Fetched sales for both periods"
        );

        Ok(AnalyticsReport {
            range,
            previous_range,
            source: DataSource::Live,
            summary: compute_analytics(&current, &previous),
        })
    }

    /// Sales in `range`, newest first, with snapshots
    pub async fn get_sales(
        &self,
        range: DateRange,
        limit: Option<usize>,
    ) -> Result<Vec<Sale>, DataFetchError> {
        match &self.repository {
            Some(repo) => repo
                .fetch_sales(range, SalesQuery::recent(limit))
                .await
                .inspect_err(|e| tracing::error!("Error fetching sales: {}", e)),
            None => Ok(sample_sales(Utc::now())),
        }
    }

    pub async fn get_customers(&self) -> Result<Vec<Customer>, DataFetchError> {
        match &self.repository {
            Some(repo) => repo.fetch_customers().await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn get_products(&self) -> Result<Vec<Product>, DataFetchError> {
        match &self.repository {
            Some(repo) => repo.fetch_products().await,
            None => Ok(Vec::new()),
        }
    }
}
