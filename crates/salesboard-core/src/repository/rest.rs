//! PostgREST repository
//!
//! Queries `{url}/rest/v1/{table}` with the project's anon key. Filters use
//! PostgREST operators (`gte.`, `lte.`, `eq.`) and embedded resources for
//! the customer/product snapshots.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;

use salesboard_types::{Customer, Product, Sale};

use super::{SalesQuery, SalesRepository};
use crate::config::BackendConfig;
use crate::error::{CoreError, DataFetchError};
use crate::period::DateRange;

/// `select` clause embedding both snapshots
pub const SALES_WITH_RELATIONS: &str = "*,customer:customers(*),product:products(*)";

/// Repository backed by the hosted REST endpoint
#[derive(Debug, Clone)]
pub struct RestSalesRepository {
    client: reqwest::Client,
    config: BackendConfig,
}

impl RestSalesRepository {
    /// Build a client for `config`; rejects unusable configs up front
    pub fn new(config: BackendConfig) -> Result<Self, CoreError> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.anon_key).map_err(|_| CoreError::InvalidConfig {
            message: "anon_key contains characters not allowed in a header".to_string(),
        })?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.anon_key)).map_err(|_| {
            CoreError::InvalidConfig {
                message: "anon_key contains characters not allowed in a header".to_string(),
            }
        })?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| CoreError::InvalidConfig {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base_url(), table)
    }

    async fn get_rows<T: DeserializeOwned>(
        &self,
        operation: &str,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, DataFetchError> {
        let url = self.table_url(table);
        tracing::debug!(%url, ?params, "Fetching {}", operation);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|source| DataFetchError::Transport {
                operation: operation.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| DataFetchError::Transport {
                operation: operation.to_string(),
                source,
            })?;

        if !status.is_success() {
            tracing::warn!("Backend returned {} for {}", status, operation);
            return Err(DataFetchError::Status {
                operation: operation.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<T> = decode_rows(operation, &body)?;
        tracing::debug!("Fetched {} {} rows", rows.len(), operation);
        Ok(rows)
    }
}

impl SalesRepository for RestSalesRepository {
    async fn fetch_sales(
        &self,
        range: DateRange,
        query: SalesQuery,
    ) -> Result<Vec<Sale>, DataFetchError> {
        self.get_rows("sales", "sales", &sales_params(range, query))
            .await
    }

    async fn fetch_customers(&self) -> Result<Vec<Customer>, DataFetchError> {
        let params = [
            ("select", "*".to_string()),
            ("order", "name.asc".to_string()),
        ];
        self.get_rows("customers", "customers", &params).await
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, DataFetchError> {
        let params = [
            ("select", "*".to_string()),
            ("is_active", "eq.true".to_string()),
            ("order", "name.asc".to_string()),
        ];
        self.get_rows("products", "products", &params).await
    }
}

/// Query string for a sales request (both bounds inclusive)
pub fn sales_params(range: DateRange, query: SalesQuery) -> Vec<(&'static str, String)> {
    let select = if query.with_relations {
        SALES_WITH_RELATIONS
    } else {
        "*"
    };

    let mut params = vec![
        ("select", select.to_string()),
        ("sale_date", format!("gte.{}", iso_millis(&range.start))),
        ("sale_date", format!("lte.{}", iso_millis(&range.end))),
    ];
    if query.newest_first {
        params.push(("order", "sale_date.desc".to_string()));
    }
    if let Some(limit) = query.limit {
        params.push(("limit", limit.to_string()));
    }
    params
}

/// `2024-03-01T00:00:00.000Z`
fn iso_millis(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Decode a JSON array response; `null` decodes as no rows
pub fn decode_rows<T: DeserializeOwned>(
    operation: &str,
    body: &str,
) -> Result<Vec<T>, DataFetchError> {
    let rows: Option<Vec<T>> =
        serde_json::from_str(body).map_err(|source| DataFetchError::Decode {
            operation: operation.to_string(),
            message: source.to_string(),
            source,
        })?;
    Ok(rows.unwrap_or_default())
}
