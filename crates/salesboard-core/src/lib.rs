//! salesboard-core - Core library for salesboard
//!
//! Provides the analytics aggregator, date periods, the sales repository
//! (REST backend + in-memory), the sample dataset and the analytics service.

pub mod analytics;
pub mod config;
pub mod error;
pub mod export;
pub mod pagination;
pub mod period;
pub mod repository;
pub mod sample;
pub mod service;

pub use analytics::{compute_analytics, compute_analytics_in, growth_percent, TOP_N};
pub use config::{BackendConfig, SalesboardConfig};
pub use error::{CoreError, DataFetchError, DataSource};
pub use export::{
    export_daily_revenue_to_csv, export_sales_to_csv, export_summary_to_json,
    export_top_products_to_csv,
};
pub use pagination::{paginate, Page};
pub use period::DateRange;
pub use repository::{MemoryRepository, RestSalesRepository, SalesQuery, SalesRepository};
pub use service::{AnalyticsReport, AnalyticsService};

// Record and summary types live in salesboard-types
pub use salesboard_types as types;
