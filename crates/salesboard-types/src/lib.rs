//! salesboard-types - Shared data types for salesboard
//!
//! This crate contains pure data structures without heavy dependencies.
//! No tokio, no async runtime - just serde-serializable types.
//!
//! Used by:
//! - salesboard-core (aggregation, repository, service)
//! - salesboard-web (JSON API)
//! - salesboard (CLI tables)

pub mod analytics;
pub mod lenient;
pub mod models;

// Re-export analytics types
pub use analytics::{
    AnalyticsSummary, CategoryRollup, CustomerRollup, DailyRevenue, MonthlyTrend, ProductRollup,
    RegionRollup, UNKNOWN_GROUP,
};

// Re-export model types
pub use models::{Category, Customer, CustomerType, Product, Region, Sale};
