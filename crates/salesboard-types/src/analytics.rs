//! Analytics summary types
//!
//! Output of the aggregator. Serialized in camelCase for the dashboard API.

use serde::{Deserialize, Serialize};

use crate::models::{Customer, Product};

/// Group label used when a sale has no customer/product snapshot
pub const UNKNOWN_GROUP: &str = "Unknown";

/// Revenue rollup for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRollup {
    pub product_id: Option<String>,
    /// Snapshot from the first sale seen for this product
    pub product: Option<Product>,
    pub revenue: f64,
    pub quantity: u64,
    pub orders: usize,
}

/// Revenue rollup for one customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRollup {
    pub customer_id: Option<String>,
    pub customer: Option<Customer>,
    pub revenue: f64,
    pub orders: usize,
    pub avg_order_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRollup {
    pub region: String,
    pub revenue: f64,
    pub orders: usize,
    /// Distinct customer ids
    pub customers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRollup {
    pub category: String,
    pub revenue: f64,
    pub orders: usize,
    /// Distinct product ids
    pub products: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    /// "YYYY-MM-DD" (UTC)
    pub date: String,
    pub revenue: f64,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    /// "YYYY-MM"
    pub month: String,
    pub revenue: f64,
    pub orders: usize,
    pub customers: usize,
}

/// Complete analytics summary for a period
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_revenue: f64,
    pub total_orders: usize,
    pub avg_order_value: f64,
    pub total_customers: usize,
    /// Percent change vs. previous period (0 when previous is empty)
    pub revenue_growth: f64,
    pub order_growth: f64,
    pub top_products: Vec<ProductRollup>,
    pub top_customers: Vec<CustomerRollup>,
    pub region_data: Vec<RegionRollup>,
    pub category_data: Vec<CategoryRollup>,
    /// Sorted chronologically
    pub daily_revenue: Vec<DailyRevenue>,
    /// Sorted chronologically
    pub monthly_trends: Vec<MonthlyTrend>,
}

impl AnalyticsSummary {
    /// Check if empty (no sales in period)
    pub fn is_empty(&self) -> bool {
        self.total_orders == 0
    }

    /// Share of revenue per region as percentages (0 when revenue is 0)
    pub fn region_share(&self) -> Vec<(String, f64)> {
        let total: f64 = self.region_data.iter().map(|r| r.revenue).sum();
        self.region_data
            .iter()
            .map(|r| {
                let pct = if total > 0.0 {
                    r.revenue / total * 100.0
                } else {
                    0.0
                };
                (r.region.clone(), pct)
            })
            .collect()
    }
}
