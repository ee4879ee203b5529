//! Sales analytics aggregation
//!
//! Turns two already-fetched sale collections (current and previous period)
//! into an [`AnalyticsSummary`]: headline totals, period-over-period growth,
//! and rollups by product, customer, region, category, day and month.
//!
//! Pure and synchronous. Empty input degrades to zeros, never to an error.

use chrono::{Local, TimeZone};
use std::collections::HashSet;

use salesboard_types::{AnalyticsSummary, Sale};

pub mod rollups;

#[cfg(test)]
mod tests;

pub use rollups::{
    category_rollups, customer_rollups, daily_revenue, monthly_trends, product_rollups,
    region_rollups,
};

/// Length of the top products / top customers lists
pub const TOP_N: usize = 10;

/// Compute analytics, bucketing months in the local time zone
///
/// `current` and `previous` must already be filtered to their windows
/// (see [`crate::period::DateRange::previous`]).
///
/// # Performance
/// One pass per grouping dimension, O(n) in the number of sales.
pub fn compute_analytics(current: &[Sale], previous: &[Sale]) -> AnalyticsSummary {
    compute_analytics_in(current, previous, &Local)
}

/// Compute analytics with an explicit time zone for monthly buckets
///
/// Daily buckets always use the UTC date of the sale timestamp.
pub fn compute_analytics_in<Tz: TimeZone>(
    current: &[Sale],
    previous: &[Sale],
    tz: &Tz,
) -> AnalyticsSummary {
    let revenue = total_revenue(current);
    let total_orders = current.len();
    let avg_order_value = if total_orders > 0 {
        revenue / total_orders as f64
    } else {
        0.0
    };
    let total_customers = current
        .iter()
        .map(|sale| sale.customer_id.as_deref())
        .collect::<HashSet<_>>()
        .len();

    let prev_revenue = total_revenue(previous);
    let prev_orders = previous.len();

    let mut top_products = product_rollups(current);
    top_products.truncate(TOP_N);
    let mut top_customers = customer_rollups(current);
    top_customers.truncate(TOP_N);

    tracing::debug!(
        current = total_orders,
        previous = prev_orders,
        revenue,
        "Computed analytics summary"
    );

    AnalyticsSummary {
        total_revenue: revenue,
        total_orders,
        avg_order_value,
        total_customers,
        revenue_growth: growth_percent(revenue, prev_revenue),
        order_growth: growth_percent(total_orders as f64, prev_orders as f64),
        top_products,
        top_customers,
        region_data: region_rollups(current),
        category_data: category_rollups(current),
        daily_revenue: daily_revenue(current),
        monthly_trends: monthly_trends(current, tz),
    }
}

/// Percent change from `previous` to `current`, or 0 when `previous` is not positive
pub fn growth_percent(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    }
}

/// Sum of `total_amount` over `sales`
pub fn total_revenue(sales: &[Sale]) -> f64 {
    sales.iter().map(sale_revenue).sum()
}

/// Revenue contributed by one sale
///
/// Non-finite amounts count as 0 so one bad row cannot poison every total.
pub(crate) fn sale_revenue(sale: &Sale) -> f64 {
    if sale.total_amount.is_finite() {
        sale.total_amount
    } else {
        tracing::warn!("Sale {} has non-finite total_amount, counting as 0", sale.id);
        0.0
    }
}
