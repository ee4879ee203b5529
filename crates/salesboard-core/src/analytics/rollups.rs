//! Per-dimension rollups
//!
//! Each rollup is a single pass over the sales into an insertion-ordered
//! map (key → running aggregate), then materialized into a `Vec`. Keys are
//! borrowed from the input; the output copies what it exposes.

use chrono::{Datelike, TimeZone};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use salesboard_types::{
    CategoryRollup, CustomerRollup, DailyRevenue, MonthlyTrend, ProductRollup, RegionRollup, Sale,
    UNKNOWN_GROUP,
};

use super::sale_revenue;

/// Map from group key to aggregate that remembers first-insertion order
pub(crate) struct OrderedGroups<K, A> {
    index: HashMap<K, usize>,
    groups: Vec<(K, A)>,
}

impl<K: Eq + Hash + Clone, A> OrderedGroups<K, A> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    /// Aggregate for `key`, created with `init` on first sight
    pub(crate) fn entry(&mut self, key: K, init: impl FnOnce() -> A) -> &mut A {
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.groups.len();
                self.index.insert(key.clone(), idx);
                self.groups.push((key, init()));
                idx
            }
        };
        &mut self.groups[idx].1
    }

    pub(crate) fn len(&self) -> usize {
        self.groups.len()
    }

    /// Groups in encounter order
    pub(crate) fn into_groups(self) -> impl Iterator<Item = (K, A)> {
        self.groups.into_iter()
    }
}

/// Running totals shared by the region, category and month rollups
struct DistinctAggregate<'a> {
    revenue: f64,
    orders: usize,
    members: HashSet<Option<&'a str>>,
}

impl<'a> DistinctAggregate<'a> {
    fn new() -> Self {
        Self {
            revenue: 0.0,
            orders: 0,
            members: HashSet::new(),
        }
    }

    fn add(&mut self, sale: &Sale, member: Option<&'a str>) {
        self.revenue += sale_revenue(sale);
        self.orders += 1;
        self.members.insert(member);
    }
}

/// Products by revenue, highest first (ties keep encounter order)
///
/// Not truncated; the summary keeps the first [`super::TOP_N`].
pub fn product_rollups(sales: &[Sale]) -> Vec<ProductRollup> {
    let mut groups: OrderedGroups<Option<&str>, ProductRollup> = OrderedGroups::new();

    for sale in sales {
        let item = groups.entry(sale.product_id.as_deref(), || ProductRollup {
            product_id: sale.product_id.clone(),
            product: sale.product.clone(),
            revenue: 0.0,
            quantity: 0,
            orders: 0,
        });
        item.revenue += sale_revenue(sale);
        item.quantity += sale.quantity as u64;
        item.orders += 1;
    }

    let mut products: Vec<ProductRollup> = groups.into_groups().map(|(_, item)| item).collect();
    sort_by_revenue_desc(&mut products, |p| p.revenue);
    products
}

/// Customers by revenue, highest first (ties keep encounter order)
pub fn customer_rollups(sales: &[Sale]) -> Vec<CustomerRollup> {
    let mut groups: OrderedGroups<Option<&str>, CustomerRollup> = OrderedGroups::new();

    for sale in sales {
        let item = groups.entry(sale.customer_id.as_deref(), || CustomerRollup {
            customer_id: sale.customer_id.clone(),
            customer: sale.customer.clone(),
            revenue: 0.0,
            orders: 0,
            avg_order_value: 0.0,
        });
        item.revenue += sale_revenue(sale);
        item.orders += 1;
        item.avg_order_value = item.revenue / item.orders as f64;
    }

    let mut customers: Vec<CustomerRollup> =
        groups.into_groups().map(|(_, item)| item).collect();
    sort_by_revenue_desc(&mut customers, |c| c.revenue);
    customers
}

/// Revenue per customer region, in encounter order
///
/// Sales without a customer snapshot land in `"Unknown"`; distinct customers
/// are counted by raw `customer_id`.
pub fn region_rollups(sales: &[Sale]) -> Vec<RegionRollup> {
    let mut groups: OrderedGroups<&'static str, DistinctAggregate<'_>> = OrderedGroups::new();

    for sale in sales {
        let region = sale.region().map_or(UNKNOWN_GROUP, |r| r.as_str());
        groups
            .entry(region, DistinctAggregate::new)
            .add(sale, sale.customer_id.as_deref());
    }

    groups
        .into_groups()
        .map(|(region, agg)| RegionRollup {
            region: region.to_string(),
            revenue: agg.revenue,
            orders: agg.orders,
            customers: agg.members.len(),
        })
        .collect()
}

/// Revenue per product category, in encounter order
pub fn category_rollups(sales: &[Sale]) -> Vec<CategoryRollup> {
    let mut groups: OrderedGroups<&'static str, DistinctAggregate<'_>> = OrderedGroups::new();

    for sale in sales {
        let category = sale.category().map_or(UNKNOWN_GROUP, |c| c.as_str());
        groups
            .entry(category, DistinctAggregate::new)
            .add(sale, sale.product_id.as_deref());
    }

    groups
        .into_groups()
        .map(|(category, agg)| CategoryRollup {
            category: category.to_string(),
            revenue: agg.revenue,
            orders: agg.orders,
            products: agg.members.len(),
        })
        .collect()
}

/// Revenue per UTC calendar day, oldest first
pub fn daily_revenue(sales: &[Sale]) -> Vec<DailyRevenue> {
    let mut groups: OrderedGroups<String, DailyRevenue> = OrderedGroups::new();

    for sale in sales {
        let date = sale.sale_date.format("%Y-%m-%d").to_string();
        let item = groups.entry(date.clone(), || DailyRevenue {
            date,
            revenue: 0.0,
            orders: 0,
        });
        item.revenue += sale_revenue(sale);
        item.orders += 1;
    }

    let mut days: Vec<DailyRevenue> = groups.into_groups().map(|(_, item)| item).collect();
    // Zero-padded YYYY-MM-DD sorts chronologically
    days.sort_by(|a, b| a.date.cmp(&b.date));
    days
}

/// Revenue per calendar month in `tz`, oldest first
pub fn monthly_trends<Tz: TimeZone>(sales: &[Sale], tz: &Tz) -> Vec<MonthlyTrend> {
    let mut groups: OrderedGroups<String, DistinctAggregate<'_>> = OrderedGroups::new();

    for sale in sales {
        let local = sale.sale_date.with_timezone(tz);
        let month = format!("{:04}-{:02}", local.year(), local.month());
        groups
            .entry(month, DistinctAggregate::new)
            .add(sale, sale.customer_id.as_deref());
    }

    tracing::trace!("Grouped sales into {} months", groups.len());

    let mut months: Vec<MonthlyTrend> = groups
        .into_groups()
        .map(|(month, agg)| MonthlyTrend {
            month,
            revenue: agg.revenue,
            orders: agg.orders,
            customers: agg.members.len(),
        })
        .collect();
    months.sort_by(|a, b| a.month.cmp(&b.month));
    months
}

/// Stable sort, highest revenue first
fn sort_by_revenue_desc<T>(items: &mut [T], revenue: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| revenue(b).total_cmp(&revenue(a)));
}
