//! Unit tests for analytics module

use super::*;
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use salesboard_types::{Category, Customer, CustomerType, Product, Region, Sale};

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

fn customer(id: &str, region: Region) -> Customer {
    Customer {
        id: id.to_string(),
        name: format!("Customer {}", id),
        email: format!("{}@example.com", id),
        region: Some(region),
        customer_type: CustomerType::Business,
        phone: None,
        address: None,
        city: None,
        state: None,
        country: "USA".to_string(),
        created_at: None,
        updated_at: None,
    }
}

fn product(id: &str, category: Category) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {}", id),
        sku: format!("SKU-{}", id),
        category: Some(category),
        subcategory: None,
        price: 100.0,
        cost: 60.0,
        stock_quantity: 10,
        description: None,
        brand: None,
        is_active: true,
        created_at: None,
        updated_at: None,
    }
}

/// Bare sale with ids only (no snapshots)
fn sale(id: &str, customer_id: &str, product_id: &str, total: f64, at: &str) -> Sale {
    Sale {
        id: id.to_string(),
        customer_id: Some(customer_id.to_string()),
        product_id: Some(product_id.to_string()),
        quantity: 1,
        unit_price: total,
        discount_percent: 0.0,
        total_amount: total,
        sale_date: ts(at),
        sales_rep: None,
        notes: None,
        created_at: None,
        customer: None,
        product: None,
    }
}

/// Sale with customer and product snapshots attached
fn full_sale(
    id: &str,
    customer_id: &str,
    region: Region,
    product_id: &str,
    category: Category,
    total: f64,
    at: &str,
) -> Sale {
    Sale {
        customer: Some(customer(customer_id, region)),
        product: Some(product(product_id, category)),
        ..sale(id, customer_id, product_id, total, at)
    }
}

/// Generate `count` fully-resolved sales spread over `days` days
fn generate_test_sales(count: usize, days: usize) -> Vec<Sale> {
    let base = ts("2024-03-01T12:00:00Z");
    (0..count)
        .map(|i| {
            let at = base + Duration::days((i % days) as i64);
            let region = Region::ALL[i % Region::ALL.len()];
            let category = Category::ALL[i % Category::ALL.len()];
            Sale {
                id: format!("sale-{}", i),
                customer_id: Some(format!("c-{}", i % 13)),
                product_id: Some(format!("p-{}", i % 17)),
                quantity: (i % 4) as u32 + 1,
                unit_price: 25.0,
                discount_percent: 0.0,
                total_amount: 25.0 * ((i % 4) as f64 + 1.0) + i as f64 * 0.5,
                sale_date: at,
                sales_rep: None,
                notes: None,
                created_at: None,
                customer: Some(customer(&format!("c-{}", i % 13), region)),
                product: Some(product(&format!("p-{}", i % 17), category)),
            }
        })
        .collect()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// ============================================================================
// Totals
// ============================================================================

#[test]
fn test_empty_input_degrades_to_zeros() {
    let summary = compute_analytics_in(&[], &[], &Utc);

    assert!(summary.is_empty());
    assert_eq!(summary.total_revenue, 0.0);
    assert_eq!(summary.total_orders, 0);
    assert_eq!(summary.avg_order_value, 0.0);
    assert_eq!(summary.total_customers, 0);
    assert_eq!(summary.revenue_growth, 0.0);
    assert_eq!(summary.order_growth, 0.0);
    assert!(summary.top_products.is_empty());
    assert!(summary.daily_revenue.is_empty());
    assert!(summary.monthly_trends.is_empty());
}

#[test]
fn test_same_day_scenario() {
    // 3 sales, same day, same product, two customers
    let sales = vec![
        sale("s1", "c1", "p1", 100.0, "2024-03-05T09:00:00Z"),
        sale("s2", "c2", "p1", 150.0, "2024-03-05T12:00:00Z"),
        sale("s3", "c1", "p1", 50.0, "2024-03-05T18:00:00Z"),
    ];

    let summary = compute_analytics_in(&sales, &[], &Utc);

    assert_eq!(summary.total_revenue, 300.0);
    assert_eq!(summary.total_orders, 3);
    assert_eq!(summary.total_customers, 2);
    assert_eq!(summary.avg_order_value, 100.0);

    assert_eq!(summary.daily_revenue.len(), 1);
    assert_eq!(summary.daily_revenue[0].date, "2024-03-05");
    assert_eq!(summary.daily_revenue[0].revenue, 300.0);
    assert_eq!(summary.daily_revenue[0].orders, 3);

    assert_eq!(summary.top_products.len(), 1);
    assert_eq!(summary.top_products[0].revenue, 300.0);
    assert_eq!(summary.top_products[0].orders, 3);
    assert_eq!(summary.top_products[0].quantity, 3);
}

#[test]
fn test_totals_match_sum_of_amounts() {
    let sales = generate_test_sales(120, 30);
    let summary = compute_analytics_in(&sales, &[], &Utc);

    let expected: f64 = sales.iter().map(|s| s.total_amount).sum();
    assert!(approx(summary.total_revenue, expected));
    assert!(approx(
        summary.avg_order_value * summary.total_orders as f64,
        summary.total_revenue
    ));
    assert_eq!(summary.total_customers, 13);
    assert!(summary.total_customers <= summary.total_orders);
}

#[test]
fn test_total_amount_is_authoritative() {
    // quantity * price says 200, stored total says 42
    let mut s = sale("s1", "c1", "p1", 42.0, "2024-03-05T09:00:00Z");
    s.quantity = 2;
    s.unit_price = 100.0;

    let summary = compute_analytics_in(&[s], &[], &Utc);
    assert_eq!(summary.total_revenue, 42.0);
    assert_eq!(summary.top_products[0].revenue, 42.0);
}

#[test]
fn test_non_finite_amount_counts_as_zero() {
    let mut bad = sale("s2", "c2", "p1", 0.0, "2024-03-05T10:00:00Z");
    bad.total_amount = f64::NAN;
    let sales = vec![sale("s1", "c1", "p1", 80.0, "2024-03-05T09:00:00Z"), bad];

    let summary = compute_analytics_in(&sales, &[], &Utc);
    assert_eq!(summary.total_revenue, 80.0);
    assert_eq!(summary.total_orders, 2);
    assert_eq!(summary.daily_revenue[0].revenue, 80.0);
}

// ============================================================================
// Growth
// ============================================================================

#[test]
fn test_growth_guarded_when_previous_is_zero() {
    let current = vec![sale("s1", "c1", "p1", 500.0, "2024-03-05T09:00:00Z")];
    let summary = compute_analytics_in(&current, &[], &Utc);

    assert_eq!(summary.revenue_growth, 0.0);
    assert_eq!(summary.order_growth, 0.0);
    assert!(summary.revenue_growth.is_finite());
}

#[test]
fn test_growth_zero_previous_revenue_with_orders() {
    // Previous period has orders but zero revenue
    let current = vec![sale("s1", "c1", "p1", 500.0, "2024-03-05T09:00:00Z")];
    let previous = vec![sale("s0", "c1", "p1", 0.0, "2024-02-05T09:00:00Z")];

    let summary = compute_analytics_in(&current, &previous, &Utc);
    assert_eq!(summary.revenue_growth, 0.0);
    assert_eq!(summary.order_growth, 0.0);
}

#[test]
fn test_growth_empty_current_period() {
    let previous = vec![
        sale("p1", "c1", "p1", 600.0, "2024-02-05T09:00:00Z"),
        sale("p2", "c2", "p1", 400.0, "2024-02-06T09:00:00Z"),
    ];

    let summary = compute_analytics_in(&[], &previous, &Utc);
    assert_eq!(summary.total_revenue, 0.0);
    assert_eq!(summary.revenue_growth, -100.0);
    assert_eq!(summary.order_growth, -100.0);
}

#[test]
fn test_growth_uses_previous_period_revenue() {
    let current = vec![
        sale("c1", "c1", "p1", 90.0, "2024-03-05T09:00:00Z"),
        sale("c2", "c2", "p1", 60.0, "2024-03-06T09:00:00Z"),
    ];
    let previous = vec![sale("p1", "c1", "p1", 100.0, "2024-02-05T09:00:00Z")];

    let summary = compute_analytics_in(&current, &previous, &Utc);
    assert_eq!(summary.total_revenue, 150.0);
    assert_eq!(summary.revenue_growth, 50.0);
    assert_eq!(summary.order_growth, 100.0);
    assert_eq!(total_revenue(&previous), 100.0);
}

#[test]
fn test_growth_percent() {
    assert_eq!(growth_percent(150.0, 100.0), 50.0);
    assert_eq!(growth_percent(50.0, 100.0), -50.0);
    assert_eq!(growth_percent(10.0, 0.0), 0.0);
    assert_eq!(growth_percent(10.0, -5.0), 0.0);
}

// ============================================================================
// Top products / customers
// ============================================================================

#[test]
fn test_top_lists_sorted_and_truncated() {
    let sales = generate_test_sales(200, 30);
    let summary = compute_analytics_in(&sales, &[], &Utc);

    assert_eq!(summary.top_products.len(), TOP_N);
    assert_eq!(summary.top_customers.len(), TOP_N);
    assert!(summary
        .top_products
        .windows(2)
        .all(|w| w[0].revenue >= w[1].revenue));
    assert!(summary
        .top_customers
        .windows(2)
        .all(|w| w[0].revenue >= w[1].revenue));
}

#[test]
fn test_top_lists_shorter_than_n() {
    let sales = generate_test_sales(6, 3);
    let summary = compute_analytics_in(&sales, &[], &Utc);

    assert_eq!(summary.top_products.len(), 6);
    assert_eq!(summary.top_customers.len(), 6);
}

#[test]
fn test_ties_keep_encounter_order() {
    let sales = vec![
        sale("s1", "c1", "p-b", 100.0, "2024-03-05T09:00:00Z"),
        sale("s2", "c2", "p-a", 100.0, "2024-03-05T10:00:00Z"),
        sale("s3", "c3", "p-c", 300.0, "2024-03-05T11:00:00Z"),
    ];

    let products = product_rollups(&sales);
    let ids: Vec<_> = products
        .iter()
        .map(|p| p.product_id.as_deref().unwrap())
        .collect();
    assert_eq!(ids, vec!["p-c", "p-b", "p-a"]);
}

#[test]
fn test_product_keeps_first_snapshot() {
    let first = full_sale(
        "s1",
        "c1",
        Region::North,
        "p1",
        Category::Books,
        10.0,
        "2024-03-05T09:00:00Z",
    );
    let mut second = full_sale(
        "s2",
        "c1",
        Region::North,
        "p1",
        Category::Books,
        20.0,
        "2024-03-05T10:00:00Z",
    );
    if let Some(p) = second.product.as_mut() {
        p.name = "Renamed".to_string();
    }

    let products = product_rollups(&[first, second]);
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].product.as_ref().unwrap().name, "Product p1");
}

#[test]
fn test_customer_running_average() {
    let sales = vec![
        sale("s1", "c1", "p1", 100.0, "2024-03-05T09:00:00Z"),
        sale("s2", "c1", "p2", 50.0, "2024-03-06T09:00:00Z"),
        sale("s3", "c2", "p1", 120.0, "2024-03-06T10:00:00Z"),
    ];

    let customers = customer_rollups(&sales);
    assert_eq!(customers[0].customer_id.as_deref(), Some("c1"));
    assert_eq!(customers[0].orders, 2);
    assert_eq!(customers[0].avg_order_value, 75.0);
    assert_eq!(customers[1].avg_order_value, 120.0);
}

// ============================================================================
// Region / category
// ============================================================================

#[test]
fn test_region_and_category_sum_to_total_when_resolved() {
    let sales = generate_test_sales(90, 30);
    let summary = compute_analytics_in(&sales, &[], &Utc);

    let region_sum: f64 = summary.region_data.iter().map(|r| r.revenue).sum();
    let category_sum: f64 = summary.category_data.iter().map(|c| c.revenue).sum();
    assert!(approx(region_sum, summary.total_revenue));
    assert!(approx(category_sum, summary.total_revenue));
    assert!(summary.region_data.iter().all(|r| r.region != UNKNOWN));
    assert!(summary.category_data.iter().all(|c| c.category != UNKNOWN));
}

const UNKNOWN: &str = salesboard_types::UNKNOWN_GROUP;

#[test]
fn test_missing_snapshots_group_under_unknown() {
    let sales = vec![
        full_sale(
            "s1",
            "c1",
            Region::West,
            "p1",
            Category::Sports,
            100.0,
            "2024-03-05T09:00:00Z",
        ),
        sale("s2", "c2", "p2", 40.0, "2024-03-05T10:00:00Z"),
        sale("s3", "c3", "p2", 60.0, "2024-03-05T11:00:00Z"),
    ];

    let summary = compute_analytics_in(&sales, &[], &Utc);

    // Encounter order: West first, then Unknown
    assert_eq!(summary.region_data.len(), 2);
    assert_eq!(summary.region_data[0].region, "West");
    assert_eq!(summary.region_data[1].region, UNKNOWN);
    assert_eq!(summary.region_data[1].revenue, 100.0);
    assert_eq!(summary.region_data[1].customers, 2);

    assert_eq!(summary.category_data[1].category, UNKNOWN);
    assert_eq!(summary.category_data[1].orders, 2);
    assert_eq!(summary.category_data[1].products, 1);

    // Still counted in headline totals
    assert_eq!(summary.total_revenue, 200.0);
    assert_eq!(summary.total_orders, 3);
}

#[test]
fn test_snapshot_without_region_or_category_is_unknown() {
    let mut sale = full_sale(
        "s1",
        "c1",
        Region::North,
        "p1",
        Category::Books,
        70.0,
        "2024-03-05T09:00:00Z",
    );
    if let Some(c) = sale.customer.as_mut() {
        c.region = None;
    }
    if let Some(p) = sale.product.as_mut() {
        p.category = None;
    }

    let summary = compute_analytics_in(&[sale], &[], &Utc);
    assert_eq!(summary.region_data[0].region, UNKNOWN);
    assert_eq!(summary.region_data[0].revenue, 70.0);
    assert_eq!(summary.category_data[0].category, UNKNOWN);
}

#[test]
fn test_distinct_sets_use_raw_ids() {
    // Snapshot missing but id present; absent id is one distinct value
    let mut no_customer = sale("s3", "x", "p1", 10.0, "2024-03-05T11:00:00Z");
    no_customer.customer_id = None;
    let mut also_no_customer = sale("s4", "x", "p1", 10.0, "2024-03-05T12:00:00Z");
    also_no_customer.customer_id = None;

    let sales = vec![
        sale("s1", "c1", "p1", 10.0, "2024-03-05T09:00:00Z"),
        sale("s2", "c1", "p1", 10.0, "2024-03-05T10:00:00Z"),
        no_customer,
        also_no_customer,
    ];

    let summary = compute_analytics_in(&sales, &[], &Utc);
    assert_eq!(summary.total_customers, 2);
    assert_eq!(summary.region_data[0].customers, 2);
    assert_eq!(summary.monthly_trends[0].customers, 2);
    assert_eq!(summary.top_customers.len(), 2);
}

// ============================================================================
// Daily / monthly
// ============================================================================

#[test]
fn test_daily_sorted_unique_and_complete() {
    let mut sales = generate_test_sales(60, 20);
    sales.reverse();
    let summary = compute_analytics_in(&sales, &[], &Utc);

    assert_eq!(summary.daily_revenue.len(), 20);
    assert!(summary
        .daily_revenue
        .windows(2)
        .all(|w| w[0].date < w[1].date));
    let daily_sum: f64 = summary.daily_revenue.iter().map(|d| d.revenue).sum();
    assert!(approx(daily_sum, summary.total_revenue));
}

#[test]
fn test_daily_uses_utc_date() {
    // 23:30 UTC stays on the UTC date regardless of local zone
    let sales = vec![sale("s1", "c1", "p1", 10.0, "2024-03-05T23:30:00Z")];
    let summary = compute_analytics_in(&sales, &[], &FixedOffset::east_opt(3600).unwrap());
    assert_eq!(summary.daily_revenue[0].date, "2024-03-05");
}

#[test]
fn test_monthly_sorted_with_distinct_customers() {
    let sales = vec![
        sale("s1", "c1", "p1", 10.0, "2024-03-10T09:00:00Z"),
        sale("s2", "c1", "p1", 20.0, "2024-01-10T09:00:00Z"),
        sale("s3", "c2", "p1", 30.0, "2024-01-20T09:00:00Z"),
        sale("s4", "c1", "p1", 40.0, "2023-12-31T09:00:00Z"),
    ];

    let summary = compute_analytics_in(&sales, &[], &Utc);
    let months: Vec<_> = summary
        .monthly_trends
        .iter()
        .map(|m| m.month.as_str())
        .collect();
    assert_eq!(months, vec!["2023-12", "2024-01", "2024-03"]);
    assert_eq!(summary.monthly_trends[1].revenue, 50.0);
    assert_eq!(summary.monthly_trends[1].orders, 2);
    assert_eq!(summary.monthly_trends[1].customers, 2);
}

#[test]
fn test_monthly_respects_time_zone() {
    // 2024-01-31 23:30 UTC is already February at UTC+2
    let sales = vec![sale("s1", "c1", "p1", 10.0, "2024-01-31T23:30:00Z")];
    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

    let utc = compute_analytics_in(&sales, &[], &Utc);
    let shifted = compute_analytics_in(&sales, &[], &plus_two);

    assert_eq!(utc.monthly_trends[0].month, "2024-01");
    assert_eq!(shifted.monthly_trends[0].month, "2024-02");
    // Daily bucket stays UTC
    assert_eq!(shifted.daily_revenue[0].date, "2024-01-31");
}

#[test]
fn test_every_sale_lands_in_one_bucket_per_dimension() {
    let sales = generate_test_sales(75, 25);
    let summary = compute_analytics_in(&sales, &[], &Utc);

    let region_orders: usize = summary.region_data.iter().map(|r| r.orders).sum();
    let category_orders: usize = summary.category_data.iter().map(|c| c.orders).sum();
    let daily_orders: usize = summary.daily_revenue.iter().map(|d| d.orders).sum();
    let monthly_orders: usize = summary.monthly_trends.iter().map(|m| m.orders).sum();
    let product_orders: usize = product_rollups(&sales).iter().map(|p| p.orders).sum();

    for orders in [
        region_orders,
        category_orders,
        daily_orders,
        monthly_orders,
        product_orders,
    ] {
        assert_eq!(orders, 75);
    }
}

#[test]
fn test_local_time_zone_entry_point() {
    // Mid-month timestamp is in the same month in every zone
    let at = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let mut s = sale("s1", "c1", "p1", 10.0, "2024-06-15T12:00:00Z");
    s.sale_date = at;

    let summary = compute_analytics(&[s], &[]);
    assert_eq!(summary.monthly_trends[0].month, "2024-06");
}
