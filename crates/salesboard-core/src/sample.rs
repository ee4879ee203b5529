//! Sample dataset for running without a backend
//!
//! Everything here is deterministic for a given `now`, so demo output and
//! tests are reproducible.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use salesboard_types::{
    AnalyticsSummary, CategoryRollup, Category, Customer, CustomerRollup, CustomerType,
    DailyRevenue, MonthlyTrend, Product, ProductRollup, Region, RegionRollup, Sale,
};

/// Days of history in the demo daily series
const SAMPLE_DAYS: i64 = 30;

fn demo_customer(now: DateTime<Utc>) -> Customer {
    Customer {
        id: "1".to_string(),
        name: "John Smith".to_string(),
        email: "john.smith@email.com".to_string(),
        region: Some(Region::North),
        customer_type: CustomerType::Enterprise,
        phone: None,
        address: None,
        city: None,
        state: None,
        country: "USA".to_string(),
        created_at: Some(now),
        updated_at: Some(now),
    }
}

fn demo_product(now: DateTime<Utc>) -> Product {
    Product {
        id: "1".to_string(),
        name: "iPhone 14 Pro".to_string(),
        sku: "APPL-IPH14P-128".to_string(),
        category: Some(Category::Electronics),
        subcategory: None,
        price: 999.0,
        cost: 700.0,
        stock_quantity: 50,
        description: None,
        brand: None,
        is_active: true,
        created_at: Some(now),
        updated_at: Some(now),
    }
}

/// Fixed dashboard figures shown in sample mode
///
/// The daily series covers the 30 days ending at `now`.
pub fn sample_summary(now: DateTime<Utc>) -> AnalyticsSummary {
    let today: NaiveDate = now.date_naive();

    let daily_revenue = (0..SAMPLE_DAYS)
        .map(|i| {
            let date = today - Duration::days(SAMPLE_DAYS - 1 - i);
            DailyRevenue {
                date: date.format("%Y-%m-%d").to_string(),
                revenue: 2000.0 + ((i * 1327) % 5000) as f64,
                orders: 10 + ((i * 7) % 20) as usize,
            }
        })
        .collect();

    AnalyticsSummary {
        total_revenue: 125_000.0,
        total_orders: 450,
        avg_order_value: 277.78,
        total_customers: 85,
        revenue_growth: 12.5,
        order_growth: 8.3,
        top_products: vec![ProductRollup {
            product_id: Some("1".to_string()),
            product: Some(demo_product(now)),
            revenue: 25_000.0,
            quantity: 25,
            orders: 25,
        }],
        top_customers: vec![CustomerRollup {
            customer_id: Some("1".to_string()),
            customer: Some(demo_customer(now)),
            revenue: 15_000.0,
            orders: 12,
            avg_order_value: 1250.0,
        }],
        region_data: [
            (Region::North, 35_000.0, 120, 25),
            (Region::South, 28_000.0, 95, 20),
            (Region::East, 32_000.0, 110, 22),
            (Region::West, 30_000.0, 125, 18),
        ]
        .into_iter()
        .map(|(region, revenue, orders, customers)| RegionRollup {
            region: region.to_string(),
            revenue,
            orders,
            customers,
        })
        .collect(),
        category_data: [
            (Category::Electronics, 65_000.0, 180, 15),
            (Category::Clothing, 35_000.0, 150, 25),
            (Category::HomeAndGarden, 25_000.0, 120, 20),
        ]
        .into_iter()
        .map(|(category, revenue, orders, products)| CategoryRollup {
            category: category.to_string(),
            revenue,
            orders,
            products,
        })
        .collect(),
        daily_revenue,
        monthly_trends: vec![
            MonthlyTrend {
                month: "2024-01".to_string(),
                revenue: 45_000.0,
                orders: 150,
                customers: 35,
            },
            MonthlyTrend {
                month: "2024-02".to_string(),
                revenue: 52_000.0,
                orders: 175,
                customers: 42,
            },
            MonthlyTrend {
                month: "2024-03".to_string(),
                revenue: 48_000.0,
                orders: 160,
                customers: 38,
            },
        ],
    }
}

/// Recent sales listing shown in sample mode (one fully populated sale)
pub fn sample_sales(now: DateTime<Utc>) -> Vec<Sale> {
    vec![Sale {
        id: "1".to_string(),
        customer_id: Some("1".to_string()),
        product_id: Some("1".to_string()),
        quantity: 2,
        unit_price: 999.0,
        discount_percent: 5.0,
        total_amount: 1898.1,
        sale_date: now,
        sales_rep: None,
        notes: None,
        created_at: Some(now),
        customer: Some(demo_customer(now)),
        product: Some(demo_product(now)),
    }]
}

/// Synthetic tables for exercising the aggregator end to end
#[derive(Debug, Clone)]
pub struct SampleCatalog {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    /// Sales with snapshots attached
    pub sales: Vec<Sale>,
}

const CATALOG_SALES: usize = 240;
const CATALOG_DAYS: usize = 60;

/// Deterministic catalog: one customer per region, one product per
/// category, and sales spread over the 60 days ending at `now`
pub fn sample_catalog(now: DateTime<Utc>) -> SampleCatalog {
    let customer_names = [
        "Alice Johnson",
        "Bob Martinez",
        "Chen Wei",
        "Dana Okafor",
        "Emil Novak",
    ];
    let customer_types = [
        CustomerType::Individual,
        CustomerType::Business,
        CustomerType::Enterprise,
    ];

    let customers: Vec<Customer> = Region::ALL
        .iter()
        .zip(customer_names)
        .enumerate()
        .map(|(i, (region, name))| Customer {
            id: format!("cust-{}", i + 1),
            name: name.to_string(),
            email: format!(
                "{}@example.com",
                name.to_lowercase().replace(' ', ".")
            ),
            region: Some(*region),
            customer_type: customer_types[i % customer_types.len()],
            phone: None,
            address: None,
            city: None,
            state: None,
            country: "USA".to_string(),
            created_at: Some(now),
            updated_at: Some(now),
        })
        .collect();

    let product_specs = [
        ("Noise-Cancelling Headphones", "ELEC-NCH-01", 249.0, 150.0),
        ("Merino Wool Sweater", "CLTH-MWS-02", 89.0, 40.0),
        ("Cordless Drill Set", "HOME-CDS-03", 129.0, 80.0),
        ("Carbon Tennis Racket", "SPRT-CTR-04", 179.0, 95.0),
        ("Rust in Action", "BOOK-RIA-05", 49.0, 22.0),
        ("Vitamin C Serum", "BEAU-VCS-06", 35.0, 9.0),
        ("Dash Camera 4K", "AUTO-DC4-07", 159.0, 90.0),
    ];

    let products: Vec<Product> = Category::ALL
        .iter()
        .zip(product_specs)
        .enumerate()
        .map(|(i, (category, (name, sku, price, cost)))| Product {
            id: format!("prod-{}", i + 1),
            name: name.to_string(),
            sku: sku.to_string(),
            category: Some(*category),
            subcategory: None,
            price,
            cost,
            stock_quantity: 20 + (i as u32 * 15),
            description: None,
            brand: None,
            is_active: true,
            created_at: Some(now),
            updated_at: Some(now),
        })
        .collect();

    let sales = (0..CATALOG_SALES)
        .map(|i| {
            let customer = &customers[i % customers.len()];
            let product = &products[(i * 3 + i / 7) % products.len()];
            let quantity = 1 + (i % 3) as u32;
            let discount_percent = ((i % 4) * 5) as f64;
            let gross = quantity as f64 * product.price * (1.0 - discount_percent / 100.0);
            let sale_date = now
                - Duration::days((i % CATALOG_DAYS) as i64)
                - Duration::hours((i % 9) as i64);

            Sale {
                id: format!("sale-{:04}", i + 1),
                customer_id: Some(customer.id.clone()),
                product_id: Some(product.id.clone()),
                quantity,
                unit_price: product.price,
                discount_percent,
                total_amount: (gross * 100.0).round() / 100.0,
                sale_date,
                sales_rep: None,
                notes: None,
                created_at: Some(sale_date),
                customer: Some(customer.clone()),
                product: Some(product.clone()),
            }
        })
        .collect();

    SampleCatalog {
        customers,
        products,
        sales,
    }
}
