//! CLI rendering and argument helpers
//!
//! Date span parsing plus comfy-table renderers for the summary, sales,
//! customers and products commands.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use salesboard_core::types::{Customer, Product, Sale, UNKNOWN_GROUP};
use salesboard_core::{AnalyticsReport, DataSource, DateRange, Page};

// ============================================================================
// Date Span
// ============================================================================

/// Relative or absolute start of a reporting window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateSpan {
    Days(u32),
    Months(u32),
    Years(u32),
    Since(DateTime<Utc>),
}

impl DateSpan {
    /// Parse from string: "7d", "30d", "3m", "1y", "YYYY-MM-DD"
    pub fn parse(s: &str) -> Result<Self> {
        if let Some(stripped) = s.strip_suffix('d') {
            let days = stripped
                .parse::<u32>()
                .context("Invalid days format (expected: 7d)")?;
            return Ok(DateSpan::Days(days));
        }

        if let Some(stripped) = s.strip_suffix('m') {
            let months = stripped
                .parse::<u32>()
                .context("Invalid months format (expected: 3m)")?;
            return Ok(DateSpan::Months(months));
        }

        if let Some(stripped) = s.strip_suffix('y') {
            let years = stripped
                .parse::<u32>()
                .context("Invalid years format (expected: 1y)")?;
            return Ok(DateSpan::Years(years));
        }

        let date =
            chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").context("Invalid date format")?;
        let datetime = date.and_hms_opt(0, 0, 0).context("Invalid time")?.and_utc();
        Ok(DateSpan::Since(datetime))
    }

    /// Window from the span start up to `now`
    pub fn to_range(self, now: DateTime<Utc>) -> Result<DateRange> {
        let range = match self {
            DateSpan::Days(d) => DateRange::last_days(d, now)?,
            DateSpan::Months(m) => DateRange::last_days(m.saturating_mul(30), now)?,
            DateSpan::Years(y) => DateRange::last_days(y.saturating_mul(365), now)?,
            DateSpan::Since(start) => DateRange::new(start, now)?,
        };
        Ok(range)
    }
}

// ============================================================================
// Renderers
// ============================================================================

fn new_table(headers: &[&str], no_color: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if no_color {
        table.set_header(headers.to_vec());
    } else {
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }
    table
}

fn growth_cell(pct: f64, no_color: bool) -> Cell {
    let cell = Cell::new(format_growth(pct));
    if no_color {
        cell
    } else if pct > 0.0 {
        cell.fg(Color::Green)
    } else if pct < 0.0 {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

/// Banner shown above output computed from the sample dataset
pub fn source_banner(source: &DataSource) -> Option<String> {
    match source {
        DataSource::Live => None,
        DataSource::Sample { reason } => Some(format!("⚠ {}", reason)),
    }
}

/// Format the analytics report (human or JSON)
pub fn format_report(report: &AnalyticsReport, json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
    }

    let summary = &report.summary;
    let mut out = format!(
        "Sales summary {} (compared with {})\n",
        report.range, report.previous_range
    );

    let mut headline = new_table(
        &[
            "Revenue",
            "Orders",
            "Avg order",
            "Customers",
            "Revenue Δ",
            "Orders Δ",
        ],
        no_color,
    );
    headline.add_row(Row::from(vec![
        Cell::new(format_currency(summary.total_revenue)),
        Cell::new(summary.total_orders),
        Cell::new(format_currency(summary.avg_order_value)),
        Cell::new(summary.total_customers),
        growth_cell(summary.revenue_growth, no_color),
        growth_cell(summary.order_growth, no_color),
    ]));
    out.push_str(&headline.to_string());

    if summary.is_empty() {
        out.push_str("\n\nNo sales in this period.");
        return out;
    }

    let mut products = new_table(
        &["#", "Product", "Category", "Revenue", "Qty", "Orders"],
        no_color,
    );
    for (rank, item) in summary.top_products.iter().enumerate() {
        let (name, category) = match &item.product {
            Some(p) => (
                truncate(&p.name, 32),
                p.category.map_or(UNKNOWN_GROUP, |c| c.as_str()),
            ),
            None => (
                item.product_id.clone().unwrap_or_else(|| "-".to_string()),
                UNKNOWN_GROUP,
            ),
        };
        products.add_row(Row::from(vec![
            (rank + 1).to_string(),
            name,
            category.to_string(),
            format_currency(item.revenue),
            item.quantity.to_string(),
            item.orders.to_string(),
        ]));
    }
    out.push_str("\n\nTop products\n");
    out.push_str(&products.to_string());

    let mut customers = new_table(
        &["#", "Customer", "Region", "Revenue", "Orders", "Avg order"],
        no_color,
    );
    for (rank, item) in summary.top_customers.iter().enumerate() {
        let (name, region) = match &item.customer {
            Some(c) => (
                truncate(&c.name, 32),
                c.region.map_or(UNKNOWN_GROUP, |r| r.as_str()),
            ),
            None => (
                item.customer_id.clone().unwrap_or_else(|| "-".to_string()),
                UNKNOWN_GROUP,
            ),
        };
        customers.add_row(Row::from(vec![
            (rank + 1).to_string(),
            name,
            region.to_string(),
            format_currency(item.revenue),
            item.orders.to_string(),
            format_currency(item.avg_order_value),
        ]));
    }
    out.push_str("\n\nTop customers\n");
    out.push_str(&customers.to_string());

    let mut regions = new_table(&["Region", "Revenue", "Share", "Orders", "Customers"], no_color);
    for (region, (_, share)) in summary.region_data.iter().zip(summary.region_share()) {
        regions.add_row(Row::from(vec![
            region.region.clone(),
            format_currency(region.revenue),
            format!("{:.1}%", share),
            region.orders.to_string(),
            region.customers.to_string(),
        ]));
    }
    out.push_str("\n\nBy region\n");
    out.push_str(&regions.to_string());

    let mut categories = new_table(&["Category", "Revenue", "Orders", "Products"], no_color);
    for category in &summary.category_data {
        categories.add_row(Row::from(vec![
            category.category.clone(),
            format_currency(category.revenue),
            category.orders.to_string(),
            category.products.to_string(),
        ]));
    }
    out.push_str("\n\nBy category\n");
    out.push_str(&categories.to_string());

    let mut months = new_table(&["Month", "Revenue", "Orders", "Customers"], no_color);
    for month in &summary.monthly_trends {
        months.add_row(Row::from(vec![
            month.month.clone(),
            format_currency(month.revenue),
            month.orders.to_string(),
            month.customers.to_string(),
        ]));
    }
    out.push_str("\n\nMonthly trend\n");
    out.push_str(&months.to_string());

    out
}

/// Format one page of recent sales (human or JSON)
pub fn format_sales_page(page: &Page<Sale>, json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(page).unwrap_or_else(|_| "{}".to_string());
    }

    if page.items.is_empty() {
        return "No sales found.".to_string();
    }

    let mut table = new_table(
        &["Date", "Customer", "Product", "Qty", "Unit price", "Discount", "Total"],
        no_color,
    );
    for sale in &page.items {
        let customer = sale
            .customer
            .as_ref()
            .map(|c| truncate(&c.name, 24))
            .or_else(|| sale.customer_id.clone())
            .unwrap_or_else(|| "-".to_string());
        let product = sale
            .product
            .as_ref()
            .map(|p| truncate(&p.name, 28))
            .or_else(|| sale.product_id.clone())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(Row::from(vec![
            sale.sale_date.format("%Y-%m-%d %H:%M").to_string(),
            customer,
            product,
            sale.quantity.to_string(),
            format_currency(sale.unit_price),
            format!("{}%", sale.discount_percent),
            format_currency(sale.total_amount),
        ]));
    }

    format!(
        "{}\nPage {} of {} ({} sales)",
        table,
        page.page + 1,
        page.total_pages.max(1),
        page.total
    )
}

/// Format the customer directory (human or JSON)
pub fn format_customers(customers: &[Customer], json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(customers).unwrap_or_else(|_| "[]".to_string());
    }

    if customers.is_empty() {
        return "No customers found.".to_string();
    }

    let mut table = new_table(&["Name", "Email", "Region", "Type", "Country"], no_color);
    for customer in customers {
        table.add_row(Row::from(vec![
            truncate(&customer.name, 32),
            customer.email.clone(),
            customer.region.map_or(UNKNOWN_GROUP, |r| r.as_str()).to_string(),
            customer.customer_type.to_string(),
            customer.country.clone(),
        ]));
    }
    table.to_string()
}

/// Format the active product catalog (human or JSON)
pub fn format_products(products: &[Product], json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(products).unwrap_or_else(|_| "[]".to_string());
    }

    if products.is_empty() {
        return "No products found.".to_string();
    }

    let mut table = new_table(&["Name", "SKU", "Category", "Price", "Margin", "Stock"], no_color);
    for product in products {
        table.add_row(Row::from(vec![
            truncate(&product.name, 32),
            product.sku.clone(),
            product.category.map_or(UNKNOWN_GROUP, |c| c.as_str()).to_string(),
            format_currency(product.price),
            format_currency(product.margin()),
            product.stock_quantity.to_string(),
        ]));
    }
    table.to_string()
}

// ============================================================================
// Utilities
// ============================================================================

/// `$1,234.56`, with a leading minus for negative amounts
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// Signed percentage with one decimal: `+12.5%`, `-3.0%`, `0.0%`
pub fn format_growth(pct: f64) -> String {
    if pct > 0.0 {
        format!("+{:.1}%", pct)
    } else {
        format!("{:.1}%", pct)
    }
}

fn truncate(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        s.chars().take(max - 1).collect::<String>() + "…"
    }
}

// ============================================================================
// Tests
// ============================================================================
