//! Export functionality for analytics summaries and sales listings
//!
//! Provides simple, testable export with proper error handling.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use salesboard_types::{AnalyticsSummary, Sale, UNKNOWN_GROUP};

/// Create `path`'s parent directory and open a buffered writer on it
fn create_writer(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Quote a CSV field, doubling embedded quotes
fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Export a full summary as pretty-printed JSON (camelCase keys)
///
/// # Examples
///
/// ```no_run
/// use salesboard_core::export::export_summary_to_json;
/// use salesboard_core::types::AnalyticsSummary;
/// use std::path::Path;
///
/// let summary = AnalyticsSummary::default();
/// export_summary_to_json(&summary, Path::new("summary.json")).unwrap();
/// ```
pub fn export_summary_to_json(summary: &AnalyticsSummary, path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(summary).context("Failed to serialize summary to JSON")?;

    let mut writer = create_writer(path)?;
    writer
        .write_all(json.as_bytes())
        .with_context(|| format!("Failed to write JSON file: {}", path.display()))?;
    writer.flush().context("Failed to flush JSON writer")?;

    Ok(())
}

/// Export the daily revenue series
///
/// CSV columns: Date, Revenue, Orders (oldest first)
pub fn export_daily_revenue_to_csv(summary: &AnalyticsSummary, path: &Path) -> Result<()> {
    let mut writer = create_writer(path)?;

    writeln!(writer, "Date,Revenue,Orders").context("Failed to write CSV header")?;

    for day in &summary.daily_revenue {
        writeln!(writer, "\"{}\",{:.2},{}", day.date, day.revenue, day.orders)
            .with_context(|| format!("Failed to write row for {}", day.date))?;
    }

    writer.flush().context("Failed to flush CSV writer")?;

    Ok(())
}

/// Export the top products table
///
/// CSV columns: Rank, Product, SKU, Category, Revenue, Quantity, Orders.
/// Products without a snapshot are written with their id and `Unknown` category.
pub fn export_top_products_to_csv(summary: &AnalyticsSummary, path: &Path) -> Result<()> {
    let mut writer = create_writer(path)?;

    writeln!(writer, "Rank,Product,SKU,Category,Revenue,Quantity,Orders")
        .context("Failed to write CSV header")?;

    for (rank, item) in summary.top_products.iter().enumerate() {
        let (name, sku, category) = match &item.product {
            Some(p) => (
                p.name.clone(),
                p.sku.clone(),
                p.category.map_or(UNKNOWN_GROUP, |c| c.as_str()),
            ),
            None => (
                item.product_id.clone().unwrap_or_default(),
                String::new(),
                UNKNOWN_GROUP,
            ),
        };

        writeln!(
            writer,
            "{},{},{},{},{:.2},{},{}",
            rank + 1,
            csv_field(&name),
            csv_field(&sku),
            csv_field(category),
            item.revenue,
            item.quantity,
            item.orders
        )
        .with_context(|| format!("Failed to write row for product rank {}", rank + 1))?;
    }

    writer.flush().context("Failed to flush CSV writer")?;

    Ok(())
}

/// Export a sales listing
///
/// CSV columns: Date, Sale ID, Customer, Product, Quantity, Unit Price, Discount %, Total
pub fn export_sales_to_csv(sales: &[Sale], path: &Path) -> Result<()> {
    let mut writer = create_writer(path)?;

    writeln!(
        writer,
        "Date,Sale ID,Customer,Product,Quantity,Unit Price,Discount %,Total"
    )
    .context("Failed to write CSV header")?;

    for sale in sales {
        let customer = sale
            .customer
            .as_ref()
            .map(|c| c.name.clone())
            .or_else(|| sale.customer_id.clone())
            .unwrap_or_default();
        let product = sale
            .product
            .as_ref()
            .map(|p| p.name.clone())
            .or_else(|| sale.product_id.clone())
            .unwrap_or_default();

        writeln!(
            writer,
            "\"{}\",{},{},{},{},{:.2},{},{:.2}",
            sale.sale_date.format("%Y-%m-%d %H:%M"),
            csv_field(&sale.id),
            csv_field(&customer),
            csv_field(&product),
            sale.quantity,
            sale.unit_price,
            sale.discount_percent,
            sale.total_amount
        )
        .with_context(|| format!("Failed to write row for sale {}", sale.id))?;
    }

    writer.flush().context("Failed to flush CSV writer")?;

    Ok(())
}
