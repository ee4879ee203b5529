//! Backend records: sales, customers, products
//!
//! Field names follow the backend's snake_case columns so rows decode
//! straight from the REST payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lenient::{f64_or_zero, known_or_none, u32_or_zero};

/// Sales region of a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    North,
    South,
    East,
    West,
    Central,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::North,
        Region::South,
        Region::East,
        Region::West,
        Region::Central,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::North => "North",
            Region::South => "South",
            Region::East => "East",
            Region::West => "West",
            Region::Central => "Central",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerType {
    Individual,
    Business,
    Enterprise,
}

impl CustomerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerType::Individual => "Individual",
            CustomerType::Business => "Business",
            CustomerType::Enterprise => "Enterprise",
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
    Sports,
    Books,
    Beauty,
    Automotive,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Electronics,
        Category::Clothing,
        Category::HomeAndGarden,
        Category::Sports,
        Category::Books,
        Category::Beauty,
        Category::Automotive,
    ];

    /// Display label, identical to the wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::HomeAndGarden => "Home & Garden",
            Category::Sports => "Sports",
            Category::Books => "Books",
            Category::Beauty => "Beauty",
            Category::Automotive => "Automotive",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Customer record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// `None` when the backend sends null or a label outside [`Region::ALL`]
    #[serde(default, deserialize_with = "known_or_none")]
    pub region: Option<Region>,
    pub customer_type: CustomerType,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sku: String,
    /// `None` when the backend sends null or a label outside [`Category::ALL`]
    #[serde(default, deserialize_with = "known_or_none")]
    pub category: Option<Category>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub price: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub cost: f64,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub stock_quantity: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl Product {
    /// Unit margin (price minus cost)
    pub fn margin(&self) -> f64 {
        self.price - self.cost
    }
}

/// Sale fact record
///
/// `total_amount` is stored independently of `quantity * unit_price` and is
/// the revenue figure used everywhere. The nested `customer` / `product`
/// snapshots are only present when the query embeds them; grouping always
/// keys off `customer_id` / `product_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default, deserialize_with = "u32_or_zero")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub unit_price: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub discount_percent: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_amount: f64,
    pub sale_date: DateTime<Utc>,
    #[serde(default)]
    pub sales_rep: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub product: Option<Product>,
}

impl Sale {
    /// Amount implied by quantity, price and discount.
    ///
    /// Informational only: aggregation trusts `total_amount`.
    pub fn expected_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price * (1.0 - self.discount_percent / 100.0)
    }

    /// Region of the embedded customer snapshot, if any
    pub fn region(&self) -> Option<Region> {
        self.customer.as_ref().and_then(|c| c.region)
    }

    /// Category of the embedded product snapshot, if any
    pub fn category(&self) -> Option<Category> {
        self.product.as_ref().and_then(|p| p.category)
    }
}
